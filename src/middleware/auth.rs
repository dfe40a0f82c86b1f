use crate::dto::token_dto::TokenKind;
use crate::entity::caller::{Caller, Role};
use crate::error::{AppError, token_error::TokenError};
use crate::service::token_service::TokenServiceTrait;
use crate::state::token_state::TokenState;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::{extract::Request, middleware::Next, response::IntoResponse};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};

/// Credentials as they arrived in the `Authorization` header.
#[derive(PartialEq, Eq)]
pub enum PresentedCredentials {
    Basic { login: String, password: String },
    Bearer(String),
}

impl std::fmt::Debug for PresentedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresentedCredentials::Basic { login, .. } => write!(f, "Basic({login}, [REDACTED])"),
            PresentedCredentials::Bearer(_) => write!(f, "Bearer([REDACTED])"),
        }
    }
}

impl PresentedCredentials {
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, TokenError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .ok_or(TokenError::Missing)?
            .to_str()
            .map_err(|_| TokenError::Invalid("authorization header is not ASCII".to_string()))?;

        let (scheme, credentials) = value
            .trim()
            .split_once(' ')
            .ok_or_else(|| TokenError::Invalid("malformed authorization header".to_string()))?;
        let credentials = credentials.trim();

        if scheme.eq_ignore_ascii_case("Basic") {
            Self::decode_basic(credentials)
        } else if scheme.eq_ignore_ascii_case("Bearer") && !credentials.is_empty() {
            Ok(PresentedCredentials::Bearer(credentials.to_string()))
        } else {
            Err(TokenError::Invalid("unsupported authorization scheme".to_string()))
        }
    }

    fn decode_basic(encoded: &str) -> Result<Self, TokenError> {
        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| TokenError::Invalid("basic credentials are not base64".to_string()))?;
        let decoded =
            String::from_utf8(decoded).map_err(|_| TokenError::Invalid("basic credentials are not UTF-8".to_string()))?;
        let (login, password) = decoded
            .split_once(':')
            .ok_or_else(|| TokenError::Invalid("basic credentials lack a separator".to_string()))?;

        if login.is_empty() {
            return Err(TokenError::Invalid("basic credentials have an empty login".to_string()));
        }
        Ok(PresentedCredentials::Basic {
            login: login.to_string(),
            password: password.to_string(),
        })
    }
}

/// Resolves the caller from Basic or Bearer credentials and attaches it to
/// the request. Anything that does not resolve ends the request with 401.
pub async fn authenticate(
    State(state): State<TokenState>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, AppError> {
    let presented = PresentedCredentials::from_headers(req.headers()).inspect_err(|e| {
        warn!("SECURITY: Rejected request to {} without usable credentials: {}", req.uri().path(), e);
    })?;

    let caller = match presented {
        PresentedCredentials::Basic { login, password } => {
            if state.auth_service.is_admin(&login, &password) {
                Caller::new(login, Role::Admin)
            } else {
                let credential = state.auth_service.authenticate(&login, &password).await.inspect_err(|e| {
                    warn!("SECURITY: Basic authentication failed for {}: {}", login, e);
                })?;
                Caller::new(credential.identity, Role::User)
            }
        }
        PresentedCredentials::Bearer(token) => {
            let claims = state.token_service.parse_kind(&token, TokenKind::Access).inspect_err(|e| {
                warn!("SECURITY: Bearer token rejected: {}", e);
            })?;
            let role = if claims.adm { Role::Admin } else { Role::User };
            Caller::new(claims.sub, role)
        }
    };

    info!("SECURITY: Authenticated {} as {}", caller.identity, caller.role);
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(PresentedCredentials::from_headers(&HeaderMap::new()), Err(TokenError::Missing));
    }

    #[test]
    fn test_basic_credentials() {
        let encoded = STANDARD.encode("a@x.com:pa:ss");
        let parsed = PresentedCredentials::from_headers(&headers(&format!("Basic {encoded}"))).unwrap();
        assert_eq!(
            parsed,
            PresentedCredentials::Basic {
                login: "a@x.com".to_string(),
                password: "pa:ss".to_string(),
            }
        );
    }

    #[test]
    fn test_bearer_credentials() {
        let parsed = PresentedCredentials::from_headers(&headers("bearer abc.def.ghi")).unwrap();
        assert_eq!(parsed, PresentedCredentials::Bearer("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_garbled_credentials() {
        for value in ["Basic !!!", "Basic", "Bearer ", "Digest abc", "Basic bm9zZXBhcmF0b3I="] {
            assert!(
                matches!(PresentedCredentials::from_headers(&headers(value)), Err(TokenError::Invalid(_))),
                "{value} should be rejected"
            );
        }
    }
}
