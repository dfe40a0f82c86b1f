use crate::config::settings::Settings;
use crate::dto::token_dto::{TokenClaimsDto, TokenKind, TokenPair};
use crate::entity::caller::Role;
use crate::error::token_error::TokenError;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

pub const TOKEN_ISSUER: &str = "passdesk";
pub const MIN_SECRET_BYTES: usize = 32;

/// A freshly signed token together with the claims it carries.
#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaimsDto,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

pub trait TokenServiceTrait {
    fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Result<Self, TokenError>
    where
        Self: Sized;
    fn issue(&self, subject: &str, kind: TokenKind, is_admin: bool, ttl: Duration) -> Result<IssuedToken, TokenError>;
    fn issue_pair(&self, subject: &str, role: Role) -> Result<(TokenPair, TokenClaimsDto), TokenError>;
    fn parse(&self, token: &str) -> Result<TokenClaimsDto, TokenError>;
    fn parse_kind(&self, token: &str, expected: TokenKind) -> Result<TokenClaimsDto, TokenError>;
}

impl TokenService {
    pub fn from_settings(settings: &Settings) -> Result<Self, TokenError> {
        Self::new(&settings.jwt_secret, settings.access_token_ttl, settings.refresh_token_ttl)
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        // Expiry is exact; a token is dead the second its `exp` passes.
        validation.leeway = 0;
        validation
    }
}

impl TokenServiceTrait for TokenService {
    fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::WeakSecret(MIN_SECRET_BYTES));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        })
    }

    fn issue(&self, subject: &str, kind: TokenKind, is_admin: bool, ttl: Duration) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Creation("Token expiration calculation overflow".to_string()))?;

        let claims = TokenClaimsDto {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::now_v7().to_string(),
            iss: TOKEN_ISSUER.to_string(),
            typ: kind,
            adm: is_admin,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Creation(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    /// Issues an access/refresh pair. The refresh claims are returned too so
    /// callers can persist the expiry next to the digest.
    fn issue_pair(&self, subject: &str, role: Role) -> Result<(TokenPair, TokenClaimsDto), TokenError> {
        let is_admin = role == Role::Admin;
        let access = self.issue(subject, TokenKind::Access, is_admin, self.access_ttl)?;
        let refresh = self.issue(subject, TokenKind::Refresh, is_admin, self.refresh_ttl)?;

        let pair = TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            access_expires_at: access.claims.exp,
            refresh_expires_at: refresh.claims.exp,
            is_admin,
        };
        Ok((pair, refresh.claims))
    }

    fn parse(&self, token: &str) -> Result<TokenClaimsDto, TokenError> {
        decode::<TokenClaimsDto>(token, &self.decoding_key, &Self::validation())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }

    fn parse_kind(&self, token: &str, expected: TokenKind) -> Result<TokenClaimsDto, TokenError> {
        let claims = self.parse(token)?;
        if claims.typ != expected {
            return Err(TokenError::WrongKind);
        }
        Ok(claims)
    }
}
