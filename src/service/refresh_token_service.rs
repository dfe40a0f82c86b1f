use crate::config::settings::{AdminCredential, Settings};
use crate::dto::token_dto::{TokenClaimsDto, TokenKind, TokenPair};
use crate::entity::caller::Role;
use crate::error::auth_error::AuthError;
use crate::error::store_error::StoreError;
use crate::error::token_error::TokenError;
use crate::repository::Repositories;
use crate::repository::credential_repository::CredentialStore;
use crate::service::admin_session::AdminSession;
use crate::service::token_service::{TokenService, TokenServiceTrait};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{info, warn};

/// Hex SHA-256 of a refresh token. Only this digest is ever stored.
pub fn refresh_token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

pub(crate) fn refresh_expiry(claims: &TokenClaimsDto) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(claims.exp, 0)
        .ok_or_else(|| TokenError::Creation("refresh expiry out of range".to_string()))
}

/// Exchanges a refresh token for a new pair, at most once per token.
#[derive(Clone)]
pub struct RefreshTokenService {
    credentials: Arc<dyn CredentialStore>,
    tokens: TokenService,
    admin: AdminCredential,
    admin_session: AdminSession,
}

impl RefreshTokenService {
    pub fn new(
        repositories: &Repositories,
        settings: &Settings,
        tokens: TokenService,
        admin_session: AdminSession,
    ) -> Self {
        Self {
            credentials: Arc::clone(&repositories.credentials),
            tokens,
            admin: settings.admin.clone(),
            admin_session,
        }
    }

    pub async fn refresh(&self, presented: &str) -> Result<TokenPair, AuthError> {
        let claims = self.tokens.parse_kind(presented, TokenKind::Refresh)?;
        let presented_hash = refresh_token_digest(presented);

        if claims.adm {
            return self.refresh_admin(&claims, &presented_hash).await;
        }

        let credential = match self.credentials.get_credential_by_identity(&claims.sub).await {
            Ok(credential) => credential,
            Err(StoreError::NotFound) => return Err(AuthError::UnknownIdentity),
            Err(e) => return Err(AuthError::Store(e)),
        };

        if !credential.holds_refresh_token(&presented_hash, Utc::now()) {
            warn!("SECURITY: Stale or superseded refresh token presented for {}", claims.sub);
            return Err(AuthError::RefreshMismatch);
        }

        let (pair, refresh_claims) = self.tokens.issue_pair(&credential.identity, Role::User)?;
        match self
            .credentials
            .swap_refresh_token(
                &credential.identity,
                &presented_hash,
                &refresh_token_digest(&pair.refresh_token),
                refresh_expiry(&refresh_claims)?,
            )
            .await
        {
            Ok(()) => {
                info!("SECURITY: Refresh token rotated for {}", credential.identity);
                Ok(pair)
            }
            Err(StoreError::Conflict) => {
                warn!("SECURITY: Concurrent refresh lost the race for {}", credential.identity);
                Err(AuthError::RefreshMismatch)
            }
            Err(StoreError::NotFound) => Err(AuthError::UnknownIdentity),
            Err(e) => Err(AuthError::Store(e)),
        }
    }

    async fn refresh_admin(&self, claims: &TokenClaimsDto, presented_hash: &str) -> Result<TokenPair, AuthError> {
        if claims.sub != self.admin.login {
            warn!("SECURITY: Privileged refresh token for a retired admin login");
            return Err(AuthError::RefreshMismatch);
        }

        let (pair, refresh_claims) = self.tokens.issue_pair(&self.admin.login, Role::Admin)?;
        let rotated = self
            .admin_session
            .swap(
                presented_hash,
                &refresh_token_digest(&pair.refresh_token),
                refresh_expiry(&refresh_claims)?,
            )
            .await;

        if !rotated {
            warn!("SECURITY: Stale privileged refresh token presented");
            return Err(AuthError::RefreshMismatch);
        }
        info!("SECURITY: Privileged refresh token rotated");
        Ok(pair)
    }

    /// Ends the session the refresh token belongs to.
    pub async fn logout(&self, presented: &str) -> Result<(), AuthError> {
        let claims = self.tokens.parse_kind(presented, TokenKind::Refresh)?;
        let presented_hash = refresh_token_digest(presented);

        let cleared = if claims.adm {
            self.admin_session.clear(&presented_hash).await
        } else {
            match self.credentials.clear_refresh_token(&claims.sub, &presented_hash).await {
                Ok(()) => true,
                Err(StoreError::Conflict) | Err(StoreError::NotFound) => false,
                Err(e) => return Err(AuthError::Store(e)),
            }
        };

        if !cleared {
            warn!("SECURITY: Logout with an inactive refresh token for {}", claims.sub);
            return Err(AuthError::RefreshMismatch);
        }
        info!("SECURITY: Logged out {}", claims.sub);
        Ok(())
    }
}
