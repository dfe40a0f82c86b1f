use crate::config::settings::{AdminCredential, Settings};
use crate::dto::credential_dto::RegisterDto;
use crate::dto::token_dto::TokenPair;
use crate::entity::caller::Role;
use crate::entity::credential::{Credential, NewCredential};
use crate::error::auth_error::AuthError;
use crate::error::store_error::StoreError;
use crate::repository::Repositories;
use crate::repository::credential_repository::CredentialStore;
use crate::repository::record_repository::CompanyStore;
use crate::service::admin_session::AdminSession;
use crate::service::password_service::PasswordService;
use crate::service::refresh_token_service::{refresh_expiry, refresh_token_digest};
use crate::service::token_service::{TokenService, TokenServiceTrait};
use std::sync::Arc;
use tracing::{info, warn};

/// Registration, login and password checks for stored credentials, plus the
/// static privileged login.
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    companies: Arc<dyn CompanyStore>,
    passwords: PasswordService,
    tokens: TokenService,
    admin: AdminCredential,
    admin_session: AdminSession,
}

impl AuthService {
    pub fn new(
        repositories: &Repositories,
        settings: &Settings,
        tokens: TokenService,
        admin_session: AdminSession,
    ) -> Self {
        Self {
            credentials: Arc::clone(&repositories.credentials),
            companies: Arc::clone(&repositories.companies),
            passwords: PasswordService::new(settings.bcrypt_cost),
            tokens,
            admin: settings.admin.clone(),
            admin_session,
        }
    }

    pub fn is_admin(&self, login: &str, password: &str) -> bool {
        self.admin.matches(login, password)
    }

    /// Creates a credential and logs it in.
    pub async fn register(&self, payload: RegisterDto) -> Result<TokenPair, AuthError> {
        let identity = payload.identity.clone();

        if identity == self.admin.login {
            warn!("SECURITY: Registration rejected for reserved identity");
            return Err(AuthError::DuplicateIdentity);
        }

        if let Some(company_id) = payload.company_id {
            let exists = self.companies.company_exists(company_id).await.map_err(AuthError::Store)?;
            if !exists {
                warn!("SECURITY: Registration for {} references unknown company {}", identity, company_id);
                return Err(AuthError::Validation(format!("company {company_id} does not exist")));
            }
        }

        let password_hash = self.passwords.hash(&payload.password)?;
        let (pair, refresh_claims) = self.tokens.issue_pair(&identity, Role::User)?;

        let new_credential = NewCredential {
            identity: identity.clone(),
            password_hash,
            profile: payload.profile(),
            refresh_token_hash: Some(refresh_token_digest(&pair.refresh_token)),
            refresh_token_expires_at: Some(refresh_expiry(&refresh_claims)?),
        };

        match self.credentials.create_credential(new_credential).await {
            Ok(_) => {
                info!("SECURITY: Registered identity {}", identity);
                Ok(pair)
            }
            Err(StoreError::Duplicate) => {
                warn!("SECURITY: Registration rejected, identity {} already exists", identity);
                Err(AuthError::DuplicateIdentity)
            }
            Err(StoreError::MissingReference(reference)) => {
                warn!("SECURITY: Registration for {} violates {}", identity, reference);
                Err(AuthError::Validation(format!("unknown reference: {reference}")))
            }
            Err(e) => Err(AuthError::Store(e)),
        }
    }

    /// Checks a password against the stored digest without touching any state.
    pub async fn authenticate(&self, identity: &str, password: &str) -> Result<Credential, AuthError> {
        let credential = match self.credentials.get_credential_by_identity(identity).await {
            Ok(credential) => credential,
            Err(StoreError::NotFound) => {
                self.passwords.verify_decoy(password);
                return Err(AuthError::UnknownIdentity);
            }
            Err(e) => return Err(AuthError::Store(e)),
        };

        if !self.passwords.verify(&credential.password_hash, password)? {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(credential)
    }

    /// Issues a fresh pair, replacing whatever refresh token was active.
    pub async fn login(&self, identity: &str, password: &str) -> Result<TokenPair, AuthError> {
        if self.is_admin(identity, password) {
            let (pair, refresh_claims) = self.tokens.issue_pair(identity, Role::Admin)?;
            self.admin_session
                .store(&refresh_token_digest(&pair.refresh_token), refresh_expiry(&refresh_claims)?)
                .await;
            info!("SECURITY: Privileged login succeeded");
            return Ok(pair);
        }

        let credential = match self.authenticate(identity, password).await {
            Ok(credential) => credential,
            Err(e) => {
                warn!("SECURITY: Login failed for identity {}: {}", identity, e);
                return Err(e);
            }
        };

        let (pair, refresh_claims) = self.tokens.issue_pair(&credential.identity, Role::User)?;
        self.credentials
            .update_refresh_token(
                &credential.identity,
                &refresh_token_digest(&pair.refresh_token),
                refresh_expiry(&refresh_claims)?,
            )
            .await
            .map_err(AuthError::Store)?;

        info!("SECURITY: Login succeeded for identity {}", credential.identity);
        Ok(pair)
    }

    pub async fn delete_credential(&self, identity: &str) -> Result<(), AuthError> {
        self.credentials.delete_credential(identity).await.map_err(AuthError::Store)?;
        info!("SECURITY: Credential {} deleted", identity);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::settings::StorageBackend;
    use crate::entity::company::NewCompany;
    use crate::repository::memory::MemoryDatabase;
    use chrono::Duration;

    pub(crate) fn test_settings() -> Settings {
        Settings {
            server_address: "127.0.0.1".to_string(),
            server_port: 0,
            jwt_secret: "unit-test-secret-that-is-long-enough".to_string(),
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::hours(24),
            bcrypt_cost: 4,
            admin: AdminCredential::new("root", "root-password"),
            storage_backend: StorageBackend::Memory,
        }
    }

    pub(crate) fn register_dto(identity: &str, password: &str) -> RegisterDto {
        RegisterDto {
            identity: identity.to_string(),
            password: password.to_string(),
            full_name: None,
            company_id: None,
            post: None,
            date_of_birth: None,
        }
    }

    fn service(db: &MemoryDatabase) -> AuthService {
        let settings = test_settings();
        let tokens = TokenService::from_settings(&settings).unwrap();
        AuthService::new(&Repositories::in_memory(db), &settings, tokens, AdminSession::new())
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let db = MemoryDatabase::new();
        let service = service(&db);

        let registered = service.register(register_dto("a@x.com", "secret")).await.unwrap();
        assert!(!registered.is_admin);

        let pair = service.login("a@x.com", "secret").await.unwrap();
        assert_ne!(pair.refresh_token, registered.refresh_token);

        let stored = db.credentials.get("a@x.com").await.unwrap();
        assert_eq!(stored.refresh_token_hash, Some(refresh_token_digest(&pair.refresh_token)));
        assert_ne!(stored.password_hash, "secret");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_identity() {
        let db = MemoryDatabase::new();
        let service = service(&db);
        service.register(register_dto("a@x.com", "secret")).await.unwrap();

        assert!(matches!(service.login("a@x.com", "Secret").await, Err(AuthError::InvalidCredentials)));
        assert!(matches!(service.login("b@x.com", "secret").await, Err(AuthError::UnknownIdentity)));
    }

    #[tokio::test]
    async fn test_authenticate_leaves_refresh_token_alone() {
        let db = MemoryDatabase::new();
        let service = service(&db);
        service.register(register_dto("a@x.com", "secret")).await.unwrap();
        let before = db.credentials.get("a@x.com").await.unwrap().refresh_token_hash;

        service.authenticate("a@x.com", "secret").await.unwrap();

        let after = db.credentials.get("a@x.com").await.unwrap().refresh_token_hash;
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_unknown_identity_still_runs_the_hasher() {
        let db = MemoryDatabase::new();
        let service = service(&db);
        assert!(!service.passwords.decoy_used());

        let result = service.authenticate("ghost@x.com", "secret").await;

        assert!(matches!(result, Err(AuthError::UnknownIdentity)));
        assert!(service.passwords.decoy_used());
    }

    #[tokio::test]
    async fn test_overlong_password_cannot_log_in() {
        let db = MemoryDatabase::new();
        let service = service(&db);
        let password = "p".repeat(72);
        service.register(register_dto("a@x.com", &password)).await.unwrap();

        let longer = format!("{password}-and-more");
        assert!(matches!(service.login("a@x.com", &longer).await, Err(AuthError::Hashing(_))));
        service.login("a@x.com", &password).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_identity() {
        let db = MemoryDatabase::new();
        let service = service(&db);
        service.register(register_dto("a@x.com", "secret")).await.unwrap();

        let result = service.register(register_dto("a@x.com", "other")).await;
        assert!(matches!(result, Err(AuthError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_admin_login_is_reserved() {
        let db = MemoryDatabase::new();
        let service = service(&db);

        let result = service.register(register_dto("root", "anything")).await;
        assert!(matches!(result, Err(AuthError::DuplicateIdentity)));

        let pair = service.login("root", "root-password").await.unwrap();
        assert!(pair.is_admin);
        assert!(db.credentials.is_empty().await);
    }

    #[tokio::test]
    async fn test_register_checks_company() {
        let db = MemoryDatabase::new();
        let service = service(&db);
        let company = db
            .companies
            .create_company(NewCompany {
                name: "Orbita".to_string(),
                city: None,
            })
            .await
            .unwrap();

        let mut dto = register_dto("a@x.com", "secret");
        dto.company_id = Some(company.id + 100);
        assert!(matches!(service.register(dto.clone()).await, Err(AuthError::Validation(_))));

        dto.company_id = Some(company.id);
        service.register(dto).await.unwrap();
        assert_eq!(db.credentials.get("a@x.com").await.unwrap().company_id, Some(company.id));
    }

    #[tokio::test]
    async fn test_delete_credential() {
        let db = MemoryDatabase::new();
        let service = service(&db);
        service.register(register_dto("a@x.com", "secret")).await.unwrap();

        service.delete_credential("a@x.com").await.unwrap();
        assert!(matches!(service.login("a@x.com", "secret").await, Err(AuthError::UnknownIdentity)));
        assert!(matches!(
            service.delete_credential("a@x.com").await,
            Err(AuthError::Store(StoreError::NotFound))
        ));
    }
}
