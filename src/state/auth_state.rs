use crate::service::auth_service::AuthService;
use crate::service::refresh_token_service::RefreshTokenService;

#[derive(Clone)]
pub struct AuthState {
    pub(crate) auth_service: AuthService,
    pub(crate) refresh_token_service: RefreshTokenService,
}

impl AuthState {
    pub fn new(auth_service: AuthService, refresh_token_service: RefreshTokenService) -> Self {
        Self {
            auth_service,
            refresh_token_service,
        }
    }
}
