use crate::service::auth_service::AuthService;
use crate::service::token_service::TokenService;

/// What the authentication middleware needs: token parsing for Bearer
/// credentials and password checks for Basic ones.
#[derive(Clone)]
pub struct TokenState {
    pub(crate) token_service: TokenService,
    pub(crate) auth_service: AuthService,
}

impl TokenState {
    pub fn new(token_service: TokenService, auth_service: AuthService) -> Self {
        Self {
            token_service,
            auth_service,
        }
    }
}
