use crate::repository::Repositories;
use crate::service::auth_service::AuthService;

#[derive(Clone)]
pub struct RecordState {
    pub(crate) repositories: Repositories,
    pub(crate) auth_service: AuthService,
}

impl RecordState {
    pub fn new(repositories: Repositories, auth_service: AuthService) -> Self {
        Self {
            repositories,
            auth_service,
        }
    }
}
