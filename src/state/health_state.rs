use crate::config::database::Database;
use crate::config::settings::StorageBackend;
use std::sync::Arc;

#[derive(Clone)]
pub struct HealthState {
    pub(crate) backend: StorageBackend,
    pub(crate) database: Option<Arc<Database>>,
}

impl HealthState {
    pub fn new(backend: StorageBackend, database: Option<Arc<Database>>) -> Self {
        Self { backend, database }
    }
}
