pub mod credential_repository;
pub mod memory;
pub mod postgres;
pub mod record_repository;

use crate::config::database::Database;
use crate::entity::checkpoint::Checkpoint;
use crate::entity::company::Company;
use crate::entity::document::Document;
use crate::entity::employee::Employee;
use crate::entity::info_card::InfoCard;
use credential_repository::CredentialStore;
use memory::MemoryDatabase;
use postgres::credential_repository::PgCredentialStore;
use postgres::record_repository::PgRecordStore;
use record_repository::{CompanyStore, RecordStore};
use std::sync::Arc;

/// Every store the application needs, behind trait objects so the backend is
/// picked once at startup.
#[derive(Clone)]
pub struct Repositories {
    pub credentials: Arc<dyn CredentialStore>,
    pub companies: Arc<dyn CompanyStore>,
    pub employees: Arc<dyn RecordStore<Employee>>,
    pub info_cards: Arc<dyn RecordStore<InfoCard>>,
    pub documents: Arc<dyn RecordStore<Document>>,
    pub checkpoints: Arc<dyn RecordStore<Checkpoint>>,
}

impl Repositories {
    pub fn in_memory(db: &MemoryDatabase) -> Self {
        Self {
            credentials: db.credentials.clone(),
            companies: db.companies.clone(),
            employees: db.credentials.clone(),
            info_cards: db.info_cards.clone(),
            documents: db.documents.clone(),
            checkpoints: db.checkpoints.clone(),
        }
    }

    pub fn postgres(db: &Arc<Database>) -> Self {
        Self {
            credentials: Arc::new(PgCredentialStore::new(db)),
            companies: Arc::new(PgRecordStore::<Company>::new(db)),
            employees: Arc::new(PgRecordStore::<Employee>::new(db)),
            info_cards: Arc::new(PgRecordStore::<InfoCard>::new(db)),
            documents: Arc::new(PgRecordStore::<Document>::new(db)),
            checkpoints: Arc::new(PgRecordStore::<Checkpoint>::new(db)),
        }
    }
}
