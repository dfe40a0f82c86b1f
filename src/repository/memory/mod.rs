pub mod table;

use crate::entity::checkpoint::Checkpoint;
use crate::entity::company::{Company, NewCompany};
use crate::entity::credential::{Credential, NewCredential};
use crate::entity::document::Document;
use crate::entity::employee::Employee;
use crate::entity::info_card::InfoCard;
use crate::entity::record::Record;
use crate::error::store_error::StoreError;
use crate::repository::credential_repository::CredentialStore;
use crate::repository::record_repository::{CompanyStore, RecordStore};
use crate::service::query_builder::ListingQuery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use table::MemoryTable;

/// Process-local storage backend. Credentials are keyed by identity, every
/// other record by id.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    pub credentials: Arc<MemoryTable<String, Credential>>,
    pub companies: Arc<MemoryTable<i64, Company>>,
    pub info_cards: Arc<MemoryTable<i64, InfoCard>>,
    pub documents: Arc<MemoryTable<i64, Document>>,
    pub checkpoints: Arc<MemoryTable<i64, Checkpoint>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryTable<String, Credential> {
    async fn create_credential(&self, credential: NewCredential) -> Result<Credential, StoreError> {
        let identity = credential.identity.clone();
        self.insert_with(identity, |id| credential.into_credential(id, Utc::now()))
            .await
    }

    async fn get_credential_by_identity(&self, identity: &str) -> Result<Credential, StoreError> {
        self.get(identity).await.ok_or(StoreError::NotFound)
    }

    async fn update_refresh_token(
        &self,
        identity: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.update(identity, |credential| {
            credential.refresh_token_hash = Some(token_hash.to_string());
            credential.refresh_token_expires_at = Some(expires_at);
            Ok(())
        })
        .await
    }

    async fn swap_refresh_token(
        &self,
        identity: &str,
        expected_hash: &str,
        new_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.update(identity, |credential| {
            if !credential.holds_refresh_token(expected_hash, Utc::now()) {
                return Err(StoreError::Conflict);
            }
            credential.refresh_token_hash = Some(new_hash.to_string());
            credential.refresh_token_expires_at = Some(expires_at);
            Ok(())
        })
        .await
    }

    async fn clear_refresh_token(&self, identity: &str, expected_hash: &str) -> Result<(), StoreError> {
        self.update(identity, |credential| {
            if credential.refresh_token_hash.as_deref() != Some(expected_hash) {
                return Err(StoreError::Conflict);
            }
            credential.refresh_token_hash = None;
            credential.refresh_token_expires_at = None;
            Ok(())
        })
        .await
    }

    async fn delete_credential(&self, identity: &str) -> Result<(), StoreError> {
        self.remove(identity).await.map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryTable<i64, R> {
    async fn execute_listing(&self, query: &ListingQuery) -> Result<Vec<R>, StoreError> {
        Ok(query.apply(self.values().await))
    }
}

#[async_trait]
impl RecordStore<Employee> for MemoryTable<String, Credential> {
    async fn execute_listing(&self, query: &ListingQuery) -> Result<Vec<Employee>, StoreError> {
        let employees = self.values().await.iter().map(Employee::from).collect::<Vec<_>>();
        Ok(query.apply(employees))
    }
}

#[async_trait]
impl CompanyStore for MemoryTable<i64, Company> {
    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError> {
        Ok(self
            .insert_next(|id| Company {
                id,
                name: company.name,
                city: company.city,
            })
            .await)
    }

    async fn company_exists(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.contains(&id).await)
    }
}
