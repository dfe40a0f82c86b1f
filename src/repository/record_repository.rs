use crate::entity::company::{Company, NewCompany};
use crate::entity::record::Record;
use crate::error::store_error::StoreError;
use crate::service::query_builder::ListingQuery;
use async_trait::async_trait;

#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    async fn execute_listing(&self, query: &ListingQuery) -> Result<Vec<R>, StoreError>;
}

#[async_trait]
pub trait CompanyStore: RecordStore<Company> {
    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError>;
    async fn company_exists(&self, id: i64) -> Result<bool, StoreError>;
}
