use crate::config::database::{Database, DatabaseTrait};
use crate::config::logging::secure_log;
use crate::entity::company::{Company, NewCompany};
use crate::entity::record::Record;
use crate::error::store_error::StoreError;
use crate::repository::record_repository::{CompanyStore, RecordStore};
use crate::service::query_builder::{ListingQuery, SqlBind};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

/// Listing store for any record type backed by its own table.
pub struct PgRecordStore<R> {
    db_conn: Arc<Database>,
    _record: PhantomData<fn() -> R>,
}

impl<R> PgRecordStore<R> {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
            _record: PhantomData,
        }
    }
}

impl<R> Clone for PgRecordStore<R> {
    fn clone(&self) -> Self {
        Self::new(&self.db_conn)
    }
}

#[async_trait]
impl<R> RecordStore<R> for PgRecordStore<R>
where
    R: Record + for<'r> FromRow<'r, PgRow>,
{
    async fn execute_listing(&self, query: &ListingQuery) -> Result<Vec<R>, StoreError> {
        let start = Instant::now();
        let statement = query.to_sql();

        let mut prepared = sqlx::query_as::<Postgres, R>(&statement.sql);
        for bind in &statement.binds {
            prepared = match bind {
                SqlBind::Text(value) => prepared.bind(value.clone()),
                SqlBind::Int(value) => prepared.bind(*value),
            };
        }

        match prepared.fetch_all(self.db_conn.get_pool()).await {
            Ok(rows) => {
                secure_log::sensitive_debug!(
                    "Listing on {} returned {} rows in {:?}",
                    R::TABLE,
                    rows.len(),
                    start.elapsed()
                );
                Ok(rows)
            }
            Err(e) => {
                secure_log::secure_error!(format!("Listing on {} failed", R::TABLE), e);
                Err(StoreError::from_sqlx(e))
            }
        }
    }
}

#[async_trait]
impl CompanyStore for PgRecordStore<Company> {
    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError> {
        sqlx::query_as::<_, Company>("INSERT INTO companies (name, city) VALUES ($1, $2) RETURNING id, name, city")
            .bind(&company.name)
            .bind(&company.city)
            .fetch_one(self.db_conn.get_pool())
            .await
            .map_err(StoreError::from_sqlx)
    }

    async fn company_exists(&self, id: i64) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1)")
            .bind(id)
            .fetch_one(self.db_conn.get_pool())
            .await
            .map_err(StoreError::from_sqlx)
    }
}
