use crate::config::database::{Database, DatabaseTrait};
use crate::config::logging::secure_log;
use crate::entity::credential::{Credential, NewCredential};
use crate::error::store_error::StoreError;
use crate::repository::credential_repository::CredentialStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

const CREDENTIAL_COLUMNS: &str = "id, identity, password_hash, full_name, company_id, post, date_of_birth, \
     refresh_token_hash, refresh_token_expires_at, created_at";

#[derive(Clone)]
pub struct PgCredentialStore {
    db_conn: Arc<Database>,
}

impl PgCredentialStore {
    pub fn new(db_conn: &Arc<Database>) -> Self {
        Self {
            db_conn: Arc::clone(db_conn),
        }
    }
}

/// Logs a failed statement and maps it into the store taxonomy.
fn failed(operation: &str, error: sqlx::Error) -> StoreError {
    secure_log::secure_error!(format!("{operation} failed"), error);
    StoreError::from_sqlx(error)
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create_credential(&self, credential: NewCredential) -> Result<Credential, StoreError> {
        let start = Instant::now();
        let sql = format!(
            "INSERT INTO employees (identity, password_hash, full_name, company_id, post, date_of_birth, \
             refresh_token_hash, refresh_token_expires_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {CREDENTIAL_COLUMNS}"
        );

        let created = sqlx::query_as::<_, Credential>(&sql)
            .bind(&credential.identity)
            .bind(&credential.password_hash)
            .bind(&credential.profile.full_name)
            .bind(credential.profile.company_id)
            .bind(&credential.profile.post)
            .bind(credential.profile.date_of_birth)
            .bind(&credential.refresh_token_hash)
            .bind(credential.refresh_token_expires_at)
            .fetch_one(self.db_conn.get_pool())
            .await
            .map_err(|e| match StoreError::from_sqlx(e) {
                // Constraint violations are expected outcomes, not faults.
                StoreError::Database(e) => failed("Credential insert", e),
                other => other,
            })?;

        secure_log::sensitive_debug!("Credential insert completed in {:?}", start.elapsed());
        Ok(created)
    }

    async fn get_credential_by_identity(&self, identity: &str) -> Result<Credential, StoreError> {
        let start = Instant::now();
        let sql = format!("SELECT {CREDENTIAL_COLUMNS} FROM employees WHERE identity = $1");

        let found = sqlx::query_as::<_, Credential>(&sql)
            .bind(identity)
            .fetch_optional(self.db_conn.get_pool())
            .await
            .map_err(|e| failed("Credential lookup", e))?;

        secure_log::sensitive_debug!("Credential lookup completed in {:?}", start.elapsed());
        found.ok_or(StoreError::NotFound)
    }

    async fn update_refresh_token(
        &self,
        identity: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE employees SET refresh_token_hash = $2, refresh_token_expires_at = $3 WHERE identity = $1",
        )
        .bind(identity)
        .bind(token_hash)
        .bind(expires_at)
        .execute(self.db_conn.get_pool())
        .await
        .map_err(|e| failed("Refresh token update", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn swap_refresh_token(
        &self,
        identity: &str,
        expected_hash: &str,
        new_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        // Single conditional UPDATE: the row lock makes concurrent swaps from
        // the same digest serialise, and only the first still matches.
        let result = sqlx::query(
            "UPDATE employees SET refresh_token_hash = $3, refresh_token_expires_at = $4 \
             WHERE identity = $1 AND refresh_token_hash = $2 AND refresh_token_expires_at > NOW()",
        )
        .bind(identity)
        .bind(expected_hash)
        .bind(new_hash)
        .bind(expires_at)
        .execute(self.db_conn.get_pool())
        .await
        .map_err(|e| failed("Refresh token swap", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict);
        }
        Ok(())
    }

    async fn clear_refresh_token(&self, identity: &str, expected_hash: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE employees SET refresh_token_hash = NULL, refresh_token_expires_at = NULL \
             WHERE identity = $1 AND refresh_token_hash = $2",
        )
        .bind(identity)
        .bind(expected_hash)
        .execute(self.db_conn.get_pool())
        .await
        .map_err(|e| failed("Refresh token revoke", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict);
        }
        Ok(())
    }

    async fn delete_credential(&self, identity: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE identity = $1")
            .bind(identity)
            .execute(self.db_conn.get_pool())
            .await
            .map_err(|e| failed("Credential delete", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
