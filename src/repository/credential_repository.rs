use crate::entity::credential::{Credential, NewCredential};
use crate::error::store_error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence for credentials and their active refresh token digest.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Fails with `Duplicate` when the identity is taken.
    async fn create_credential(&self, credential: NewCredential) -> Result<Credential, StoreError>;

    async fn get_credential_by_identity(&self, identity: &str) -> Result<Credential, StoreError>;

    /// Unconditionally replaces the stored refresh digest.
    async fn update_refresh_token(
        &self,
        identity: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Replaces the stored refresh digest only while it still equals
    /// `expected_hash` and has not expired; `Conflict` otherwise. Of two
    /// concurrent swaps from the same digest, at most one succeeds.
    async fn swap_refresh_token(
        &self,
        identity: &str,
        expected_hash: &str,
        new_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Clears the stored refresh digest if it equals `expected_hash`.
    async fn clear_refresh_token(&self, identity: &str, expected_hash: &str) -> Result<(), StoreError>;

    async fn delete_credential(&self, identity: &str) -> Result<(), StoreError>;
}
