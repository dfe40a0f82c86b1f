use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// A registered identity with its password digest and the single refresh
/// token digest that is currently allowed to rotate.
#[derive(Clone, sqlx::FromRow)]
pub struct Credential {
    pub id: i64,
    pub identity: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub company_id: Option<i64>,
    pub post: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub refresh_token_hash: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// True when `token_hash` is the stored refresh digest and it has not expired.
    pub fn holds_refresh_token(&self, token_hash: &str, now: DateTime<Utc>) -> bool {
        match (&self.refresh_token_hash, self.refresh_token_expires_at) {
            (Some(stored), Some(expires_at)) => stored == token_hash && expires_at > now,
            _ => false,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("identity", &self.identity)
            .field("password_hash", &"[REDACTED]")
            .field("company_id", &self.company_id)
            .field("refresh_token_expires_at", &self.refresh_token_expires_at)
            .finish_non_exhaustive()
    }
}

/// Optional employee attributes supplied at registration.
#[derive(Clone, Debug, Default)]
pub struct Profile {
    pub full_name: Option<String>,
    pub company_id: Option<i64>,
    pub post: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct NewCredential {
    pub identity: String,
    pub password_hash: String,
    pub profile: Profile,
    pub refresh_token_hash: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
}

impl NewCredential {
    pub fn into_credential(self, id: i64, created_at: DateTime<Utc>) -> Credential {
        Credential {
            id,
            identity: self.identity,
            password_hash: self.password_hash,
            full_name: self.profile.full_name,
            company_id: self.profile.company_id,
            post: self.profile.post,
            date_of_birth: self.profile.date_of_birth,
            refresh_token_hash: self.refresh_token_hash,
            refresh_token_expires_at: self.refresh_token_expires_at,
            created_at,
        }
    }
}
