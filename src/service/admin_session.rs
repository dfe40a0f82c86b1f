use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
struct ActiveRefresh {
    token_hash: String,
    expires_at: DateTime<Utc>,
}

/// The privileged login has no credential row, so its one active refresh
/// digest lives here, with the same single-use rules as stored credentials.
#[derive(Clone, Default)]
pub struct AdminSession {
    slot: Arc<Mutex<Option<ActiveRefresh>>>,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn store(&self, token_hash: &str, expires_at: DateTime<Utc>) {
        *self.slot.lock().await = Some(ActiveRefresh {
            token_hash: token_hash.to_string(),
            expires_at,
        });
    }

    /// Replaces the active digest if it still equals `expected_hash`.
    pub async fn swap(&self, expected_hash: &str, new_hash: &str, expires_at: DateTime<Utc>) -> bool {
        let mut slot = self.slot.lock().await;
        let holds = slot
            .as_ref()
            .is_some_and(|active| active.token_hash == expected_hash && active.expires_at > Utc::now());
        if holds {
            *slot = Some(ActiveRefresh {
                token_hash: new_hash.to_string(),
                expires_at,
            });
        }
        holds
    }

    pub async fn clear(&self, expected_hash: &str) -> bool {
        let mut slot = self.slot.lock().await;
        let holds = slot.as_ref().is_some_and(|active| active.token_hash == expected_hash);
        if holds {
            *slot = None;
        }
        holds
    }
}
