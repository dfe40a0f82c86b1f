use crate::error::auth_error::AuthError;
use std::sync::{Arc, OnceLock};

/// bcrypt reads at most this many bytes; anything longer is refused rather
/// than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

const DECOY_PLAINTEXT: &str = "passdesk-decoy-password";

/// bcrypt hashing with a configured cost. Digests embed their own salt and
/// cost, so `verify` needs nothing but the digest.
#[derive(Clone, Debug)]
pub struct PasswordService {
    cost: u32,
    decoy: Arc<OnceLock<String>>,
}

fn check_length(plaintext: &str) -> Result<(), AuthError> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::Hashing(format!(
            "password exceeds {MAX_PASSWORD_BYTES} bytes"
        )));
    }
    Ok(())
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            decoy: Arc::new(OnceLock::new()),
        }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        check_length(plaintext)?;
        bcrypt::hash(plaintext, self.cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    pub fn verify(&self, digest: &str, plaintext: &str) -> Result<bool, AuthError> {
        check_length(plaintext)?;
        bcrypt::verify(plaintext, digest).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Spends the same work as a real `verify` when there is no stored digest,
    /// so a missing identity answers no faster than a wrong password.
    pub fn verify_decoy(&self, plaintext: &str) {
        let digest = self
            .decoy
            .get_or_init(|| bcrypt::hash(DECOY_PLAINTEXT, self.cost).unwrap_or_default());
        let _ = self.verify(digest, plaintext);
    }

    #[cfg(test)]
    pub(crate) fn decoy_used(&self) -> bool {
        self.decoy.get().is_some()
    }
}
