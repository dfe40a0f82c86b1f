use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required parameter '{0}' is not set")]
    Missing(String),
    #[error("Parameter '{key}' is invalid: {reason}")]
    Invalid { key: String, reason: String },
}
