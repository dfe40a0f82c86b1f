use crate::error::config_error::ConfigError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

static CONFIG: OnceLock<HashMap<String, String>> = OnceLock::new();

/// Recognised parameters with their defaults. `None` means the parameter must
/// come from the environment.
const PARAMETERS: &[(&str, Option<&str>)] = &[
    ("SERVER_ADDRESS", Some("127.0.0.1")),
    ("SERVER_PORT", Some("8081")),
    ("JWT_SECRET", None),
    ("ACCESS_TOKEN_TTL_MINUTES", Some("60")),
    ("REFRESH_TOKEN_TTL_HOURS", Some("720")),
    ("BCRYPT_COST", Some("12")),
    ("ADMIN_LOGIN", None),
    ("ADMIN_PASSWORD", None),
    ("STORAGE_BACKEND", Some("memory")),
    ("DATABASE_URL", None),
    ("DB_MAX_CONNECTIONS", Some("20")),
    ("DB_MIN_CONNECTIONS", Some("1")),
    ("DB_ACQUIRE_TIMEOUT_SECONDS", Some("30")),
    ("ENV", Some("development")),
    ("LOG_LEVEL", Some("info")),
];

/// Loads `.env` (if any) and snapshots the recognised parameters.
///
/// Runs before tracing is installed, so the loaded env file path is handed
/// back to the caller for logging instead of being logged here.
pub fn init() -> Option<PathBuf> {
    let env_file = dotenv::dotenv().ok();

    let mut config = HashMap::new();
    for (key, default) in PARAMETERS {
        let value = std::env::var(key)
            .ok()
            .or_else(|| default.map(str::to_string));
        if let Some(value) = value {
            config.insert(key.to_string(), value);
        }
    }

    // A second init keeps the first snapshot.
    let _ = CONFIG.set(config);
    env_file
}

pub fn get(parameter: &str) -> Result<String, ConfigError> {
    get_optional(parameter).ok_or_else(|| ConfigError::Missing(parameter.to_string()))
}

pub fn get_optional(parameter: &str) -> Option<String> {
    CONFIG
        .get()
        .and_then(|config| config.get(parameter))
        .filter(|value| !value.is_empty())
        .cloned()
}

pub fn get_parsed<T>(parameter: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = get(parameter)?;
    value.parse::<T>().map_err(|e| ConfigError::Invalid {
        key: parameter.to_string(),
        reason: e.to_string(),
    })
}

/// Number of parameters that resolved to a value.
pub fn loaded_count() -> usize {
    CONFIG.get().map(HashMap::len).unwrap_or(0)
}
