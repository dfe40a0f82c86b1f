use crate::config::parameter;
use crate::error::config_error::ConfigError;
use chrono::Duration;
use std::fmt;
use std::str::FromStr;

pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => Err(format!("unknown storage backend '{other}'")),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::Postgres => write!(f, "postgres"),
        }
    }
}

/// The single statically configured privileged login.
#[derive(Clone)]
pub struct AdminCredential {
    pub login: String,
    pub password: String,
}

impl AdminCredential {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, login: &str, password: &str) -> bool {
        self.login == login && self.password == password
    }
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredential")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Converts a configured amount into a `Duration`, refusing values chrono
/// cannot represent.
fn ttl(key: &str, amount: i64, convert: fn(i64) -> Option<Duration>) -> Result<Duration, ConfigError> {
    convert(amount).ok_or_else(|| ConfigError::Invalid {
        key: key.to_string(),
        reason: format!("{amount} is out of range"),
    })
}

/// Typed view over the process parameters, resolved once at startup.
#[derive(Clone)]
pub struct Settings {
    pub server_address: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub admin: AdminCredential,
    pub storage_backend: StorageBackend,
}

impl Settings {
    pub fn from_parameters() -> Result<Self, ConfigError> {
        let access_minutes: i64 = parameter::get_parsed("ACCESS_TOKEN_TTL_MINUTES")?;
        let refresh_hours: i64 = parameter::get_parsed("REFRESH_TOKEN_TTL_HOURS")?;
        let bcrypt_cost: u32 = parameter::get_parsed("BCRYPT_COST")?;

        let settings = Self {
            server_address: parameter::get("SERVER_ADDRESS")?,
            server_port: parameter::get_parsed("SERVER_PORT")?,
            jwt_secret: parameter::get("JWT_SECRET")?,
            access_token_ttl: ttl("ACCESS_TOKEN_TTL_MINUTES", access_minutes, Duration::try_minutes)?,
            refresh_token_ttl: ttl("REFRESH_TOKEN_TTL_HOURS", refresh_hours, Duration::try_hours)?,
            bcrypt_cost,
            admin: AdminCredential::new(parameter::get("ADMIN_LOGIN")?, parameter::get("ADMIN_PASSWORD")?),
            storage_backend: parameter::get_parsed("STORAGE_BACKEND")?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST".to_string(),
                reason: format!("must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}"),
            });
        }
        if self.access_token_ttl <= Duration::zero() {
            return Err(ConfigError::Invalid {
                key: "ACCESS_TOKEN_TTL_MINUTES".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.refresh_token_ttl <= self.access_token_ttl {
            return Err(ConfigError::Invalid {
                key: "REFRESH_TOKEN_TTL_HOURS".to_string(),
                reason: "must outlive the access token".to_string(),
            });
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_address, self.server_port)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("server_address", &self.server_address)
            .field("server_port", &self.server_port)
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("admin", &self.admin)
            .field("storage_backend", &self.storage_backend)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            server_address: "127.0.0.1".to_string(),
            server_port: 8081,
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::hours(24),
            bcrypt_cost: 4,
            admin: AdminCredential::new("admin", "admin-password"),
            storage_backend: StorageBackend::Memory,
        }
    }

    #[test]
    fn test_valid_settings() {
        let settings = settings();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.bind_address(), "127.0.0.1:8081");
    }

    #[test]
    fn test_bcrypt_cost_out_of_range() {
        let mut settings = settings();
        settings.bcrypt_cost = 3;
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid { key, .. }) if key == "BCRYPT_COST"));
    }

    #[test]
    fn test_refresh_must_outlive_access() {
        let mut settings = settings();
        settings.refresh_token_ttl = Duration::minutes(10);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_huge_ttl_is_a_config_error() {
        let result = ttl("ACCESS_TOKEN_TTL_MINUTES", i64::MAX, Duration::try_minutes);
        assert!(matches!(result, Err(ConfigError::Invalid { key, .. }) if key == "ACCESS_TOKEN_TTL_MINUTES"));

        assert_eq!(ttl("REFRESH_TOKEN_TTL_HOURS", 720, Duration::try_hours).unwrap(), Duration::hours(720));
    }

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!("Memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert_eq!("postgresql".parse::<StorageBackend>(), Ok(StorageBackend::Postgres));
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", settings());
        assert!(!rendered.contains("admin-password"));
        assert!(!rendered.contains("0123456789abcdef"));
    }

    #[test]
    fn test_admin_match_is_exact() {
        let admin = AdminCredential::new("admin", "secret");
        assert!(admin.matches("admin", "secret"));
        assert!(!admin.matches("Admin", "secret"));
        assert!(!admin.matches("admin", "secret "));
    }
}
