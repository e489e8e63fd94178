use std::time::Duration;

use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::observability::ObservabilityConfig;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig};

/// Table holding waitlist entries in PostgreSQL
pub const WAITLIST_TABLE: &str = "waitlist_entries";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub registration: RegistrationConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

/// Where waitlist entries are kept
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Which system of record the landing page registers against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationBackend {
    #[default]
    Local,
    Simulated,
    Remote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    #[serde(default)]
    pub backend: RegistrationBackend,
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
    #[serde(default)]
    pub simulated_failure: bool,
    #[serde(default)]
    pub remote_url: Option<String>,
    #[serde(default = "default_remote_timeout_secs")]
    pub remote_timeout_secs: u64,
    /// Unset means a submit waits for the backend indefinitely
    #[serde(default)]
    pub submit_timeout_ms: Option<u64>,
}

/// Admin endpoints reject every request while `token` is unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub token: Option<String>,
}

fn default_max_connections() -> u32 {
    5
}

fn default_simulated_delay_ms() -> u64 {
    1500
}

fn default_remote_timeout_secs() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl StorageSettings {
    pub fn to_storage_config(&self) -> Result<StorageConfig, DomainError> {
        match self.backend {
            StorageBackend::Memory => Ok(StorageConfig::in_memory()),
            StorageBackend::Postgres => {
                let url = self.database_url.as_deref().ok_or_else(|| {
                    DomainError::configuration("storage.database_url is required for postgres")
                })?;

                Ok(StorageConfig::Postgres(
                    PostgresConfig::new(url).with_max_connections(self.max_connections),
                ))
            }
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            backend: RegistrationBackend::default(),
            simulated_delay_ms: default_simulated_delay_ms(),
            simulated_failure: false,
            remote_url: None,
            remote_timeout_secs: default_remote_timeout_secs(),
            submit_timeout_ms: None,
        }
    }
}

impl RegistrationConfig {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }

    pub fn submit_timeout(&self) -> Option<Duration> {
        self.submit_timeout_ms.map(Duration::from_millis)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.registration.backend, RegistrationBackend::Local);
        assert_eq!(config.registration.simulated_delay(), Duration::from_millis(1500));
        assert_eq!(config.registration.remote_timeout(), Duration::from_secs(10));
        assert_eq!(config.registration.submit_timeout(), None);
        assert!(config.admin.token.is_none());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let json = r#"{
            "registration": {"backend": "simulated", "submit_timeout_ms": 250},
            "admin": {"token": "s3cret"}
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.registration.backend, RegistrationBackend::Simulated);
        assert_eq!(config.registration.simulated_delay_ms, 1500);
        assert_eq!(config.registration.submit_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.admin.token.as_deref(), Some("s3cret"));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_partial_server_section() {
        let config: AppConfig = serde_json::from_str(r#"{"server": {"port": 3000}}"#).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_postgres_requires_url() {
        let settings = StorageSettings {
            backend: StorageBackend::Postgres,
            ..Default::default()
        };

        let result = settings.to_storage_config();
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_postgres_storage_config() {
        let settings = StorageSettings {
            backend: StorageBackend::Postgres,
            database_url: Some("postgres://db/lody".to_string()),
            max_connections: 12,
        };

        match settings.to_storage_config().unwrap() {
            StorageConfig::Postgres(pg) => {
                assert_eq!(pg.url, "postgres://db/lody");
                assert_eq!(pg.max_connections, 12);
            }
            StorageConfig::InMemory => panic!("expected postgres"),
        }
    }
}
