//! Application configuration

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, LogFormat, LoggingConfig, RegistrationBackend, RegistrationConfig,
    ServerConfig, StorageBackend, StorageSettings, WAITLIST_TABLE,
};
