//! Lody Waitlist
//!
//! Landing page and waitlist signup service for Lody, which teaches
//! languages through music:
//! - Server-rendered landing page with a waitlist form
//! - JSON registration API and admin listing
//! - Local, simulated or remote registration backends
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use tracing::info;

use crate::api::state::AppState;
use crate::config::{RegistrationBackend, RegistrationConfig, WAITLIST_TABLE};
use crate::domain::waitlist::{RegistrationService, WaitlistEntry};
use crate::domain::DomainError;
use crate::infrastructure::registration::{RemoteRegistrationClient, SimulatedRegistrationService};
use crate::infrastructure::storage::StorageFactory;
use crate::infrastructure::waitlist::{StorageWaitlistRepository, WaitlistService};

/// Local waitlist service over the configured storage backend
pub type LocalWaitlistService = WaitlistService<StorageWaitlistRepository>;

/// Create the application state with default configuration (in-memory, local backend)
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let waitlist_service = create_waitlist_service(config).await?;
    let registration =
        create_registration_service(&config.registration, waitlist_service.clone())?;

    Ok(AppState::new(waitlist_service, registration)
        .with_submit_timeout(config.registration.submit_timeout())
        .with_admin_token(config.admin.token.clone()))
}

/// Build the local waitlist service on top of the configured storage
pub async fn create_waitlist_service(
    config: &AppConfig,
) -> Result<Arc<LocalWaitlistService>, DomainError> {
    let storage_config = config.storage.to_storage_config()?;
    let storage = StorageFactory::create::<WaitlistEntry>(&storage_config, WAITLIST_TABLE).await?;

    info!(
        persistent = storage_config.is_persistent(),
        table = WAITLIST_TABLE,
        "Waitlist storage initialized"
    );

    let repository = Arc::new(StorageWaitlistRepository::new(storage));
    Ok(Arc::new(WaitlistService::new(repository)))
}

/// Pick the registration backend the signup form submits to
pub fn create_registration_service(
    config: &RegistrationConfig,
    local: Arc<dyn RegistrationService>,
) -> Result<Arc<dyn RegistrationService>, DomainError> {
    match config.backend {
        RegistrationBackend::Local => Ok(local),
        RegistrationBackend::Simulated => {
            let service = SimulatedRegistrationService::new(config.simulated_delay());
            if config.simulated_failure {
                Ok(Arc::new(service.failing()))
            } else {
                Ok(Arc::new(service))
            }
        }
        RegistrationBackend::Remote => {
            let url = config.remote_url.as_deref().ok_or_else(|| {
                DomainError::configuration("registration.remote_url is required for remote")
            })?;
            Ok(Arc::new(RemoteRegistrationClient::new(
                url,
                config.remote_timeout(),
            )?))
        }
    }
}
