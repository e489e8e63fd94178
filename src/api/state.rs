//! Application state for shared services

use std::sync::Arc;
use std::time::Duration;

use crate::domain::waitlist::{
    RegistrationError, RegistrationRecord, RegistrationService, TargetLanguage, WaitlistEntry,
    WaitlistQuery, WaitlistRepository, WaitlistStats,
};
use crate::domain::DomainError;
use crate::infrastructure::waitlist::WaitlistService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    /// Local system of record behind `/v1` and `/admin`
    pub waitlist_service: Arc<dyn WaitlistServiceTrait>,
    /// Backend the landing page form submits to
    pub registration: Arc<dyn RegistrationService>,
    pub submit_timeout: Option<Duration>,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(
        waitlist_service: Arc<dyn WaitlistServiceTrait>,
        registration: Arc<dyn RegistrationService>,
    ) -> Self {
        Self {
            waitlist_service,
            registration,
            submit_timeout: None,
            admin_token: None,
        }
    }

    pub fn with_submit_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.submit_timeout = timeout;
        self
    }

    pub fn with_admin_token(mut self, token: Option<String>) -> Self {
        self.admin_token = token.filter(|t| !t.is_empty());
        self
    }
}

/// Trait for waitlist service operations
#[async_trait::async_trait]
pub trait WaitlistServiceTrait: Send + Sync {
    async fn register(
        &self,
        email: &str,
        target_language: Option<TargetLanguage>,
    ) -> Result<RegistrationRecord, RegistrationError>;
    async fn list(&self, query: &WaitlistQuery) -> Result<Vec<WaitlistEntry>, DomainError>;
    async fn count(&self, query: &WaitlistQuery) -> Result<usize, DomainError>;
    async fn stats(&self) -> Result<WaitlistStats, DomainError>;
}

#[async_trait::async_trait]
impl<R: WaitlistRepository + 'static> WaitlistServiceTrait for WaitlistService<R> {
    async fn register(
        &self,
        email: &str,
        target_language: Option<TargetLanguage>,
    ) -> Result<RegistrationRecord, RegistrationError> {
        RegistrationService::register(self, email, target_language).await
    }

    async fn list(&self, query: &WaitlistQuery) -> Result<Vec<WaitlistEntry>, DomainError> {
        WaitlistService::list(self, query).await
    }

    async fn count(&self, query: &WaitlistQuery) -> Result<usize, DomainError> {
        WaitlistService::count(self, query).await
    }

    async fn stats(&self) -> Result<WaitlistStats, DomainError> {
        WaitlistService::stats(self).await
    }
}
