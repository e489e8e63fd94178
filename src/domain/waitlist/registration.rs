//! Registration service contract
//!
//! The signup workflow talks to whatever system of record is configured
//! through this trait: the local waitlist service, the simulated stub, or a
//! remote deployment reached over HTTP.

use async_trait::async_trait;
use thiserror::Error;

use super::entity::RegistrationRecord;
use super::language::TargetLanguage;

#[cfg(test)]
use mockall::automock;

/// Why a registration attempt did not go through
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Registration rejected: {0}")]
    Rejected(String),

    #[error("Registration service unavailable: {0}")]
    Unavailable(String),

    #[error("Registration timed out")]
    TimedOut,
}

impl RegistrationError {
    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEmail(_) => "invalid_email",
            Self::Rejected(_) => "rejected",
            Self::Unavailable(_) => "unavailable",
            Self::TimedOut => "timed_out",
        }
    }
}

/// Durable store for waitlist signups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Adds `email` to the waitlist. Called once per accepted submit.
    async fn register(
        &self,
        email: &str,
        target_language: Option<TargetLanguage>,
    ) -> Result<RegistrationRecord, RegistrationError>;
}
