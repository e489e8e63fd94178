//! Stand-in backend for demos and frontend work

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::waitlist::{
    normalize_email, redact_email, RegistrationError, RegistrationRecord, RegistrationService,
    TargetLanguage,
};

/// Accepts every submission after a fixed delay without storing anything
#[derive(Debug, Clone)]
pub struct SimulatedRegistrationService {
    delay: Duration,
    fail: bool,
}

impl Default for SimulatedRegistrationService {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl SimulatedRegistrationService {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    /// Every call resolves as `Unavailable` once the delay has passed
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl RegistrationService for SimulatedRegistrationService {
    async fn register(
        &self,
        email: &str,
        target_language: Option<TargetLanguage>,
    ) -> Result<RegistrationRecord, RegistrationError> {
        debug!(email = %redact_email(email), delay_ms = self.delay.as_millis() as u64, "Simulating registration");

        tokio::time::sleep(self.delay).await;

        if self.fail {
            return Err(RegistrationError::Unavailable(
                "simulated registration failure".to_string(),
            ));
        }

        Ok(RegistrationRecord {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            target_language,
            created_at: Utc::now(),
            newly_created: true,
        })
    }
}
