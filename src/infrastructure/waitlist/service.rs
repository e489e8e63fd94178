//! Waitlist service: the local system of record for signups

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::waitlist::{
    redact_email, EntryKey, RegistrationError, RegistrationRecord, RegistrationService,
    TargetLanguage, WaitlistEntry, WaitlistQuery, WaitlistRepository, WaitlistStats,
    UNSET_LANGUAGE,
};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_registration, record_registration_error};

/// Registers, lists and counts waitlist entries
#[derive(Debug)]
pub struct WaitlistService<R: WaitlistRepository> {
    repository: Arc<R>,
}

impl<R: WaitlistRepository> WaitlistService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Entries matching the query, newest first
    pub async fn list(&self, query: &WaitlistQuery) -> Result<Vec<WaitlistEntry>, DomainError> {
        self.repository.list(query).await
    }

    pub async fn count(&self, query: &WaitlistQuery) -> Result<usize, DomainError> {
        self.repository.count(query).await
    }

    pub async fn stats(&self) -> Result<WaitlistStats, DomainError> {
        let entries = self.repository.list(&WaitlistQuery::new()).await?;
        Ok(WaitlistStats::from_entries(&entries))
    }

    async fn try_register(
        &self,
        email: &str,
        target_language: Option<TargetLanguage>,
    ) -> Result<RegistrationRecord, RegistrationError> {
        let key =
            EntryKey::new(email).map_err(|e| RegistrationError::InvalidEmail(e.to_string()))?;

        if let Some(existing) = self.repository.get(&key).await.map_err(unavailable)? {
            debug!(email = %redact_email(key.as_str()), "Email already on the waitlist");
            return Ok(existing.to_record(false));
        }

        let entry = WaitlistEntry::new(key.clone(), target_language);

        match self.repository.create(entry).await {
            Ok(created) => {
                let language = created
                    .target_language()
                    .map(|l| l.code())
                    .unwrap_or(UNSET_LANGUAGE);

                info!(
                    email = %redact_email(created.email().as_str()),
                    language,
                    "Added to waitlist"
                );
                record_registration(language);

                Ok(created.to_record(true))
            }
            // Lost a race with a concurrent registration of the same address
            Err(e) if e.is_conflict() => self
                .repository
                .get(&key)
                .await
                .map_err(unavailable)?
                .map(|existing| existing.to_record(false))
                .ok_or_else(|| unavailable(e)),
            Err(e) => Err(unavailable(e)),
        }
    }
}

fn unavailable(error: DomainError) -> RegistrationError {
    RegistrationError::Unavailable(error.to_string())
}

#[async_trait]
impl<R: WaitlistRepository + 'static> RegistrationService for WaitlistService<R> {
    async fn register(
        &self,
        email: &str,
        target_language: Option<TargetLanguage>,
    ) -> Result<RegistrationRecord, RegistrationError> {
        let result = self.try_register(email, target_language).await;

        if let Err(ref e) = result {
            warn!(email = %redact_email(email), kind = e.kind(), error = %e, "Registration failed");
            record_registration_error(e.kind());
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockStorage;
    use crate::domain::storage::Storage;
    use crate::infrastructure::storage::InMemoryStorage;
    use crate::infrastructure::waitlist::StorageWaitlistRepository;

    fn service_with(
        storage: Arc<dyn Storage<WaitlistEntry>>,
    ) -> WaitlistService<StorageWaitlistRepository> {
        WaitlistService::new(Arc::new(StorageWaitlistRepository::new(storage)))
    }

    fn create_service() -> WaitlistService<StorageWaitlistRepository> {
        service_with(Arc::new(InMemoryStorage::<WaitlistEntry>::new()))
    }

    #[tokio::test]
    async fn test_register_new_email() {
        let service = create_service();

        let record = service
            .register("  Learner@Lody.App ", Some(TargetLanguage::Italian))
            .await
            .unwrap();

        assert!(record.newly_created);
        assert_eq!(record.email, "learner@lody.app");
        assert_eq!(record.target_language, Some(TargetLanguage::Italian));
        assert_eq!(service.count(&WaitlistQuery::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_is_idempotent() {
        let service = create_service();

        let first = service
            .register("learner@lody.app", Some(TargetLanguage::German))
            .await
            .unwrap();
        let second = service
            .register("LEARNER@lody.app", Some(TargetLanguage::French))
            .await
            .unwrap();

        assert!(!second.newly_created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.target_language, Some(TargetLanguage::German));
        assert_eq!(service.count(&WaitlistQuery::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_without_language() {
        let service = create_service();

        let record = service.register("quiet@lody.app", None).await.unwrap();

        assert_eq!(record.target_language, None);
        let stats = service.stats().await.unwrap();
        assert_eq!(stats.by_language.get(UNSET_LANGUAGE), Some(&1));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let service = create_service();

        for bad in ["", "   ", "not-an-email", "a@"] {
            let err = service.register(bad, None).await.unwrap_err();
            assert!(
                matches!(err, RegistrationError::InvalidEmail(_)),
                "{bad:?} gave {err:?}"
            );
        }

        assert_eq!(service.count(&WaitlistQuery::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_rejects_overlong_email() {
        let service = create_service();
        let email = format!("{}@lody.app", "a".repeat(250));

        let err = service.register(&email, None).await.unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidEmail(_)));
    }

    #[tokio::test]
    async fn test_storage_failure_is_unavailable() {
        let service = service_with(Arc::new(
            MockStorage::<WaitlistEntry>::new().with_error("disk on fire"),
        ));

        let err = service.register("learner@lody.app", None).await.unwrap_err();

        match err {
            RegistrationError::Unavailable(message) => assert!(message.contains("disk on fire")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_stats_groups_by_language() {
        let service = create_service();

        service.register("a@lody.app", Some(TargetLanguage::Spanish)).await.unwrap();
        service.register("b@lody.app", Some(TargetLanguage::Spanish)).await.unwrap();
        service.register("c@lody.app", Some(TargetLanguage::Korean)).await.unwrap();

        let stats = service.stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_language.get("spanish"), Some(&2));
        assert_eq!(stats.by_language.get("korean"), Some(&1));
    }

    #[tokio::test]
    async fn test_list_filters_by_language() {
        let service = create_service();

        service.register("a@lody.app", Some(TargetLanguage::Chinese)).await.unwrap();
        service.register("b@lody.app", None).await.unwrap();

        let query = WaitlistQuery::new().with_language(TargetLanguage::Chinese);
        let entries = service.list(&query).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].email().as_str(), "a@lody.app");
    }
}
