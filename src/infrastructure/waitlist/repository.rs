//! Storage-backed waitlist repository implementation

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::waitlist::{EntryKey, WaitlistEntry, WaitlistQuery, WaitlistRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of WaitlistRepository
#[derive(Debug)]
pub struct StorageWaitlistRepository {
    storage: Arc<dyn Storage<WaitlistEntry>>,
}

impl StorageWaitlistRepository {
    pub fn new(storage: Arc<dyn Storage<WaitlistEntry>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl WaitlistRepository for StorageWaitlistRepository {
    async fn get(&self, email: &EntryKey) -> Result<Option<WaitlistEntry>, DomainError> {
        self.storage.get(email).await
    }

    async fn create(&self, entry: WaitlistEntry) -> Result<WaitlistEntry, DomainError> {
        self.storage.create(entry).await
    }

    async fn list(&self, query: &WaitlistQuery) -> Result<Vec<WaitlistEntry>, DomainError> {
        let mut result: Vec<WaitlistEntry> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|entry| query.matches(entry))
            .collect();

        // Storage yields oldest first; reversing keeps same-instant entries newest first
        result.reverse();
        result.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let offset = query.offset.unwrap_or(0);
        let limit = query.limit.unwrap_or(usize::MAX);

        Ok(result.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, query: &WaitlistQuery) -> Result<usize, DomainError> {
        if query.language.is_none() {
            return self.storage.count().await;
        }

        let entries = self.storage.list().await?;
        Ok(entries.iter().filter(|entry| query.matches(entry)).count())
    }
}
