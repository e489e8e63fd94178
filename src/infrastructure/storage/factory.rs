//! Storage factory for runtime storage selection

use std::sync::Arc;

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{PostgresConfig, PostgresStorage};

/// Which backend a store should use
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Process-local, lost on restart
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Postgres(_))
    }
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a storage instance; for PostgreSQL the table is created if missing
    pub async fn create<E>(
        config: &StorageConfig,
        table_name: &str,
    ) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match config {
            StorageConfig::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            StorageConfig::Postgres(pg_config) => {
                let storage = PostgresStorage::<E>::connect(pg_config, table_name).await?;
                storage.ensure_table().await?;
                Ok(Arc::new(storage))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::waitlist::WaitlistEntry;

    #[test]
    fn test_storage_config_kinds() {
        assert!(!StorageConfig::in_memory().is_persistent());
        assert!(StorageConfig::postgres_url("postgres://localhost/test").is_persistent());
    }

    #[tokio::test]
    async fn test_create_in_memory() {
        let storage = StorageFactory::create::<WaitlistEntry>(&StorageConfig::in_memory(), "unused")
            .await
            .unwrap();

        assert_eq!(storage.count().await.unwrap(), 0);
    }
}
