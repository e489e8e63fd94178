//! Keys and entities accepted by the storage layer

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// A value that uniquely addresses a stored entity
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// String form used as the primary key by every backend
    fn as_str(&self) -> &str;
}

/// A record that can be persisted as a JSON document
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    type Key: StorageKey;

    fn key(&self) -> &Self::Key;
}
