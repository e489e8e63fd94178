//! Waitlist repository trait

use async_trait::async_trait;

use super::entity::{EntryKey, WaitlistEntry};
use super::language::TargetLanguage;
use crate::domain::DomainError;

/// Query parameters for listing entries
#[derive(Debug, Clone, Default)]
pub struct WaitlistQuery {
    /// Only entries that picked this language
    pub language: Option<TargetLanguage>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Offset for pagination
    pub offset: Option<usize>,
}

impl WaitlistQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(mut self, language: TargetLanguage) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn matches(&self, entry: &WaitlistEntry) -> bool {
        match self.language {
            Some(language) => entry.target_language() == Some(language),
            None => true,
        }
    }
}

/// Persistence for waitlist entries
#[async_trait]
pub trait WaitlistRepository: Send + Sync + std::fmt::Debug {
    async fn get(&self, email: &EntryKey) -> Result<Option<WaitlistEntry>, DomainError>;

    /// Inserts an entry; `DomainError::Conflict` when the email is already listed
    async fn create(&self, entry: WaitlistEntry) -> Result<WaitlistEntry, DomainError>;

    /// Entries matching the query, newest first
    async fn list(&self, query: &WaitlistQuery) -> Result<Vec<WaitlistEntry>, DomainError>;

    async fn count(&self, query: &WaitlistQuery) -> Result<usize, DomainError>;
}
