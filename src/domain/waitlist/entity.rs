//! Waitlist entry entity and related types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::language::TargetLanguage;
use super::validation::{normalize_email, validate_email, EmailValidationError};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Normalized email address; one entry per key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryKey(String);

impl EntryKey {
    /// Normalize and validate a raw address
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let email = normalize_email(email.as_ref());
        validate_email(&email)?;
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntryKey {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryKey> for String {
    fn from(key: EntryKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for EntryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl StorageKey for EntryKey {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A person on the waitlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    id: Uuid,
    email: EntryKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_language: Option<TargetLanguage>,
    created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn new(email: EntryKey, target_language: Option<TargetLanguage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            target_language,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &EntryKey {
        &self.email
    }

    pub fn target_language(&self) -> Option<TargetLanguage> {
        self.target_language
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Registration result for this entry
    pub fn to_record(&self, newly_created: bool) -> RegistrationRecord {
        RegistrationRecord {
            id: self.id,
            email: self.email.as_str().to_string(),
            target_language: self.target_language,
            created_at: self.created_at,
            newly_created,
        }
    }
}

impl StorageEntity for WaitlistEntry {
    type Key = EntryKey;

    fn key(&self) -> &Self::Key {
        &self.email
    }
}

/// What a registration backend hands back on success
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub target_language: Option<TargetLanguage>,
    pub created_at: DateTime<Utc>,
    /// `false` when the address was already on the list
    #[serde(default = "default_newly_created")]
    pub newly_created: bool,
}

fn default_newly_created() -> bool {
    true
}

/// Signup counts grouped by target language
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WaitlistStats {
    pub total: usize,
    pub by_language: BTreeMap<String, usize>,
}

/// Bucket name for entries without a language
pub const UNSET_LANGUAGE: &str = "unset";

impl WaitlistStats {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a WaitlistEntry>) -> Self {
        let mut stats = Self::default();

        for entry in entries {
            let bucket = entry
                .target_language()
                .map(|l| l.code())
                .unwrap_or(UNSET_LANGUAGE);

            *stats.by_language.entry(bucket.to_string()).or_default() += 1;
            stats.total += 1;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_key_normalizes() {
        let key = EntryKey::new("  Someone@Example.com ").unwrap();
        assert_eq!(key.as_str(), "someone@example.com");
    }

    #[test]
    fn test_entry_key_rejects_invalid() {
        assert_eq!(EntryKey::new("   "), Err(EmailValidationError::Empty));
        assert!(EntryKey::new("nope").is_err());
    }

    #[test]
    fn test_entry_to_record() {
        let key = EntryKey::new("user@example.com").unwrap();
        let entry = WaitlistEntry::new(key, Some(TargetLanguage::French));
        let record = entry.to_record(true);

        assert_eq!(record.id, entry.id());
        assert_eq!(record.email, "user@example.com");
        assert_eq!(record.target_language, Some(TargetLanguage::French));
        assert!(record.newly_created);
    }

    #[test]
    fn test_entry_roundtrips_through_json() {
        let entry = WaitlistEntry::new(EntryKey::new("a@lody.app").unwrap(), None);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["email"], "a@lody.app");
        assert!(json.get("target_language").is_none());

        let back: WaitlistEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_stats_from_entries() {
        let entries = vec![
            WaitlistEntry::new(EntryKey::new("a@x.io").unwrap(), Some(TargetLanguage::Spanish)),
            WaitlistEntry::new(EntryKey::new("b@x.io").unwrap(), Some(TargetLanguage::Spanish)),
            WaitlistEntry::new(EntryKey::new("c@x.io").unwrap(), None),
        ];

        let stats = WaitlistStats::from_entries(&entries);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_language.get("spanish"), Some(&2));
        assert_eq!(stats.by_language.get(UNSET_LANGUAGE), Some(&1));
    }
}
