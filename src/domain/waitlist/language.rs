//! Languages a prospective learner can pick on the signup form

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed set of target languages offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    Spanish,
    French,
    Italian,
    Portuguese,
    German,
    Japanese,
    Korean,
    Chinese,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown target language '{0}'")]
pub struct ParseLanguageError(pub String);

impl TargetLanguage {
    /// Every option, in the order the form lists them
    pub const ALL: [TargetLanguage; 9] = [
        Self::Spanish,
        Self::French,
        Self::Italian,
        Self::Portuguese,
        Self::German,
        Self::Japanese,
        Self::Korean,
        Self::Chinese,
        Self::Other,
    ];

    /// Wire code, as submitted by the form and stored in entries
    pub fn code(&self) -> &'static str {
        match self {
            Self::Spanish => "spanish",
            Self::French => "french",
            Self::Italian => "italian",
            Self::Portuguese => "portuguese",
            Self::German => "german",
            Self::Japanese => "japanese",
            Self::Korean => "korean",
            Self::Chinese => "chinese",
            Self::Other => "other",
        }
    }

    /// Human label shown in the language picker
    pub fn label(&self) -> &'static str {
        match self {
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::Italian => "Italian",
            Self::Portuguese => "Portuguese",
            Self::German => "German",
            Self::Japanese => "Japanese",
            Self::Korean => "Korean",
            Self::Chinese => "Chinese",
            Self::Other => "Other",
        }
    }

    /// Parses an optional form value; blank means "not selected"
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, ParseLanguageError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(code) => code.parse().map(Some),
        }
    }
}

impl FromStr for TargetLanguage {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|language| language.code() == wanted)
            .ok_or_else(|| ParseLanguageError(s.to_string()))
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
