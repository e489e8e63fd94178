//! Transient user-facing messages

use serde::Serialize;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A toast: short title, one-line description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// Submit pressed with no email
    pub fn email_required() -> Self {
        Self::new(
            "Email required",
            "Please enter your email address to join the waitlist.",
            Severity::Warning,
        )
    }

    pub fn welcome() -> Self {
        Self::new(
            "Welcome to Lody! 🎶",
            "You're on the waitlist! Check your email for confirmation.",
            Severity::Info,
        )
    }

    /// Same text for every registration failure
    pub fn something_went_wrong() -> Self {
        Self::new(
            "Something went wrong",
            "Please try again or contact us if the problem persists.",
            Severity::Error,
        )
    }
}

/// Displays notifications. Fire-and-forget: implementations must not block
/// and cannot report failure back to the caller.
#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
