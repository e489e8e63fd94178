//! Prints notifications for the `join` command

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::signup::{Notification, Notifier, Severity};

/// Writes one line per notification; errors go to stderr, the rest to stdout
pub struct ConsoleNotifier {
    out: Arc<Mutex<dyn Write + Send>>,
    err: Arc<Mutex<dyn Write + Send>>,
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::with_writers(
            Arc::new(Mutex::new(std::io::stdout())),
            Arc::new(Mutex::new(std::io::stderr())),
        )
    }

    pub fn with_writers(out: Arc<Mutex<dyn Write + Send>>, err: Arc<Mutex<dyn Write + Send>>) -> Self {
        Self { out, err }
    }
}

fn format_line(notification: &Notification) -> String {
    let marker = match notification.severity {
        Severity::Info => "✔",
        Severity::Warning => "!",
        Severity::Error => "✖",
    };

    format!(
        "{} {}: {}",
        marker, notification.title, notification.description
    )
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let target = match notification.severity {
            Severity::Error => &self.err,
            Severity::Info | Severity::Warning => &self.out,
        };

        let mut writer = target.lock().unwrap_or_else(PoisonError::into_inner);
        // Nowhere left to report a failed write
        let _ = writeln!(writer, "{}", format_line(&notification));
    }
}
