//! Notifier implementations

mod buffer;
mod console;

pub use buffer::NotificationBuffer;
pub use console::ConsoleNotifier;
