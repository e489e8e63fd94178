//! Collects notifications so a page render can show them as toasts

use std::sync::{Mutex, PoisonError};

use crate::domain::signup::{Notification, Notifier};

#[derive(Debug, Default)]
pub struct NotificationBuffer {
    pending: Mutex<Vec<Notification>>,
}

impl NotificationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything collected so far, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for NotificationBuffer {
    fn notify(&self, notification: Notification) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_in_order_and_empties() {
        let buffer = NotificationBuffer::new();

        buffer.notify(Notification::email_required());
        buffer.notify(Notification::something_went_wrong());

        let drained = buffer.drain();
        assert_eq!(
            drained,
            vec![
                Notification::email_required(),
                Notification::something_went_wrong()
            ]
        );
        assert!(buffer.drain().is_empty());
    }
}
