//! Outbound notifications.
//!
//! The session decides *when* to notify; how a notification reaches the user
//! (desktop toast, terminal line, nothing) is up to the [`Notifier`] it was
//! given.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

pub trait Notifier {
    fn notify(&self, title: &str, body: &str);

    /// Bring the application window to the foreground.
    fn focus_window(&self) {}
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<Notification>>,
    focus_requests: RefCell<u32>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications sent so far, oldest first.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.borrow().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|n| n.title.clone()).collect()
    }

    pub fn focus_requests(&self) -> u32 {
        *self.focus_requests.borrow()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        self.sent.borrow_mut().push(Notification {
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    fn focus_window(&self) {
        *self.focus_requests.borrow_mut() += 1;
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, title: &str, body: &str) {
        (**self).notify(title, body)
    }

    fn focus_window(&self) {
        (**self).focus_window()
    }
}
