//! Notice events
//!
//! Business logic publishes outcome notices on a broadcast bus; a
//! presentation layer subscribes and renders them (toasts, in the
//! original UI). Publishing never blocks: with no subscriber the
//! notice is dropped.

use tokio::sync::broadcast;

/// Capacity of the notice broadcast channel
const CHANNEL_CAPACITY: usize = 64;

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A one-line, dismissible user-facing notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Broadcast bus for notices
#[derive(Debug, Clone)]
pub struct NoticeBus {
    tx: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Create a new notice bus
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to notices published after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(NoticeLevel::Success, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.publish(NoticeLevel::Warning, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(NoticeLevel::Error, message.into());
    }

    fn publish(&self, level: NoticeLevel, message: String) {
        // send only fails when nobody is subscribed
        let _ = self.tx.send(Notice { level, message });
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new()
    }
}
