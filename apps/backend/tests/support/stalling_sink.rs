//! A sink that holds up the delivering thread once, on request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use codex_backend::adapters::QueueSink;
use codex_backend::protocol::Notification;
use codex_backend::{AppError, MessageSink};

/// Forwards to a [`QueueSink`]. When armed, the next `MarketChanged` sleeps
/// the delivering thread for `stall` before it is queued.
pub struct StallingSink {
    inner: Arc<QueueSink>,
    armed: AtomicBool,
    stall: Duration,
}

impl StallingSink {
    pub fn new(inner: Arc<QueueSink>, stall: Duration) -> Self {
        Self {
            inner,
            armed: AtomicBool::new(false),
            stall,
        }
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

impl MessageSink for StallingSink {
    fn deliver(&self, notification: Notification) -> Result<(), AppError> {
        if matches!(notification, Notification::MarketChanged { .. }) && self.armed.swap(false, Ordering::SeqCst) {
            thread::sleep(self.stall);
        }
        self.inner.deliver(notification)
    }
}
