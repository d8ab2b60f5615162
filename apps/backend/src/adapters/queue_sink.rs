use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::AppError;
use crate::protocol::Notification;
use crate::services::collaborators::MessageSink;

/// In-process FIFO message sink.
///
/// Producers never block. Consumers either drain everything queued so far or
/// park until a notification matching a predicate shows up.
#[derive(Default)]
pub struct QueueSink {
    queue: Mutex<VecDeque<Notification>>,
    arrived: Condvar,
}

impl QueueSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every queued notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.queue.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Block until a notification matching `pred` is queued, then remove and
    /// return it. Notifications queued ahead of it stay in place.
    ///
    /// Returns `None` once `timeout` elapses without a match.
    pub fn wait_for<F>(&self, pred: F, timeout: Duration) -> Option<Notification>
    where
        F: Fn(&Notification) -> bool,
    {
        let deadline = Instant::now() + timeout;
        let mut queue = self.queue.lock();
        loop {
            if let Some(pos) = queue.iter().position(&pred) {
                return queue.remove(pos);
            }
            if self.arrived.wait_until(&mut queue, deadline).timed_out() {
                let pos = queue.iter().position(&pred)?;
                return queue.remove(pos);
            }
        }
    }
}

impl MessageSink for QueueSink {
    fn deliver(&self, notification: Notification) -> Result<(), AppError> {
        self.queue.lock().push_back(notification);
        self.arrived.notify_all();
        Ok(())
    }
}
