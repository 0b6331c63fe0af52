use crate::domain::services::ports::Notifier;
use log::info;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(4);
const MAX_VISIBLE: usize = 3;

/// Transient messages that dismiss themselves after `ttl`.
pub struct Snackbar {
    ttl: Duration,
    queue: Mutex<VecDeque<(String, Instant)>>,
}

impl Default for Snackbar {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Snackbar {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            queue: Mutex::new(VecDeque::new()),
        }
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<(String, Instant)>> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Messages that have not yet been dismissed, oldest first.
    pub fn visible(&self) -> Vec<String> {
        let mut queue = self.queue();
        let now = Instant::now();
        queue.retain(|(_, shown_at)| now.duration_since(*shown_at) < self.ttl);
        queue.iter().map(|(message, _)| message.clone()).collect()
    }

    pub fn dismiss_all(&self) {
        self.queue().clear();
    }
}

impl Notifier for Snackbar {
    fn notify(&self, message: String) {
        info!("{message}");
        let mut queue = self.queue();
        if queue.len() == MAX_VISIBLE {
            queue.pop_front();
        }
        queue.push_back((message, Instant::now()));
    }
}
