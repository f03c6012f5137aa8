//! Shared progress log for extraction calls
//!
//! A top-level extraction call and all of its recursively spawned nested
//! tasks append to one [`ProgressLog`]. It is the only mutable state shared
//! across concurrent branches, so appends are synchronized and ordered.
//! Consumers either snapshot the accumulated log after the fact or subscribe
//! to a live broadcast feed.

use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Capacity of the live broadcast feed; slow subscribers that fall further
/// behind than this lose the oldest messages, not the log itself.
const FEED_CAPACITY: usize = 1000;

/// Thread-safe, append-only, ordered log of human-readable status messages
///
/// Cloning is cheap and shares the underlying log, which is how the engine
/// hands the same sink to every nested extraction task.
#[derive(Clone)]
pub struct ProgressLog {
    entries: Arc<Mutex<Vec<String>>>,
    feed: broadcast::Sender<String>,
}

impl ProgressLog {
    /// Create an empty log
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            feed,
        }
    }

    /// Append one message to the log and the live feed
    ///
    /// The feed send is best-effort: with no active subscribers it is a
    /// no-op, and the message is still retained in the log. A poisoned lock
    /// is recovered rather than dropping the append, so the log and the
    /// feed never diverge.
    pub fn append(&self, message: impl Into<String>) {
        let message = message.into();
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.clone());
        self.feed.send(message).ok();
    }

    /// Subscribe to messages appended after this point
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.feed.subscribe()
    }

    /// Copy of the accumulated log, in append order
    pub fn snapshot(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of messages appended so far
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// True if nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProgressLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressLog")
            .field("len", &self.len())
            .finish()
    }
}
