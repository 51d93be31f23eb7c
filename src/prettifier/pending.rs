//! Per-key tracking of in-flight formatter calls.
//!
//! The first caller for a key becomes the leader and receives a [`Publisher`];
//! every later caller for the same key receives a [`Waiter`] that resolves to
//! whatever the leader publishes. Each key owns its own `watch` channel, so a
//! slow formatter call only holds up callers of that key.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;

use super::entry::FormattedEntry;

type Outcome = Option<Arc<FormattedEntry>>;

/// In-flight requests keyed by original text.
#[derive(Default)]
pub struct PendingRequests {
    requests: HashMap<Arc<str>, watch::Receiver<Outcome>>,
}

/// Result of [`PendingRequests::attach`].
pub enum Attach {
    /// No request was outstanding; the caller must run the formatter.
    Leader(Publisher),
    /// A request is outstanding; the caller should wait for its outcome.
    Waiter(Waiter),
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join the outstanding request for `original`, or register a new one.
    pub fn attach(&mut self, original: &str) -> Attach {
        if let Some(receiver) = self.requests.get(original) {
            return Attach::Waiter(Waiter {
                receiver: receiver.clone(),
            });
        }

        let key: Arc<str> = Arc::from(original);
        let (sender, receiver) = watch::channel(None);
        self.requests.insert(Arc::clone(&key), receiver);
        Attach::Leader(Publisher { key, sender })
    }

    /// Clear the pending marker for `original`. Returns whether one existed.
    pub fn release(&mut self, original: &str) -> bool {
        self.requests.remove(original).is_some()
    }

    pub fn contains(&self, original: &str) -> bool {
        self.requests.contains_key(original)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Held by the leader of a pending request.
///
/// Dropping it without calling [`Publisher::publish`] wakes every waiter with
/// no outcome.
pub struct Publisher {
    key: Arc<str>,
    sender: watch::Sender<Outcome>,
}

impl Publisher {
    /// The shared key, reused by the entry built from this request.
    pub fn key(&self) -> &Arc<str> {
        &self.key
    }

    /// Deliver `entry` to every attached waiter.
    pub fn publish(self, entry: Arc<FormattedEntry>) {
        self.sender.send_replace(Some(entry));
    }
}

/// Held by callers attached to someone else's pending request.
pub struct Waiter {
    receiver: watch::Receiver<Outcome>,
}

impl Waiter {
    /// Wait for the leader's entry. `None` means the leader went away without
    /// publishing and the caller should start over.
    pub async fn outcome(mut self) -> Option<Arc<FormattedEntry>> {
        match self.receiver.wait_for(Option::is_some).await {
            Ok(published) => (*published).clone(),
            Err(_) => None,
        }
    }
}
