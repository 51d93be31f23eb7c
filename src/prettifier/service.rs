//! The pretty-print service: cache lookup, request coalescing, and graceful
//! fallback around an opaque [`SourceFormatter`].

use std::sync::Arc;

use parking_lot::Mutex;

use super::cache::{CacheStats, FormatCache};
use super::entry::FormattedEntry;
use super::mapping::DEFAULT_LOOKAHEAD;
use super::pending::{Attach, PendingRequests, Publisher};
use super::traits::SourceFormatter;

/// Formats snippets at most once per distinct input and remembers the results
/// within a byte budget.
///
/// Share one instance between callers (typically behind an `Arc`). The cache
/// and the pending-request map sit behind a single mutex that is never held
/// across the formatter call, so one slow snippet never blocks another.
pub struct PrettyPrintService<F> {
    formatter: F,
    lookahead: usize,
    state: Mutex<ServiceState>,
}

struct ServiceState {
    cache: FormatCache,
    pending: PendingRequests,
    formatter_calls: u64,
    formatter_failures: u64,
    coalesced_waits: u64,
}

impl<F: SourceFormatter> PrettyPrintService<F> {
    /// Create a service with an empty cache of `capacity_bytes`.
    pub fn new(formatter: F, capacity_bytes: usize) -> Self {
        log::info!("Pretty-print service created with a {capacity_bytes} byte cache");
        Self {
            formatter,
            lookahead: DEFAULT_LOOKAHEAD,
            state: Mutex::new(ServiceState {
                cache: FormatCache::new(capacity_bytes),
                pending: PendingRequests::new(),
                formatter_calls: 0,
                formatter_failures: 0,
                coalesced_waits: 0,
            }),
        }
    }

    /// Use a custom position-mapper lookahead window for new entries.
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Pretty-print `original`.
    ///
    /// Returns the cached entry when there is one. Otherwise joins an
    /// outstanding request for the same text, or runs the formatter itself.
    /// Never fails: a formatter error yields an entry whose formatted text is
    /// the original.
    pub async fn format(&self, original: &str) -> Arc<FormattedEntry> {
        loop {
            let attach = {
                let mut state = self.state.lock();
                if let Some(entry) = state.cache.get(original) {
                    log::debug!("Pretty-print cache hit ({} bytes)", original.len());
                    return entry;
                }
                let attach = state.pending.attach(original);
                match &attach {
                    Attach::Leader(_) => state.formatter_calls += 1,
                    Attach::Waiter(_) => state.coalesced_waits += 1,
                }
                attach
            };

            match attach {
                Attach::Leader(publisher) => return self.run_formatter(original, publisher).await,
                Attach::Waiter(waiter) => {
                    log::debug!("Joining in-flight format request ({} bytes)", original.len());
                    if let Some(entry) = waiter.outcome().await {
                        return entry;
                    }
                    log::debug!("In-flight format request was abandoned, retrying");
                }
            }
        }
    }

    /// Whether a formatted entry for `original` is cached. Does not affect recency.
    pub fn has_cached(&self, original: &str) -> bool {
        self.state.lock().cache.contains(original)
    }

    /// Whether a formatter call for `original` is currently in flight.
    pub fn is_pending(&self, original: &str) -> bool {
        self.state.lock().pending.contains(original)
    }

    /// Drop the cached entry for `original`, if any.
    pub fn invalidate(&self, original: &str) -> bool {
        self.state.lock().cache.invalidate(original)
    }

    /// Drop every cached entry. In-flight requests are unaffected.
    pub fn clear(&self) {
        self.state.lock().cache.clear();
    }

    /// Snapshot of cache and formatter counters.
    pub fn stats(&self) -> ServiceStats {
        let state = self.state.lock();
        ServiceStats {
            cache: state.cache.stats(),
            formatter_calls: state.formatter_calls,
            formatter_failures: state.formatter_failures,
            coalesced_waits: state.coalesced_waits,
            pending: state.pending.len(),
        }
    }

    async fn run_formatter(&self, original: &str, publisher: Publisher) -> Arc<FormattedEntry> {
        let key = Arc::clone(publisher.key());
        let in_flight = InFlight {
            state: &self.state,
            publisher: Some(publisher),
        };

        let (entry, failed) = match self.formatter.format(original).await {
            Ok(formatted) => (
                FormattedEntry::with_lookahead(key, formatted, self.lookahead),
                false,
            ),
            Err(e) => {
                log::warn!(
                    "Formatter failed on a {}-byte snippet, showing it unformatted: {e}",
                    original.len()
                );
                (FormattedEntry::fallback(key, self.lookahead), true)
            }
        };

        let entry = Arc::new(entry);
        in_flight.complete(Arc::clone(&entry), failed);
        entry
    }
}

/// Leader-side guard for a pending request.
///
/// If the leader's future is dropped before the formatter returns, the pending
/// marker is cleared and attached waiters are woken to retry.
struct InFlight<'a> {
    state: &'a Mutex<ServiceState>,
    publisher: Option<Publisher>,
}

impl InFlight<'_> {
    fn complete(mut self, entry: Arc<FormattedEntry>, failed: bool) {
        let Some(publisher) = self.publisher.take() else {
            return;
        };
        {
            let mut state = self.state.lock();
            if failed {
                state.formatter_failures += 1;
            }
            state.cache.put(Arc::clone(&entry));
            state.pending.release(publisher.key());
        }
        publisher.publish(entry);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(publisher) = self.publisher.take() {
            self.state.lock().pending.release(publisher.key());
            log::debug!("Format request abandoned before completion");
        }
    }
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceStats {
    /// Cache occupancy and hit/miss counters.
    pub cache: CacheStats,
    /// External formatter invocations started.
    pub formatter_calls: u64,
    /// Invocations that ended in a fallback entry.
    pub formatter_failures: u64,
    /// Requests that joined an in-flight invocation instead of starting one.
    pub coalesced_waits: u64,
    /// Requests currently in flight.
    pub pending: usize,
}
