//! Shared test helpers for pretty-print service tests.
//!
//! This module is gated with `#[cfg(test)]` and provides scripted formatters
//! that count their invocations. Import with:
//!
//! ```ignore
//! use crate::prettifier::testing::ScriptedFormatter;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;

use super::traits::{FormatError, SourceFormatter};

/// A formatter that uppercases its input (or fails, if configured to) and
/// records how many times it was called.
///
/// When gated, each matching call blocks until [`ScriptedFormatter::release`] hands
/// out a permit, which lets tests hold a request in flight.
#[derive(Clone, Default)]
pub struct ScriptedFormatter {
    calls: Arc<AtomicUsize>,
    gate: Option<Arc<Semaphore>>,
    gated_input: Option<String>,
    fail: bool,
}

#[allow(dead_code)]
impl ScriptedFormatter {
    /// Uppercasing formatter that completes immediately.
    pub fn uppercase() -> Self {
        Self::default()
    }

    /// Formatter that always fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Block every call until a permit is released.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Block only calls whose input is `text`; everything else completes immediately.
    pub fn gated_on(self, text: &str) -> Self {
        let mut formatter = self.gated();
        formatter.gated_input = Some(text.to_string());
        formatter
    }

    /// Number of calls started so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Let `n` blocked calls proceed.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }
}

impl SourceFormatter for ScriptedFormatter {
    async fn format(&self, text: &str) -> Result<String, FormatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gated = self.gated_input.as_deref().is_none_or(|input| input == text);
        if let Some(gate) = self.gate.as_ref().filter(|_| gated) {
            gate.acquire()
                .await
                .map_err(|e| FormatError::Failed(e.to_string()))?
                .forget();
        }
        if self.fail {
            Err(FormatError::Failed(format!("cannot format {text:?}")))
        } else {
            Ok(text.to_uppercase())
        }
    }
}

/// Yield to the scheduler until `condition` holds, up to a generous bound.
#[allow(dead_code)]
pub async fn yield_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached while yielding");
}
