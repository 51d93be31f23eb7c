//! Shared integration test helpers for snippet-prettifier.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{CountingFormatter, yield_until};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers is used per file.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use snippet_prettifier::{FormatError, SourceFormatter};
use tokio::sync::Semaphore;

/// A formatter with canned outputs that counts its invocations.
///
/// Inputs without a canned output are collapsed onto one line (whitespace
/// runs become a single space); inputs listed in `failures` fail.
#[derive(Clone, Default)]
pub struct CountingFormatter {
    calls: Arc<AtomicUsize>,
    outputs: Arc<HashMap<String, String>>,
    failures: Arc<Vec<String>>,
    gate: Option<Arc<Semaphore>>,
}

impl CountingFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, input: &str, output: &str) -> Self {
        Arc::make_mut(&mut self.outputs).insert(input.to_string(), output.to_string());
        self
    }

    pub fn failing_on(mut self, input: &str) -> Self {
        Arc::make_mut(&mut self.failures).push(input.to_string());
        self
    }

    /// Block every call until `release` hands out a permit.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SourceFormatter for CountingFormatter {
    async fn format(&self, text: &str) -> Result<String, FormatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| FormatError::Failed(e.to_string()))?
                .forget();
        }
        if self.failures.iter().any(|f| f == text) {
            return Err(FormatError::Failed("syntax error".to_string()));
        }
        Ok(match self.outputs.get(text) {
            Some(output) => output.clone(),
            None => text.split_whitespace().collect::<Vec<_>>().join(" "),
        })
    }
}

/// Yield to the scheduler until `condition` holds, up to a generous bound.
pub async fn yield_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached while yielding");
}

/// A snippet of exactly `len` bytes that the default formatter leaves unchanged.
pub fn snippet(tag: char, len: usize) -> String {
    std::iter::repeat_n(tag, len).collect()
}
