//! The value cached per snippet: original text, formatted text, and a lazily
//! computed position mapping between them.

use std::fmt;
use std::sync::{Arc, OnceLock};

use super::mapping::{DEFAULT_LOOKAHEAD, compute_mapping_with_window};

/// Bytes charged per mapping slot once the mapping has been materialized.
pub const MAPPING_SLOT_BYTES: usize = 4;

/// A pretty-printed snippet.
///
/// Immutable apart from the memoized mapping, which is pure given
/// `(original, formatted)` and computed at most once.
pub struct FormattedEntry {
    original: Arc<str>,
    formatted: Arc<str>,
    lookahead: usize,
    fallback: bool,
    mapping: OnceLock<Vec<Option<usize>>>,
}

impl FormattedEntry {
    /// Wrap a successful formatter result.
    pub fn new(original: impl Into<Arc<str>>, formatted: impl Into<Arc<str>>) -> Self {
        Self::with_lookahead(original, formatted, DEFAULT_LOOKAHEAD)
    }

    /// Wrap a formatter result, mapping positions with a custom lookahead window.
    pub fn with_lookahead(
        original: impl Into<Arc<str>>,
        formatted: impl Into<Arc<str>>,
        lookahead: usize,
    ) -> Self {
        Self {
            original: original.into(),
            formatted: formatted.into(),
            lookahead,
            fallback: false,
            mapping: OnceLock::new(),
        }
    }

    /// Degraded entry used when the formatter failed: the formatted text is the
    /// original, so the mapping is the identity on non-whitespace chars.
    pub fn fallback(original: impl Into<Arc<str>>, lookahead: usize) -> Self {
        let original = original.into();
        Self {
            formatted: Arc::clone(&original),
            original,
            lookahead,
            fallback: true,
            mapping: OnceLock::new(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    /// Whether this entry stands in for a failed formatter call.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Char-indexed mapping from `original` into `formatted`, computed on first use.
    pub fn mapping(&self) -> &[Option<usize>] {
        self.mapping.get_or_init(|| {
            compute_mapping_with_window(&self.original, &self.formatted, self.lookahead)
        })
    }

    /// Formatted char index corresponding to original char `index`, if known.
    pub fn map_at(&self, index: usize) -> Option<usize> {
        self.mapping().get(index).copied().flatten()
    }

    pub fn is_mapping_materialized(&self) -> bool {
        self.mapping.get().is_some()
    }

    /// Approximate memory cost used for cache accounting only.
    pub fn size_estimate(&self) -> usize {
        let mapping_bytes = self
            .mapping
            .get()
            .map_or(0, |m| m.len() * MAPPING_SLOT_BYTES);
        self.formatted.len() + mapping_bytes
    }

    pub(crate) fn original_arc(&self) -> &Arc<str> {
        &self.original
    }
}

impl fmt::Debug for FormattedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattedEntry")
            .field("original_len", &self.original.len())
            .field("formatted_len", &self.formatted.len())
            .field("fallback", &self.fallback)
            .field("mapping_materialized", &self.is_mapping_materialized())
            .finish()
    }
}
