//! The formatter seam: the opaque pretty-printer the service delegates to.

use std::future::Future;

/// Errors that can occur while formatting a snippet.
///
/// These never escape `PrettyPrintService::format`; they are logged and
/// replaced by an unformatted fallback entry.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The formatter rejected the input or failed to produce output.
    #[error("format failed: {0}")]
    Failed(String),
    /// A required external command was not found.
    #[error("command not found: {0}")]
    CommandNotFound(String),
    /// The formatter produced output that is not valid text.
    #[error("invalid formatter output: {0}")]
    InvalidOutput(String),
    /// The formatting operation timed out.
    #[error("format timed out after {0}ms")]
    Timeout(u64),
    /// An I/O error talking to the formatter.
    #[error("formatter I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pretty-prints source text.
///
/// Implementations are assumed pure with respect to their input: the same
/// text yields the same output. They may be slow and may fail.
pub trait SourceFormatter: Send + Sync {
    /// Format `text`, returning the pretty-printed result.
    fn format(&self, text: &str) -> impl Future<Output = Result<String, FormatError>> + Send;
}
