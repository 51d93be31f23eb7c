//! snippet-prettifier: an in-process pretty-print service for source snippets.
//!
//! Callers ask a shared [`PrettyPrintService`] to format a snippet and receive
//! a [`FormattedEntry`] holding the original text, the formatted text, and a
//! lazily computed mapping from original char positions to formatted ones.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use snippet_prettifier::{ExternalCommandFormatter, PrettyPrintService};
//!
//! let formatter = ExternalCommandFormatter::new("sqlfmt", vec!["-".into()]);
//! let service = Arc::new(PrettyPrintService::new(formatter, 4 * 1024 * 1024));
//!
//! if !service.has_cached(sql) {
//!     show_loading_indicator();
//! }
//! let entry = service.format(sql).await;
//! let cursor = entry.map_at(cursor_in_original);
//! ```

pub mod prettifier;

pub use prettifier::{
    CacheStats, ExternalCommandFormatter, FormatCache, FormatError, FormattedEntry,
    PrettyPrintService, ServiceStats, SourceFormatter, compute_mapping,
    compute_mapping_with_window, create_service_from_config, service_with_formatter,
};
pub use snippet_prettifier_config::{FormatterCommandConfig, PrettyPrintConfig};
