//! Snippet pretty-printing with position mapping.
//!
//! Formats source snippets through an opaque, possibly slow and possibly
//! failing formatter, and keeps a best-effort char-position correspondence
//! between the original and the formatted text.
//!
//! # Module Structure
//!
//! ## Core
//! - [`mapping`] — Heuristic original→formatted position alignment.
//! - [`entry`] — `FormattedEntry`: original text, formatted text, and a lazily
//!   computed mapping.
//!
//! ## Service Layer
//! - [`cache`] — `FormatCache`: byte-budgeted LRU cache of entries.
//! - [`pending`] — Per-key tracking of in-flight formatter calls.
//! - [`service`] — `PrettyPrintService`: the composition root callers use.
//!
//! ## Formatters / Configuration
//! - [`traits`] — `SourceFormatter` trait and `FormatError`.
//! - [`external_formatter`] — Formatter that pipes text through a command.
//! - [`config_bridge`] — Builds a service from `snippet-prettifier-config`.

pub mod cache;
pub mod config_bridge;
pub mod entry;
pub mod external_formatter;
pub mod mapping;
pub mod pending;
pub mod service;
#[cfg(test)]
pub(crate) mod testing;
pub mod traits;

pub use cache::*;
pub use config_bridge::*;
pub use entry::*;
pub use external_formatter::*;
pub use mapping::*;
pub use service::*;
pub use traits::*;
