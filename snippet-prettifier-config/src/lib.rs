//! Configuration for the snippet-prettifier service.
//!
//! This crate provides loading, saving, and default values for the
//! pretty-print service. It includes:
//!
//! - Cache sizing (aggregate byte budget)
//! - Position-mapper tuning (lookahead window)
//! - The external formatter command and its arguments

pub mod error;
pub mod prettify;

pub use error::ConfigError;
pub use prettify::{FormatterCommandConfig, PrettyPrintConfig};
