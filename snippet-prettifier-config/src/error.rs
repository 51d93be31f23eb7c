//! Typed error variants for the snippet-prettifier-config crate.
//!
//! The public loaders return `anyhow::Result`; `ConfigError` values are
//! coerced through the `From` impl `anyhow` provides for any
//! `std::error::Error`, so callers can still `downcast_ref::<ConfigError>()`.

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}
