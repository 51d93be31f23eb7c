//! Configuration structures for the pretty-print service.
//!
//! Maps to the top level of `config.yaml`:
//!
//! ```yaml
//! capacity_bytes: 4194304
//! lookahead_window: 200
//! formatter:
//!   command: prettier
//!   args: ["--stdin-filepath", "snippet.ts"]
//!   timeout_ms: 5000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_capacity_bytes() -> usize {
    4 * 1024 * 1024
}

fn default_lookahead_window() -> usize {
    200
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level pretty-print service configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrettyPrintConfig {
    /// Aggregate size budget of the formatted-entry cache, in bytes.
    #[serde(default = "default_capacity_bytes")]
    pub capacity_bytes: usize,

    /// How far ahead (in characters) the position mapper scans the formatted
    /// text for each source character.
    #[serde(default = "default_lookahead_window")]
    pub lookahead_window: usize,

    /// External command used to pretty-print snippets.
    #[serde(default)]
    pub formatter: Option<FormatterCommandConfig>,
}

impl Default for PrettyPrintConfig {
    fn default() -> Self {
        Self {
            capacity_bytes: default_capacity_bytes(),
            lookahead_window: default_lookahead_window(),
            formatter: None,
        }
    }
}

/// An external formatter invocation: text is piped to stdin, the formatted
/// result is read from stdout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormatterCommandConfig {
    /// Executable name or path.
    pub command: String,

    /// Arguments passed to the command.
    #[serde(default)]
    pub args: Vec<String>,

    /// Kill the command and fall back to the unformatted text after this many
    /// milliseconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl PrettyPrintConfig {
    /// Load configuration from the default path, or return defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if !config_path.exists() {
            log::info!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load and validate configuration from an explicit YAML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_yaml_ng::from_str(&contents)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write configuration as YAML, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;
        fs::write(path, yaml)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity_bytes == 0 {
            return Err(ConfigError::Validation(
                "capacity_bytes must be greater than 0".to_string(),
            ));
        }
        if let Some(formatter) = &self.formatter
            && formatter.command.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "formatter.command must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Default config file location (`<config dir>/snippet-prettifier/config.yaml`).
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Directory holding the config file.
    pub fn config_dir() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("snippet-prettifier")
        } else {
            PathBuf::from(".").join("snippet-prettifier")
        }
    }
}
