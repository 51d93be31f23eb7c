//! A [`SourceFormatter`] that delegates to an external command.
//!
//! The snippet is piped to the command's stdin and the formatted text is read
//! back from stdout, e.g. `prettier --stdin-filepath snippet.ts` or `sqlfmt -`.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use snippet_prettifier_config::FormatterCommandConfig;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::traits::{FormatError, SourceFormatter};

/// Formats snippets by running a user-configured command.
#[derive(Debug, Clone)]
pub struct ExternalCommandFormatter {
    command: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ExternalCommandFormatter {
    /// Create a formatter that runs `command` with `args` and no timeout.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            timeout: None,
        }
    }

    /// Build a formatter from its config section.
    pub fn from_config(config: &FormatterCommandConfig) -> Self {
        let formatter = Self::new(config.command.clone(), config.args.clone());
        match config.timeout_ms {
            Some(ms) => formatter.with_timeout(Duration::from_millis(ms)),
            None => formatter,
        }
    }

    /// Kill the command if it has not finished within `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    async fn run(&self, text: &str) -> Result<String, FormatError> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    FormatError::CommandNotFound(format!("{}: {e}", self.command))
                }
                _ => FormatError::Io(e),
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| FormatError::Failed("failed to capture formatter stdin".to_string()))?;

        // Feed stdin while draining stdout so large snippets cannot fill both pipes.
        let feed = async move {
            let result = stdin.write_all(text.as_bytes()).await;
            drop(stdin);
            result
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        if let Err(e) = fed {
            log::debug!("Formatter {} did not read all of stdin: {e}", self.command);
        }
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FormatError::Failed(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let formatted =
            String::from_utf8(output.stdout).map_err(|e| FormatError::InvalidOutput(e.to_string()))?;
        Ok(match_trailing_newline(text, formatted))
    }
}

impl SourceFormatter for ExternalCommandFormatter {
    async fn format(&self, text: &str) -> Result<String, FormatError> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.run(text))
                .await
                .map_err(|_| FormatError::Timeout(timeout.as_millis() as u64))?,
            None => self.run(text).await,
        }
    }
}

/// Command-line formatters terminate their output with a newline; drop it when
/// the snippet itself did not end with one.
fn match_trailing_newline(original: &str, mut formatted: String) -> String {
    if !original.ends_with('\n') && formatted.ends_with('\n') {
        formatted.pop();
        if formatted.ends_with('\r') {
            formatted.pop();
        }
    }
    formatted
}
