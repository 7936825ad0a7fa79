//! Conversion between binary MIDI and `midicsv` text.
//!
//! The pipeline only sees the [`Converter`] trait. [`ExternalTools`] drives
//! the `midicsv` and `csvmidi` programs, each call bounded by a timeout.

use async_trait::async_trait;
use splitconf::ToolsConfig;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{tool} not found; install midicsv or point the config at it")]
    ToolNotFound { tool: String },

    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        source: std::io::Error,
    },

    #[error("{tool} exited with {}: {}", .code.map(|c| c.to_string()).unwrap_or_else(|| "signal".to_string()), .stderr.trim())]
    NonZeroExit {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{tool} did not finish within {}s", .after.as_secs_f64())]
    Timeout { tool: String, after: Duration },

    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Binary MIDI <-> intermediate text.
///
/// Implementations must round-trip: `decode` of a file written by `encode`
/// yields the same lines.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Convert a MIDI file to text lines.
    async fn decode(&self, midi_path: &Path) -> Result<Vec<String>, ConvertError>;

    /// Write text lines out as a MIDI file.
    async fn encode(&self, lines: &[String], midi_path: &Path) -> Result<(), ConvertError>;
}

/// The `midicsv` / `csvmidi` command-line tools.
#[derive(Debug, Clone)]
pub struct ExternalTools {
    pub midicsv: String,
    pub csvmidi: String,
    pub timeout: Duration,
}

impl ExternalTools {
    pub fn from_config(config: &ToolsConfig) -> Self {
        Self {
            midicsv: config.midicsv.clone(),
            csvmidi: config.csvmidi.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Run a tool to completion, killing it if the timeout expires.
    async fn run(&self, tool: &str, args: &[&OsStr]) -> Result<Output, ConvertError> {
        debug!("running {} {:?}", tool, args);

        let child = Command::new(tool)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => ConvertError::ToolNotFound {
                    tool: tool.to_string(),
                },
                _ => ConvertError::Spawn {
                    tool: tool.to_string(),
                    source,
                },
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ConvertError::Timeout {
                tool: tool.to_string(),
                after: self.timeout,
            })?
            .map_err(|source| ConvertError::Spawn {
                tool: tool.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ConvertError::NonZeroExit {
                tool: tool.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output)
    }
}

impl Default for ExternalTools {
    fn default() -> Self {
        Self::from_config(&ToolsConfig::default())
    }
}

#[async_trait]
impl Converter for ExternalTools {
    async fn decode(&self, midi_path: &Path) -> Result<Vec<String>, ConvertError> {
        let output = self.run(&self.midicsv, &[midi_path.as_os_str()]).await?;
        let text = midicsv::decode_bytes(&output.stdout);
        Ok(text.lines().map(str::to_string).collect())
    }

    async fn encode(&self, lines: &[String], midi_path: &Path) -> Result<(), ConvertError> {
        let scratch = tempfile::tempdir().map_err(|source| ConvertError::Io {
            context: "failed to create scratch directory in",
            path: std::env::temp_dir(),
            source,
        })?;
        let csv_path = scratch.path().join("encode.csv");

        let mut text = lines.join("\n");
        text.push('\n');
        tokio::fs::write(&csv_path, midicsv::encode_text(&text))
            .await
            .map_err(|source| ConvertError::Io {
                context: "failed to write",
                path: csv_path.clone(),
                source,
            })?;

        self.run(&self.csvmidi, &[csv_path.as_os_str(), midi_path.as_os_str()])
            .await?;
        Ok(())
    }
}
