//! Configuration sections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// External converter programs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Binary MIDI to text converter. Default: `midicsv`
    #[serde(default = "ToolsConfig::default_midicsv")]
    pub midicsv: String,

    /// Text to binary MIDI converter. Default: `csvmidi`
    #[serde(default = "ToolsConfig::default_csvmidi")]
    pub csvmidi: String,

    /// Seconds a single converter invocation may run. Default: 60
    #[serde(default = "ToolsConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ToolsConfig {
    fn default_midicsv() -> String {
        "midicsv".to_string()
    }

    fn default_csvmidi() -> String {
        "csvmidi".to_string()
    }

    fn default_timeout_secs() -> u64 {
        60
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            midicsv: Self::default_midicsv(),
            csvmidi: Self::default_csvmidi(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

/// How split tracks are laid out in each output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackMode {
    #[default]
    Renumber,
    Collapse,
}

impl FromStr for TrackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "renumber" => Ok(TrackMode::Renumber),
            "collapse" => Ok(TrackMode::Collapse),
            other => Err(format!(
                "expected 'renumber' or 'collapse', got '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for TrackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackMode::Renumber => f.write_str("renumber"),
            TrackMode::Collapse => f.write_str("collapse"),
        }
    }
}

/// Output layout and cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory created next to the input. Default: `split_channels`
    #[serde(default = "OutputConfig::default_dir_name")]
    pub dir_name: String,

    /// Remove intermediate CSV files. Unset: remove only for MIDI input.
    #[serde(default)]
    pub remove_csv: Option<bool>,

    #[serde(default)]
    pub tracks: TrackMode,

    /// Channel encodes allowed in flight at once. Default: 1
    #[serde(default = "OutputConfig::default_jobs")]
    pub jobs: usize,

    /// Treat an input without channel events as an error.
    #[serde(default)]
    pub fail_on_empty: bool,
}

impl OutputConfig {
    fn default_dir_name() -> String {
        "split_channels".to_string()
    }

    fn default_jobs() -> usize {
        1
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir_name: Self::default_dir_name(),
            remove_csv: None,
            tracks: TrackMode::default(),
            jobs: Self::default_jobs(),
            fail_on_empty: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive. Default: `info`
    #[serde(default = "LoggingConfig::default_log_level")]
    pub log_level: String,
}

impl LoggingConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
