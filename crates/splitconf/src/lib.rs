//! Configuration loading for midisplit.
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/midisplit/config.toml` (system)
//! 2. `~/.config/midisplit/config.toml` (user)
//! 3. `./midisplit.toml` or the `--config` file (local override)
//! 4. Environment variables (`MIDISPLIT_*`, `RUST_LOG`)
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Example Config
//!
//! ```toml
//! [tools]
//! midicsv = "/usr/local/bin/midicsv"
//! csvmidi = "/usr/local/bin/csvmidi"
//! timeout_secs = 30
//!
//! [output]
//! dir_name = "split_channels"
//! remove_csv = false
//! tracks = "collapse"
//! jobs = 4
//!
//! [logging]
//! log_level = "debug"
//! ```

pub mod loader;
pub mod settings;

pub use loader::{discover_config_files, discover_config_files_with_override, ConfigSources};
pub use settings::{LoggingConfig, OutputConfig, ToolsConfig, TrackMode};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key} in {origin}: {message}")]
    InvalidValue {
        origin: String,
        key: String,
        message: String,
    },
}

/// Complete midisplit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SplitConfig {
    /// Load configuration from all standard sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration, with `config_path` replacing `./midisplit.toml`.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration and report which files and variables contributed.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = SplitConfig::default();

        for path in loader::discover_config_files_with_override(config_path) {
            loader::apply_file(&mut config, &path)?;
            sources.files.push(path);
        }

        loader::apply_env_overrides(&mut config, &mut sources)?;

        Ok((config, sources))
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> String {
        let mut output = String::new();

        output.push_str("# midisplit configuration\n\n");

        output.push_str("[tools]\n");
        output.push_str(&format!("midicsv = {:?}\n", self.tools.midicsv));
        output.push_str(&format!("csvmidi = {:?}\n", self.tools.csvmidi));
        output.push_str(&format!("timeout_secs = {}\n", self.tools.timeout_secs));

        output.push_str("\n[output]\n");
        output.push_str(&format!("dir_name = {:?}\n", self.output.dir_name));
        if let Some(remove) = self.output.remove_csv {
            output.push_str(&format!("remove_csv = {}\n", remove));
        }
        output.push_str(&format!("tracks = \"{}\"\n", self.output.tracks));
        output.push_str(&format!("jobs = {}\n", self.output.jobs));
        output.push_str(&format!("fail_on_empty = {}\n", self.output.fail_on_empty));

        output.push_str("\n[logging]\n");
        output.push_str(&format!("log_level = {:?}\n", self.logging.log_level));

        output
    }
}
