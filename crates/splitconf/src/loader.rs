//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, SplitConfig, TrackMode};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided it replaces the local override, and is returned
/// even when missing so that loading reports the bad path.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/midisplit/config.toml");
    if system.exists() {
        files.push(system);
    }

    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("midisplit/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        files.push(path.to_path_buf());
        return files;
    }

    let local = PathBuf::from("midisplit.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Overlay the values of a TOML file onto `config`.
pub fn apply_file(config: &mut SplitConfig, path: &Path) -> Result<(), ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    apply_toml(config, &contents, path)
}

/// Overlay TOML text onto `config`. Keys that are absent keep their value.
pub fn apply_toml(config: &mut SplitConfig, contents: &str, path: &Path) -> Result<(), ConfigError> {
    let table: toml::Table = contents
        .parse()
        .map_err(|e: toml::de::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let origin = path.display().to_string();
    let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
        origin: origin.clone(),
        key: key.to_string(),
        message: message.to_string(),
    };

    if let Some(tools) = table.get("tools").and_then(|v| v.as_table()) {
        if let Some(v) = tools.get("midicsv") {
            config.tools.midicsv = v
                .as_str()
                .ok_or_else(|| invalid("tools.midicsv", "expected a string"))?
                .to_string();
        }
        if let Some(v) = tools.get("csvmidi") {
            config.tools.csvmidi = v
                .as_str()
                .ok_or_else(|| invalid("tools.csvmidi", "expected a string"))?
                .to_string();
        }
        if let Some(v) = tools.get("timeout_secs") {
            config.tools.timeout_secs = v
                .as_integer()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("tools.timeout_secs", "expected a positive integer"))?
                as u64;
        }
    }

    if let Some(output) = table.get("output").and_then(|v| v.as_table()) {
        if let Some(v) = output.get("dir_name") {
            config.output.dir_name = v
                .as_str()
                .ok_or_else(|| invalid("output.dir_name", "expected a string"))?
                .to_string();
        }
        if let Some(v) = output.get("remove_csv") {
            config.output.remove_csv = Some(
                v.as_bool()
                    .ok_or_else(|| invalid("output.remove_csv", "expected a boolean"))?,
            );
        }
        if let Some(v) = output.get("tracks") {
            let raw = v
                .as_str()
                .ok_or_else(|| invalid("output.tracks", "expected a string"))?;
            config.output.tracks = raw
                .parse::<TrackMode>()
                .map_err(|e| invalid("output.tracks", &e))?;
        }
        if let Some(v) = output.get("jobs") {
            config.output.jobs = v
                .as_integer()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("output.jobs", "expected a positive integer"))?
                as usize;
        }
        if let Some(v) = output.get("fail_on_empty") {
            config.output.fail_on_empty = v
                .as_bool()
                .ok_or_else(|| invalid("output.fail_on_empty", "expected a boolean"))?;
        }
    }

    if let Some(logging) = table.get("logging").and_then(|v| v.as_table()) {
        if let Some(v) = logging.get("log_level") {
            config.logging.log_level = v
                .as_str()
                .ok_or_else(|| invalid("logging.log_level", "expected a string"))?
                .to_string();
        }
    }

    Ok(())
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(
    config: &mut SplitConfig,
    sources: &mut ConfigSources,
) -> Result<(), ConfigError> {
    apply_overrides_with(config, sources, |key| env::var(key).ok())
}

/// Apply overrides read through `lookup`, which maps a variable name to its value.
pub fn apply_overrides_with<F>(
    config: &mut SplitConfig,
    sources: &mut ConfigSources,
    lookup: F,
) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let invalid = |key: &str, message: String| ConfigError::InvalidValue {
        origin: "environment".to_string(),
        key: key.to_string(),
        message,
    };

    if let Some(v) = lookup("MIDISPLIT_MIDICSV") {
        config.tools.midicsv = expand_path(&v).display().to_string();
        sources.env_overrides.push("MIDISPLIT_MIDICSV".to_string());
    }
    if let Some(v) = lookup("MIDISPLIT_CSVMIDI") {
        config.tools.csvmidi = expand_path(&v).display().to_string();
        sources.env_overrides.push("MIDISPLIT_CSVMIDI".to_string());
    }
    if let Some(v) = lookup("MIDISPLIT_TIMEOUT_SECS") {
        config.tools.timeout_secs = v
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| invalid("MIDISPLIT_TIMEOUT_SECS", format!("not a positive integer: {v}")))?;
        sources.env_overrides.push("MIDISPLIT_TIMEOUT_SECS".to_string());
    }

    if let Some(v) = lookup("MIDISPLIT_OUTPUT_DIR") {
        config.output.dir_name = v;
        sources.env_overrides.push("MIDISPLIT_OUTPUT_DIR".to_string());
    }
    if let Some(v) = lookup("MIDISPLIT_REMOVE_CSV") {
        config.output.remove_csv = Some(
            parse_bool(&v).ok_or_else(|| invalid("MIDISPLIT_REMOVE_CSV", format!("not a boolean: {v}")))?,
        );
        sources.env_overrides.push("MIDISPLIT_REMOVE_CSV".to_string());
    }
    if let Some(v) = lookup("MIDISPLIT_TRACKS") {
        config.output.tracks = v.parse::<TrackMode>().map_err(|e| invalid("MIDISPLIT_TRACKS", e))?;
        sources.env_overrides.push("MIDISPLIT_TRACKS".to_string());
    }
    if let Some(v) = lookup("MIDISPLIT_JOBS") {
        config.output.jobs = v
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| invalid("MIDISPLIT_JOBS", format!("not a positive integer: {v}")))?;
        sources.env_overrides.push("MIDISPLIT_JOBS".to_string());
    }
    if let Some(v) = lookup("MIDISPLIT_FAIL_ON_EMPTY") {
        config.output.fail_on_empty = parse_bool(&v)
            .ok_or_else(|| invalid("MIDISPLIT_FAIL_ON_EMPTY", format!("not a boolean: {v}")))?;
        sources.env_overrides.push("MIDISPLIT_FAIL_ON_EMPTY".to_string());
    }

    if let Some(v) = lookup("MIDISPLIT_LOG_LEVEL") {
        config.logging.log_level = v;
        sources.env_overrides.push("MIDISPLIT_LOG_LEVEL".to_string());
    }
    // Also support RUST_LOG
    if let Some(v) = lookup("RUST_LOG") {
        config.logging.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }

    Ok(())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
