use crate::converter::ConvertError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a split run.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("input file {} does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error(transparent)]
    ExternalTool(#[from] ConvertError),

    #[error(transparent)]
    MalformedRecord(#[from] midicsv::Error),

    #[error("no channel events found in {}", .0.display())]
    EmptyChannelSet(PathBuf),

    #[error(transparent)]
    Config(#[from] splitconf::ConfigError),

    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SplitError {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SplitError::Io {
            context,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SplitError::InputNotFound(_) => ErrorKind::InputNotFound,
            SplitError::ExternalTool(_) => ErrorKind::ExternalToolFailure,
            SplitError::MalformedRecord(_) => ErrorKind::MalformedRecord,
            SplitError::EmptyChannelSet(_) => ErrorKind::EmptyChannelSet,
            SplitError::Config(_) => ErrorKind::Config,
            SplitError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Coarse error categories, mapped to process exit codes by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputNotFound,
    ExternalToolFailure,
    MalformedRecord,
    EmptyChannelSet,
    Config,
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Config | ErrorKind::Io => 1,
            ErrorKind::InputNotFound => 2,
            ErrorKind::MalformedRecord => 3,
            ErrorKind::ExternalToolFailure => 4,
            ErrorKind::EmptyChannelSet => 5,
        }
    }

    /// Pipeline stage named in user-facing error messages.
    pub fn stage(self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
            ErrorKind::InputNotFound => "input",
            ErrorKind::MalformedRecord => "parse",
            ErrorKind::ExternalToolFailure => "convert",
            ErrorKind::EmptyChannelSet => "split",
        }
    }
}
