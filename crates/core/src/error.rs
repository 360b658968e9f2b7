use std::path::PathBuf;

use thiserror::Error;

/// A series configuration that cannot be loaded or turned into a matcher.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("missing `mode`")]
    MissingMode,

    #[error("unsupported mode `{0}` (expected A, B or F)")]
    UnsupportedMode(String),

    #[error("invalid value for `{field}`: {value}")]
    InvalidParameter { field: &'static str, value: String },

    #[error("`sample` is empty")]
    EmptySample,

    #[error("`sample` has no {{digits}} placeholder")]
    MissingPlaceholder,

    #[error("`sample` has {0} placeholders, expected exactly one")]
    MultiplePlaceholders(usize),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read_failed",
            Self::Parse { .. } => "parse_failed",
            Self::MissingMode => "missing_mode",
            Self::UnsupportedMode(_) => "unsupported_mode",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::EmptySample => "empty_sample",
            Self::MissingPlaceholder => "missing_placeholder",
            Self::MultiplePlaceholders(_) => "multiple_placeholders",
        }
    }
}
