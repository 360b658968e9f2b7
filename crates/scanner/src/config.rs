//! Per-series configuration, read from `seasonfix.toml` inside a series folder.
//!
//! ```toml
//! mode = "B"
//! on_miss = "error"
//! ignore_version_suffix = true
//! bracket_open = "["
//! bracket_close = "]"
//! bracket_index = 3
//! ```
//!
//! Only the document shape is checked here; mode parameters are validated
//! when the extractor is built.

use std::path::Path;

use seasonfix_core::{ConfigError, OnMiss};
use serde::{Deserialize, Serialize};

use crate::fs::FileSystem;

/// File name looked up directly inside each series directory.
pub const CONFIG_FILE_NAME: &str = "seasonfix.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub on_miss: OnMiss,
    #[serde(default = "default_true")]
    pub ignore_version_suffix: bool,

    #[serde(default)]
    pub number_index: Option<IndexParam>,

    #[serde(default)]
    pub bracket_open: Option<String>,
    #[serde(default)]
    pub bracket_close: Option<String>,
    #[serde(default)]
    pub bracket_index: Option<IndexParam>,

    #[serde(default)]
    pub sample: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            mode: None,
            on_miss: OnMiss::Error,
            ignore_version_suffix: true,
            number_index: None,
            bracket_open: None,
            bracket_close: None,
            bracket_index: None,
            sample: None,
        }
    }
}

/// An index as written in the file: `2` or `"2"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexParam {
    Int(i64),
    Text(String),
}

impl IndexParam {
    pub fn to_index(&self, field: &'static str) -> Result<i64, ConfigError> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Text(s) => s.trim().parse().map_err(|_| ConfigError::InvalidParameter {
                field,
                value: s.clone(),
            }),
        }
    }
}

/// Parse a configuration document.
pub fn parse_series_config(text: &str, path: &Path) -> Result<SeriesConfig, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })
}

/// Load the configuration of a series, or `None` when it has no config file.
pub fn load_series_config<F: FileSystem>(
    fs: &F,
    series_dir: &Path,
) -> Result<Option<SeriesConfig>, ConfigError> {
    let path = series_dir.join(CONFIG_FILE_NAME);
    if !fs.is_file(&path) {
        return Ok(None);
    }

    let text = fs
        .read_to_string(&path)
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

    parse_series_config(&text, &path).map(Some)
}
