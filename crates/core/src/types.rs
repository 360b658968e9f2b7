use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

static VIDEO_EXTENSIONS: &[&str] = &["mkv", "mp4", "avi", "mov", "flv", "wmv", "m4v", "webm"];

static SUBTITLE_EXTENSIONS: &[&str] = &["srt", "ass", "ssa", "vtt", "sub"];

static SIDECAR_EXTENSIONS: &[&str] = &["nfo"];

/// Kind of file the organizer renames alongside episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Video,
    Subtitle,
    Sidecar,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [Self::Video, Self::Subtitle, Self::Sidecar];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Subtitle => "subtitle",
            Self::Sidecar => "sidecar",
        }
    }

    /// Extensions (lowercase, without the leading dot) belonging to this kind.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Video => VIDEO_EXTENSIONS,
            Self::Subtitle => SUBTITLE_EXTENSIONS,
            Self::Sidecar => SIDECAR_EXTENSIONS,
        }
    }

    /// Classify an extension, with or without its leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext.as_str()))
    }

    /// Classify a file name by its final suffix.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        Self::from_extension(ext)
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True for any video, subtitle or sidecar file name.
pub fn is_target_file(name: &str) -> bool {
    MediaKind::from_file_name(name).is_some()
}

/// Episode extraction mode selected by a series configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherMode {
    /// `A`: the n-th digit run in the name.
    NthNumber,
    /// `B`: the first digit run inside the n-th delimited span.
    NthBracket,
    /// `F`: a literal sample name with one placeholder.
    Sample,
}

impl MatcherMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NthNumber => "A",
            Self::NthBracket => "B",
            Self::Sample => "F",
        }
    }
}

impl FromStr for MatcherMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::NthNumber),
            "B" => Ok(Self::NthBracket),
            "F" => Ok(Self::Sample),
            _ => Err(ConfigError::UnsupportedMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for MatcherMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with files whose episode number cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OnMiss {
    /// Collect the miss and fail the run once every series was processed.
    #[default]
    Error,
    /// Log and leave the file alone.
    Skip,
}

impl OnMiss {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Skip => "skip",
        }
    }
}

impl From<String> for OnMiss {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("error") {
            Self::Error
        } else {
            Self::Skip
        }
    }
}

impl From<OnMiss> for String {
    fn from(value: OnMiss) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for OnMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
