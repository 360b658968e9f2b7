use seasonfix_core::{ConfigError, MatcherMode};

use crate::config::SeriesConfig;
use crate::matchers::{self, SampleMatcher};
use crate::parser;

/// Episode extractor chosen for one series.
#[derive(Debug, Clone)]
pub enum Extractor {
    /// Built-in heuristics, used when a series has no configuration.
    Heuristic,
    NthNumber {
        index: i64,
        ignore_version: bool,
    },
    NthBracket {
        open: String,
        close: String,
        index: i64,
        ignore_version: bool,
    },
    Sample(SampleMatcher),
}

impl Extractor {
    /// Build the matcher a series configuration asks for.
    pub fn from_config(cfg: &SeriesConfig) -> Result<Self, ConfigError> {
        let mode: MatcherMode = cfg
            .mode
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .ok_or(ConfigError::MissingMode)?
            .parse()?;
        let ignore_version = cfg.ignore_version_suffix;

        match mode {
            MatcherMode::NthNumber => Ok(Self::NthNumber {
                index: index_or_default(cfg.number_index.as_ref(), "number_index")?,
                ignore_version,
            }),
            MatcherMode::NthBracket => Ok(Self::NthBracket {
                open: token_or_default(cfg.bracket_open.as_deref(), "[", "bracket_open")?,
                close: token_or_default(cfg.bracket_close.as_deref(), "]", "bracket_close")?,
                index: index_or_default(cfg.bracket_index.as_ref(), "bracket_index")?,
                ignore_version,
            }),
            MatcherMode::Sample => {
                let sample = cfg.sample.as_deref().unwrap_or_default();
                Ok(Self::Sample(SampleMatcher::new(sample, ignore_version)?))
            }
        }
    }

    pub fn mode(&self) -> Option<MatcherMode> {
        match self {
            Self::Heuristic => None,
            Self::NthNumber { .. } => Some(MatcherMode::NthNumber),
            Self::NthBracket { .. } => Some(MatcherMode::NthBracket),
            Self::Sample(_) => Some(MatcherMode::Sample),
        }
    }

    /// Template of a mode `F` extractor.
    pub fn sample(&self) -> Option<&str> {
        match self {
            Self::Sample(m) => Some(m.sample()),
            _ => None,
        }
    }

    /// Episode number for a file name, if this extractor can find one.
    pub fn extract(&self, name: &str) -> Option<u32> {
        match self {
            Self::Heuristic => parser::parse_episode(name),
            Self::NthNumber {
                index,
                ignore_version,
            } => matchers::nth_number(name, *index, *ignore_version),
            Self::NthBracket {
                open,
                close,
                index,
                ignore_version,
            } => matchers::nth_bracket(name, open, close, *index, *ignore_version),
            Self::Sample(m) => m.matches(name),
        }
    }
}

fn index_or_default(
    param: Option<&crate::config::IndexParam>,
    field: &'static str,
) -> Result<i64, ConfigError> {
    param.map_or(Ok(1), |p| p.to_index(field))
}

fn token_or_default(
    value: Option<&str>,
    default: &str,
    field: &'static str,
) -> Result<String, ConfigError> {
    match value {
        None => Ok(default.to_string()),
        Some("") => Err(ConfigError::InvalidParameter {
            field,
            value: String::new(),
        }),
        Some(token) => Ok(token.to_string()),
    }
}
