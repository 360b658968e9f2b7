#![allow(clippy::collapsible_if, clippy::collapsible_else_if)]
pub mod config;
pub mod extractor;
pub mod fs;
pub mod matchers;
pub mod organize;
pub mod parser;

pub use config::{CONFIG_FILE_NAME, SeriesConfig, load_series_config};
pub use extractor::Extractor;
pub use fs::{FileSystem, LocalFs};
pub use organize::{Action, OrganizeError, OrganizeReport, Organizer, RunFailure};
pub use seasonfix_core::{ConfigError, MatcherMode, MediaKind, OnMiss, is_target_file};
