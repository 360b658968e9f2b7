pub mod error;
pub mod types;

pub use error::ConfigError;
pub use types::{MatcherMode, MediaKind, OnMiss, is_target_file};
