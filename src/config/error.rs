use crate::pattern::PatternError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read rule table: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("No shows defined in rule table")]
    NoShows,

    #[error("Show name must not be empty")]
    EmptyShowName,

    #[error("Duplicate show name: {name}")]
    DuplicateShowName { name: String },

    #[error("Separator must not be empty")]
    EmptySeparator,

    #[error("Invalid {kind} pattern '{template}' for show '{show}': {source}")]
    Pattern {
        show: String,
        kind: String,
        template: String,
        #[source]
        source: PatternError,
    },

    #[error("Invalid skip pattern '{pattern}': {source}")]
    SkipPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
