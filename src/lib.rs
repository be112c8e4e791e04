#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod batch;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod pattern;
pub mod rules;

pub use batch::{BatchError, BatchReport, Entry, EntryOutcome, classify_path, list_entries, run_batch};
pub use classify::{
    Classification, Conflict, MediaId, Miss, classify_directory, classify_entry, classify_file,
};
pub use cli::{Cli, Commands, OutputFormat, default_config_path};
pub use config::{ConfigError, RuleTableConfig, ShowConfig, TemplateConfig};
pub use error::{AppError, Result};
pub use pattern::{CaptureFields, Field, PatternCompiler, PatternError, PatternKind, RulePattern};
pub use rules::{RuleGroup, RuleSet};
