use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Find default rule table path with priority:
/// 1. /etc/seasonsort/rules.yaml (system-wide, preferred)
/// 2. ~/.config/seasonsort/rules.yaml (user-specific)
/// 3. Fallback to /etc even if doesn't exist
pub fn default_config_path() -> PathBuf {
    let etc_path = PathBuf::from("/etc/seasonsort/rules.yaml");

    if etc_path.exists() {
        return etc_path;
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join("seasonsort/rules.yaml");
        if user_path.exists() {
            return user_path;
        }
    }

    // Fallback to /etc (will show clear error if missing)
    etc_path
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "seasonsort")]
#[command(version)]
#[command(about = "Classify download folder entries into show, season and episode", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify every entry of a directory, aborting on the first conflict
    Classify {
        /// Path to rule table
        #[arg(short, long, value_name = "FILE", default_value_os_t = default_config_path())]
        config: PathBuf,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Directory to scan
        path: PathBuf,
    },

    /// Load and compile the rule table without classifying anything
    Check {
        /// Path to rule table
        #[arg(short, long, value_name = "FILE", default_value_os_t = default_config_path())]
        config: PathBuf,
    },

    /// Classify names given on the command line
    Match {
        /// Path to rule table
        #[arg(short, long, value_name = "FILE", default_value_os_t = default_config_path())]
        config: PathBuf,

        /// Treat names as directories instead of files
        #[arg(short, long)]
        dir: bool,

        /// Names to classify
        #[arg(required = true)]
        names: Vec<String>,
    },
}
