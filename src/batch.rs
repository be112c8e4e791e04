use crate::classify::{Classification, Conflict, classify_entry};
use crate::rules::RuleSet;
use serde::Serialize;
use std::io;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

/// One name from a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

impl Entry {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

/// Read the immediate children of `path`, sorted by name.
///
/// Symlinks are not followed, so a link to a directory is listed as a file.
/// Unreadable children are logged and left out.
pub fn list_entries(path: &Path) -> io::Result<Vec<Entry>> {
    if !path.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Path is not a directory: {}", path.display()),
        ));
    }

    let mut entries = Vec::new();
    for result in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        match result {
            Ok(entry) => entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type().is_dir(),
            }),
            Err(err) if err.depth() == 0 => return Err(err.into()),
            Err(err) => {
                tracing::warn!("Failed to read entry in {}: {}", path.display(), err);
            }
        }
    }

    Ok(entries)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    #[serde(flatten)]
    pub entry: Entry,
    pub classification: Classification,
}

/// Per-entry results in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl BatchReport {
    pub fn classified(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.classification.is_classified())
    }

    /// Entries no rule could classify. Skipped entries are not misses.
    pub fn misses(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes
            .iter()
            .filter(|o| !o.classification.is_classified() && !o.classification.is_skipped())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.classification.is_skipped())
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Conflict that stopped a batch, with the entry that caused it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Conflict classifying '{entry}': {conflict}")]
pub struct BatchError {
    pub entry: String,
    pub conflict: Conflict,
    /// Outcomes of the entries processed before the conflict
    pub report: BatchReport,
}

/// Classify every entry in order, stopping at the first conflict.
///
/// Unclassified entries do not stop the run.
pub fn run_batch(entries: &[Entry], rules: &RuleSet) -> Result<BatchReport, BatchError> {
    tracing::info!("Classifying {} entries against {} shows", entries.len(), rules.len());

    let mut report = BatchReport {
        outcomes: Vec::with_capacity(entries.len()),
    };

    for entry in entries {
        let classification = match classify_entry(&entry.name, entry.is_dir, rules) {
            Ok(classification) => classification,
            Err(conflict) => {
                return Err(BatchError {
                    entry: entry.name.clone(),
                    conflict,
                    report,
                });
            }
        };

        report.outcomes.push(EntryOutcome {
            entry: entry.clone(),
            classification,
        });
    }

    tracing::info!(
        "Batch complete: {} classified, {} unclassified, {} skipped",
        report.classified().count(),
        report.misses().count(),
        report.skipped().count()
    );

    Ok(report)
}

/// List `path` and classify its entries
pub fn classify_path(path: &Path, rules: &RuleSet) -> crate::Result<BatchReport> {
    let entries = list_entries(path)?;
    tracing::info!("Found {} files and directories in {}", entries.len(), path.display());
    Ok(run_batch(&entries, rules)?)
}
