use super::{Classification, Conflict, Miss, sweep};
use crate::rules::{RuleGroup, RuleSet};

/// Extract show, season and episode from a file name.
///
/// Skip patterns are checked first; a skip hit is never a conflict. Otherwise
/// every file pattern is tried and the hits must agree on show, season and
/// episode. A show whose patterns never assign both numbers leaves the file
/// unclassified.
pub fn classify_file(name: &str, rules: &RuleSet) -> Result<Classification, Conflict> {
    if let Some(skip) = rules.skip_match(name) {
        tracing::debug!("File '{}' skipped by /{}/", name, skip.as_str());
        return Ok(Classification::Unclassified(Miss::Skipped {
            pattern: skip.as_str().to_string(),
        }));
    }

    let acc = sweep(name, rules, RuleGroup::file_patterns)?;
    let classification = acc.finish_file();
    tracing::debug!("File '{}': {:?}", name, classification);
    Ok(classification)
}
