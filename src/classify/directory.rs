use super::{Classification, Conflict, sweep};
use crate::rules::{RuleGroup, RuleSet};

/// Extract show and season from a directory name.
///
/// Every directory pattern of every show is tried. All patterns that fire must
/// name the same show and the same season, otherwise the result is a [`Conflict`].
pub fn classify_directory(name: &str, rules: &RuleSet) -> Result<Classification, Conflict> {
    let acc = sweep(name, rules, RuleGroup::dir_patterns)?;
    let classification = acc.finish_directory();
    tracing::debug!("Directory '{}': {:?}", name, classification);
    Ok(classification)
}
