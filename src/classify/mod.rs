mod accumulator;
mod directory;
mod file;
mod outcome;

pub use directory::classify_directory;
pub use file::classify_file;
pub use outcome::{Classification, Conflict, MediaId, Miss};

use crate::pattern::RulePattern;
use crate::rules::{RuleGroup, RuleSet};
use accumulator::Accumulator;

/// Classify one listing entry, routing on whether it is a directory
pub fn classify_entry(
    name: &str,
    is_dir: bool,
    rules: &RuleSet,
) -> Result<Classification, Conflict> {
    if is_dir {
        classify_directory(name, rules)
    } else {
        classify_file(name, rules)
    }
}

/// Try every selected pattern of every group against `name` and fold the hits.
///
/// Declaration order does not affect the result: hits either agree or the sweep fails.
fn sweep<'r>(
    name: &str,
    rules: &'r RuleSet,
    select: impl Fn(&'r RuleGroup) -> &'r [RulePattern],
) -> Result<Accumulator<'r>, Conflict> {
    let mut acc = Accumulator::new();

    for group in rules.groups() {
        for pattern in select(group) {
            let Some(caps) = pattern.regex().captures(name) else {
                continue;
            };
            acc.record(group, pattern, &caps)?;
        }
    }

    Ok(acc)
}
