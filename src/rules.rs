use crate::config::ConfigError;
use crate::pattern::RulePattern;
use regex::Regex;
use std::collections::HashSet;

/// Key used to decide whether two show names collide.
///
/// Names that differ only in case or whitespace compile to the same `{show}` text.
pub fn show_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compiled patterns for one show
#[derive(Debug, Clone)]
pub struct RuleGroup {
    show: String,
    dir_patterns: Vec<RulePattern>,
    file_patterns: Vec<RulePattern>,
    skip_patterns: Vec<Regex>,
}

impl RuleGroup {
    pub fn new(show: impl Into<String>) -> Self {
        Self {
            show: show.into(),
            dir_patterns: Vec::new(),
            file_patterns: Vec::new(),
            skip_patterns: Vec::new(),
        }
    }

    pub fn add_dir_pattern(mut self, pattern: RulePattern) -> Self {
        self.dir_patterns.push(pattern);
        self
    }

    pub fn add_file_pattern(mut self, pattern: RulePattern) -> Self {
        self.file_patterns.push(pattern);
        self
    }

    pub fn add_skip_pattern(mut self, pattern: Regex) -> Self {
        self.skip_patterns.push(pattern);
        self
    }

    pub fn show(&self) -> &str {
        &self.show
    }

    /// Directory patterns in declaration order
    pub fn dir_patterns(&self) -> &[RulePattern] {
        &self.dir_patterns
    }

    /// File patterns in declaration order
    pub fn file_patterns(&self) -> &[RulePattern] {
        &self.file_patterns
    }

    pub fn skip_patterns(&self) -> &[Regex] {
        &self.skip_patterns
    }
}

/// The full, immutable rule table handed to the classifiers.
///
/// Reloading configuration builds a new `RuleSet`; there is no way to patch one in place.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    groups: Vec<RuleGroup>,
    skip_patterns: Vec<Regex>,
}

impl RuleSet {
    pub fn new(groups: Vec<RuleGroup>, skip_patterns: Vec<Regex>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for group in &groups {
            if !seen.insert(show_key(group.show())) {
                return Err(ConfigError::DuplicateShowName {
                    name: group.show().to_string(),
                });
            }
        }

        Ok(Self {
            groups,
            skip_patterns,
        })
    }

    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Table-wide skip patterns
    pub fn skip_patterns(&self) -> &[Regex] {
        &self.skip_patterns
    }

    pub fn group(&self, show: &str) -> Option<&RuleGroup> {
        let key = show_key(show);
        self.groups.iter().find(|g| show_key(g.show()) == key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// First skip pattern matching `name`, table-wide list first, then per show
    pub fn skip_match(&self, name: &str) -> Option<&Regex> {
        self.skip_patterns
            .iter()
            .chain(self.groups.iter().flat_map(|g| g.skip_patterns.iter()))
            .find(|re| re.is_match(name))
    }
}
