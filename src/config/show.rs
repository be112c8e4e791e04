use super::{ConfigError, Result};
use crate::pattern::{PatternCompiler, PatternKind, RulePattern};
use crate::rules::RuleGroup;
use serde::Deserialize;

/// Directory templates used when a show does not list any
pub const DEFAULT_DIR_TEMPLATES: &[&str] = &["^{show}.*S{season}.*$", "{show}.*S{season}.*$"];

/// File templates used when a show does not list any
pub const DEFAULT_FILE_TEMPLATES: &[&str] = &[
    "^{show}.*S{season}E{episode}.*$",
    "{show}.*S{season}E{episode}",
];

/// A pattern template, either bare or with an explicit score
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TemplateConfig {
    Plain(String),
    Scored(ScoredTemplate),
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScoredTemplate {
    pub pattern: String,
    #[serde(default)]
    pub score: Option<u32>,
}

impl TemplateConfig {
    pub fn pattern(&self) -> &str {
        match self {
            Self::Plain(pattern) => pattern,
            Self::Scored(scored) => &scored.pattern,
        }
    }

    pub const fn score(&self) -> Option<u32> {
        match self {
            Self::Plain(_) => None,
            Self::Scored(scored) => scored.score,
        }
    }
}

impl From<&str> for TemplateConfig {
    fn from(pattern: &str) -> Self {
        Self::Plain(pattern.to_string())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShowConfig {
    pub name: String,
    /// Omitted means the default templates; an empty list means none
    #[serde(default)]
    pub dirs: Option<Vec<TemplateConfig>>,
    #[serde(default)]
    pub files: Option<Vec<TemplateConfig>>,
    #[serde(default)]
    pub skip: Vec<String>,
}

impl ShowConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dirs: None,
            files: None,
            skip: Vec::new(),
        }
    }

    pub fn dir_templates(&self) -> Vec<TemplateConfig> {
        self.dirs.clone().unwrap_or_else(|| {
            DEFAULT_DIR_TEMPLATES
                .iter()
                .map(|t| TemplateConfig::from(*t))
                .collect()
        })
    }

    pub fn file_templates(&self) -> Vec<TemplateConfig> {
        self.files.clone().unwrap_or_else(|| {
            DEFAULT_FILE_TEMPLATES
                .iter()
                .map(|t| TemplateConfig::from(*t))
                .collect()
        })
    }

    pub fn into_rule_group(self, compiler: &PatternCompiler) -> Result<RuleGroup> {
        let mut group = RuleGroup::new(self.name.clone());

        for template in self.dir_templates() {
            let pattern = self.compile(compiler, &template, PatternKind::Directory)?;
            group = group.add_dir_pattern(pattern);
        }

        for template in self.file_templates() {
            let pattern = self.compile(compiler, &template, PatternKind::File)?;
            group = group.add_file_pattern(pattern);
        }

        for pattern in self.skip {
            let regex = compiler
                .compile_skip(&pattern)
                .map_err(|source| ConfigError::SkipPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
            group = group.add_skip_pattern(regex);
        }

        Ok(group)
    }

    fn compile(
        &self,
        compiler: &PatternCompiler,
        template: &TemplateConfig,
        kind: PatternKind,
    ) -> Result<RulePattern> {
        compiler
            .compile(&self.name, template.pattern(), kind, template.score())
            .map_err(|source| ConfigError::Pattern {
                show: self.name.clone(),
                kind: kind.to_string(),
                template: template.pattern().to_string(),
                source,
            })
    }
}
