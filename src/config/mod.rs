mod error;
mod show;

pub use error::{ConfigError, Result};
pub use show::{
    DEFAULT_DIR_TEMPLATES, DEFAULT_FILE_TEMPLATES, ScoredTemplate, ShowConfig, TemplateConfig,
};

use crate::pattern::{DEFAULT_SEPARATOR, PatternCompiler};
use crate::rules::{RuleSet, show_key};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// Rule table as written on disk
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleTableConfig {
    /// Replaces whitespace in show names before they are embedded in patterns
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Skip patterns applied to every file regardless of show
    #[serde(default)]
    pub skip: Vec<String>,
    pub shows: Vec<ShowConfig>,
}

impl RuleTableConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, validate and compile a rule table in one step
    pub fn load(path: &Path) -> Result<RuleSet> {
        let config = Self::from_file(path)?;
        let rules = config.into_rule_set()?;
        tracing::info!(
            "Rule table loaded from {}: {} shows",
            path.display(),
            rules.len()
        );
        Ok(rules)
    }

    fn validate(&self) -> Result<()> {
        if self.shows.is_empty() {
            return Err(ConfigError::NoShows);
        }

        if self.separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }

        let mut show_names = HashSet::new();
        for show in &self.shows {
            if show.name.trim().is_empty() {
                return Err(ConfigError::EmptyShowName);
            }
            if !show_names.insert(show_key(&show.name)) {
                return Err(ConfigError::DuplicateShowName {
                    name: show.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Compile every template. Fails on the first bad pattern.
    pub fn into_rule_set(self) -> Result<RuleSet> {
        let compiler = PatternCompiler::new(self.separator);

        let skip = self
            .skip
            .iter()
            .map(|pattern| {
                compiler
                    .compile_skip(pattern)
                    .map_err(|source| ConfigError::SkipPattern {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let groups = self
            .shows
            .into_iter()
            .map(|show| show.into_rule_group(&compiler))
            .collect::<Result<Vec<_>>>()?;

        RuleSet::new(groups, skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classification, MediaId, classify_directory, classify_file};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TABLE: &str = r"
skip:
  - '\.srt$'
shows:
  - name: Gossip Girl
    dirs:
      - '^{show}.*S{season}.*$'
      - '{show}.*S{season}.*$'
  - name: Face
    files:
      - '^{show}.*S{season}'
      - pattern: '^{show}.*E{episode}'
        score: 3
    skip:
      - sample
";

    #[test]
    fn test_deserialize_full_config() {
        let config: RuleTableConfig = serde_yaml::from_str(TABLE).unwrap();
        assert_eq!(config.separator, ".");
        assert_eq!(config.skip, vec![r"\.srt$"]);
        assert_eq!(config.shows.len(), 2);
        assert_eq!(config.shows[0].name, "Gossip Girl");
        assert_eq!(config.shows[1].skip, vec!["sample"]);
    }

    #[test]
    fn test_from_file_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(TABLE.as_bytes()).unwrap();

        let config = RuleTableConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.shows.len(), 2);
    }

    #[test]
    fn test_from_file_not_found() {
        let result = RuleTableConfig::from_file(Path::new("/nonexistent.yaml"));
        assert!(matches!(result.unwrap_err(), ConfigError::Io(_)));
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"invalid: yaml: content:").unwrap();

        let result = RuleTableConfig::from_file(temp_file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_no_shows() {
        let result = RuleTableConfig::from_yaml("shows: []");
        assert!(matches!(result.unwrap_err(), ConfigError::NoShows));
    }

    #[test]
    fn test_validate_empty_separator() {
        let yaml = r"
separator: ''
shows:
  - name: Face
";
        let result = RuleTableConfig::from_yaml(yaml);
        assert!(matches!(result.unwrap_err(), ConfigError::EmptySeparator));
    }

    #[test]
    fn test_validate_empty_show_name() {
        let yaml = r"
shows:
  - name: '  '
";
        let result = RuleTableConfig::from_yaml(yaml);
        assert!(matches!(result.unwrap_err(), ConfigError::EmptyShowName));
    }

    #[test]
    fn test_validate_duplicate_show_names() {
        let yaml = r"
shows:
  - name: Gossip Girl
  - name: gossip girl
";
        match RuleTableConfig::from_yaml(yaml).unwrap_err() {
            ConfigError::DuplicateShowName { name } => assert_eq!(name, "gossip girl"),
            other => panic!("Expected DuplicateShowName error, got {other:?}"),
        }
    }

    #[test]
    fn test_into_rule_set_compiles_everything() {
        let rules = RuleTableConfig::from_yaml(TABLE)
            .unwrap()
            .into_rule_set()
            .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.skip_patterns().len(), 1);

        let gossip = rules.group("Gossip Girl").unwrap();
        assert_eq!(gossip.dir_patterns().len(), 2);
        assert_eq!(gossip.file_patterns().len(), DEFAULT_FILE_TEMPLATES.len());

        let face = rules.group("Face").unwrap();
        assert_eq!(face.file_patterns()[1].score(), 3);
        assert_eq!(face.skip_patterns().len(), 1);
    }

    #[test]
    fn test_into_rule_set_bad_template_aborts() {
        let yaml = r"
shows:
  - name: Face
    dirs:
      - '^{show}.S{season}E{episode}'
";
        let result = RuleTableConfig::from_yaml(yaml).unwrap().into_rule_set();
        assert!(matches!(result.unwrap_err(), ConfigError::Pattern { .. }));
    }

    #[test]
    fn test_into_rule_set_bad_global_skip() {
        let yaml = r"
skip:
  - '[unclosed'
shows:
  - name: Face
";
        let result = RuleTableConfig::from_yaml(yaml).unwrap().into_rule_set();
        assert!(matches!(result.unwrap_err(), ConfigError::SkipPattern { .. }));
    }

    #[test]
    fn test_custom_separator() {
        let yaml = r"
separator: _
shows:
  - name: Gossip Girl
";
        let rules = RuleTableConfig::from_yaml(yaml)
            .unwrap()
            .into_rule_set()
            .unwrap();

        let result = classify_directory("Gossip_Girl_S01", &rules).unwrap();
        assert_eq!(result, Classification::Classified(MediaId::season("Gossip Girl", 1)));

        let result = classify_directory("Gossip.Girl.S01", &rules).unwrap();
        assert!(!result.is_classified());
    }

    #[test]
    fn test_load_and_classify() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(TABLE.as_bytes()).unwrap();

        let rules = RuleTableConfig::load(temp_file.path()).unwrap();

        assert_eq!(
            classify_directory("Gossip.Girl.S02.1080p", &rules).unwrap(),
            Classification::Classified(MediaId::season("Gossip Girl", 2))
        );
        assert_eq!(
            classify_file("Face.S01E01.mkv", &rules).unwrap(),
            Classification::Classified(MediaId::episode("Face", 1, 1))
        );
        assert!(classify_file("Face.S01E01.srt", &rules).unwrap().is_skipped());
        assert!(classify_file("Face.S01E01.sample.mkv", &rules).unwrap().is_skipped());
    }
}
