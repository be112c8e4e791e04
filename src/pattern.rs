use regex::{Captures, Regex, RegexBuilder};
use std::fmt;
use thiserror::Error;

/// Separator substituted for whitespace in show names when none is configured
pub const DEFAULT_SEPARATOR: &str = ".";

const ANCHORED_SCORE: u32 = 10;
const UNANCHORED_SCORE: u32 = 5;

/// Numeric field extracted from a capture group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Season,
    Episode,
}

impl Field {
    /// Name of the capture group the field is compiled into
    pub const fn group_name(self) -> &'static str {
        match self {
            Self::Season => "season",
            Self::Episode => "episode",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Directory,
    File,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => f.write_str("directory"),
            Self::File => f.write_str("file"),
        }
    }
}

/// Set of numeric fields captured by one pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureFields {
    Season,
    Episode,
    SeasonEpisode,
}

impl CaptureFields {
    const fn from_flags(season: bool, episode: bool) -> Option<Self> {
        match (season, episode) {
            (true, true) => Some(Self::SeasonEpisode),
            (true, false) => Some(Self::Season),
            (false, true) => Some(Self::Episode),
            (false, false) => None,
        }
    }

    /// Number of capture groups the compiled regex must have
    pub const fn arity(self) -> usize {
        match self {
            Self::Season | Self::Episode => 1,
            Self::SeasonEpisode => 2,
        }
    }

    pub const fn contains(self, field: Field) -> bool {
        matches!(
            (self, field),
            (Self::SeasonEpisode, _)
                | (Self::Season, Field::Season)
                | (Self::Episode, Field::Episode)
        )
    }
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("unknown placeholder '{{{0}}}'")]
    UnknownPlaceholder(String),

    #[error("directory templates must capture {{season}} and nothing else")]
    DirectoryFields,

    #[error("template captures neither {{season}} nor {{episode}}")]
    NoFields,

    #[error("expected {expected} capture group(s) but the expression has {found}")]
    Arity { expected: usize, found: usize },

    #[error("invalid regular expression: {0}")]
    Regex(#[from] regex::Error),
}

/// Compiled rule pattern. Immutable once built.
#[derive(Debug, Clone)]
pub struct RulePattern {
    regex: Regex,
    template: String,
    kind: PatternKind,
    fields: CaptureFields,
    score: u32,
}

impl RulePattern {
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Template the pattern was compiled from
    pub fn template(&self) -> &str {
        &self.template
    }

    pub const fn kind(&self) -> PatternKind {
        self.kind
    }

    pub const fn fields(&self) -> CaptureFields {
        self.fields
    }

    /// Relative priority. Reported in diagnostics, never used to resolve conflicts.
    pub const fn score(&self) -> u32 {
        self.score
    }
}

impl fmt::Display for RulePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}/", self.kind, self.regex.as_str())
    }
}

/// Turns rule templates into case-insensitive matchers.
///
/// Template syntax is plain regular-expression text with three placeholders:
/// - `{show}`: the show name, whitespace replaced by the separator, regex-escaped
/// - `{season}`: an ASCII-digit capture group for the season
/// - `{episode}`: an ASCII-digit capture group for the episode
///
/// Counted quantifiers such as `\d{2}` are left alone. Any other `{name}` is rejected.
#[derive(Debug, Clone)]
pub struct PatternCompiler {
    separator: String,
}

impl PatternCompiler {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Show name as it appears inside a compiled pattern
    pub fn show_fragment(&self, show: &str) -> String {
        let joined = show.split_whitespace().collect::<Vec<_>>().join(&self.separator);
        regex::escape(&joined)
    }

    /// Compile one template for `show`.
    ///
    /// Without an explicit score, anchored templates (`^...`) score higher than loose ones.
    pub fn compile(
        &self,
        show: &str,
        template: &str,
        kind: PatternKind,
        score: Option<u32>,
    ) -> Result<RulePattern, PatternError> {
        let show_fragment = self.show_fragment(show);
        let placeholder: &Regex = lazy_regex::regex!(r"\{([A-Za-z_][A-Za-z0-9_]*)\}");

        let mut unknown: Option<String> = None;
        let mut has_season = false;
        let mut has_episode = false;

        let expanded = placeholder.replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "show" => show_fragment.clone(),
            "season" => {
                has_season = true;
                format!(r"(?P<{}>[0-9]+)", Field::Season.group_name())
            }
            "episode" => {
                has_episode = true;
                format!(r"(?P<{}>[0-9]+)", Field::Episode.group_name())
            }
            other => {
                unknown.get_or_insert_with(|| other.to_string());
                caps[0].to_string()
            }
        });

        if let Some(name) = unknown {
            return Err(PatternError::UnknownPlaceholder(name));
        }

        let fields =
            CaptureFields::from_flags(has_season, has_episode).ok_or(PatternError::NoFields)?;
        if kind == PatternKind::Directory && fields != CaptureFields::Season {
            return Err(PatternError::DirectoryFields);
        }

        let regex = RegexBuilder::new(&expanded).case_insensitive(true).build()?;

        // captures_len counts the implicit whole-match group
        let found = regex.captures_len() - 1;
        if found != fields.arity() {
            return Err(PatternError::Arity {
                expected: fields.arity(),
                found,
            });
        }

        let score = score.unwrap_or(if template.starts_with('^') {
            ANCHORED_SCORE
        } else {
            UNANCHORED_SCORE
        });

        tracing::debug!(
            "Compiled {} pattern for '{}': {} (score {})",
            kind,
            show,
            regex.as_str(),
            score
        );

        Ok(RulePattern {
            regex,
            template: template.to_string(),
            kind,
            fields,
            score,
        })
    }

    /// Compile a skip pattern. Skip patterns are plain case-insensitive regexes.
    pub fn compile_skip(&self, pattern: &str) -> Result<Regex, PatternError> {
        Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
    }
}

impl Default for PatternCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}
