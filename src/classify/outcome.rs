use crate::pattern::Field;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Structured identifier an entry was classified as
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MediaId {
    pub show: String,
    pub season: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
}

impl MediaId {
    pub fn season(show: impl Into<String>, season: u32) -> Self {
        Self {
            show: show.into(),
            season,
            episode: None,
        }
    }

    pub fn episode(show: impl Into<String>, season: u32, episode: u32) -> Self {
        Self {
            show: show.into(),
            season,
            episode: Some(episode),
        }
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.episode {
            Some(episode) => write!(f, "{} S{:02}E{:02}", self.show, self.season, episode),
            None => write!(f, "{} S{:02}", self.show, self.season),
        }
    }
}

/// Why an entry was left unclassified. None of these are errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Miss {
    /// No rule pattern matched
    NoMatch,
    /// Rules for one show matched but left a field unassigned
    Partial {
        show: String,
        season: Option<u32>,
        episode: Option<u32>,
    },
    /// Excluded on purpose by a skip pattern
    Skipped { pattern: String },
}

impl Miss {
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch => f.write_str("no rule matched"),
            Self::Partial {
                show,
                season,
                episode,
            } => {
                let missing = match (season, episode) {
                    (None, None) => "season and episode",
                    (None, Some(_)) => "season",
                    _ => "episode",
                };
                write!(f, "rules for '{show}' captured no {missing}")
            }
            Self::Skipped { pattern } => write!(f, "skipped by /{pattern}/"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Classified(MediaId),
    Unclassified(Miss),
}

impl Classification {
    pub const fn media_id(&self) -> Option<&MediaId> {
        match self {
            Self::Classified(id) => Some(id),
            Self::Unclassified(_) => None,
        }
    }

    pub const fn is_classified(&self) -> bool {
        matches!(self, Self::Classified(_))
    }

    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Unclassified(miss) if miss.is_skip())
    }
}

/// Matching rules disagree, or a capture cannot be read. Fatal for a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("matched rules for two different shows: '{first}' and '{second}'")]
    ShowMismatch { first: String, second: String },

    #[error("mismatched season for '{show}': {first} vs {second}")]
    SeasonMismatch { show: String, first: u32, second: u32 },

    #[error("mismatched episode for '{show}': {first} vs {second}")]
    EpisodeMismatch { show: String, first: u32, second: u32 },

    #[error("cannot parse {field} '{value}' captured by {pattern} for '{show}'")]
    InvalidNumber {
        show: String,
        pattern: String,
        field: Field,
        value: String,
    },

    #[error("{pattern} for '{show}' produced {found} capture groups, expected {expected}")]
    CaptureArity {
        show: String,
        pattern: String,
        expected: usize,
        found: usize,
    },
}

impl Conflict {
    pub(crate) fn mismatch(field: Field, show: &str, first: u32, second: u32) -> Self {
        let show = show.to_string();
        match field {
            Field::Season => Self::SeasonMismatch {
                show,
                first,
                second,
            },
            Field::Episode => Self::EpisodeMismatch {
                show,
                first,
                second,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_id_display() {
        assert_eq!(MediaId::season("Gossip Girl", 2).to_string(), "Gossip Girl S02");
        assert_eq!(MediaId::episode("Face", 1, 12).to_string(), "Face S01E12");
    }

    #[test]
    fn test_miss_display() {
        assert_eq!(Miss::NoMatch.to_string(), "no rule matched");

        let partial = Miss::Partial {
            show: "Face".to_string(),
            season: Some(1),
            episode: None,
        };
        assert_eq!(partial.to_string(), "rules for 'Face' captured no episode");

        let skipped = Miss::Skipped {
            pattern: r"\.srt$".to_string(),
        };
        assert!(skipped.is_skip());
        assert!(skipped.to_string().contains(r"\.srt$"));
    }

    #[test]
    fn test_classification_accessors() {
        let classified = Classification::Classified(MediaId::season("Face", 1));
        assert!(classified.is_classified());
        assert!(!classified.is_skipped());
        assert_eq!(classified.media_id().unwrap().season, 1);

        let skipped = Classification::Unclassified(Miss::Skipped {
            pattern: "x".to_string(),
        });
        assert!(!skipped.is_classified());
        assert!(skipped.is_skipped());
        assert!(skipped.media_id().is_none());
    }

    #[test]
    fn test_conflict_display_names_both_values() {
        let err = Conflict::ShowMismatch {
            first: "Show A".to_string(),
            second: "Show B".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Show A"));
        assert!(msg.contains("Show B"));

        let err = Conflict::mismatch(Field::Episode, "Face", 1, 2);
        assert_eq!(err.to_string(), "mismatched episode for 'Face': 1 vs 2");
    }

    #[test]
    fn test_serialize_classification() {
        let json =
            serde_json::to_value(Classification::Classified(MediaId::season("Face", 3))).unwrap();
        assert_eq!(json["classified"]["show"], "Face");
        assert_eq!(json["classified"]["season"], 3);
        assert!(json["classified"].get("episode").is_none());

        let json = serde_json::to_value(Classification::Unclassified(Miss::NoMatch)).unwrap();
        assert_eq!(json["unclassified"], "no_match");
    }
}
