use super::{Classification, Conflict, MediaId, Miss};
use crate::pattern::{Field, RulePattern};
use crate::rules::RuleGroup;
use regex::Captures;

/// Values collected from every pattern that fired on one name.
///
/// Each new capture must agree with what is already recorded: show first,
/// then season and episode independently.
#[derive(Debug, Default)]
pub(crate) struct Accumulator<'r> {
    show: Option<&'r str>,
    season: Option<u32>,
    episode: Option<u32>,
}

impl<'r> Accumulator<'r> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Fold one match into the accumulator.
    ///
    /// A match that captured no field at all counts as no match.
    pub(crate) fn record(
        &mut self,
        group: &'r RuleGroup,
        pattern: &RulePattern,
        caps: &Captures<'_>,
    ) -> Result<(), Conflict> {
        let expected = pattern.fields().arity() + 1;
        if caps.len() != expected {
            return Err(Conflict::CaptureArity {
                show: group.show().to_string(),
                pattern: pattern.to_string(),
                expected: expected - 1,
                found: caps.len().saturating_sub(1),
            });
        }

        let season = capture_number(group, pattern, caps, Field::Season)?;
        let episode = capture_number(group, pattern, caps, Field::Episode)?;
        if season.is_none() && episode.is_none() {
            return Ok(());
        }

        match self.show {
            None => self.show = Some(group.show()),
            Some(first) if first == group.show() => {}
            Some(first) => {
                return Err(Conflict::ShowMismatch {
                    first: first.to_string(),
                    second: group.show().to_string(),
                });
            }
        }

        merge(&mut self.season, season, Field::Season, group.show())?;
        merge(&mut self.episode, episode, Field::Episode, group.show())?;

        tracing::debug!(
            "{} matched '{}' (score {}): season={:?} episode={:?}",
            pattern,
            group.show(),
            pattern.score(),
            season,
            episode
        );

        Ok(())
    }

    pub(crate) fn finish_directory(self) -> Classification {
        // Directory patterns capture only the season, so a recorded show always has one
        match (self.show, self.season) {
            (Some(show), Some(season)) => Classification::Classified(MediaId::season(show, season)),
            _ => Classification::Unclassified(Miss::NoMatch),
        }
    }

    pub(crate) fn finish_file(self) -> Classification {
        match (self.show, self.season, self.episode) {
            (Some(show), Some(season), Some(episode)) => {
                Classification::Classified(MediaId::episode(show, season, episode))
            }
            (Some(show), season, episode) => Classification::Unclassified(Miss::Partial {
                show: show.to_string(),
                season,
                episode,
            }),
            (None, _, _) => Classification::Unclassified(Miss::NoMatch),
        }
    }
}

fn capture_number(
    group: &RuleGroup,
    pattern: &RulePattern,
    caps: &Captures<'_>,
    field: Field,
) -> Result<Option<u32>, Conflict> {
    if !pattern.fields().contains(field) {
        return Ok(None);
    }

    // Optional groups may not participate in the match
    let Some(m) = caps.name(field.group_name()) else {
        return Ok(None);
    };

    m.as_str()
        .parse::<u32>()
        .map(Some)
        .map_err(|_| Conflict::InvalidNumber {
            show: group.show().to_string(),
            pattern: pattern.to_string(),
            field,
            value: m.as_str().to_string(),
        })
}

fn merge(slot: &mut Option<u32>, value: Option<u32>, field: Field, show: &str) -> Result<(), Conflict> {
    let Some(value) = value else {
        return Ok(());
    };

    match *slot {
        None => *slot = Some(value),
        Some(first) if first == value => {}
        Some(first) => return Err(Conflict::mismatch(field, show, first, value)),
    }

    Ok(())
}
