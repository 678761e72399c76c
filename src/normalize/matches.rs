//! Match table derivation.
//!
//! Home and away sides come from the match name, not from `team_id`:
//! the name is split on `" vs "`, the first segment is the home team and
//! the last segment the away team. A team name that itself contains
//! `" vs "` is split like any other name.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::{NormalizeError, TeamResolver};
use crate::models::{InputRecord, Match, MatchId, TeamId};

/// Separator between home and away team in a match name.
pub const MATCH_NAME_DELIMITER: &str = " vs ";

/// Split a match name into `(home, away)` team names.
///
/// Without a delimiter both sides are the whole name.
pub fn split_match_name(match_name: &str) -> (&str, &str) {
    let home = match_name
        .split_once(MATCH_NAME_DELIMITER)
        .map_or(match_name, |(home, _)| home);
    let away = match_name
        .rsplit_once(MATCH_NAME_DELIMITER)
        .map_or(match_name, |(_, away)| away);
    (home, away)
}

type MatchKey<'a> = (MatchId, &'a str, TeamId, TeamId);

#[derive(Debug, Default, Clone, Copy)]
struct GoalTotals {
    home: u64,
    away: u64,
}

/// Derive one match row per distinct `(match_id, match_name, home, away)`.
///
/// Rows are ordered by that key. A side with no contributing rows
/// totals zero. An unresolvable team name fails the whole derivation.
pub fn build_matches(
    records: &[InputRecord],
    teams: &TeamResolver,
) -> Result<Vec<Match>, NormalizeError> {
    let mut sides: HashMap<&str, (TeamId, TeamId)> = HashMap::new();
    let mut totals: BTreeMap<MatchKey<'_>, GoalTotals> = BTreeMap::new();

    for record in records {
        let name = record.match_name.as_str();
        let (home_id, away_id) = match sides.get(name) {
            Some(resolved) => *resolved,
            None => {
                let resolved = resolve_sides(name, teams)?;
                sides.insert(name, resolved);
                resolved
            }
        };

        let entry = totals
            .entry((record.match_id, name, home_id, away_id))
            .or_default();
        if record.is_home {
            entry.home += record.goals_scored as u64;
        } else {
            entry.away += record.goals_scored as u64;
        }
    }

    let matches: Vec<Match> = totals
        .into_iter()
        .map(
            |((match_id, match_name, home_team_id, away_team_id), goals)| Match {
                match_id,
                match_name: match_name.to_string(),
                home_team_id,
                away_team_id,
                home_goals: goals.home,
                away_goals: goals.away,
            },
        )
        .collect();

    debug!("Derived {} matches", matches.len());
    Ok(matches)
}

fn resolve_sides(match_name: &str, teams: &TeamResolver) -> Result<(TeamId, TeamId), NormalizeError> {
    let (home, away) = split_match_name(match_name);
    let resolve = |team_name: &str| {
        teams
            .lookup(team_name)
            .ok_or_else(|| NormalizeError::Referential {
                match_name: match_name.to_string(),
                team_name: team_name.to_string(),
            })
    };
    Ok((resolve(home)?, resolve(away)?))
}
