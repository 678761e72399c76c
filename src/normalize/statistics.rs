//! Statistic table derivation.

use std::collections::HashMap;

use tracing::debug;

use super::NormalizeError;
use crate::models::{
    fraction_of_goals, fraction_of_minutes, InputRecord, Match, MatchId, StatId, Statistic,
};

/// Derive one statistic per input row, in input order.
///
/// `stat_id` is the 1-based row position. Each row joins its match on
/// `(match_id, match_name)` for the goal total; a goalless match leaves
/// `fraction_of_total_goals` undefined.
pub fn build_statistics(
    records: &[InputRecord],
    matches: &[Match],
) -> Result<Vec<Statistic>, NormalizeError> {
    let totals: HashMap<(MatchId, &str), u64> = matches
        .iter()
        .map(|m| ((m.match_id, m.match_name.as_str()), m.total_goals()))
        .collect();

    let statistics = records
        .iter()
        .enumerate()
        .map(|(idx, record)| -> Result<Statistic, NormalizeError> {
            let row = idx + 1;
            let total_goals = totals
                .get(&(record.match_id, record.match_name.as_str()))
                .copied()
                .ok_or(NormalizeError::UnknownMatch {
                    row,
                    match_id: record.match_id,
                })?;

            Ok(Statistic {
                stat_id: row as StatId,
                player_id: record.player_id,
                match_id: record.match_id,
                goals_scored: record.goals_scored,
                minutes_played: record.minutes_played,
                fraction_of_total_minutes: fraction_of_minutes(record.minutes_played),
                fraction_of_total_goals: fraction_of_goals(record.goals_scored, total_goals),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Derived {} statistics", statistics.len());
    Ok(statistics)
}
