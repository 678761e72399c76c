//! Per-observation statistic row.

use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId, StatId, MATCH_TOTAL_MINUTES};

/// One derived statistic per input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    /// 1-based position of the source row
    pub stat_id: StatId,

    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub goals_scored: u32,
    pub minutes_played: u32,

    /// `minutes_played / 90`, not clamped
    pub fraction_of_total_minutes: f64,

    /// Player's share of all goals in the match.
    /// `None` (serialized as `null`) when the match ended goalless.
    pub fraction_of_total_goals: Option<f64>,
}

/// Fraction of a full match the player was on the pitch.
pub fn fraction_of_minutes(minutes_played: u32) -> f64 {
    minutes_played as f64 / MATCH_TOTAL_MINUTES as f64
}

/// Player's share of the match goals, undefined for a goalless match.
pub fn fraction_of_goals(goals_scored: u32, total_goals: u64) -> Option<f64> {
    if total_goals == 0 {
        None
    } else {
        Some(goals_scored as f64 / total_goals as f64)
    }
}
