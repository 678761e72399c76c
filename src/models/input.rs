//! Denormalized input row.

use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId, TeamId};

/// One player-in-match observation from the input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub match_id: MatchId,

    /// Composite name in the form `"<home> vs <away>"`
    pub match_name: String,

    pub team_id: TeamId,
    pub team_name: String,
    pub player_id: PlayerId,
    pub player_name: String,
    pub goals_scored: u32,

    /// Expected within 0..=90 but not enforced
    pub minutes_played: u32,

    pub is_home: bool,
}
