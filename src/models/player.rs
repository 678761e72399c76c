//! Player table row.

use serde::{Deserialize, Serialize};

use super::{PlayerId, TeamId};

/// A player, unique by `player_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,

    /// Team the player appeared for
    pub team_id: TeamId,

    pub player_name: String,
}

impl Player {
    pub fn new(player_id: PlayerId, team_id: TeamId, player_name: impl Into<String>) -> Self {
        Self {
            player_id,
            team_id,
            player_name: player_name.into(),
        }
    }
}
