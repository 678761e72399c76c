//! Player table extraction.

use std::collections::BTreeMap;

use tracing::debug;

use super::NormalizeError;
use crate::models::{InputRecord, Player, PlayerId, TeamId};

/// Deduplicate `(player_id, team_id, player_name)` triples, sorted by `player_id`.
///
/// A player id seen with two different teams or names is a
/// [`NormalizeError::ConflictingIdentity`].
pub fn build_players(records: &[InputRecord]) -> Result<Vec<Player>, NormalizeError> {
    let mut seen: BTreeMap<PlayerId, (TeamId, &str)> = BTreeMap::new();
    for record in records {
        let entry = seen
            .entry(record.player_id)
            .or_insert((record.team_id, record.player_name.as_str()));
        if *entry != (record.team_id, record.player_name.as_str()) {
            return Err(NormalizeError::ConflictingIdentity {
                entity: "player",
                id: record.player_id,
            });
        }
    }

    let players: Vec<Player> = seen
        .into_iter()
        .map(|(player_id, (team_id, name))| Player::new(player_id, team_id, name))
        .collect();

    debug!("Extracted {} players", players.len());
    Ok(players)
}
