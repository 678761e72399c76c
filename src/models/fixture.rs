//! Match table row.

use serde::{Deserialize, Serialize};

use super::{MatchId, TeamId};

/// A match with both sides resolved and goal totals aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: MatchId,
    pub match_name: String,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,

    /// Sum of `goals_scored` over home-side rows
    pub home_goals: u64,

    /// Sum of `goals_scored` over away-side rows
    pub away_goals: u64,
}

impl Match {
    /// Goals scored by both sides.
    pub fn total_goals(&self) -> u64 {
        self.home_goals + self.away_goals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_goals() {
        let m = Match {
            match_id: 1,
            match_name: "A vs B".to_string(),
            home_team_id: 1,
            away_team_id: 2,
            home_goals: 3,
            away_goals: 2,
        };
        assert_eq!(m.total_goals(), 5);
    }
}
