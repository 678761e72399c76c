//! Normalization pipeline.
//!
//! Turns the denormalized per-player input into four derived tables:
//! - **validate**: input shape and completeness checks, typed conversion
//! - **teams**: team table and name lookup
//! - **matches**: match table with resolved sides and goal totals
//! - **players**: player table
//! - **statistics**: one statistic per input row with derived ratios
//!
//! All tables are computed once, in dependency order, into an immutable
//! [`Normalized`] bundle. Any failure aborts the whole run.

pub mod matches;
pub mod players;
pub mod statistics;
pub mod teams;
pub mod validate;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{InputRecord, Match, MatchId, Player, Statistic, Team};

pub use matches::{build_matches, split_match_name, MATCH_NAME_DELIMITER};
pub use players::build_players;
pub use statistics::build_statistics;
pub use teams::TeamResolver;
pub use validate::{load_input, read_raw_table, RawTable, MANDATORY_COLUMNS};

/// Errors that abort a normalization run.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Input file must have a '.csv' extension: {0}")]
    Format(String),

    #[error("Input file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Missing mandatory columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Null values in columns: {}", .columns.join(", "))]
    DataQuality { columns: Vec<String> },

    #[error("Row {row}: column '{column}' has invalid value '{value}' (expected {expected})")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("Conflicting {entity} records for id {id}")]
    ConflictingIdentity { entity: &'static str, id: u64 },

    #[error("Match '{match_name}': team '{team_name}' does not resolve to a known team")]
    Referential {
        match_name: String,
        team_name: String,
    },

    #[error("Row {row}: match {match_id} has no derived match record")]
    UnknownMatch { row: usize, match_id: MatchId },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// All four derived tables, computed once from validated input.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub players: Vec<Player>,
    pub statistics: Vec<Statistic>,
}

impl Normalized {
    /// Derive every table from already validated records.
    pub fn from_records(records: &[InputRecord]) -> Result<Self, NormalizeError> {
        let resolver = TeamResolver::from_records(records)?;
        let players = build_players(records)?;
        let matches = build_matches(records, &resolver)?;
        let statistics = build_statistics(records, &matches)?;

        let normalized = Self {
            teams: resolver.into_teams(),
            matches,
            players,
            statistics,
        };
        debug!("Derived tables: {:?}", normalized.summary());
        Ok(normalized)
    }

    /// Validate `input_dir/filename` and derive every table from it.
    pub fn from_path(input_dir: &Path, filename: &str) -> Result<Self, NormalizeError> {
        let records = load_input(input_dir, filename)?;
        info!("Loaded {} input rows from {}", records.len(), filename);
        Self::from_records(&records)
    }

    /// Row counts per table.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            teams: self.teams.len(),
            matches: self.matches.len(),
            players: self.players.len(),
            statistics: self.statistics.len(),
        }
    }
}

/// Row counts of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub teams: usize,
    pub matches: usize,
    pub players: usize,
    pub statistics: usize,
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::InputRecord;

    /// Build an input row with the usual match/team naming.
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        match_id: u64,
        match_name: &str,
        team_id: u64,
        team_name: &str,
        player_id: u64,
        player_name: &str,
        goals_scored: u32,
        minutes_played: u32,
        is_home: bool,
    ) -> InputRecord {
        InputRecord {
            match_id,
            match_name: match_name.to_string(),
            team_id,
            team_name: team_name.to_string(),
            player_id,
            player_name: player_name.to_string(),
            goals_scored,
            minutes_played,
            is_home,
        }
    }

    /// Two matches between three teams, including a goalless one.
    pub fn sample_records() -> Vec<InputRecord> {
        vec![
            record(1, "Arsenal vs Chelsea", 1, "Arsenal", 10, "Saka", 2, 90, true),
            record(1, "Arsenal vs Chelsea", 1, "Arsenal", 11, "Odegaard", 1, 75, true),
            record(1, "Arsenal vs Chelsea", 2, "Chelsea", 20, "Palmer", 1, 90, false),
            record(2, "Chelsea vs Everton", 2, "Chelsea", 20, "Palmer", 0, 90, true),
            record(2, "Chelsea vs Everton", 3, "Everton", 30, "Pickford", 0, 90, false),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{record, sample_records};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_end_to_end_example() {
        let records = vec![
            record(1, "A vs B", 1, "A", 10, "P1", 2, 90, true),
            record(1, "A vs B", 2, "B", 20, "P2", 1, 45, false),
        ];

        let normalized = Normalized::from_records(&records).unwrap();

        assert_eq!(
            normalized.matches,
            vec![Match {
                match_id: 1,
                match_name: "A vs B".to_string(),
                home_team_id: 1,
                away_team_id: 2,
                home_goals: 2,
                away_goals: 1,
            }]
        );
        assert_eq!(
            normalized.statistics[0].fraction_of_total_goals,
            Some(2.0 / 3.0)
        );
        assert_eq!(
            normalized.statistics[1].fraction_of_total_goals,
            Some(1.0 / 3.0)
        );
        assert_eq!(normalized.statistics[1].fraction_of_total_minutes, 0.5);
    }

    #[test]
    fn test_goal_totals_match_input() {
        let records = sample_records();
        let normalized = Normalized::from_records(&records).unwrap();

        let input_home: u64 = records
            .iter()
            .filter(|r| r.is_home)
            .map(|r| r.goals_scored as u64)
            .sum();
        let input_away: u64 = records
            .iter()
            .filter(|r| !r.is_home)
            .map(|r| r.goals_scored as u64)
            .sum();

        let match_home: u64 = normalized.matches.iter().map(|m| m.home_goals).sum();
        let match_away: u64 = normalized.matches.iter().map(|m| m.away_goals).sum();

        assert_eq!(input_home, match_home);
        assert_eq!(input_away, match_away);
    }

    #[test]
    fn test_summary_counts() {
        let normalized = Normalized::from_records(&sample_records()).unwrap();

        assert_eq!(
            normalized.summary(),
            RunSummary {
                teams: 3,
                matches: 2,
                players: 4,
                statistics: 5,
            }
        );
    }

    #[test]
    fn test_referential_error_aborts_run() {
        let records = vec![record(1, "A vs Z", 1, "A", 10, "P1", 1, 90, true)];

        let err = Normalized::from_records(&records).unwrap_err();
        assert!(matches!(err, NormalizeError::Referential { .. }));
    }

    #[test]
    fn test_empty_input() {
        let normalized = Normalized::from_records(&[]).unwrap();
        assert_eq!(normalized.summary(), RunSummary::default());
    }

    #[test]
    fn test_from_path_validates_then_derives() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("input.csv"),
            "match_id,match_name,team_id,team_name,player_id,player_name,goals_scored,minutes_played,is_home\n\
             1,A vs B,1,A,10,P1,2,90,True\n\
             1,A vs B,2,B,20,P2,1,45,False\n",
        )
        .unwrap();

        let normalized = Normalized::from_path(dir.path(), "input.csv").unwrap();
        assert_eq!(normalized.matches[0].home_goals, 2);
        assert_eq!(normalized.statistics.len(), 2);

        let err = Normalized::from_path(dir.path(), "input.txt").unwrap_err();
        assert!(matches!(err, NormalizeError::Format(_)));
    }

    #[test]
    fn test_error_messages_name_columns() {
        let err = NormalizeError::Schema {
            missing: vec!["is_home".to_string(), "team_id".to_string()],
        };
        assert_eq!(err.to_string(), "Missing mandatory columns: is_home, team_id");

        let err = NormalizeError::DataQuality {
            columns: vec!["player_name".to_string()],
        };
        assert_eq!(err.to_string(), "Null values in columns: player_name");
    }
}
