//! Team table extraction and name lookup.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use super::NormalizeError;
use crate::models::{InputRecord, Team, TeamId};

/// Team table plus a `team_name -> team_id` index.
#[derive(Debug, Clone, Default)]
pub struct TeamResolver {
    teams: Vec<Team>,
    by_name: HashMap<String, TeamId>,
}

impl TeamResolver {
    /// Deduplicate `(team_id, team_name)` pairs, sorted by `team_id`.
    ///
    /// One id carrying two names is a [`NormalizeError::ConflictingIdentity`].
    pub fn from_records(records: &[InputRecord]) -> Result<Self, NormalizeError> {
        let mut names: BTreeMap<TeamId, &str> = BTreeMap::new();
        for record in records {
            let name = names.entry(record.team_id).or_insert(record.team_name.as_str());
            if *name != record.team_name {
                return Err(NormalizeError::ConflictingIdentity {
                    entity: "team",
                    id: record.team_id,
                });
            }
        }

        let teams: Vec<Team> = names
            .into_iter()
            .map(|(id, name)| Team::new(id, name))
            .collect();

        let mut by_name = HashMap::with_capacity(teams.len());
        for team in &teams {
            // Ascending iteration keeps the lowest id for a shared name.
            if let Some(existing) = by_name.get(&team.team_name) {
                warn!(
                    "Team name '{}' is shared by ids {} and {}; using {}",
                    team.team_name, existing, team.team_id, existing
                );
                continue;
            }
            by_name.insert(team.team_name.clone(), team.team_id);
        }

        debug!("Extracted {} teams", teams.len());
        Ok(Self { teams, by_name })
    }

    /// Resolve a team name to its id.
    pub fn lookup(&self, team_name: &str) -> Option<TeamId> {
        self.by_name.get(team_name).copied()
    }

    pub fn into_teams(self) -> Vec<Team> {
        self.teams
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::test_support::{record, sample_records};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_teams_deduplicated_and_sorted() {
        let records = vec![
            record(1, "C vs A", 3, "C", 30, "P3", 0, 90, true),
            record(1, "C vs A", 1, "A", 10, "P1", 0, 90, false),
            record(1, "C vs A", 1, "A", 11, "P2", 0, 90, false),
            record(2, "B vs C", 2, "B", 20, "P4", 0, 90, true),
        ];

        let resolver = TeamResolver::from_records(&records).unwrap();

        assert_eq!(
            resolver.into_teams(),
            vec![Team::new(1, "A"), Team::new(2, "B"), Team::new(3, "C")]
        );
    }

    #[test]
    fn test_no_duplicate_team_ids() {
        let resolver = TeamResolver::from_records(&sample_records()).unwrap();
        let teams = resolver.into_teams();

        assert!(teams.windows(2).all(|w| w[0].team_id < w[1].team_id));
    }

    #[test]
    fn test_lookup() {
        let resolver = TeamResolver::from_records(&sample_records()).unwrap();

        assert_eq!(resolver.lookup("Arsenal"), Some(1));
        assert_eq!(resolver.lookup("Everton"), Some(3));
        assert_eq!(resolver.lookup("arsenal"), None);
        assert_eq!(resolver.lookup("Spurs"), None);
    }

    #[test]
    fn test_conflicting_team_name() {
        let records = vec![
            record(1, "A vs B", 1, "A", 10, "P1", 0, 90, true),
            record(2, "A vs B", 1, "Other", 11, "P2", 0, 90, true),
        ];

        let err = TeamResolver::from_records(&records).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::ConflictingIdentity { entity: "team", id: 1 }
        ));
    }

    #[test]
    fn test_shared_name_resolves_to_lowest_id() {
        let records = vec![
            record(1, "United vs B", 7, "United", 10, "P1", 0, 90, true),
            record(2, "United vs B", 4, "United", 11, "P2", 0, 90, true),
        ];

        let resolver = TeamResolver::from_records(&records).unwrap();

        assert_eq!(resolver.lookup("United"), Some(4));
        assert_eq!(resolver.into_teams().len(), 2);
    }
}
