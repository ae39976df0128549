//! Final group standings, ranked by hand.

use crate::models::group::{find_group, Group, GroupLabel, GROUP_SIZE};
use crate::models::team::Team;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Group label → teams ranked 1st to 4th.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Standings(BTreeMap<GroupLabel, Vec<Team>>);

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed each group's ranking with its draw order.
    pub fn from_groups(groups: &[Group]) -> Self {
        Self(
            groups
                .iter()
                .map(|g| (g.label, g.teams().cloned().collect()))
                .collect(),
        )
    }

    pub fn set(&mut self, label: GroupLabel, ranking: Vec<Team>) {
        self.0.insert(label, ranking);
    }

    pub fn group(&self, label: GroupLabel) -> Option<&[Team]> {
        self.0.get(&label).map(Vec::as_slice)
    }

    /// Team finishing at `rank` (1-based) in `label`.
    pub fn team_at(&self, label: GroupLabel, rank: usize) -> Option<&Team> {
        self.group(label)?.get(rank.checked_sub(1)?)
    }

    /// Swap the team at `index` with the one above it. No-op at the top.
    pub fn move_up(&mut self, label: GroupLabel, index: usize) {
        if let Some(ranking) = self.0.get_mut(&label) {
            if index > 0 && index < ranking.len() {
                ranking.swap(index, index - 1);
            }
        }
    }

    /// Swap the team at `index` with the one below it. No-op at the bottom.
    pub fn move_down(&mut self, label: GroupLabel, index: usize) {
        if let Some(ranking) = self.0.get_mut(&label) {
            if index + 1 < ranking.len() {
                ranking.swap(index, index + 1);
            }
        }
    }

    /// Every group ranked with four distinct teams that match the drawn group.
    pub fn validate_against(&self, groups: &[Group]) -> Result<(), TournamentError> {
        for label in GroupLabel::ALL {
            let ranking = self
                .group(label)
                .ok_or(TournamentError::IncompleteStandings(label))?;
            let names: HashSet<&str> = ranking.iter().map(|t| t.name.as_str()).collect();
            if ranking.len() != GROUP_SIZE || names.len() != GROUP_SIZE {
                return Err(TournamentError::IncompleteStandings(label));
            }
            if let Some(group) = find_group(groups, label) {
                if !ranking.iter().all(|t| group.contains(&t.name)) {
                    return Err(TournamentError::StandingsMismatch(label));
                }
            }
        }
        Ok(())
    }
}
