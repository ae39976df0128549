//! Manual draw: one team at a time, checked against the same rules as the automatic draw.

use crate::models::{
    find_group, find_group_mut, Confederation, Group, GroupLabel, Pot, Pots, Team,
    TournamentError, GROUP_SIZE,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a team cannot go into a slot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlacementRejection {
    /// The team already sits in some group.
    AlreadyPlaced(String),
    GroupFull,
    /// The group already has a team from the candidate's pot.
    SamePot(Pot),
    /// Pot N teams only go in position N.
    WrongPosition { pot: Pot, slot: usize },
    ConfederationLimit(Confederation),
    /// A manual session only offers teams from the pot in focus.
    NotCurrentPot { pot: Pot, current: Pot },
}

impl fmt::Display for PlacementRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementRejection::AlreadyPlaced(name) => write!(f, "{} is already placed", name),
            PlacementRejection::GroupFull => write!(f, "Group is full"),
            PlacementRejection::SamePot(pot) => write!(f, "Already has a team from {}", pot),
            PlacementRejection::WrongPosition { pot, .. } => {
                write!(f, "{} teams must go in position {}", pot, pot.number())
            }
            PlacementRejection::ConfederationLimit(Confederation::Uefa) => {
                write!(f, "Max 2 UEFA teams per group")
            }
            PlacementRejection::ConfederationLimit(conf) => write!(f, "Already has {} team", conf),
            PlacementRejection::NotCurrentPot { current, .. } => {
                write!(f, "Only {} teams can be placed now", current)
            }
        }
    }
}

/// Accept/reject answer for a candidate slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlacementCheck {
    pub valid: bool,
    pub reason: Option<String>,
}

impl From<Result<(), PlacementRejection>> for PlacementCheck {
    fn from(result: Result<(), PlacementRejection>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                reason: None,
            },
            Err(rejection) => Self {
                valid: false,
                reason: Some(rejection.to_string()),
            },
        }
    }
}

/// Checks, in order: already placed, group full, same pot, position, confederation.
/// Shared by hover feedback and commit so both always agree.
pub fn check_placement(
    groups: &[Group],
    team: &Team,
    target: GroupLabel,
    slot: usize,
) -> Result<(), PlacementRejection> {
    if groups.iter().any(|g| g.contains(&team.name)) {
        return Err(PlacementRejection::AlreadyPlaced(team.name.clone()));
    }
    let group = match find_group(groups, target) {
        Some(group) if !group.is_full() => group,
        _ => return Err(PlacementRejection::GroupFull),
    };
    if group.has_pot(team.pot) {
        return Err(PlacementRejection::SamePot(team.pot));
    }
    if slot != team.pot.index() {
        return Err(PlacementRejection::WrongPosition {
            pot: team.pot,
            slot,
        });
    }
    if !group.admits(team) {
        return Err(PlacementRejection::ConfederationLimit(team.confederation));
    }
    Ok(())
}

/// `{valid, reason}` view of [`check_placement`].
pub fn validate_placement(
    groups: &[Group],
    team: &Team,
    target: GroupLabel,
    slot: usize,
) -> PlacementCheck {
    check_placement(groups, team, target, slot).into()
}

/// Place `team` into `slot` of `target` if every check passes.
pub fn commit_placement(
    groups: &mut [Group],
    team: &Team,
    target: GroupLabel,
    slot: usize,
) -> Result<(), PlacementRejection> {
    check_placement(groups, team, target, slot)?;
    let group = find_group_mut(groups, target).ok_or(PlacementRejection::GroupFull)?;
    group.slots[slot] = Some(team.clone());
    Ok(())
}

/// Pot progress shown while placing (`current` of `total`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotProgress {
    pub pot: Pot,
    pub current: usize,
    pub total: usize,
}

/// A draw being filled in by hand, hosts pre-placed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ManualDraw {
    pub groups: Vec<Group>,
    /// Pot whose teams are currently offered. Only moves on request.
    pub current_pot: Pot,
}

impl ManualDraw {
    pub fn new(pots: &Pots) -> Self {
        let mut groups = Group::empty_draw();
        for (host, label) in pots.hosts() {
            if let Some(group) = find_group_mut(&mut groups, label) {
                group.slots[0] = Some(host.clone());
            }
        }
        Self {
            groups,
            current_pot: Pot::One,
        }
    }

    /// Back to hosts only, pot 1 in focus.
    pub fn reset(&mut self, pots: &Pots) {
        *self = Self::new(pots);
    }

    pub fn is_placed(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.contains(name))
    }

    /// Teams of the current pot not placed yet, in roster order.
    pub fn remaining<'a>(&self, pots: &'a Pots) -> Vec<&'a Team> {
        pots.get(self.current_pot)
            .iter()
            .filter(|t| !self.is_placed(&t.name))
            .collect()
    }

    pub fn is_current_pot_complete(&self, pots: &Pots) -> bool {
        self.remaining(pots).is_empty()
    }

    pub fn progress(&self) -> PotProgress {
        PotProgress {
            pot: self.current_pot,
            current: self.current_pot.number(),
            total: Pot::ALL.len(),
        }
    }

    /// Move focus to the next pot once the current one is fully placed.
    /// Returns whether the focus moved.
    pub fn advance_pot(&mut self, pots: &Pots) -> bool {
        if !self.is_current_pot_complete(pots) {
            return false;
        }
        match self.current_pot.next() {
            Some(next) => {
                self.current_pot = next;
                true
            }
            None => false,
        }
    }

    /// Rejects teams outside the pot in focus, then runs [`check_placement`].
    pub fn check(&self, team: &Team, target: GroupLabel, slot: usize) -> Result<(), PlacementRejection> {
        if team.pot != self.current_pot {
            return Err(PlacementRejection::NotCurrentPot {
                pot: team.pot,
                current: self.current_pot,
            });
        }
        check_placement(&self.groups, team, target, slot)
    }

    pub fn validate(&self, team: &Team, target: GroupLabel, slot: usize) -> PlacementCheck {
        self.check(team, target, slot).into()
    }

    pub fn place(&mut self, team: &Team, target: GroupLabel, slot: usize) -> Result<(), PlacementRejection> {
        self.check(team, target, slot)?;
        commit_placement(&mut self.groups, team, target, slot)?;
        log::debug!("Placed {} in group {} position {}", team.name, target, slot + 1);
        Ok(())
    }

    pub fn placed_count(&self) -> usize {
        self.groups.iter().map(Group::team_count).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.groups.iter().all(Group::is_full)
    }

    /// The finished groups, or an error while any slot is still empty.
    pub fn finish(&self) -> Result<Vec<Group>, TournamentError> {
        if !self.is_complete() || self.placed_count() != self.groups.len() * GROUP_SIZE {
            return Err(TournamentError::IncompleteDraw);
        }
        Ok(self.groups.clone())
    }
}
