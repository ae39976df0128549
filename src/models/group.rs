//! Group and GroupLabel.

use crate::models::team::{Confederation, Pot, Team};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of groups in the draw.
pub const GROUP_COUNT: usize = 12;
/// Teams (and slots) per group.
pub const GROUP_SIZE: usize = 4;

/// Group letter, A through L.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum GroupLabel {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
}

impl GroupLabel {
    pub const ALL: [GroupLabel; GROUP_COUNT] = [
        GroupLabel::A,
        GroupLabel::B,
        GroupLabel::C,
        GroupLabel::D,
        GroupLabel::E,
        GroupLabel::F,
        GroupLabel::G,
        GroupLabel::H,
        GroupLabel::I,
        GroupLabel::J,
        GroupLabel::K,
        GroupLabel::L,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<GroupLabel> {
        GroupLabel::ALL.get(index).copied()
    }

    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A group of four slots. Slot `i` is reserved for a team from pot `i + 1`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub label: GroupLabel,
    pub slots: [Option<Team>; GROUP_SIZE],
}

impl Group {
    pub fn new(label: GroupLabel) -> Self {
        Self {
            label,
            slots: Default::default(),
        }
    }

    /// Build a full group from four teams, in slot order.
    pub fn with_teams(label: GroupLabel, teams: [Team; GROUP_SIZE]) -> Self {
        Self {
            label,
            slots: teams.map(Some),
        }
    }

    /// Twelve empty groups, A to L.
    pub fn empty_draw() -> Vec<Group> {
        GroupLabel::ALL.iter().map(|&l| Group::new(l)).collect()
    }

    /// Occupied slots, in slot order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.slots.iter().flatten()
    }

    pub fn team_count(&self) -> usize {
        self.teams().count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn slot(&self, pot: Pot) -> Option<&Team> {
        self.slots[pot.index()].as_ref()
    }

    pub fn is_slot_free(&self, pot: Pot) -> bool {
        self.slots[pot.index()].is_none()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams().any(|t| t.is(name))
    }

    pub fn has_pot(&self, pot: Pot) -> bool {
        self.teams().any(|t| t.pot == pot)
    }

    pub fn confederation_count(&self, confederation: Confederation) -> usize {
        self.teams()
            .filter(|t| t.confederation == confederation)
            .count()
    }

    /// Whether adding `team` keeps the group within its confederation limits.
    pub fn admits(&self, team: &Team) -> bool {
        match team.confederation.max_per_group() {
            Some(max) => self.confederation_count(team.confederation) < max,
            None => true,
        }
    }

    /// Confederations present above their limit.
    pub fn over_limit(&self) -> Vec<Confederation> {
        let mut over: Vec<Confederation> = self
            .teams()
            .map(|t| t.confederation)
            .filter(|&c| {
                c.max_per_group()
                    .is_some_and(|max| self.confederation_count(c) > max)
            })
            .collect();
        over.sort();
        over.dedup();
        over
    }
}

/// Look up a group by label.
pub fn find_group(groups: &[Group], label: GroupLabel) -> Option<&Group> {
    groups.iter().find(|g| g.label == label)
}

/// Mutable variant of [`find_group`].
pub fn find_group_mut(groups: &mut [Group], label: GroupLabel) -> Option<&mut Group> {
    groups.iter_mut().find(|g| g.label == label)
}
