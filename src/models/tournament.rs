//! Tournament, Phase, and TournamentError.

use crate::models::group::{Group, GroupLabel, GROUP_COUNT, GROUP_SIZE};
use crate::models::knockout::{KnockoutMatches, MatchId, Round};
use crate::models::standings::Standings;
use crate::models::team::Team;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament is not in a phase that allows this action.
    InvalidState,
    /// The draw does not have 12 full groups of distinct teams.
    IncompleteDraw,
    /// No draw has been made yet.
    NoDraw,
    /// A group is missing from the standings or is not ranked 1st to 4th.
    IncompleteStandings(GroupLabel),
    /// Standings for a group list a team that was not drawn into it.
    StandingsMismatch(GroupLabel),
    /// The round has no matches yet.
    RoundNotStarted(Round),
    MatchNotFound { round: Round, id: Option<MatchId> },
    /// One or both teams of the match are not known yet.
    MatchNotReady { round: Round, id: Option<MatchId> },
    /// The selected winner does not play in this match.
    TeamNotInMatch(String),
    UnknownTeam(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::IncompleteDraw => write!(f, "Please complete all groups before continuing"),
            TournamentError::NoDraw => write!(f, "No draw has been made yet"),
            TournamentError::IncompleteStandings(label) => {
                write!(f, "All groups must be ranked (group {} is incomplete)", label)
            }
            TournamentError::StandingsMismatch(label) => {
                write!(f, "Standings for group {} do not match the draw", label)
            }
            TournamentError::RoundNotStarted(round) => write!(f, "{} has not started yet", round),
            TournamentError::MatchNotFound { round, id } => match id {
                Some(id) => write!(f, "{} match {} not found", round, id),
                None => write!(f, "{} not found", round),
            },
            TournamentError::MatchNotReady { round, id } => match id {
                Some(id) => write!(f, "Both teams of {} match {} must be known first", round, id),
                None => write!(f, "Both teams of the {} must be known first", round),
            },
            TournamentError::TeamNotInMatch(name) => write!(f, "{} does not play in this match", name),
            TournamentError::UnknownTeam(name) => write!(f, "Unknown team: {}", name),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament. Follows the furthest knockout round built so far.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for a draw to be committed.
    #[default]
    Draw,
    /// Groups drawn; standings are being ranked.
    GroupStage,
    #[serde(rename = "round_of_32")]
    RoundOf32,
    #[serde(rename = "round_of_16")]
    RoundOf16,
    QuarterFinals,
    SemiFinals,
    /// Final and third-place match built; at least one still undecided.
    Final,
    /// Final and third-place match both decided.
    Champion,
}

/// Full tournament state: groups, standings, bracket, and podium.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub phase: Phase,
    /// Committed draw (set when leaving the Draw phase).
    pub groups: Option<Vec<Group>>,
    /// Committed standings (set when the bracket starts).
    pub standings: Option<Standings>,
    pub knockout: KnockoutMatches,
    pub champion: Option<Team>,
    pub runner_up: Option<Team>,
    pub third_place: Option<Team>,
}

impl Tournament {
    /// Create a new tournament in the Draw phase.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: Phase::Draw,
            groups: None,
            standings: None,
            knockout: KnockoutMatches::default(),
            champion: None,
            runner_up: None,
            third_place: None,
        }
    }

    /// Commit a finished draw: Draw → GroupStage.
    pub fn set_groups(&mut self, groups: Vec<Group>) -> Result<(), TournamentError> {
        if self.phase != Phase::Draw {
            return Err(TournamentError::InvalidState);
        }
        if groups.len() != GROUP_COUNT || !groups.iter().all(Group::is_full) {
            return Err(TournamentError::IncompleteDraw);
        }
        let labels: HashSet<GroupLabel> = groups.iter().map(|g| g.label).collect();
        let names: HashSet<&str> = groups
            .iter()
            .flat_map(Group::teams)
            .map(|t| t.name.as_str())
            .collect();
        if labels.len() != GROUP_COUNT || names.len() != GROUP_COUNT * GROUP_SIZE {
            return Err(TournamentError::IncompleteDraw);
        }
        self.groups = Some(groups);
        self.phase = Phase::GroupStage;
        log::info!("Tournament {}: draw committed, group stage started", self.id);
        Ok(())
    }

    /// Back to the Draw phase with nothing recorded.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new()
    }
}
