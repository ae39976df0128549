//! Knockout matches, rounds, and the bracket containers.

use crate::models::team::Team;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric id of a match within its round (absent for the final and third-place match).
pub type MatchId = u32;

/// Knockout round a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    #[serde(rename = "round_of_32")]
    RoundOf32,
    #[serde(rename = "round_of_16")]
    RoundOf16,
    QuarterFinals,
    SemiFinals,
    Final,
    ThirdPlace,
}

impl Round {
    /// The four rounds that collapse pairwise into the next one.
    pub const ELIMINATION: [Round; 4] = [
        Round::RoundOf32,
        Round::RoundOf16,
        Round::QuarterFinals,
        Round::SemiFinals,
    ];

    /// Whether matches in this round are singletons without an id.
    pub fn is_single(self) -> bool {
        matches!(self, Round::Final | Round::ThirdPlace)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Round::RoundOf32 => "Round of 32",
            Round::RoundOf16 => "Round of 16",
            Round::QuarterFinals => "Quarter-finals",
            Round::SemiFinals => "Semi-finals",
            Round::Final => "Final",
            Round::ThirdPlace => "Third-place match",
        };
        f.write_str(s)
    }
}

/// Half of the Round of 32 a match was seeded into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketPath {
    Top,
    Bottom,
    /// Supplementary pairing of third-placed teams.
    Third,
}

/// A knockout match. Either both teams are known or the match is not playable yet.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MatchId>,
    pub round: Round,
    pub team1: Option<Team>,
    pub team2: Option<Team>,
    /// None until a winner is selected.
    pub winner: Option<Team>,
    /// Derived from `winner`.
    pub loser: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<BracketPath>,
}

impl Match {
    pub fn new(round: Round, id: Option<MatchId>, team1: Option<Team>, team2: Option<Team>) -> Self {
        Self {
            id,
            round,
            team1,
            team2,
            winner: None,
            loser: None,
            path: None,
        }
    }

    pub fn with_path(mut self, path: BracketPath) -> Self {
        self.path = Some(path);
        self
    }

    /// Both teams are known.
    pub fn is_ready(&self) -> bool {
        self.team1.is_some() && self.team2.is_some()
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// Same two teams, in the same order.
    pub fn same_pairing(&self, other: &Match) -> bool {
        let name = |t: &Option<Team>| t.as_ref().map(|t| t.name.clone());
        name(&self.team1) == name(&other.team1) && name(&self.team2) == name(&other.team2)
    }

    /// Record `name` as the winner and derive the loser.
    /// Returns false if `name` is not one of the two teams.
    pub fn set_winner(&mut self, name: &str) -> bool {
        let (winner, loser) = match (&self.team1, &self.team2) {
            (Some(t1), Some(t2)) if t1.is(name) => (t1.clone(), t2.clone()),
            (Some(t1), Some(t2)) if t2.is(name) => (t2.clone(), t1.clone()),
            _ => return false,
        };
        self.winner = Some(winner);
        self.loser = Some(loser);
        true
    }
}

/// All knockout rounds of one tournament.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutMatches {
    pub round_of_32: Vec<Match>,
    pub round_of_16: Vec<Match>,
    pub quarter_finals: Vec<Match>,
    pub semi_finals: Vec<Match>,
    #[serde(rename = "final")]
    pub final_match: Option<Match>,
    pub third_place: Option<Match>,
}

impl KnockoutMatches {
    /// Matches of a round; at most one for the final and the third-place match.
    pub fn round(&self, round: Round) -> &[Match] {
        match round {
            Round::RoundOf32 => &self.round_of_32,
            Round::RoundOf16 => &self.round_of_16,
            Round::QuarterFinals => &self.quarter_finals,
            Round::SemiFinals => &self.semi_finals,
            Round::Final => self.final_match.as_slice(),
            Round::ThirdPlace => self.third_place.as_slice(),
        }
    }

    pub fn find_mut(&mut self, round: Round, id: Option<MatchId>) -> Option<&mut Match> {
        match round {
            Round::RoundOf32 => find_in(&mut self.round_of_32, id),
            Round::RoundOf16 => find_in(&mut self.round_of_16, id),
            Round::QuarterFinals => find_in(&mut self.quarter_finals, id),
            Round::SemiFinals => find_in(&mut self.semi_finals, id),
            Round::Final => self.final_match.as_mut(),
            Round::ThirdPlace => self.third_place.as_mut(),
        }
    }

    /// Round has matches and every one of them has a winner.
    pub fn is_complete(&self, round: Round) -> bool {
        let matches = self.round(round);
        !matches.is_empty() && matches.iter().all(Match::is_decided)
    }
}

fn find_in(matches: &mut [Match], id: Option<MatchId>) -> Option<&mut Match> {
    let id = id?;
    matches.iter_mut().find(|m| m.id == Some(id))
}
