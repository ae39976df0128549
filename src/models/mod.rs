//! Data structures for the draw and the knockout stage: teams, pots, groups, matches, tournament state.

mod group;
mod knockout;
mod pots;
mod standings;
mod team;
mod tournament;

pub use group::{find_group, find_group_mut, Group, GroupLabel, GROUP_COUNT, GROUP_SIZE};
pub use knockout::{BracketPath, KnockoutMatches, Match, MatchId, Round};
pub use pots::{host_group, Pots, PATHWAY_A, PATHWAY_B, PATHWAY_RIVALS, SEEDED_GROUPS};
pub use standings::Standings;
pub use team::{Confederation, Pot, Team};
pub use tournament::{Phase, Tournament, TournamentError, TournamentId};
