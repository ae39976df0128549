//! World Cup 2026 draw simulator: library with models, draw engine, and knockout bracket.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    begin_bracket, check_placement, commit_placement, draw_stats, generate_draw,
    generate_draw_with_rng, maybe_advance_to_champion, record_winner, validate_placement, Draw,
    DrawStats, ManualDraw, PlacementCheck, PlacementRejection, MAX_DRAW_ATTEMPTS,
};
pub use models::{
    BracketPath, Confederation, Group, GroupLabel, KnockoutMatches, Match, MatchId, Phase, Pot,
    Pots, Round, Standings, Team, Tournament, TournamentError, TournamentId,
};
pub use store::{AppState, DrawStep, GroupSource, StateStore, StoreError};
