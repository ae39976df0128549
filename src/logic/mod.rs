//! Draw and knockout business logic: automatic draw, manual placement, standings, bracket, exports.

mod bracket;
mod draw;
mod export;
mod placement;
mod stats;

pub use bracket::{
    begin_bracket, maybe_advance_to_champion, next_round_matches, record_winner,
    round_of_32_matches,
};
pub use draw::{
    attempt_draw, fallback_draw, generate_draw, generate_draw_with_rng, ConfederationViolation,
    Draw, PlacementConflict, MAX_DRAW_ATTEMPTS,
};
pub use export::{to_csv, to_json, to_text, DrawExport, ExportGroup, ExportTeam, TOURNAMENT_NAME};
pub use placement::{
    check_placement, commit_placement, validate_placement, ManualDraw, PlacementCheck,
    PlacementRejection, PotProgress,
};
pub use stats::{confederation_violations, draw_stats, DrawStats};
