//! Knockout stage: fixed Round of 32 seeding, pairwise collapse, final and third-place match.

use crate::models::{
    BracketPath, GroupLabel, KnockoutMatches, Match, MatchId, Phase, Round, Standings,
    Tournament, TournamentError,
};

use crate::models::GroupLabel::*;

/// Round of 32 seeding: (id, (group, rank) of team 1, (group, rank) of team 2, path).
/// Ids 13-16 pair third-placed teams.
const ROUND_OF_32: [(MatchId, (GroupLabel, usize), (GroupLabel, usize), BracketPath); 16] = [
    (1, (A, 1), (B, 2), BracketPath::Top),
    (2, (C, 1), (D, 2), BracketPath::Top),
    (3, (E, 1), (F, 2), BracketPath::Top),
    (4, (G, 1), (H, 2), BracketPath::Top),
    (5, (B, 1), (A, 2), BracketPath::Bottom),
    (6, (D, 1), (C, 2), BracketPath::Bottom),
    (7, (F, 1), (E, 2), BracketPath::Bottom),
    (8, (H, 1), (G, 2), BracketPath::Bottom),
    (9, (I, 1), (J, 2), BracketPath::Top),
    (10, (K, 1), (L, 2), BracketPath::Top),
    (11, (J, 1), (I, 2), BracketPath::Bottom),
    (12, (L, 1), (K, 2), BracketPath::Bottom),
    (13, (A, 3), (B, 3), BracketPath::Third),
    (14, (C, 3), (D, 3), BracketPath::Third),
    (15, (E, 3), (F, 3), BracketPath::Third),
    (16, (G, 3), (H, 3), BracketPath::Third),
];

/// The 16 Round of 32 matches for the given standings.
pub fn round_of_32_matches(standings: &Standings) -> Vec<Match> {
    ROUND_OF_32
        .iter()
        .map(|&(id, (g1, r1), (g2, r2), path)| {
            Match::new(
                Round::RoundOf32,
                Some(id),
                standings.team_at(g1, r1).cloned(),
                standings.team_at(g2, r2).cloned(),
            )
            .with_path(path)
        })
        .collect()
}

/// Next round from a finished one: winners of matches 2k-1 and 2k meet in match k.
pub fn next_round_matches(round: Round, previous: &[Match]) -> Vec<Match> {
    previous
        .chunks(2)
        .zip(1..)
        .map(|(pair, id)| {
            Match::new(
                round,
                Some(id),
                pair[0].winner.clone(),
                pair.get(1).and_then(|m| m.winner.clone()),
            )
        })
        .collect()
}

/// Commit standings: GroupStage → RoundOf32.
pub fn begin_bracket(tournament: &mut Tournament, standings: Standings) -> Result<(), TournamentError> {
    if tournament.phase != Phase::GroupStage {
        return Err(TournamentError::InvalidState);
    }
    let groups = tournament.groups.as_deref().ok_or(TournamentError::NoDraw)?;
    standings.validate_against(groups)?;

    tournament.knockout = KnockoutMatches {
        round_of_32: round_of_32_matches(&standings),
        ..KnockoutMatches::default()
    };
    tournament.standings = Some(standings);
    tournament.champion = None;
    tournament.runner_up = None;
    tournament.third_place = None;
    tournament.phase = Phase::RoundOf32;
    log::info!("Tournament {}: Round of 32 drawn", tournament.id);
    Ok(())
}

/// Record the winner of a match and re-derive everything after it.
///
/// `id` is ignored for the final and the third-place match. Changing an earlier winner
/// rebuilds any later match whose pairing changed.
pub fn record_winner(
    tournament: &mut Tournament,
    round: Round,
    id: Option<MatchId>,
    winner: &str,
) -> Result<(), TournamentError> {
    if tournament.phase < Phase::RoundOf32 {
        return Err(TournamentError::InvalidState);
    }
    if tournament.knockout.round(round).is_empty() {
        return Err(TournamentError::RoundNotStarted(round));
    }
    let id = if round.is_single() { None } else { id };
    let m = tournament
        .knockout
        .find_mut(round, id)
        .ok_or(TournamentError::MatchNotFound { round, id })?;
    if !m.is_ready() {
        return Err(TournamentError::MatchNotReady { round, id });
    }
    if !m.set_winner(winner) {
        return Err(TournamentError::TeamNotInMatch(winner.to_string()));
    }

    propagate(&mut tournament.knockout);
    update_podium(tournament);
    refresh_phase(tournament);
    Ok(())
}

/// Move to Champion once the final and the third-place match (if any) are both decided.
pub fn maybe_advance_to_champion(tournament: &mut Tournament) -> bool {
    let knockout = &tournament.knockout;
    let final_decided = knockout.final_match.as_ref().is_some_and(Match::is_decided);
    let third_decided = knockout.third_place.as_ref().map_or(true, Match::is_decided);
    if tournament.phase == Phase::Final && final_decided && third_decided {
        tournament.phase = Phase::Champion;
        if let Some(champion) = &tournament.champion {
            log::info!("Tournament {}: {} are champions", tournament.id, champion.name);
        }
        return true;
    }
    false
}

fn propagate(knockout: &mut KnockoutMatches) {
    advance(&knockout.round_of_32, &mut knockout.round_of_16, Round::RoundOf16);
    advance(&knockout.round_of_16, &mut knockout.quarter_finals, Round::QuarterFinals);
    advance(&knockout.quarter_finals, &mut knockout.semi_finals, Round::SemiFinals);

    if knockout.is_complete(Round::SemiFinals) && knockout.semi_finals.len() == 2 {
        let semis = &knockout.semi_finals;
        let final_match = Match::new(
            Round::Final,
            None,
            semis[0].winner.clone(),
            semis[1].winner.clone(),
        );
        let third_place = Match::new(
            Round::ThirdPlace,
            None,
            semis[0].loser.clone(),
            semis[1].loser.clone(),
        );
        keep_or_replace(&mut knockout.final_match, final_match);
        keep_or_replace(&mut knockout.third_place, third_place);
    } else {
        knockout.final_match = None;
        knockout.third_place = None;
    }
}

/// Rebuild `next` from `previous`, keeping matches whose pairing is unchanged.
/// An unfinished `previous` leaves `next` empty.
fn advance(previous: &[Match], next: &mut Vec<Match>, round: Round) {
    let finished = !previous.is_empty() && previous.iter().all(Match::is_decided);
    if !finished {
        next.clear();
        return;
    }
    let fresh = next_round_matches(round, previous);
    if next.len() != fresh.len() {
        *next = fresh;
        return;
    }
    for (existing, fresh) in next.iter_mut().zip(fresh) {
        if !existing.same_pairing(&fresh) {
            *existing = fresh;
        }
    }
}

fn keep_or_replace(slot: &mut Option<Match>, fresh: Match) {
    let unchanged = slot.as_ref().is_some_and(|existing| existing.same_pairing(&fresh));
    if !unchanged {
        *slot = Some(fresh);
    }
}

fn update_podium(tournament: &mut Tournament) {
    let knockout = &tournament.knockout;
    tournament.champion = knockout.final_match.as_ref().and_then(|m| m.winner.clone());
    tournament.runner_up = knockout.final_match.as_ref().and_then(|m| m.loser.clone());
    tournament.third_place = knockout.third_place.as_ref().and_then(|m| m.winner.clone());
}

/// Phase follows the furthest round that exists.
fn refresh_phase(tournament: &mut Tournament) {
    let previous = tournament.phase;
    let knockout = &tournament.knockout;
    tournament.phase = if knockout.final_match.is_some() {
        Phase::Final
    } else if !knockout.semi_finals.is_empty() {
        Phase::SemiFinals
    } else if !knockout.quarter_finals.is_empty() {
        Phase::QuarterFinals
    } else if !knockout.round_of_16.is_empty() {
        Phase::RoundOf16
    } else {
        Phase::RoundOf32
    };
    maybe_advance_to_champion(tournament);
    if tournament.phase != previous {
        log::info!("Tournament {}: {:?} -> {:?}", tournament.id, previous, tournament.phase);
    }
}
