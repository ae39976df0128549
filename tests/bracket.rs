//! Integration tests for standings, the knockout bracket, and the persisted state.

use rand::rngs::StdRng;
use rand::SeedableRng;
use world_cup_draw::logic::{fallback_draw, next_round_matches, round_of_32_matches};
use world_cup_draw::{
    begin_bracket, generate_draw_with_rng, maybe_advance_to_champion, record_winner, AppState,
    BracketPath, DrawStep, GroupLabel, GroupSource, ManualDraw, Phase, Pots, Round, Standings,
    StateStore, Team, Tournament, TournamentError,
};

fn team(pots: &Pots, name: &str) -> Team {
    pots.find(name).unwrap().clone()
}

fn group_stage() -> Tournament {
    let (groups, _) = fallback_draw(&Pots::official());
    let mut t = Tournament::new();
    t.set_groups(groups).unwrap();
    t
}

fn knockout() -> Tournament {
    let mut t = group_stage();
    let standings = Standings::from_groups(t.groups.as_deref().unwrap());
    begin_bracket(&mut t, standings).unwrap();
    t
}

/// Team 1 wins every match of the round.
fn play_round(t: &mut Tournament, round: Round) {
    let picks: Vec<(Option<u32>, String)> = t
        .knockout
        .round(round)
        .iter()
        .map(|m| (m.id, m.team1.as_ref().unwrap().name.clone()))
        .collect();
    for (id, winner) in picks {
        record_winner(t, round, id, &winner).unwrap();
    }
}

#[test]
fn round_of_32_pairs_winners_with_runners_up() {
    let pots = Pots::official();
    let mut standings = Standings::new();
    standings.set(
        GroupLabel::A,
        ["Spain", "Croatia", "Egypt", "Jordan"].map(|n| team(&pots, n)).to_vec(),
    );
    standings.set(
        GroupLabel::B,
        ["Argentina", "Morocco", "Panama", "Ghana"].map(|n| team(&pots, n)).to_vec(),
    );

    let matches = round_of_32_matches(&standings);
    assert_eq!(matches.len(), 16);
    assert_eq!(matches[0].id, Some(1));
    assert_eq!(matches[0].team1.as_ref().unwrap().name, "Spain");
    assert_eq!(matches[0].team2.as_ref().unwrap().name, "Morocco");
    assert_eq!(matches[0].path, Some(BracketPath::Top));
    assert_eq!(matches[4].team1.as_ref().unwrap().name, "Argentina");
    assert_eq!(matches[4].team2.as_ref().unwrap().name, "Croatia");
    assert_eq!(matches[12].team1.as_ref().unwrap().name, "Egypt");
    assert_eq!(matches[12].team2.as_ref().unwrap().name, "Panama");
    assert_eq!(matches[12].path, Some(BracketPath::Third));
    assert_eq!(round_of_32_matches(&standings), matches);
}

#[test]
fn bracket_needs_group_stage_and_full_standings() {
    let mut fresh = Tournament::new();
    assert_eq!(
        begin_bracket(&mut fresh, Standings::new()),
        Err(TournamentError::InvalidState)
    );

    let mut t = group_stage();
    let mut standings = Standings::from_groups(t.groups.as_deref().unwrap());
    let mut short = standings.group(GroupLabel::C).unwrap().to_vec();
    short.pop();
    standings.set(GroupLabel::C, short);
    assert_eq!(
        begin_bracket(&mut t, standings),
        Err(TournamentError::IncompleteStandings(GroupLabel::C))
    );
    assert_eq!(t.phase, Phase::GroupStage);
}

#[test]
fn standings_must_match_the_draw() {
    let t = group_stage();
    let groups = t.groups.as_deref().unwrap();
    let mut standings = Standings::from_groups(groups);
    let mut a = standings.group(GroupLabel::A).unwrap().to_vec();
    a[3] = standings.team_at(GroupLabel::B, 4).unwrap().clone();
    standings.set(GroupLabel::A, a);
    assert_eq!(
        standings.validate_against(groups),
        Err(TournamentError::StandingsMismatch(GroupLabel::A))
    );
}

#[test]
fn moving_teams_reorders_and_stops_at_edges() {
    let t = group_stage();
    let mut standings = Standings::from_groups(t.groups.as_deref().unwrap());
    let order = |s: &Standings| -> Vec<String> {
        s.group(GroupLabel::A).unwrap().iter().map(|t| t.name.clone()).collect()
    };
    assert_eq!(order(&standings), ["Mexico", "Croatia", "Norway", "Jordan"]);

    standings.move_up(GroupLabel::A, 2);
    assert_eq!(order(&standings), ["Mexico", "Norway", "Croatia", "Jordan"]);
    standings.move_down(GroupLabel::A, 0);
    assert_eq!(order(&standings), ["Norway", "Mexico", "Croatia", "Jordan"]);

    standings.move_up(GroupLabel::A, 0);
    standings.move_down(GroupLabel::A, 3);
    assert_eq!(order(&standings), ["Norway", "Mexico", "Croatia", "Jordan"]);
}

#[test]
fn winners_collapse_pairwise_into_next_round() {
    let mut t = knockout();
    assert_eq!(t.phase, Phase::RoundOf32);
    play_round(&mut t, Round::RoundOf32);
    assert_eq!(t.phase, Phase::RoundOf16);

    let r32 = &t.knockout.round_of_32;
    let r16 = &t.knockout.round_of_16;
    assert_eq!(r16.len(), 8);
    for (k, m) in r16.iter().enumerate() {
        assert_eq!(m.id, Some(k as u32 + 1));
        assert_eq!(m.team1, r32[2 * k].winner);
        assert_eq!(m.team2, r32[2 * k + 1].winner);
    }
    assert_eq!(next_round_matches(Round::RoundOf16, r32), *r16);
}

#[test]
fn no_next_round_until_every_match_is_decided() {
    let mut t = knockout();
    let winner = t.knockout.round_of_32[0].team1.clone().unwrap().name;
    record_winner(&mut t, Round::RoundOf32, Some(1), &winner).unwrap();
    assert!(t.knockout.round_of_16.is_empty());
    assert_eq!(t.phase, Phase::RoundOf32);
    assert_eq!(
        record_winner(&mut t, Round::RoundOf16, Some(1), &winner),
        Err(TournamentError::RoundNotStarted(Round::RoundOf16))
    );
}

#[test]
fn bad_selections_are_rejected() {
    let mut t = knockout();
    assert_eq!(
        record_winner(&mut t, Round::RoundOf32, Some(99), "Mexico"),
        Err(TournamentError::MatchNotFound {
            round: Round::RoundOf32,
            id: Some(99)
        })
    );
    assert_eq!(
        record_winner(&mut t, Round::RoundOf32, Some(1), "Brazil"),
        Err(TournamentError::TeamNotInMatch("Brazil".to_string()))
    );

    let mut early = group_stage();
    assert_eq!(
        record_winner(&mut early, Round::RoundOf32, Some(1), "Mexico"),
        Err(TournamentError::InvalidState)
    );
}

#[test]
fn match_without_both_teams_is_not_ready() {
    let pots = Pots::official();
    let mut standings = Standings::new();
    standings.set(
        GroupLabel::A,
        ["Spain", "Croatia", "Egypt", "Jordan"].map(|n| team(&pots, n)).to_vec(),
    );
    let mut t = Tournament::new();
    t.phase = Phase::RoundOf32;
    t.knockout.round_of_32 = round_of_32_matches(&standings);

    assert_eq!(
        record_winner(&mut t, Round::RoundOf32, Some(1), "Spain"),
        Err(TournamentError::MatchNotReady {
            round: Round::RoundOf32,
            id: Some(1)
        })
    );
    assert!(t.knockout.round_of_32[0].winner.is_none());
}

#[test]
fn champion_needs_final_and_third_place() {
    let mut t = knockout();
    for round in Round::ELIMINATION {
        play_round(&mut t, round);
    }
    assert_eq!(t.phase, Phase::Final);
    assert_eq!(t.knockout.semi_finals.len(), 2);
    let final_match = t.knockout.final_match.clone().unwrap();
    let third = t.knockout.third_place.clone().unwrap();
    assert_eq!(final_match.team1, t.knockout.semi_finals[0].winner);
    assert_eq!(third.team2, t.knockout.semi_finals[1].loser);

    let champion = final_match.team2.clone().unwrap();
    record_winner(&mut t, Round::Final, None, &champion.name).unwrap();
    assert_eq!(t.phase, Phase::Final);
    assert_eq!(t.champion.as_ref(), Some(&champion));
    assert_eq!(t.runner_up, final_match.team1);
    assert!(!maybe_advance_to_champion(&mut t));

    let bronze = third.team1.clone().unwrap();
    record_winner(&mut t, Round::ThirdPlace, Some(42), &bronze.name).unwrap();
    assert_eq!(t.phase, Phase::Champion);
    assert_eq!(t.third_place, Some(bronze));
}

#[test]
fn changing_an_earlier_winner_rebuilds_later_rounds() {
    let mut t = knockout();
    play_round(&mut t, Round::RoundOf32);
    play_round(&mut t, Round::RoundOf16);
    assert_eq!(t.phase, Phase::QuarterFinals);
    let untouched = t.knockout.round_of_16[1].clone();

    let upset = t.knockout.round_of_32[0].team2.clone().unwrap();
    record_winner(&mut t, Round::RoundOf32, Some(1), &upset.name).unwrap();

    let r16 = &t.knockout.round_of_16;
    assert_eq!(r16[0].team1.as_ref(), Some(&upset));
    assert!(r16[0].winner.is_none());
    assert_eq!(r16[1], untouched);
    assert!(t.knockout.quarter_finals.is_empty());
    assert_eq!(t.phase, Phase::RoundOf16);
}

#[test]
fn reset_returns_to_draw_phase() {
    let mut t = knockout();
    play_round(&mut t, Round::RoundOf32);
    let id = t.id;
    t.reset();
    assert_eq!(t.phase, Phase::Draw);
    assert!(t.groups.is_none());
    assert!(t.knockout.round_of_32.is_empty());
    assert_ne!(t.id, id);
}

#[test]
fn state_survives_save_and_load() {
    let path = std::env::temp_dir().join(format!("wc-state-{}.json", uuid::Uuid::new_v4()));
    let store = StateStore::new(&path);

    let fresh = store.load().unwrap();
    assert_eq!(fresh.tournament.phase, Phase::Draw);

    let pots = Pots::official();
    let mut state = AppState::new(&pots);
    state.set_draw(generate_draw_with_rng(&pots, &mut StdRng::seed_from_u64(3)));
    state.commit_groups(GroupSource::Draw).unwrap();
    let standings = state.pending_standings.take().unwrap();
    begin_bracket(&mut state.tournament, standings).unwrap();
    store.save(&state).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(
        serde_json::to_value(&loaded).unwrap(),
        serde_json::to_value(&state).unwrap()
    );
    assert_eq!(loaded.tournament.phase, Phase::RoundOf32);

    store.clear().unwrap();
    assert!(!path.exists());
    let cleared = store.load().unwrap();
    assert_eq!(cleared.tournament.phase, Phase::Draw);
    assert!(cleared.draw.is_none());
}

#[test]
fn draw_reset_restores_initial_draw_state() {
    let pots = Pots::official();
    let mut state = AppState::new(&pots);
    state.set_draw(generate_draw_with_rng(&pots, &mut StdRng::seed_from_u64(5)));
    state
        .manual
        .place(&team(&pots, "Spain"), GroupLabel::C, 0)
        .unwrap();
    assert_eq!(state.step, DrawStep::Complete);

    state.reset_draw(&pots);
    assert_eq!(state.step, DrawStep::Setup);
    assert!(state.draw.is_none());
    assert_eq!(state.manual, ManualDraw::new(&pots));
    assert_eq!(
        state.commit_groups(GroupSource::Draw),
        Err(TournamentError::NoDraw)
    );

    state.set_draw(generate_draw_with_rng(&pots, &mut StdRng::seed_from_u64(6)));
    state.commit_groups(GroupSource::Draw).unwrap();
    assert_eq!(state.tournament.phase, Phase::GroupStage);
}

#[test]
fn bracket_reset_clears_standings_and_allows_recommit() {
    let pots = Pots::official();
    let mut state = AppState::new(&pots);
    state.set_draw(generate_draw_with_rng(&pots, &mut StdRng::seed_from_u64(8)));
    state.commit_groups(GroupSource::Draw).unwrap();
    let standings = state.pending_standings.clone().unwrap();
    begin_bracket(&mut state.tournament, standings).unwrap();
    assert_eq!(state.tournament.phase, Phase::RoundOf32);

    state.reset_bracket();
    assert!(state.pending_standings.is_none());
    assert_eq!(state.tournament.phase, Phase::Draw);
    assert!(state.tournament.groups.is_none());
    assert!(state.tournament.standings.is_none());
    assert!(state.tournament.knockout.round_of_32.is_empty());
    assert!(state.tournament.champion.is_none());
    assert!(state.draw.is_some());

    state.commit_groups(GroupSource::Draw).unwrap();
    assert_eq!(state.tournament.phase, Phase::GroupStage);
    assert!(state.pending_standings.is_some());
}
