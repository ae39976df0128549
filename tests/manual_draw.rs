//! Integration tests for manual placement: rule order, commits, pot progression.

use rand::rngs::StdRng;
use rand::SeedableRng;
use world_cup_draw::logic::fallback_draw;
use world_cup_draw::{
    check_placement, commit_placement, generate_draw_with_rng, validate_placement, AppState,
    Confederation, Group, GroupLabel, GroupSource, ManualDraw, Phase, PlacementRejection, Pot,
    Pots, Team, TournamentError,
};

fn team(pots: &Pots, name: &str) -> Team {
    pots.find(name).unwrap().clone()
}

/// Place `groups` pot by pot, moving the focus after each pot.
fn fill_with(draw: &mut ManualDraw, pots: &Pots, groups: &[Group]) {
    for pot in Pot::ALL {
        assert_eq!(draw.current_pot, pot);
        for g in groups {
            let t = g.slot(pot).unwrap();
            if !draw.is_placed(&t.name) {
                draw.place(t, g.label, pot.index()).unwrap();
            }
        }
        draw.advance_pot(pots);
    }
}

#[test]
fn new_session_has_hosts_only() {
    let pots = Pots::official();
    let draw = ManualDraw::new(&pots);
    assert_eq!(draw.placed_count(), 3);
    assert_eq!(draw.current_pot, Pot::One);
    assert!(draw.is_placed("Mexico"));
    assert!(draw.is_placed("Canada"));
    assert!(draw.is_placed("USA"));
    assert_eq!(draw.remaining(&pots).len(), 9);
    assert_eq!(draw.progress().current, 1);
    assert_eq!(draw.progress().total, 4);
}

#[test]
fn rejects_full_group_before_anything_else() {
    let pots = Pots::official();
    let mut groups = Group::empty_draw();
    let a = [
        team(&pots, "Mexico"),
        team(&pots, "Croatia"),
        team(&pots, "Norway"),
        team(&pots, "Jordan"),
    ];
    groups[0] = Group::with_teams(GroupLabel::A, a);
    let spain = team(&pots, "Spain");
    assert_eq!(
        check_placement(&groups, &spain, GroupLabel::A, 0),
        Err(PlacementRejection::GroupFull)
    );
}

#[test]
fn rejects_second_team_from_same_pot() {
    let pots = Pots::official();
    let draw = ManualDraw::new(&pots);
    let check = draw.validate(&team(&pots, "Spain"), GroupLabel::A, 0);
    assert!(!check.valid);
    assert_eq!(check.reason.as_deref(), Some("Already has a team from Pot 1"));
}

#[test]
fn rejects_wrong_position() {
    let pots = Pots::official();
    let draw = ManualDraw::new(&pots);
    let check = draw.validate(&team(&pots, "Spain"), GroupLabel::C, 2);
    assert!(!check.valid);
    assert_eq!(check.reason.as_deref(), Some("Pot 1 teams must go in position 1"));
}

#[test]
fn rejects_confederation_clash() {
    let pots = Pots::official();
    let mut groups = ManualDraw::new(&pots).groups;
    // Group A already holds Mexico (CONCACAF).
    let check = validate_placement(&groups, &team(&pots, "Panama"), GroupLabel::A, 2);
    assert_eq!(check.reason.as_deref(), Some("Already has CONCACAF team"));

    commit_placement(&mut groups, &team(&pots, "Spain"), GroupLabel::C, 0).unwrap();
    commit_placement(&mut groups, &team(&pots, "Croatia"), GroupLabel::C, 1).unwrap();
    let check = validate_placement(&groups, &team(&pots, "Norway"), GroupLabel::C, 2);
    assert_eq!(check.reason.as_deref(), Some("Max 2 UEFA teams per group"));
}

#[test]
fn undetermined_confederation_is_exempt() {
    let pots = Pots::official();
    let mut groups = ManualDraw::new(&pots).groups;
    let playoff = team(&pots, "FIFA Play-Off Winner 1");
    assert_eq!(playoff.confederation, Confederation::Undetermined);
    assert!(validate_placement(&groups, &playoff, GroupLabel::A, 3).valid);
    commit_placement(&mut groups, &playoff, GroupLabel::A, 3).unwrap();
    let other = team(&pots, "FIFA Play-Off Winner 2");
    assert!(validate_placement(&groups, &other, GroupLabel::B, 3).valid);
}

#[test]
fn session_only_takes_teams_from_the_pot_in_focus() {
    let pots = Pots::official();
    let mut draw = ManualDraw::new(&pots);
    let before = draw.clone();
    let morocco = team(&pots, "Morocco");

    let check = draw.validate(&morocco, GroupLabel::C, 1);
    assert!(!check.valid);
    assert_eq!(check.reason.as_deref(), Some("Only Pot 1 teams can be placed now"));
    assert_eq!(
        draw.place(&morocco, GroupLabel::C, 1),
        Err(PlacementRejection::NotCurrentPot {
            pot: Pot::Two,
            current: Pot::One
        })
    );
    assert!(draw
        .place(&team(&pots, "New Zealand"), GroupLabel::E, 3)
        .is_err());
    assert_eq!(draw, before);

    // The free checker has no notion of focus.
    assert!(validate_placement(&draw.groups, &morocco, GroupLabel::C, 1).valid);

    let (groups, _) = fallback_draw(&pots);
    for g in &groups {
        let seed = g.slot(Pot::One).unwrap();
        if !draw.is_placed(&seed.name) {
            draw.place(seed, g.label, 0).unwrap();
        }
    }
    assert!(draw.advance_pot(&pots));
    assert!(draw.validate(&morocco, GroupLabel::B, 1).valid);
    assert!(!draw.validate(&team(&pots, "Spain"), GroupLabel::A, 0).valid);
}

#[test]
fn validation_does_not_mutate_and_agrees_with_commit() {
    let pots = Pots::official();
    let mut groups = ManualDraw::new(&pots).groups;
    let before = groups.clone();
    let morocco = team(&pots, "Morocco");

    let check = validate_placement(&groups, &morocco, GroupLabel::A, 1);
    assert!(check.valid);
    assert_eq!(validate_placement(&groups, &morocco, GroupLabel::A, 1), check);
    assert_eq!(groups, before);

    commit_placement(&mut groups, &morocco, GroupLabel::A, 1).unwrap();
    assert!(groups[0].contains("Morocco"));
    assert_eq!(
        commit_placement(&mut groups, &morocco, GroupLabel::C, 1),
        Err(PlacementRejection::AlreadyPlaced("Morocco".to_string()))
    );
}

#[test]
fn rejected_commit_leaves_groups_untouched() {
    let pots = Pots::official();
    let mut draw = ManualDraw::new(&pots);
    let before = draw.clone();
    let err = draw.place(&team(&pots, "Brazil"), GroupLabel::B, 0).unwrap_err();
    assert_eq!(err, PlacementRejection::SamePot(Pot::One));
    assert_eq!(draw, before);
}

#[test]
fn pot_advances_only_when_complete() {
    let pots = Pots::official();
    let mut draw = ManualDraw::new(&pots);
    assert!(!draw.advance_pot(&pots));

    let seeds: Vec<Team> = draw.remaining(&pots).into_iter().cloned().collect();
    let free: Vec<GroupLabel> = draw
        .groups
        .iter()
        .filter(|g| g.is_slot_free(Pot::One))
        .map(|g| g.label)
        .collect();
    for (t, label) in seeds.iter().zip(free) {
        draw.place(t, label, 0).unwrap();
    }
    assert!(draw.is_current_pot_complete(&pots));
    assert!(draw.advance_pot(&pots));
    assert_eq!(draw.current_pot, Pot::Two);
    assert_eq!(draw.remaining(&pots).len(), 12);
}

#[test]
fn finish_requires_every_slot() {
    let pots = Pots::official();
    let mut draw = ManualDraw::new(&pots);
    assert_eq!(draw.finish(), Err(TournamentError::IncompleteDraw));

    let (groups, _) = fallback_draw(&pots);
    fill_with(&mut draw, &pots, &groups);
    assert!(draw.is_complete());
    assert_eq!(draw.finish().unwrap(), groups);
    assert_eq!(draw.current_pot, Pot::Four);

    draw.reset(&pots);
    assert_eq!(draw.placed_count(), 3);
    assert_eq!(draw.current_pot, Pot::One);
}

#[test]
fn committing_manual_groups_starts_group_stage() {
    let pots = Pots::official();
    let mut state = AppState::new(&pots);
    assert_eq!(
        state.commit_groups(GroupSource::Manual),
        Err(TournamentError::IncompleteDraw)
    );
    assert_eq!(
        state.commit_groups(GroupSource::Draw),
        Err(TournamentError::NoDraw)
    );

    let (groups, _) = fallback_draw(&pots);
    fill_with(&mut state.manual, &pots, &groups);
    state.commit_groups(GroupSource::Manual).unwrap();
    assert_eq!(state.tournament.phase, Phase::GroupStage);
    let standings = state.pending_standings.as_ref().unwrap();
    assert_eq!(standings.team_at(GroupLabel::A, 1).unwrap().name, "Mexico");
    assert_eq!(
        state.commit_groups(GroupSource::Manual),
        Err(TournamentError::InvalidState)
    );
}

#[test]
fn committed_manual_groups_win_over_an_older_automatic_draw() {
    let pots = Pots::official();
    let mut state = AppState::new(&pots);
    let draw = generate_draw_with_rng(&pots, &mut StdRng::seed_from_u64(9));
    state.set_draw(draw.clone());
    assert_eq!(state.current_groups(), Some(draw.groups.as_slice()));
    assert_eq!(state.export_date(), draw.created_at);

    let (groups, _) = fallback_draw(&pots);
    fill_with(&mut state.manual, &pots, &groups);
    state.commit_groups(GroupSource::Manual).unwrap();

    assert_eq!(state.current_groups(), Some(groups.as_slice()));
    if draw.groups != groups {
        assert!(state.export_date() >= draw.created_at);
    }
}
