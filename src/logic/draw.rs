//! Randomized draw: hosts, pot 1 pathways, then greedy pot-by-pot placement with bounded retry.

use crate::models::{
    find_group_mut, Confederation, Group, GroupLabel, Pot, Pots, Team, PATHWAY_A, PATHWAY_B,
    PATHWAY_RIVALS, SEEDED_GROUPS,
};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Randomized attempts before falling back to the order-preserving pass.
pub const MAX_DRAW_ATTEMPTS: usize = 100;

/// A group that ended up over a confederation limit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConfederationViolation {
    pub group: GroupLabel,
    pub confederation: Confederation,
    /// Team whose placement broke the limit (when known).
    pub team: Option<String>,
}

/// A finished draw: 12 full groups.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Draw {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub groups: Vec<Group>,
    /// Attempts used; `MAX_DRAW_ATTEMPTS + 1` when the fallback produced the groups.
    pub attempts: usize,
    /// The groups come from the fallback pass and may break confederation limits.
    pub used_fallback: bool,
    /// One entry per team the fallback placed over a limit (always empty for a
    /// randomized draw). Several teams can break the same group's limit.
    pub violations: Vec<ConfederationViolation>,
}

impl Draw {
    fn new(groups: Vec<Group>, attempts: usize, violations: Vec<ConfederationViolation>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            groups,
            attempts,
            used_fallback: attempts > MAX_DRAW_ATTEMPTS,
            violations,
        }
    }
}

/// No group could take a team during a randomized attempt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlacementConflict {
    pub team: String,
    pub pot: Pot,
}

impl fmt::Display for PlacementConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot place {} team {} in position {}",
            self.pot,
            self.team,
            self.pot.number()
        )
    }
}

/// Draw all 48 teams with the thread-local RNG.
pub fn generate_draw(pots: &Pots) -> Draw {
    generate_draw_with_rng(pots, &mut rand::thread_rng())
}

/// Draw all 48 teams. Never fails: after `MAX_DRAW_ATTEMPTS` failed attempts the
/// fallback pass is used and `Draw::used_fallback` is set.
pub fn generate_draw_with_rng<R: Rng + ?Sized>(pots: &Pots, rng: &mut R) -> Draw {
    for attempt in 1..=MAX_DRAW_ATTEMPTS {
        match attempt_draw(pots, rng) {
            Ok(groups) => {
                log::debug!("Draw completed on attempt {}", attempt);
                return Draw::new(groups, attempt, Vec::new());
            }
            Err(conflict) => log::debug!("Draw attempt {} failed: {}", attempt, conflict),
        }
    }
    log::warn!(
        "No valid draw after {} attempts, using fallback draw",
        MAX_DRAW_ATTEMPTS
    );
    let (groups, violations) = fallback_draw(pots);
    Draw::new(groups, MAX_DRAW_ATTEMPTS + 1, violations)
}

/// One randomized attempt. Aborts on the first team no group can take.
pub fn attempt_draw<R: Rng + ?Sized>(
    pots: &Pots,
    rng: &mut R,
) -> Result<Vec<Group>, PlacementConflict> {
    let mut groups = Group::empty_draw();
    place_hosts(&mut groups, pots);
    place_seeds(&mut groups, pots, rng);

    for pot in [Pot::Two, Pot::Three, Pot::Four] {
        let mut teams: Vec<&Team> = pots.get(pot).iter().collect();
        teams.shuffle(rng);
        for team in teams {
            let group = first_admitting(&mut groups, team).ok_or_else(|| PlacementConflict {
                team: team.name.clone(),
                pot,
            })?;
            group.slots[pot.index()] = Some(team.clone());
        }
    }

    Ok(groups)
}

/// Deterministic pass in roster order. Places every team; a team no group admits goes
/// into the first free slot of its position and the broken limit is reported.
pub fn fallback_draw(pots: &Pots) -> (Vec<Group>, Vec<ConfederationViolation>) {
    let mut groups = Group::empty_draw();
    let mut violations = Vec::new();
    place_hosts(&mut groups, pots);

    for (team, &label) in pots.seeds().into_iter().zip(SEEDED_GROUPS.iter()) {
        if let Some(group) = find_group_mut(&mut groups, label) {
            group.slots[0] = Some(team.clone());
        }
    }

    for pot in [Pot::Two, Pot::Three, Pot::Four] {
        for team in pots.get(pot) {
            if let Some(group) = first_admitting(&mut groups, team) {
                group.slots[pot.index()] = Some(team.clone());
                continue;
            }
            log::warn!(
                "Could not place {} in position {} with confederation rules",
                team.name,
                pot.number()
            );
            if let Some(group) = groups.iter_mut().find(|g| g.is_slot_free(pot)) {
                group.slots[pot.index()] = Some(team.clone());
                violations.push(ConfederationViolation {
                    group: group.label,
                    confederation: team.confederation,
                    team: Some(team.name.clone()),
                });
            }
        }
    }

    (groups, violations)
}

/// Hosts go to slot 0 of their fixed groups.
fn place_hosts(groups: &mut [Group], pots: &Pots) {
    for (team, label) in pots.hosts() {
        if let Some(group) = find_group_mut(groups, label) {
            group.slots[0] = Some(team.clone());
        }
    }
}

/// Seeded pot 1 teams go to slot 0 of the non-host groups. Each rival pair is split
/// across the two pathways; sides, groups within a pathway, and the order of the other
/// seeds are all random.
fn place_seeds<R: Rng + ?Sized>(groups: &mut [Group], pots: &Pots, rng: &mut R) {
    let seeds = pots.seeds();
    let find = |name: &str| seeds.iter().copied().find(|t| t.is(name));

    let mut side_a: Vec<&Team> = Vec::new();
    let mut side_b: Vec<&Team> = Vec::new();
    for (first, second) in PATHWAY_RIVALS {
        if let (Some(first), Some(second)) = (find(first), find(second)) {
            if rng.gen_bool(0.5) {
                side_a.push(first);
                side_b.push(second);
            } else {
                side_a.push(second);
                side_b.push(first);
            }
        }
    }

    let mut pathway_a = PATHWAY_A.to_vec();
    let mut pathway_b = PATHWAY_B.to_vec();
    pathway_a.shuffle(rng);
    pathway_b.shuffle(rng);

    let mut placements: Vec<(GroupLabel, &Team)> = Vec::new();
    placements.extend(pathway_a.iter().copied().zip(side_a.iter().copied()));
    placements.extend(pathway_b.iter().copied().zip(side_b.iter().copied()));

    let leftover: Vec<GroupLabel> = pathway_a
        .iter()
        .skip(side_a.len())
        .chain(pathway_b.iter().skip(side_b.len()))
        .copied()
        .collect();
    let mut others: Vec<&Team> = seeds
        .iter()
        .copied()
        .filter(|t| !side_a.contains(t) && !side_b.contains(t))
        .collect();
    others.shuffle(rng);
    placements.extend(leftover.into_iter().zip(others));

    for (label, team) in placements {
        if let Some(group) = find_group_mut(groups, label) {
            group.slots[0] = Some(team.clone());
        }
    }
}

/// First group, in label order, with the team's slot free and room for its confederation.
fn first_admitting<'a>(groups: &'a mut [Group], team: &Team) -> Option<&'a mut Group> {
    groups
        .iter_mut()
        .find(|g| g.is_slot_free(team.pot) && g.admits(team))
}
