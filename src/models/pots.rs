//! The four seeding pots of the 2026 draw (FIFA ranking of 19 November 2025).

use crate::models::group::GroupLabel;
use crate::models::team::{Confederation, Pot, Team};
use serde::{Deserialize, Serialize};

use crate::models::team::Confederation::*;

const HOSTS: [(&str, Confederation, GroupLabel); 3] = [
    ("Mexico", Concacaf, GroupLabel::A),
    ("Canada", Concacaf, GroupLabel::B),
    ("USA", Concacaf, GroupLabel::D),
];

const POT_1_SEEDS: [(&str, Confederation); 9] = [
    ("Spain", Uefa),
    ("Argentina", Conmebol),
    ("France", Uefa),
    ("England", Uefa),
    ("Brazil", Conmebol),
    ("Portugal", Uefa),
    ("Netherlands", Uefa),
    ("Belgium", Uefa),
    ("Germany", Uefa),
];

const POT_2: [(&str, Confederation); 12] = [
    ("Croatia", Uefa),
    ("Morocco", Caf),
    ("Colombia", Conmebol),
    ("Uruguay", Conmebol),
    ("Switzerland", Uefa),
    ("Japan", Afc),
    ("Senegal", Caf),
    ("IR Iran", Afc),
    ("Korea Republic", Afc),
    ("Ecuador", Conmebol),
    ("Austria", Uefa),
    ("Australia", Afc),
];

const POT_3: [(&str, Confederation); 12] = [
    ("Norway", Uefa),
    ("Panama", Concacaf),
    ("Egypt", Caf),
    ("Algeria", Caf),
    ("Scotland", Uefa),
    ("Paraguay", Conmebol),
    ("Tunisia", Caf),
    ("Côte d'Ivoire", Caf),
    ("Uzbekistan", Afc),
    ("Qatar", Afc),
    ("Saudi Arabia", Afc),
    ("South Africa", Caf),
];

const POT_4: [(&str, Confederation); 6] = [
    ("Jordan", Afc),
    ("Cabo Verde", Caf),
    ("Ghana", Caf),
    ("Curaçao", Concacaf),
    ("Haiti", Concacaf),
    ("New Zealand", Ofc),
];

const POT_4_PLAYOFFS: [(&str, Confederation); 6] = [
    ("UEFA Play-Off Winner 1", Uefa),
    ("UEFA Play-Off Winner 2", Uefa),
    ("UEFA Play-Off Winner 3", Uefa),
    ("UEFA Play-Off Winner 4", Uefa),
    ("FIFA Play-Off Winner 1", Undetermined),
    ("FIFA Play-Off Winner 2", Undetermined),
];

/// Top seeds that must land in opposite semi-final pathways.
pub const PATHWAY_RIVALS: [(&str, &str); 2] = [("Spain", "Argentina"), ("France", "England")];

/// Pot 1 groups on pathway A (C, E, G, I, K).
pub const PATHWAY_A: [GroupLabel; 5] = [
    GroupLabel::C,
    GroupLabel::E,
    GroupLabel::G,
    GroupLabel::I,
    GroupLabel::K,
];

/// Pot 1 groups on pathway B (F, H, J, L).
pub const PATHWAY_B: [GroupLabel; 4] = [GroupLabel::F, GroupLabel::H, GroupLabel::J, GroupLabel::L];

/// Groups that receive a seeded (non-host) pot 1 team, in label order.
pub const SEEDED_GROUPS: [GroupLabel; 9] = [
    GroupLabel::C,
    GroupLabel::E,
    GroupLabel::F,
    GroupLabel::G,
    GroupLabel::H,
    GroupLabel::I,
    GroupLabel::J,
    GroupLabel::K,
    GroupLabel::L,
];

/// The four pots. Read-only reference data; the draw never mutates it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pots {
    pots: [Vec<Team>; 4],
}

impl Pots {
    /// The official roster.
    pub fn official() -> Self {
        let mut pot_1: Vec<Team> = HOSTS
            .iter()
            .map(|&(name, conf, _)| Team::host(name, conf))
            .collect();
        pot_1.extend(
            POT_1_SEEDS
                .iter()
                .map(|&(name, conf)| Team::new(name, conf, Pot::One)),
        );
        let plain = |teams: &[(&str, Confederation)], pot: Pot| -> Vec<Team> {
            teams
                .iter()
                .map(|&(name, conf)| Team::new(name, conf, pot))
                .collect()
        };
        let mut pot_4 = plain(&POT_4, Pot::Four);
        pot_4.extend(
            POT_4_PLAYOFFS
                .iter()
                .map(|&(name, conf)| Team::placeholder(name, conf, Pot::Four)),
        );
        Self {
            pots: [
                pot_1,
                plain(&POT_2, Pot::Two),
                plain(&POT_3, Pot::Three),
                pot_4,
            ],
        }
    }

    pub fn get(&self, pot: Pot) -> &[Team] {
        &self.pots[pot.index()]
    }

    /// All 48 teams, pot by pot.
    pub fn all_teams(&self) -> impl Iterator<Item = &Team> {
        self.pots.iter().flatten()
    }

    pub fn find(&self, name: &str) -> Option<&Team> {
        self.all_teams().find(|t| t.is(name))
    }

    /// Hosts with their predetermined group.
    pub fn hosts(&self) -> Vec<(&Team, GroupLabel)> {
        self.get(Pot::One)
            .iter()
            .filter(|t| t.host)
            .filter_map(|t| host_group(&t.name).map(|g| (t, g)))
            .collect()
    }

    /// Pot 1 teams that are not hosts, in roster order.
    pub fn seeds(&self) -> Vec<&Team> {
        self.get(Pot::One).iter().filter(|t| !t.host).collect()
    }
}

impl Default for Pots {
    fn default() -> Self {
        Self::official()
    }
}

/// Predetermined group of a host team.
pub fn host_group(name: &str) -> Option<GroupLabel> {
    HOSTS
        .iter()
        .find(|&&(host, _, _)| host == name)
        .map(|&(_, _, group)| group)
}
