//! Draw statistics: confederation spread and limit violations.

use crate::logic::draw::ConfederationViolation;
use crate::models::{Confederation, Group};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of a finished (or partial) draw.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawStats {
    pub total_teams: usize,
    pub confederation_distribution: BTreeMap<Confederation, usize>,
    /// Groups with more than one UEFA team.
    pub groups_with_uefa_clash: usize,
    /// One entry per group and confederation over the limit, without a team.
    /// Covers the same groups as `Draw::violations`, which lists each offending team.
    pub violations: Vec<ConfederationViolation>,
}

pub fn draw_stats(groups: &[Group]) -> DrawStats {
    let mut stats = DrawStats {
        violations: confederation_violations(groups),
        ..DrawStats::default()
    };
    for group in groups {
        stats.total_teams += group.team_count();
        if group.confederation_count(Confederation::Uefa) > 1 {
            stats.groups_with_uefa_clash += 1;
        }
        for team in group.teams() {
            *stats
                .confederation_distribution
                .entry(team.confederation)
                .or_insert(0) += 1;
        }
    }
    stats
}

/// Every group/confederation pair over its limit. Undetermined teams never count.
pub fn confederation_violations(groups: &[Group]) -> Vec<ConfederationViolation> {
    groups
        .iter()
        .flat_map(|g| {
            g.over_limit()
                .into_iter()
                .map(move |confederation| ConfederationViolation {
                    group: g.label,
                    confederation,
                    team: None,
                })
        })
        .collect()
}
