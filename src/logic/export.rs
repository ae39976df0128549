//! Read-only projections of a draw: JSON, plain text, and CSV.

use crate::logic::stats::draw_stats;
use crate::models::{Confederation, Group, GroupLabel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TOURNAMENT_NAME: &str = "FIFA World Cup 2026";

/// One team as exported.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExportTeam {
    pub name: String,
    pub confederation: Confederation,
    pub host: bool,
    pub placeholder: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExportGroup {
    pub group: GroupLabel,
    pub teams: Vec<ExportTeam>,
}

/// JSON export document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawExport {
    pub tournament: String,
    pub date: DateTime<Utc>,
    pub groups: Vec<ExportGroup>,
}

impl DrawExport {
    pub fn new(groups: &[Group], date: DateTime<Utc>) -> Self {
        Self {
            tournament: TOURNAMENT_NAME.to_string(),
            date,
            groups: groups
                .iter()
                .map(|g| ExportGroup {
                    group: g.label,
                    teams: g
                        .teams()
                        .map(|t| ExportTeam {
                            name: t.name.clone(),
                            confederation: t.confederation,
                            host: t.host,
                            placeholder: t.placeholder,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

pub fn to_json(groups: &[Group], date: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DrawExport::new(groups, date))
}

const RULE: &str = "═══════════════════════════════════════════════";

/// Boxed plain-text sheet with the confederation distribution at the bottom.
pub fn to_text(groups: &[Group], date: DateTime<Utc>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_text(&mut out, groups, date)?;
    Ok(out)
}

fn write_text<W: fmt::Write>(out: &mut W, groups: &[Group], date: DateTime<Utc>) -> fmt::Result {
    writeln!(out, "{RULE}")?;
    writeln!(out, "     {} - OFFICIAL DRAW", TOURNAMENT_NAME.to_uppercase())?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Date: {}", date.format("%Y-%m-%d"))?;
    writeln!(out, "48 Teams • 12 Groups • 4 Teams per Group")?;
    writeln!(out, "{RULE}\n")?;

    for group in groups {
        writeln!(out, "┌─────────────────────────────────────────────┐")?;
        writeln!(out, "│  {:<43}│", format!("GROUP {}", group.label))?;
        writeln!(out, "├─────────────────────────────────────────────┤")?;
        for (i, team) in group.teams().enumerate() {
            let mut line = format!("{}. {}", i + 1, team.name);
            if team.host {
                line.push_str(" (HOST)");
            }
            if team.placeholder {
                line.push_str(" *");
            }
            writeln!(out, "│  {:<35} {:<8}│", line, team.confederation.to_string())?;
        }
        writeln!(out, "└─────────────────────────────────────────────┘\n")?;
    }

    writeln!(out, "{RULE}")?;
    writeln!(out, "CONFEDERATION DISTRIBUTION:")?;
    writeln!(out, "{RULE}")?;
    for (conf, count) in draw_stats(groups).confederation_distribution {
        writeln!(out, "{:<15}: {} teams", conf.to_string(), count)?;
    }
    writeln!(out, "{RULE}")
}

#[derive(Serialize)]
struct CsvRow<'a> {
    group: GroupLabel,
    position: usize,
    name: &'a str,
    confederation: Confederation,
    host: bool,
    placeholder: bool,
}

/// One row per team: group, position, name, confederation, host, placeholder.
pub fn to_csv(groups: &[Group]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for group in groups {
        for (i, slot) in group.slots.iter().enumerate() {
            if let Some(team) = slot {
                writer.serialize(CsvRow {
                    group: group.label,
                    position: i + 1,
                    name: &team.name,
                    confederation: team.confederation,
                    host: team.host,
                    placeholder: team.placeholder,
                })?;
            }
        }
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
