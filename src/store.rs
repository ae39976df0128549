//! Persisted app state: draw progress, manual draw, pending standings, and tournament.

use crate::logic::{Draw, ManualDraw};
use crate::models::{Group, Pots, Standings, Tournament, TournamentError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors reading or writing the state file.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "State file I/O error: {}", e),
            StoreError::Json(e) => write!(f, "State file is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Step of the automatic draw screen.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawStep {
    #[default]
    Setup,
    /// Draw requested; result not shown yet.
    Drawing,
    Complete,
}

/// Where the groups committed to the tournament come from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSource {
    Draw,
    Manual,
}

/// Everything that survives between sessions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub step: DrawStep,
    pub draw: Option<Draw>,
    pub manual: ManualDraw,
    /// Ranking being edited during the group stage (before the bracket starts).
    pub pending_standings: Option<Standings>,
    pub tournament: Tournament,
    pub updated_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(pots: &Pots) -> Self {
        Self {
            step: DrawStep::Setup,
            draw: None,
            manual: ManualDraw::new(pots),
            pending_standings: None,
            tournament: Tournament::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn set_draw(&mut self, draw: Draw) {
        self.draw = Some(draw);
        self.step = DrawStep::Complete;
    }

    /// Clear the automatic and the manual draw.
    pub fn reset_draw(&mut self, pots: &Pots) {
        self.step = DrawStep::Setup;
        self.draw = None;
        self.manual.reset(pots);
    }

    /// Clear the tournament and any standings being edited.
    pub fn reset_bracket(&mut self) {
        self.tournament.reset();
        self.pending_standings = None;
    }

    /// Groups committed to the tournament, else the latest automatic draw.
    pub fn current_groups(&self) -> Option<&[Group]> {
        self.tournament
            .groups
            .as_deref()
            .or_else(|| self.draw.as_ref().map(|d| d.groups.as_slice()))
    }

    /// Date stamped on exports: when the automatic draw was made if its groups are the
    /// current ones, otherwise now.
    pub fn export_date(&self) -> DateTime<Utc> {
        match (&self.draw, self.current_groups()) {
            (Some(draw), Some(groups)) if draw.groups.as_slice() == groups => draw.created_at,
            _ => Utc::now(),
        }
    }

    /// Commit groups to the tournament and seed the standings with draw order.
    pub fn commit_groups(&mut self, source: GroupSource) -> Result<(), TournamentError> {
        let groups = match source {
            GroupSource::Draw => self
                .draw
                .as_ref()
                .map(|d| d.groups.clone())
                .ok_or(TournamentError::NoDraw)?,
            GroupSource::Manual => self.manual.finish()?,
        };
        self.tournament.set_groups(groups)?;
        self.pending_standings = self
            .tournament
            .groups
            .as_deref()
            .map(Standings::from_groups);
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Pots::official())
    }
}

/// JSON file holding one [`AppState`].
#[derive(Clone, Debug)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved state; a missing file yields a fresh state.
    pub fn load(&self) -> Result<AppState, StoreError> {
        if !self.path.exists() {
            log::info!("No state file at {}, starting fresh", self.path.display());
            return Ok(AppState::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write to a temp file, then rename it over the state file.
    pub fn save(&self, state: &AppState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Remove the state file (explicit reset of everything).
    pub fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
