//! Game settings and preferences
//!
//! Persisted separately from high scores as a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_EVALUATION;
use crate::persistence::{self, PersistError};

/// How quickly a running simulation gets evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SimSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl SimSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimSpeed::Slow => "Slow",
            SimSpeed::Normal => "Normal",
            SimSpeed::Fast => "Fast",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SimSpeed::Slow),
            "normal" | "norm" => Some(SimSpeed::Normal),
            "fast" => Some(SimSpeed::Fast),
            _ => None,
        }
    }

    /// Ticks between evaluations for this preset
    pub fn eval_interval(&self) -> u32 {
        match self {
            SimSpeed::Slow => TICKS_PER_EVALUATION * 3 / 2,
            SimSpeed::Normal => TICKS_PER_EVALUATION,
            SimSpeed::Fast => TICKS_PER_EVALUATION / 2,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Evaluation cadence
    pub sim_speed: SimSpeed,
    /// Show the tutorial pages before the first level
    pub show_tutorial: bool,
    /// Where the leaderboard is stored
    pub high_scores_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sim_speed: SimSpeed::Normal,
            show_tutorial: true,
            high_scores_file: PathBuf::from("circuit_composer_highscores.json"),
        }
    }
}

impl Settings {
    /// Ticks between evaluations
    pub fn eval_interval(&self) -> u32 {
        self.sim_speed.eval_interval()
    }

    /// Load settings from a JSON file, using defaults if it is missing or unreadable
    pub fn load(path: &Path) -> Self {
        let settings = persistence::load_or_default(path);
        log::info!("Settings loaded from {}", path.display());
        settings
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
