//! Circuit Composer - A logic-gate puzzle game core
//!
//! Core modules:
//! - `sim`: Deterministic circuit simulation (grid, propagation, progression)
//! - `levels`: Built-in level catalog
//! - `session`: Controller that owns one play session
//! - `highscores`: Top-10 leaderboard and initials entry
//! - `settings`: User preferences
//! - `persistence`: JSON file load/save

pub mod highscores;
pub mod levels;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{HighScores, ScoreBoard};
pub use session::Session;
pub use settings::{Settings, SimSpeed};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (cells)
    pub const GRID_WIDTH: usize = 16;
    pub const GRID_HEIGHT: usize = 10;

    /// Column holding the level's INPUT cells
    pub const INPUT_COLUMN: usize = 1;
    /// Column holding the level's OUTPUT cells
    pub const OUTPUT_COLUMN: usize = GRID_WIDTH - 2;

    /// Propagation sweeps per simulate call. Existing level solutions
    /// depend on this exact ripple depth.
    pub const SIM_PASSES: usize = 5;

    /// Ticks between evaluations at normal speed (one second at 60 Hz)
    pub const TICKS_PER_EVALUATION: u32 = 60;

    /// Attempts granted per level
    pub const MAX_ATTEMPTS: u8 = 3;
    /// Bonus per attempt left over beyond the first
    pub const ATTEMPT_BONUS: u64 = 50;
    /// Points for a level without an explicit value
    pub const DEFAULT_LEVEL_POINTS: u64 = 100;

    /// Cursor start position
    pub const CURSOR_START: (i32, i32) = (2, 2);
}

/// Grid bounds as a vector (exclusive)
#[inline]
pub fn grid_extent() -> IVec2 {
    IVec2::new(consts::GRID_WIDTH as i32, consts::GRID_HEIGHT as i32)
}

/// Check whether a coordinate lies on the grid
#[inline]
pub fn in_bounds(pos: IVec2) -> bool {
    pos.cmpge(IVec2::ZERO).all() && pos.cmplt(grid_extent()).all()
}

/// Clamp a coordinate onto the grid
#[inline]
pub fn clamp_to_grid(pos: IVec2) -> IVec2 {
    pos.clamp(IVec2::ZERO, grid_extent() - IVec2::ONE)
}
