//! Game state and core simulation types
//!
//! Everything a play session needs lives in `GameState`; nothing is global.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::circuit::Verdict;
use super::grid::{Cell, CellKind, Grid};
use crate::consts::*;
use crate::highscores::InitialsEntry;
use crate::levels::{self, Level, port_row};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player is placing components, clock stopped
    Editing,
    /// Clock running toward the next evaluation
    Simulating,
    /// Level solved, waiting for the advance input
    LevelComplete,
    /// Out of attempts, waiting for restart
    GameOver,
    /// Score made the leaderboard, player is typing initials
    EnteringInitials,
    /// Leaderboard on screen, waiting for restart
    ShowingHighScores,
}

impl GamePhase {
    /// Phases in which the board accepts edits, cursor moves and tool changes
    pub fn accepts_edits(&self) -> bool {
        matches!(self, GamePhase::Editing | GamePhase::Simulating)
    }
}

/// Complete game state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current level index (0-based)
    pub level_index: usize,
    /// Total score across levels
    pub score: u64,
    /// Points awarded for the most recently solved level
    pub level_score: u64,
    /// Attempts left on the current level
    pub attempts: u8,
    pub level_complete: bool,
    pub game_over: bool,
    pub phase: GamePhase,
    pub grid: Grid,
    /// Editing cursor (grid coordinates)
    pub cursor: IVec2,
    /// Index into `CellKind::PLACEABLE`
    tool_index: usize,
    /// Ticks since the simulation clock was last started
    pub sim_ticks: u32,
    /// Total ticks seen this session
    pub time_ticks: u64,
    /// Result of the most recent evaluation on this level
    pub last_verdict: Option<Verdict>,
    /// Initials being typed for the leaderboard
    pub initials: InitialsEntry,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh session on the first level
    pub fn new() -> Self {
        let (cx, cy) = CURSOR_START;
        let mut state = Self {
            level_index: 0,
            score: 0,
            level_score: 0,
            attempts: MAX_ATTEMPTS,
            level_complete: false,
            game_over: false,
            phase: GamePhase::Editing,
            grid: Grid::new(),
            cursor: IVec2::new(cx, cy),
            tool_index: 0,
            sim_ticks: 0,
            time_ticks: 0,
            last_verdict: None,
            initials: InitialsEntry::default(),
        };
        state.load_level(0);
        state
    }

    /// Load a level from the catalog, rebuilding the grid.
    ///
    /// Returns false (and changes nothing) for an index past the catalog.
    pub fn load_level(&mut self, index: usize) -> bool {
        let Some(level) = levels::get(index) else {
            log::debug!("Ignoring load of level {} (catalog has {})", index, levels::count());
            return false;
        };

        self.level_index = index;
        self.attempts = MAX_ATTEMPTS;
        self.level_complete = false;
        self.game_over = false;
        self.level_score = 0;
        self.phase = GamePhase::Editing;
        self.sim_ticks = 0;
        self.last_verdict = None;

        self.grid.initialize();
        let n_in = level.inputs.len();
        for (i, signal) in level.input_signals().enumerate() {
            if let Some(row) = port_row(n_in, i) {
                self.grid.set_port(INPUT_COLUMN, row, Cell::input(signal));
            }
        }
        let n_out = level.outputs.len();
        for (i, expected) in level.output_signals().enumerate() {
            if let Some(row) = port_row(n_out, i) {
                self.grid.set_port(OUTPUT_COLUMN, row, Cell::output(expected));
            }
        }

        log::info!("Level {}: {}", index + 1, level.title);
        true
    }

    /// Start over from the first level with no score
    pub fn reset(&mut self) {
        self.score = 0;
        self.initials = InitialsEntry::default();
        self.load_level(0);
        log::info!("Session reset");
    }

    /// Definition of the level being played
    pub fn level(&self) -> Option<&'static Level> {
        levels::get(self.level_index)
    }

    /// True when no level follows the current one
    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= levels::count()
    }

    /// Component the player will place next
    pub fn selected_tool(&self) -> CellKind {
        CellKind::PLACEABLE[self.tool_index % CellKind::PLACEABLE.len()]
    }

    /// Cycle WIRE -> AND -> OR -> NOT -> WIRE
    pub fn cycle_tool(&mut self) {
        self.tool_index = (self.tool_index + 1) % CellKind::PLACEABLE.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_at(state: &GameState, x: usize, y: usize) -> Option<CellKind> {
        state.grid.get(x as i32, y as i32).map(|c| c.kind)
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert_eq!(state.level_index, 0);
        assert_eq!(state.attempts, MAX_ATTEMPTS);
        assert_eq!(state.phase, GamePhase::Editing);
        assert_eq!(state.selected_tool(), CellKind::Wire);
        assert_eq!(state.cursor, IVec2::new(2, 2));
        assert_eq!(state.grid.inputs().count(), 1);
        assert_eq!(state.grid.outputs().count(), 1);
    }

    #[test]
    fn test_load_level_places_ports() {
        let mut state = GameState::new();
        // Level 12: inputs [1, 1, 0, 1], outputs [1]
        assert!(state.load_level(11));

        let inputs: Vec<(IVec2, bool)> = state.grid.inputs().map(|(p, c)| (p, c.state)).collect();
        assert_eq!(
            inputs,
            vec![
                (IVec2::new(1, 3), true),
                (IVec2::new(1, 4), true),
                (IVec2::new(1, 5), false),
                (IVec2::new(1, 6), true),
            ]
        );
        let (pos, out) = state.grid.outputs().next().expect("one output");
        assert_eq!(pos, IVec2::new(OUTPUT_COLUMN as i32, 5));
        assert!(out.expected_output);
        assert!(!out.state);
    }

    #[test]
    fn test_load_level_resets_level_fields() {
        let mut state = GameState::new();
        state.grid.place(5, 5, CellKind::Wire);
        state.attempts = 1;
        state.level_complete = true;
        state.game_over = true;
        state.level_score = 300;
        state.score = 500;
        state.phase = GamePhase::Simulating;
        state.sim_ticks = 42;

        assert!(state.load_level(3));
        assert_eq!(state.attempts, MAX_ATTEMPTS);
        assert!(!state.level_complete);
        assert!(!state.game_over);
        assert_eq!(state.level_score, 0);
        assert_eq!(state.phase, GamePhase::Editing);
        assert_eq!(state.sim_ticks, 0);
        assert_eq!(kind_at(&state, 5, 5), Some(CellKind::Empty));
        // Total score survives a level load
        assert_eq!(state.score, 500);
    }

    #[test]
    fn test_load_level_out_of_range_is_noop() {
        let mut state = GameState::new();
        state.grid.place(6, 6, CellKind::Or);
        state.attempts = 2;
        let before = state.clone();

        assert!(!state.load_level(levels::count()));
        assert_eq!(state.grid, before.grid);
        assert_eq!(state.attempts, 2);
        assert_eq!(state.level_index, before.level_index);
    }

    #[test]
    fn test_tool_cycle_wraps() {
        let mut state = GameState::new();
        let seen: Vec<CellKind> = (0..5)
            .map(|_| {
                let tool = state.selected_tool();
                state.cycle_tool();
                tool
            })
            .collect();
        assert_eq!(
            seen,
            vec![CellKind::Wire, CellKind::And, CellKind::Or, CellKind::Not, CellKind::Wire]
        );
    }

    #[test]
    fn test_reset() {
        let mut state = GameState::new();
        state.load_level(4);
        state.score = 900;
        state.reset();
        assert_eq!(state.level_index, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.attempts, MAX_ATTEMPTS);
        assert_eq!(state.phase, GamePhase::Editing);
    }
}
