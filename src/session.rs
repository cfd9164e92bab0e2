//! Play session controller
//!
//! `Session` owns the game state, the leaderboard and the settings for one
//! player. A presentation layer drives it with actions and `tick()` and
//! reads everything back through the snapshot accessors.

use std::path::Path;

use glam::IVec2;

use crate::highscores::{self, HighScores, ScoreBoard};
use crate::levels::Level;
use crate::persistence::PersistError;
use crate::settings::Settings;
use crate::sim::{self, CellKind, GamePhase, GameState, Grid, InitialsEdit, Placement, Verdict};

/// Discrete player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveCursor(IVec2),
    Place,
    NextTool,
    ToggleSimulation,
    /// Continue after a solved level
    Advance,
    /// Leave the game-over or leaderboard screen
    Restart,
    Initials(InitialsEdit),
    ConfirmInitials,
}

/// Read-only view of the scoring fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub level_index: usize,
    pub score: u64,
    pub level_score: u64,
    pub attempts: u8,
    pub level_complete: bool,
    pub game_over: bool,
}

/// One play session
#[derive(Debug, Clone)]
pub struct Session<B: ScoreBoard = HighScores> {
    state: GameState,
    board: B,
    settings: Settings,
}

impl<B: ScoreBoard> Session<B> {
    /// Start a session on the first level
    pub fn new(settings: Settings, board: B) -> Self {
        Self {
            state: GameState::new(),
            board,
            settings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn cursor(&self) -> IVec2 {
        self.state.cursor
    }

    pub fn selected_tool(&self) -> CellKind {
        self.state.selected_tool()
    }

    pub fn level(&self) -> Option<&'static Level> {
        self.state.level()
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Initials typed so far (meaningful while entering initials)
    pub fn initials(&self) -> String {
        self.state.initials.as_string()
    }

    pub fn progress(&self) -> Progress {
        let s = &self.state;
        Progress {
            level_index: s.level_index,
            score: s.score,
            level_score: s.level_score,
            attempts: s.attempts,
            level_complete: s.level_complete,
            game_over: s.game_over,
        }
    }

    pub fn place_component(&mut self) -> Placement {
        sim::place_component(&mut self.state)
    }

    pub fn place_component_at(&mut self, x: i32, y: i32) -> Placement {
        sim::place_component_at(&mut self.state, x, y)
    }

    pub fn select_next_tool(&mut self) -> bool {
        sim::select_next_tool(&mut self.state)
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) -> bool {
        sim::move_cursor(&mut self.state, IVec2::new(dx, dy))
    }

    pub fn toggle_simulation(&mut self) -> bool {
        sim::toggle_simulation(&mut self.state)
    }

    /// Advance one time unit at the configured evaluation cadence
    pub fn tick(&mut self) -> Option<Verdict> {
        sim::tick(&mut self.state, self.settings.eval_interval())
    }

    /// Tick until the running simulation is judged. `None` if the clock
    /// isn't running.
    pub fn run_until_evaluated(&mut self) -> Option<Verdict> {
        if self.state.phase != GamePhase::Simulating {
            return None;
        }
        (0..self.settings.eval_interval()).find_map(|_| self.tick())
    }

    pub fn load_level(&mut self, index: usize) -> bool {
        self.state.load_level(index)
    }

    /// Back to level 0 with no score, from any phase
    pub fn reset_session(&mut self) {
        self.state.reset();
    }

    pub fn advance(&mut self) -> bool {
        sim::advance(&mut self.state, &self.board)
    }

    pub fn restart(&mut self) -> bool {
        sim::restart(&mut self.state, &self.board)
    }

    pub fn edit_initials(&mut self, edit: InitialsEdit) -> bool {
        sim::edit_initials(&mut self.state, edit)
    }

    /// Record the typed initials with the given date
    pub fn confirm_initials(&mut self, date: &str) -> Option<usize> {
        sim::confirm_initials(&mut self.state, &mut self.board, date)
    }

    /// Apply one player input. Returns false when it had no effect.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::MoveCursor(delta) => sim::move_cursor(&mut self.state, delta),
            Action::Place => self.place_component().applied(),
            Action::NextTool => self.select_next_tool(),
            Action::ToggleSimulation => self.toggle_simulation(),
            Action::Advance => self.advance(),
            Action::Restart => self.restart(),
            Action::Initials(edit) => self.edit_initials(edit),
            Action::ConfirmInitials => {
                if self.state.phase != GamePhase::EnteringInitials {
                    return false;
                }
                self.confirm_initials(&highscores::today());
                true
            }
        }
    }
}

impl Session<HighScores> {
    /// Start a session with the leaderboard stored at `settings.high_scores_file`
    pub fn open(settings: Settings) -> Self {
        let board = HighScores::load(&settings.high_scores_file);
        Self::new(settings, board)
    }

    /// Write the leaderboard back to `settings.high_scores_file`
    pub fn save_scores(&self) -> Result<(), PersistError> {
        self.save_scores_to(&self.settings.high_scores_file)
    }

    pub fn save_scores_to(&self, path: &Path) -> Result<(), PersistError> {
        self.board.save(path)
    }
}
