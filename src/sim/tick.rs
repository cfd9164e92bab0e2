//! Fixed timestep simulation tick and player actions
//!
//! Every function here is total over (phase, action): an action that makes
//! no sense in the current phase changes nothing and reports that.

use glam::IVec2;

use super::circuit::{Verdict, check_win, simulate};
use super::grid::{IgnoreReason, Placement};
use super::state::{GamePhase, GameState};
use crate::clamp_to_grid;
use crate::consts::*;
use crate::highscores::ScoreBoard;
use crate::levels;

/// Advance the game state by one tick.
///
/// While simulating, every `eval_interval` ticks the circuit is simulated
/// and judged; the verdict is returned for that tick.
pub fn tick(state: &mut GameState, eval_interval: u32) -> Option<Verdict> {
    state.time_ticks += 1;

    if state.phase != GamePhase::Simulating {
        return None;
    }

    state.sim_ticks += 1;
    if state.sim_ticks % eval_interval.max(1) != 0 {
        return None;
    }

    simulate(&mut state.grid);
    let verdict = check_win(&state.grid);
    state.last_verdict = Some(verdict);
    log::debug!("Level {} evaluated: {:?}", state.level_index + 1, verdict);

    match verdict {
        Verdict::Pass if !state.level_complete => complete_level(state),
        Verdict::Pass => {}
        Verdict::Fail => fail_attempt(state),
    }

    Some(verdict)
}

fn complete_level(state: &mut GameState) {
    let bonus = u64::from(state.attempts.saturating_sub(1)) * ATTEMPT_BONUS;
    state.level_score = levels::points_for(state.level_index) + bonus;
    state.score += state.level_score;
    state.attempts = MAX_ATTEMPTS;
    state.level_complete = true;
    state.phase = GamePhase::LevelComplete;
    log::info!(
        "Level {} complete: +{} (total {})",
        state.level_index + 1,
        state.level_score,
        state.score
    );
}

fn fail_attempt(state: &mut GameState) {
    state.attempts = state.attempts.saturating_sub(1);
    if state.attempts == 0 {
        state.game_over = true;
        state.phase = GamePhase::GameOver;
        log::info!("Game over on level {} with {} points", state.level_index + 1, state.score);
    } else {
        state.phase = GamePhase::Editing;
        log::debug!("Wrong output, {} attempts left", state.attempts);
    }
}

/// Start or stop the simulation clock. Returns false outside Editing/Simulating.
pub fn toggle_simulation(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Editing => {
            state.phase = GamePhase::Simulating;
            state.sim_ticks = 0;
            true
        }
        GamePhase::Simulating => {
            state.phase = GamePhase::Editing;
            true
        }
        _ => false,
    }
}

/// Place the selected tool at (x, y)
pub fn place_component_at(state: &mut GameState, x: i32, y: i32) -> Placement {
    if !state.phase.accepts_edits() {
        return Placement::Ignored(IgnoreReason::WrongPhase);
    }
    let tool = state.selected_tool();
    let result = state.grid.place(x, y, tool);
    if let Placement::Ignored(reason) = result {
        log::debug!("Placement of {} at ({}, {}) ignored: {:?}", tool.as_str(), x, y, reason);
    }
    result
}

/// Place the selected tool under the cursor
pub fn place_component(state: &mut GameState) -> Placement {
    let IVec2 { x, y } = state.cursor;
    place_component_at(state, x, y)
}

/// Cycle to the next tool
pub fn select_next_tool(state: &mut GameState) -> bool {
    if !state.phase.accepts_edits() {
        return false;
    }
    state.cycle_tool();
    true
}

/// Move the cursor by `delta`, clamped to the grid
pub fn move_cursor(state: &mut GameState, delta: IVec2) -> bool {
    if !state.phase.accepts_edits() {
        return false;
    }
    state.cursor = clamp_to_grid(state.cursor + delta);
    true
}

/// Leave a solved level: load the next one, or finish the session after
/// the last.
pub fn advance(state: &mut GameState, board: &impl ScoreBoard) -> bool {
    if state.phase != GamePhase::LevelComplete {
        return false;
    }
    if state.is_last_level() {
        log::info!("All levels solved with {} points", state.score);
        finish_session(state, board);
        true
    } else {
        state.load_level(state.level_index + 1)
    }
}

/// Restart after game over or from the leaderboard screen
pub fn restart(state: &mut GameState, board: &impl ScoreBoard) -> bool {
    match state.phase {
        GamePhase::GameOver => {
            if board.qualifies(state.score) {
                begin_initials(state);
            } else {
                state.reset();
            }
            true
        }
        GamePhase::ShowingHighScores => {
            state.reset();
            true
        }
        _ => false,
    }
}

fn finish_session(state: &mut GameState, board: &impl ScoreBoard) {
    if board.qualifies(state.score) {
        begin_initials(state);
    } else {
        state.phase = GamePhase::ShowingHighScores;
    }
}

fn begin_initials(state: &mut GameState) {
    state.initials = Default::default();
    state.phase = GamePhase::EnteringInitials;
}

/// Letter/slot edits while entering initials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialsEdit {
    NextLetter,
    PrevLetter,
    Left,
    Right,
}

/// Edit the initials being entered
pub fn edit_initials(state: &mut GameState, edit: InitialsEdit) -> bool {
    if state.phase != GamePhase::EnteringInitials {
        return false;
    }
    let entry = &mut state.initials;
    match edit {
        InitialsEdit::NextLetter => entry.next_letter(),
        InitialsEdit::PrevLetter => entry.prev_letter(),
        InitialsEdit::Left => entry.move_left(),
        InitialsEdit::Right => entry.move_right(),
    }
    true
}

/// Record the entered initials with the session score and show the board.
///
/// Returns the rank achieved, or None if nothing was recorded.
pub fn confirm_initials(
    state: &mut GameState,
    board: &mut impl ScoreBoard,
    date: &str,
) -> Option<usize> {
    if state.phase != GamePhase::EnteringInitials {
        return None;
    }
    let rank = board.record(&state.initials.as_string(), state.score, date);
    state.phase = GamePhase::ShowingHighScores;
    rank
}
