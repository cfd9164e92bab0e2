//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-driven only
//! - Fixed propagation pass count
//! - Stable iteration order (column-major)
//! - No rendering or platform dependencies

pub mod circuit;
pub mod grid;
pub mod state;
pub mod tick;

pub use circuit::{Inputs, Verdict, check_win, gather_inputs, simulate};
pub use grid::{Cell, CellKind, Grid, IgnoreReason, Placement};
pub use state::{GamePhase, GameState};
pub use tick::{
    InitialsEdit, advance, confirm_initials, edit_initials, move_cursor, place_component,
    place_component_at, restart, select_next_tool, tick, toggle_simulation,
};
