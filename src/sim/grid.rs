//! Grid store
//!
//! A dense `GRID_WIDTH` x `GRID_HEIGHT` array of cells, indexed `[x][y]`.
//! Coordinates come in as signed integers so callers can pass raw cursor
//! math; anything off the grid is reported and ignored.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::in_bounds;

/// Component occupying a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    Empty,
    Wire,
    And,
    Or,
    Not,
    /// Fixed signal source placed by the level
    Input,
    /// Fixed signal sink placed by the level, checked against its expected value
    Output,
}

impl CellKind {
    /// Kinds the player can place with a tool
    pub const PLACEABLE: [CellKind; 4] = [CellKind::Wire, CellKind::And, CellKind::Or, CellKind::Not];

    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Empty => "EMPTY",
            CellKind::Wire => "WIRE",
            CellKind::And => "AND",
            CellKind::Or => "OR",
            CellKind::Not => "NOT",
            CellKind::Input => "INPUT",
            CellKind::Output => "OUTPUT",
        }
    }

    /// True for the level-owned INPUT/OUTPUT kinds
    pub fn is_port(&self) -> bool {
        matches!(self, CellKind::Input | CellKind::Output)
    }

    /// True for kinds a tool can put down
    pub fn is_placeable(&self) -> bool {
        Self::PLACEABLE.contains(self)
    }
}

/// One grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    /// Current signal. Fixed for inputs, recomputed by the simulator otherwise.
    pub state: bool,
    /// Target signal (outputs only)
    pub expected_output: bool,
}

impl Cell {
    pub fn input(state: bool) -> Self {
        Self {
            kind: CellKind::Input,
            state,
            expected_output: false,
        }
    }

    pub fn output(expected: bool) -> Self {
        Self {
            kind: CellKind::Output,
            state: false,
            expected_output: expected,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        self.kind == CellKind::Input
    }

    #[inline]
    pub fn is_output(&self) -> bool {
        self.kind == CellKind::Output
    }
}

/// Why an edit had no effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Coordinates outside the grid
    OutOfBounds,
    /// Target is an INPUT or OUTPUT cell
    FixedCell,
    /// Kind cannot be placed by the player
    NotPlaceable,
    /// Edits are not accepted in the current game phase
    WrongPhase,
}

/// Result of a placement request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Cell now holds this kind
    Placed(CellKind),
    /// Same kind was already there, cell is empty again
    Cleared,
    Ignored(IgnoreReason),
}

impl Placement {
    pub fn applied(&self) -> bool {
        !matches!(self, Placement::Ignored(_))
    }
}

/// The circuit board
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; GRID_HEIGHT]; GRID_WIDTH],
}

impl Grid {
    /// Create an all-empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every cell to empty with no signal
    pub fn initialize(&mut self) {
        for column in &mut self.cells {
            column.fill(Cell::default());
        }
    }

    /// Cell at (x, y), `None` when off the grid
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if !in_bounds(IVec2::new(x, y)) {
            return None;
        }
        Some(&self.cells[x as usize][y as usize])
    }

    pub(crate) fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        if !in_bounds(IVec2::new(x, y)) {
            return None;
        }
        Some(&mut self.cells[x as usize][y as usize])
    }

    /// Place `kind` at (x, y), or clear the cell if it already holds `kind`.
    ///
    /// Port cells and off-grid coordinates are left untouched.
    pub fn place(&mut self, x: i32, y: i32, kind: CellKind) -> Placement {
        if !kind.is_placeable() {
            return Placement::Ignored(IgnoreReason::NotPlaceable);
        }
        let Some(cell) = self.get_mut(x, y) else {
            return Placement::Ignored(IgnoreReason::OutOfBounds);
        };
        if cell.kind.is_port() {
            return Placement::Ignored(IgnoreReason::FixedCell);
        }

        cell.state = false;
        if cell.kind == kind {
            cell.kind = CellKind::Empty;
            Placement::Cleared
        } else {
            cell.kind = kind;
            Placement::Placed(kind)
        }
    }

    /// Overwrite a cell with a level port. Later ports win on collision.
    pub(crate) fn set_port(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        match self.get_mut(x as i32, y as i32) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// All cells with their coordinates, x outer, y inner
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(y, cell)| (IVec2::new(x as i32, y as i32), cell))
        })
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut().flatten()
    }

    /// OUTPUT cells in scan order
    pub fn outputs(&self) -> impl Iterator<Item = (IVec2, &Cell)> {
        self.iter().filter(|(_, c)| c.is_output())
    }

    /// INPUT cells in scan order
    pub fn inputs(&self) -> impl Iterator<Item = (IVec2, &Cell)> {
        self.iter().filter(|(_, c)| c.is_input())
    }

    /// Number of player-placed components
    pub fn component_count(&self) -> usize {
        self.iter().filter(|(_, c)| c.kind.is_placeable()).count()
    }
}
