//! Built-in level catalog
//!
//! Twelve puzzles, ordered from a single wire up to a four-input circuit.
//! The catalog is fixed at compile time.

use crate::consts::*;

/// One puzzle definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    /// Input bits, top to bottom
    pub inputs: &'static [u8],
    /// Expected output bits, top to bottom
    pub outputs: &'static [u8],
    pub title: &'static str,
    pub objective: &'static str,
    pub explanation: &'static str,
    pub tip: &'static str,
    /// Base points for solving
    pub points: u64,
}

impl Level {
    /// Input bits as signals
    pub fn input_signals(&self) -> impl Iterator<Item = bool> + '_ {
        self.inputs.iter().map(|&b| b == 1)
    }

    /// Expected output bits as signals
    pub fn output_signals(&self) -> impl Iterator<Item = bool> + '_ {
        self.outputs.iter().map(|&b| b == 1)
    }
}

/// Row of the `index`-th port in a column of `count` ports, centered on the
/// grid's middle row. `None` if the list is too long to fit.
pub fn port_row(count: usize, index: usize) -> Option<usize> {
    let row = (GRID_HEIGHT / 2 + index).checked_sub(count / 2)?;
    (row < GRID_HEIGHT).then_some(row)
}

/// All levels in play order
pub static LEVELS: [Level; 12] = [
    Level {
        inputs: &[1],
        outputs: &[1],
        title: "Your First Connection!",
        objective: "Connect the green light (INPUT) to the red light (OUTPUT) with a WIRE",
        explanation: "WIRES carry electricity from one place to another, like a hose for electricity.",
        tip: "Move with the joystick, press A to lay wire, and START to test your circuit",
        points: 100,
    },
    Level {
        inputs: &[1, 0],
        outputs: &[1],
        title: "Pick the Right Light!",
        objective: "Only connect the light that is ON (green) to the OUTPUT",
        explanation: "Some lights are off (grey). Only connect the ones that are on.",
        tip: "Look closely: which light is on? That is the one to connect!",
        points: 150,
    },
    Level {
        inputs: &[1, 1],
        outputs: &[1],
        title: "The Magic AND Gate",
        objective: "Connect BOTH lights to an AND gate, then the AND to the OUTPUT",
        explanation: "AND is a strict guard: power only gets through if BOTH lights are on.",
        tip: "First bring both INPUTs into the AND gate, then run the AND to the OUTPUT",
        points: 200,
    },
    Level {
        inputs: &[1, 0],
        outputs: &[1],
        title: "The Friendly OR Gate",
        objective: "Connect both lights to an OR gate, then to the OUTPUT",
        explanation: "OR is a friendly guard: power gets through if AT LEAST ONE light is on.",
        tip: "OR lights up if any of its inputs is on. Perfect for this level!",
        points: 250,
    },
    Level {
        inputs: &[0],
        outputs: &[1],
        title: "The Rebel NOT Gate!",
        objective: "Use a NOT gate to turn the dark light into a lit one",
        explanation: "NOT is a rebel: give it light and it goes dark, give it darkness and it lights up.",
        tip: "Connect the dark (grey) light to the NOT, and the NOT to the OUTPUT",
        points: 300,
    },
    Level {
        inputs: &[1, 1],
        outputs: &[0],
        title: "The NAND Challenge",
        objective: "Combine AND + NOT to build a NAND gate",
        explanation: "NAND means NOT AND: the lights go through AND first, then through NOT.",
        tip: "Both INPUTs into AND, AND into NOT, and finally NOT into the OUTPUT",
        points: 400,
    },
    Level {
        inputs: &[1, 0],
        outputs: &[0],
        title: "The NOR Trick",
        objective: "Combine OR + NOT to build a NOR gate",
        explanation: "NOR means NOT OR: it only lights up when ALL inputs are off.",
        tip: "Both INPUTs into OR, OR into NOT, and finally NOT into the OUTPUT",
        points: 500,
    },
    Level {
        inputs: &[1, 0],
        outputs: &[1],
        title: "The XOR Mystery",
        objective: "Build an XOR gate out of AND, OR and NOT",
        explanation: "XOR (exclusive OR) lights up only when its inputs are DIFFERENT.",
        tip: "Hint: XOR = (A AND (NOT B)) OR ((NOT A) AND B). It's a puzzle!",
        points: 600,
    },
    Level {
        inputs: &[1, 1, 0],
        outputs: &[1],
        title: "Triple OR Connection",
        objective: "Connect THREE inputs using OR gates",
        explanation: "Two ORs in a row: the first takes two lights, the second takes that OR plus the third light.",
        tip: "Think in cascade: OR1 gets 2 lights, OR2 gets OR1 + the third light",
        points: 700,
    },
    Level {
        inputs: &[1, 1, 1],
        outputs: &[1],
        title: "Triple AND Connection",
        objective: "Connect THREE inputs using AND gates",
        explanation: "Chain two ANDs so all three lights must be on for power to get through.",
        tip: "AND1 gets 2 lights, AND2 gets AND1 + the third light. All must be green!",
        points: 800,
    },
    Level {
        inputs: &[1, 0, 1],
        outputs: &[0],
        title: "The Great Challenge",
        objective: "Build a circuit that lights up only when EXACTLY 2 of the 3 lights are on",
        explanation: "The final challenge! Detect exactly two lit inputs with AND, OR and NOT.",
        tip: "Hint: build A AND B, A AND C, B AND C and join them with OR",
        points: 900,
    },
    Level {
        inputs: &[1, 1, 0, 1],
        outputs: &[1],
        title: "Circuit Master!",
        objective: "Design a complex circuit with 4 inputs",
        explanation: "Almost an expert! With 4 lights, light the output when at least 2 are on.",
        tip: "Combine everything you've learned. AND, OR, NOT... the sky's the limit!",
        points: 1000,
    },
];

/// Look up a level by index
pub fn get(index: usize) -> Option<&'static Level> {
    LEVELS.get(index)
}

/// Number of levels in the catalog
pub fn count() -> usize {
    LEVELS.len()
}

/// Base points for a level, falling back to the default for unknown indices
pub fn points_for(index: usize) -> u64 {
    get(index).map(|l| l.points).unwrap_or(DEFAULT_LEVEL_POINTS)
}
