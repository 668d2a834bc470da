//! Spin circuit model for the qreel slot engine.
//!
//! The circuit topology is fixed by the game: one two-state unit per reel,
//! an identical `ry(theta)` bias rotation on each, an optional `cx` chain
//! that correlates the reels, and a full measurement in the computational
//! basis. What varies per request is only the bias angle and the
//! entanglement flag, so the model is a parameter struct that renders its
//! instruction list rather than a general gate graph.
//!
//! Bitstring convention throughout the workspace: the rightmost bit
//! corresponds to qubit 0 (OpenQASM 3 ordering).

mod circuit;
mod qasm;

pub use circuit::{Instruction, NUM_REELS, SpinCircuit};
pub use qasm::emit;
