//! Whole-core simulation.
//!
//! Wires the stations, bus arbiter, and register file into a single clocked
//! model with a dispatch interface for driving instructions into it.

/// Cycle loop and dispatch interface.
pub mod simulator;

pub use simulator::{Simulator, SourceOperand};
