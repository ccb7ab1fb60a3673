//! Component Evaluation Interfaces.
//!
//! Every block of the core is modelled as synchronous hardware. This module defines
//! the two traits all blocks implement:
//! 1. **Combinational:** Outputs are a pure function of current state and inputs.
//!    Evaluating twice without a clock edge yields identical outputs.
//! 2. **Clocked:** A single state update per rising edge, plus synchronous reset.
//!
//! Within a cycle the caller evaluates every component against the same inputs
//! (in particular the same [`BusSnapshot`](crate::core::bus::BusSnapshot)) before
//! clocking any of them, so no evaluation observes partially-updated state.

/// A block whose outputs are derived combinationally from its state and inputs.
pub trait Combinational {
    /// Input signals sampled during evaluation.
    type Inputs<'a>: ?Sized;

    /// Output signals.
    type Outputs;

    /// Computes the outputs for the current state and `inputs`.
    ///
    /// Must not mutate any state.
    fn evaluate(&self, inputs: &Self::Inputs<'_>) -> Self::Outputs;
}

/// A block holding state that advances on a clock edge.
pub trait Clocked: Combinational {
    /// Applies exactly one state update using `inputs` as sampled at the edge.
    fn clock(&mut self, inputs: &Self::Inputs<'_>);

    /// Synchronously returns the block to its power-on state.
    fn reset(&mut self);
}
