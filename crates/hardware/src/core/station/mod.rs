//! Reservation stations.
//!
//! A station holds one in-flight instruction: an operation and two operand
//! slots. Each slot either receives its value directly at allocation or waits
//! for the tag of the station that will produce it, capturing the value off a
//! result bus the cycle it is broadcast.
//!
//! 1. [`operand`]: the sticky two-mode operand slot.
//! 2. [`integer`]: the integer station pairing two slots with the ALU.

/// Operand slot with preload and bus-snooping modes.
pub mod operand;

/// Integer reservation station.
pub mod integer;

pub use integer::{IntegerStation, StationInputs, StationOutputs};
pub use operand::{OperandSlot, OperandSource, SlotInputs, SlotOutputs, SlotState};
