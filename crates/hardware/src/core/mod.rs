//! Core execution datapath.
//!
//! This module contains the tag-broadcast execution core: the result buses and
//! their arbiter, the reservation stations that snoop them, the integer ALU,
//! and the register file the broadcasts are written back to.

/// Shared fixed-priority selection routine.
pub mod arbiter;

/// Result buses, per-cycle bus snapshots, and the bus arbiter.
pub mod bus;

/// Multi-ported register file.
pub mod register_file;

/// Operand slots and reservation stations.
pub mod station;

/// Combinational / clocked component traits.
pub mod traits;

/// Execution units (ALU).
pub mod units;

pub use self::bus::{Bus, BusArbiter, BusSnapshot, StationRequest};
pub use self::register_file::{RegisterFile, WritePort};
pub use self::station::{IntegerStation, OperandSlot};
pub use self::traits::{Clocked, Combinational};
