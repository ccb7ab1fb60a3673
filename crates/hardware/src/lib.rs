//! Tag-broadcast execution core simulator library.
//!
//! This crate implements a cycle-accurate model of the dynamic-scheduling core of
//! a Tomasulo-style processor with the following:
//! 1. **Core:** Result buses with a fixed-priority arbiter, reservation stations whose
//!    operand slots snoop the buses for their producer's tag, a 32-bit integer ALU,
//!    and a multi-ported register file.
//! 2. **Memory:** A shared memory port with a combinational or registered arbiter and
//!    a reference word memory.
//! 3. **Simulation:** A whole-core cycle loop with a dispatch interface, configuration,
//!    and statistics collection.
//!
//! Every component separates combinational evaluation from the clock edge (see
//! [`core::traits`](crate::core::traits)); within a cycle all components read one immutable
//! [`BusSnapshot`](crate::core::bus::BusSnapshot) before any state is committed.
//!
//! # Examples
//!
//! ```
//! use cdbsim_core::core::units::alu::AluOp;
//! use cdbsim_core::common::StationIndex;
//! use cdbsim_core::{Config, Simulator, SourceOperand};
//!
//! let mut sim = Simulator::new(&Config::default()).unwrap();
//! // r1 = 2 + 3; r2 = r1 << 4
//! sim.dispatch(StationIndex(0), AluOp::Add, SourceOperand::Value(2), SourceOperand::Value(3), Some(1))
//!     .unwrap();
//! sim.dispatch(
//!     StationIndex(1),
//!     AluOp::Sll,
//!     SourceOperand::Tag(StationIndex(0)),
//!     SourceOperand::Value(4),
//!     Some(2),
//! )
//! .unwrap();
//! let cycles = sim.run_until_idle(16);
//! assert_eq!(cycles, 3);
//! assert_eq!(sim.register_file().read(1), 5);
//! assert_eq!(sim.register_file().read(2), 80);
//! ```

/// Common types and constants (words, addresses, tags, bit fields, errors).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Execution core (buses, arbiters, stations, ALU, register file).
pub mod core;
/// Whole-core simulator and dispatch interface.
pub mod sim;
/// Shared memory port (arbiter, memory trait, reference memory).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or [`Config::from_json`].
pub use crate::config::Config;
/// Whole-core simulator; construct with `Simulator::new`.
pub use crate::sim::{Simulator, SourceOperand};
/// Memory arbiter plus external memory; construct with `MemorySystem::new`.
pub use crate::soc::MemorySystem;
