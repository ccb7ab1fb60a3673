//! Components outside the execution core.
//!
//! Currently this is the shared memory port: the arbiter that multiplexes
//! accessors onto it and the external memory behind it.

/// Memory arbiter, memory port trait, and reference memory model.
pub mod memory;

pub use memory::MemorySystem;
