//! Common types shared by every component of the core.
//!
//! This module provides the fundamental building blocks used across the simulator:
//! 1. **Word and Address Types:** The 32-bit datapath word and word-granular memory addresses.
//! 2. **Tags:** Station indices carried on the result buses.
//! 3. **Memory Access:** Read/write operation codes and byte masks for the memory port.
//! 4. **Bit Fields:** Helpers for packed (flattened) signal vectors.
//! 5. **Error Handling:** Configuration and harness error types.

/// Word-granular memory address type.
pub mod addr;

/// Packed bit-field helpers for flattened signal vectors.
pub mod bits;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory operation and byte-mask definitions.
pub mod data;

/// Error types for configuration and simulator misuse.
pub mod error;

/// Station index (bus tag) type.
pub mod tag;

pub use addr::WordAddress;
pub use constants::WORD_BITS;
pub use data::{ByteMask, MemoryOperation};
pub use error::{ConfigError, SimError};
pub use tag::StationIndex;

/// A single datapath word.
pub type Word = u32;
