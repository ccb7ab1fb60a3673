//! Global Core Constants.
//!
//! This module defines constants shared by the datapath and the harness. It includes:
//! 1. **Datapath Constants:** Word width, shift-amount mask, and byte lanes per word.
//! 2. **Sizing Limits:** Upper bounds accepted by the configuration validator.

/// Width of a datapath word in bits.
pub const WORD_BITS: u32 = 32;

/// Number of byte lanes in a datapath word.
pub const BYTES_PER_WORD: usize = (WORD_BITS / 8) as usize;

/// Mask applied to operand `b` to form a shift amount (5 bits: 0-31).
pub const SHAMT_MASK: u32 = WORD_BITS - 1;

/// Mask covering every byte lane of a word.
pub const FULL_BYTE_MASK: u8 = (1 << BYTES_PER_WORD) - 1;

/// Largest supported register index width in bits (64Ki registers).
pub const MAX_REGISTER_INDEX_BITS: u32 = 16;

/// Largest supported station index width in bits.
pub const MAX_STATION_INDEX_BITS: u32 = 16;

/// Largest supported word address width in bits.
pub const MAX_WORD_ADDRESS_BITS: u32 = WORD_BITS;
