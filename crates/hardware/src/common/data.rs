//! Memory Access Types.
//!
//! This module defines the request fields an accessor drives onto the shared
//! memory port:
//! 1. **Operation:** Whether the access reads or writes.
//! 2. **Byte Mask:** Which byte lanes of the addressed word participate.

use super::constants::{BYTES_PER_WORD, FULL_BYTE_MASK};

/// Operation driven on the memory port.
///
/// The discriminants match the encoding on the port's `operation` wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MemoryOperation {
    /// Read the addressed word.
    #[default]
    Read = 0,
    /// Write the enabled byte lanes of the addressed word.
    Write = 1,
}

/// Byte-lane enable mask; bit `i` selects byte lane `i` (lane 0 is the least
/// significant byte).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByteMask(pub u8);

impl ByteMask {
    /// Every lane enabled.
    pub const FULL: Self = Self(FULL_BYTE_MASK);

    /// Returns the raw mask with bits above the lane count cleared.
    #[inline(always)]
    pub const fn val(&self) -> u8 {
        self.0 & FULL_BYTE_MASK
    }

    /// Expands the mask into a 32-bit word mask (`0xFF` per enabled lane).
    pub const fn word_mask(&self) -> u32 {
        let mut mask = 0u32;
        let mut lane = 0;
        while lane < BYTES_PER_WORD {
            if self.0 & (1 << lane) != 0 {
                mask |= 0xFF << (lane * 8);
            }
            lane += 1;
        }
        mask
    }

    /// Merges `data` into `old` on the enabled lanes only.
    pub const fn merge(&self, old: u32, data: u32) -> u32 {
        let mask = self.word_mask();
        (old & !mask) | (data & mask)
    }
}
