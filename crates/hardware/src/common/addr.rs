//! Word Address type.
//!
//! The memory port is word-addressed: byte lanes inside a word are selected by
//! a byte mask, never by the low address bits. This module provides:
//! 1. **Type Safety:** Keeps word addresses apart from data words and indices.
//! 2. **Width Truncation:** Narrowing to the configured address width, as the port wires do.

/// A word-granular address on the shared memory port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordAddress(pub u32);

impl WordAddress {
    /// Creates a new word address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(&self) -> u32 {
        self.0
    }

    /// Truncates the address to `bits` bits.
    ///
    /// # Arguments
    ///
    /// * `bits` - Address width of the port (1-32).
    ///
    /// # Returns
    ///
    /// The address with every bit above `bits` cleared.
    pub const fn truncate(self, bits: u32) -> Self {
        if bits >= 32 {
            self
        } else {
            Self(self.0 & ((1 << bits) - 1))
        }
    }
}

impl std::fmt::Display for WordAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
