//! Station index (bus tag).
//!
//! Every producer that can broadcast on a result bus is identified by its
//! station index. Operand slots waiting on a value hold the index of the
//! producing station and compare it against each bus's `source` field.

use std::fmt;

/// Index of a station; doubles as the tag broadcast alongside a result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationIndex(pub usize);

impl StationIndex {
    /// Returns the raw index value.
    #[inline(always)]
    pub const fn val(&self) -> usize {
        self.0
    }
}

impl From<usize> for StationIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for StationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rs{}", self.0)
    }
}
