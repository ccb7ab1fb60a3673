//! Configuration and simulator error definitions.
//!
//! The datapath itself has no runtime failure modes: out-of-range tags are
//! simply "no match" and arithmetic wraps. Errors only arise from:
//! 1. **Configuration:** Counts and index widths that cannot describe a valid core.
//! 2. **Harness Misuse:** Requests to the [`Simulator`](crate::sim::Simulator) that name
//!    stations or registers that do not exist, or stations that are still busy.

use thiserror::Error;

use super::tag::StationIndex;

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A count that must be at least one was zero.
    #[error("{name} must be at least 1")]
    ZeroCount {
        /// Name of the offending field.
        name: &'static str,
    },

    /// An index field is too narrow to address every element it must name.
    #[error("{name}: {bits} bits cannot index {count} elements")]
    IndexTooNarrow {
        /// Name of the offending field.
        name: &'static str,
        /// Configured width in bits.
        bits: u32,
        /// Number of elements that must be addressable.
        count: usize,
    },

    /// A width exceeds what the model supports.
    #[error("{name}: {bits} bits exceeds the supported maximum of {max}")]
    WidthTooLarge {
        /// Name of the offending field.
        name: &'static str,
        /// Configured width in bits.
        bits: u32,
        /// Largest accepted width.
        max: u32,
    },

    /// Write-back needs one register-file write port per result bus.
    #[error("register file has {write_ports} write ports but {bus_count} buses write back")]
    TooFewWritePorts {
        /// Configured write ports.
        write_ports: usize,
        /// Configured result buses.
        bus_count: usize,
    },

    /// The configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Misuse of the simulator's dispatch interface.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// The station index does not exist in this core.
    #[error("no such station {0}")]
    NoSuchStation(StationIndex),

    /// The station still holds an instruction that has not broadcast.
    #[error("station {0} is still occupied")]
    StationBusy(StationIndex),

    /// The register index does not exist in the register file.
    #[error("register index {index} out of range (file has {count} registers)")]
    NoSuchRegister {
        /// Requested register.
        index: usize,
        /// Registers in the file.
        count: usize,
    },
}
