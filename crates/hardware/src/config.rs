//! Configuration system for the core simulator.
//!
//! This module defines all configuration structures used to size the core. It provides:
//! 1. **Defaults:** The baseline core (four stations, two result buses, two memory
//!    accessors, a four-entry register file with two read and two write ports).
//! 2. **Structures:** Hierarchical config for general, bus, memory, and register-file settings.
//! 3. **Enums:** Memory arbitration mode.
//! 4. **Validation:** Consistency checks between counts and index widths.
//!
//! Configuration is supplied as JSON via [`Config::from_json`], or use `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{
    MAX_REGISTER_INDEX_BITS, MAX_STATION_INDEX_BITS, MAX_WORD_ADDRESS_BITS,
};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Number of stations that may request a result bus.
    pub const STATION_COUNT: usize = 4;

    /// Width of the station index carried on each bus's `source` field.
    pub const STATION_INDEX_BITS: u32 = 2;

    /// Number of result buses broadcast per cycle.
    pub const BUS_COUNT: usize = 2;

    /// Number of accessors contending for the memory port.
    pub const ACCESSOR_COUNT: usize = 2;

    /// Width of the memory port's word address (32-bit byte space, word granular).
    pub const WORD_ADDRESS_BITS: u32 = 30;

    /// Size of the bundled word memory model, in words.
    pub const MEMORY_SIZE_WORDS: usize = 1024;

    /// Width of a register index (four registers).
    pub const REGISTER_INDEX_BITS: u32 = 2;

    /// Register file read ports.
    pub const READ_PORTS: usize = 2;

    /// Register file write ports.
    pub const WRITE_PORTS: usize = 2;
}

/// How the memory arbiter decides ownership of the port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ArbitrationMode {
    /// The lowest-indexed enabled accessor owns the port, re-evaluated every cycle
    /// from the current enable lines.
    #[default]
    Combinational,
    /// The grant is registered: the owner keeps the port until it drops `enable`,
    /// and a new owner is only chosen on a clock edge while the memory is not
    /// signalling `ready`.
    Registered,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use cdbsim_core::config::{ArbitrationMode, Config};
///
/// let json = r#"{
///     "bus": { "station_count": 8, "station_index_bits": 3, "bus_count": 3 },
///     "memory": { "arbitration": "Registered" },
///     "register_file": { "index_bits": 5, "write_ports": 3 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.bus.station_count, 8);
/// assert_eq!(config.memory.arbitration, ArbitrationMode::Registered);
/// assert_eq!(config.register_file.register_count(), 32);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Result bus and station sizing
    #[serde(default)]
    pub bus: BusConfig,
    /// Memory port sizing and arbitration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Register file sizing
    #[serde(default)]
    pub register_file: RegisterFileConfig,
}

impl Config {
    /// Parses a JSON configuration and validates it.
    ///
    /// Missing sections and fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown enum values,
    /// and any error reported by [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every count is non-zero and every index width can name
    /// every element it has to.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bus.validate()?;
        self.memory.validate()?;
        self.register_file.validate()?;
        if self.register_file.write_ports < self.bus.bus_count {
            return Err(ConfigError::TooFewWritePorts {
                write_ports: self.register_file.write_ports,
                bus_count: self.bus.bus_count,
            });
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a per-cycle summary of grants and captures at `debug` level.
    #[serde(default)]
    pub trace: bool,
}

/// Result bus and requesting station configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BusConfig {
    /// Number of stations that may request a bus
    #[serde(default = "BusConfig::default_station_count")]
    pub station_count: usize,

    /// Width of the station index (bus tag) in bits
    #[serde(default = "BusConfig::default_station_index_bits")]
    pub station_index_bits: u32,

    /// Number of result buses
    #[serde(default = "BusConfig::default_bus_count")]
    pub bus_count: usize,
}

impl BusConfig {
    fn default_station_count() -> usize {
        defaults::STATION_COUNT
    }

    fn default_station_index_bits() -> u32 {
        defaults::STATION_INDEX_BITS
    }

    fn default_bus_count() -> usize {
        defaults::BUS_COUNT
    }

    fn validate(&self) -> Result<(), ConfigError> {
        nonzero("bus.station_count", self.station_count)?;
        nonzero("bus.bus_count", self.bus_count)?;
        width_fits(
            "bus.station_index_bits",
            self.station_index_bits,
            MAX_STATION_INDEX_BITS,
            self.station_count,
        )
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            station_count: defaults::STATION_COUNT,
            station_index_bits: defaults::STATION_INDEX_BITS,
            bus_count: defaults::BUS_COUNT,
        }
    }
}

/// Shared memory port configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Number of accessors contending for the port
    #[serde(default = "MemoryConfig::default_accessor_count")]
    pub accessor_count: usize,

    /// Width of the port's word address in bits
    #[serde(default = "MemoryConfig::default_word_address_bits")]
    pub word_address_bits: u32,

    /// Grant policy
    #[serde(default)]
    pub arbitration: ArbitrationMode,

    /// Size of the bundled word memory model, in words
    #[serde(default = "MemoryConfig::default_size_words")]
    pub size_words: usize,
}

impl MemoryConfig {
    fn default_accessor_count() -> usize {
        defaults::ACCESSOR_COUNT
    }

    fn default_word_address_bits() -> u32 {
        defaults::WORD_ADDRESS_BITS
    }

    fn default_size_words() -> usize {
        defaults::MEMORY_SIZE_WORDS
    }

    fn validate(&self) -> Result<(), ConfigError> {
        nonzero("memory.accessor_count", self.accessor_count)?;
        nonzero("memory.size_words", self.size_words)?;
        nonzero("memory.word_address_bits", self.word_address_bits as usize)?;
        if self.word_address_bits > MAX_WORD_ADDRESS_BITS {
            return Err(ConfigError::WidthTooLarge {
                name: "memory.word_address_bits",
                bits: self.word_address_bits,
                max: MAX_WORD_ADDRESS_BITS,
            });
        }
        Ok(())
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            accessor_count: defaults::ACCESSOR_COUNT,
            word_address_bits: defaults::WORD_ADDRESS_BITS,
            arbitration: ArbitrationMode::default(),
            size_words: defaults::MEMORY_SIZE_WORDS,
        }
    }
}

/// Register file configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterFileConfig {
    /// Width of a register index; the file holds `2^index_bits` registers
    #[serde(default = "RegisterFileConfig::default_index_bits")]
    pub index_bits: u32,

    /// Independent combinational read ports
    #[serde(default = "RegisterFileConfig::default_read_ports")]
    pub read_ports: usize,

    /// Independent write ports; lower index wins on conflict
    #[serde(default = "RegisterFileConfig::default_write_ports")]
    pub write_ports: usize,
}

impl RegisterFileConfig {
    fn default_index_bits() -> u32 {
        defaults::REGISTER_INDEX_BITS
    }

    fn default_read_ports() -> usize {
        defaults::READ_PORTS
    }

    fn default_write_ports() -> usize {
        defaults::WRITE_PORTS
    }

    /// Number of registers addressed by `index_bits`.
    pub const fn register_count(&self) -> usize {
        1 << self.index_bits
    }

    fn validate(&self) -> Result<(), ConfigError> {
        nonzero("register_file.read_ports", self.read_ports)?;
        nonzero("register_file.write_ports", self.write_ports)?;
        if self.index_bits > MAX_REGISTER_INDEX_BITS {
            return Err(ConfigError::WidthTooLarge {
                name: "register_file.index_bits",
                bits: self.index_bits,
                max: MAX_REGISTER_INDEX_BITS,
            });
        }
        Ok(())
    }
}

impl Default for RegisterFileConfig {
    fn default() -> Self {
        Self {
            index_bits: defaults::REGISTER_INDEX_BITS,
            read_ports: defaults::READ_PORTS,
            write_ports: defaults::WRITE_PORTS,
        }
    }
}

fn nonzero(name: &'static str, count: usize) -> Result<(), ConfigError> {
    if count == 0 {
        Err(ConfigError::ZeroCount { name })
    } else {
        Ok(())
    }
}

fn width_fits(name: &'static str, bits: u32, max: u32, count: usize) -> Result<(), ConfigError> {
    if bits > max {
        return Err(ConfigError::WidthTooLarge { name, bits, max });
    }
    if (count - 1) >> bits != 0 {
        return Err(ConfigError::IndexTooNarrow { name, bits, count });
    }
    Ok(())
}
