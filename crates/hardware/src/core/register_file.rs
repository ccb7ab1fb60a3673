//! Multi-ported register file.
//!
//! This module implements the architectural register file written back from the
//! result buses. It provides:
//! 1. **Storage:** `2^index_bits` 32-bit registers, all zero after reset.
//! 2. **Write Ports:** Independent `(enable, index, data)` ports committed on the
//!    clock edge. When several enabled ports target the same register, the
//!    lowest-indexed port wins and the others are dropped.
//! 3. **Read Ports:** Combinational reads that observe the writes of the same
//!    cycle (write-through forwarding).
//!
//! Indices wider than the configured width are truncated to `index_bits`, the
//! same as an index bus that is only that many wires wide.

use tracing::debug;

use crate::common::Word;
use crate::config::RegisterFileConfig;
use crate::core::traits::{Clocked, Combinational};

/// One write port's lines for a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WritePort {
    /// The port writes this cycle.
    pub enable: bool,
    /// Target register.
    pub index: usize,
    /// Value written.
    pub data: Word,
}

impl WritePort {
    /// An enabled write of `data` to `index`.
    pub const fn write(index: usize, data: Word) -> Self {
        Self {
            enable: true,
            index,
            data,
        }
    }
}

/// Inputs sampled by the register file.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegisterFileInputs<'a> {
    /// Register index presented on each read port.
    pub read_index: &'a [usize],
    /// Lines of each write port.
    pub writes: &'a [WritePort],
}

/// The set of writes that land in one cycle after conflict resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedWrites {
    /// `(register, value)` pairs, at most one per register.
    pub landed: Vec<(usize, Word)>,
    /// Enabled writes dropped because a lower port targeted the same register.
    pub dropped: usize,
}

/// Register file with configurable port counts.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    regs: Vec<Word>,
    index_mask: usize,
    read_ports: usize,
    write_ports: usize,
}

impl RegisterFile {
    /// Creates a zeroed register file sized by `config`.
    pub fn new(config: &RegisterFileConfig) -> Self {
        let count = config.register_count();
        Self {
            regs: vec![0; count],
            index_mask: count - 1,
            read_ports: config.read_ports,
            write_ports: config.write_ports,
        }
    }

    /// Number of registers.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Always false; a register file holds at least one register.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Number of read ports.
    pub const fn read_ports(&self) -> usize {
        self.read_ports
    }

    /// Number of write ports.
    pub const fn write_ports(&self) -> usize {
        self.write_ports
    }

    /// Reads the committed value of a register, bypassing the ports.
    pub fn read(&self, index: usize) -> Word {
        self.regs[index & self.index_mask]
    }

    /// Writes a register directly, bypassing the ports. Intended for harness setup.
    pub fn write(&mut self, index: usize, value: Word) {
        let index = index & self.index_mask;
        self.regs[index] = value;
    }

    /// Committed contents of every register.
    pub fn registers(&self) -> &[Word] {
        &self.regs
    }

    /// Applies lowest-port-wins conflict resolution to `writes`.
    ///
    /// Ports beyond the configured write-port count are ignored.
    pub fn resolve_writes(&self, writes: &[WritePort]) -> ResolvedWrites {
        let mut resolved = ResolvedWrites::default();
        for (port, w) in writes.iter().take(self.write_ports).enumerate() {
            if !w.enable {
                continue;
            }
            let index = w.index & self.index_mask;
            if resolved.landed.iter().any(|&(r, _)| r == index) {
                debug!(port, register = index, "write port conflict, dropped");
                resolved.dropped += 1;
            } else {
                resolved.landed.push((index, w.data));
            }
        }
        resolved
    }
}

impl Combinational for RegisterFile {
    type Inputs<'a> = RegisterFileInputs<'a>;
    /// Value on each read port, in port order.
    type Outputs = Vec<Word>;

    fn evaluate(&self, inputs: &RegisterFileInputs<'_>) -> Vec<Word> {
        let resolved = self.resolve_writes(inputs.writes);
        inputs
            .read_index
            .iter()
            .take(self.read_ports)
            .map(|&index| {
                let index = index & self.index_mask;
                resolved
                    .landed
                    .iter()
                    .find(|&&(r, _)| r == index)
                    .map_or(self.regs[index], |&(_, v)| v)
            })
            .collect()
    }
}

impl Clocked for RegisterFile {
    fn clock(&mut self, inputs: &RegisterFileInputs<'_>) {
        for (index, value) in self.resolve_writes(inputs.writes).landed {
            self.regs[index] = value;
        }
    }

    fn reset(&mut self) {
        self.regs.fill(0);
    }
}
