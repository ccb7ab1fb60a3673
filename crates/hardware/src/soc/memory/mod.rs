//! Shared memory port.
//!
//! This module implements the path from a set of accessors to one external memory:
//! 1. **Arbiter:** Chooses the accessor that owns the port and routes the response back.
//! 2. **Port:** The [`MemoryPort`] seam and the bundled [`WordMemory`] model.
//! 3. **System:** [`MemorySystem`] wires the two together for cycle-by-cycle stepping.

/// Memory port arbiter and request/response lines.
pub mod arbiter;

/// External memory trait and reference word memory.
pub mod port;

pub use self::arbiter::{
    MemoryArbiter, MemoryArbiterInputs, MemoryArbiterOutputs, MemoryRequest, MemoryResponse,
};
pub use self::port::{MemoryPort, WordMemory};

use crate::config::MemoryConfig;
use crate::core::traits::{Clocked, Combinational};
use crate::stats::SimStats;

/// Memory arbiter and external memory stepped together.
#[derive(Debug)]
pub struct MemorySystem<M: MemoryPort = WordMemory> {
    arbiter: MemoryArbiter,
    memory: M,
    last_granted: Option<usize>,
    /// Accessor whose request the memory saw at the last edge.
    responder: Option<usize>,
    /// Port activity counters (`memory_*` fields and `cycles`).
    pub stats: SimStats,
}

impl MemorySystem<WordMemory> {
    /// Creates a system backed by a zeroed [`WordMemory`] of `config.size_words` words.
    pub fn new(config: &MemoryConfig) -> Self {
        Self::with_memory(config, WordMemory::new(config.size_words))
    }
}

impl<M: MemoryPort> MemorySystem<M> {
    /// Creates a system backed by `memory`.
    pub fn with_memory(config: &MemoryConfig, memory: M) -> Self {
        Self {
            arbiter: MemoryArbiter::new(config),
            memory,
            last_granted: None,
            responder: None,
            stats: SimStats::default(),
        }
    }

    /// The arbiter.
    pub const fn arbiter(&self) -> &MemoryArbiter {
        &self.arbiter
    }

    /// The external memory.
    pub const fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable access to the external memory, for preloading contents.
    pub const fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Evaluates the port for the current cycle without advancing the clock.
    pub fn evaluate(&self, accessors: &[MemoryRequest]) -> MemoryArbiterOutputs {
        let outputs = self.arbiter.evaluate(&MemoryArbiterInputs {
            accessors,
            memory: self.memory.response(),
        });
        self.route_response(outputs)
    }

    /// The memory answers the request it registered at the last edge, so the
    /// owner only sees it if it also owned the port then.
    fn route_response(&self, mut outputs: MemoryArbiterOutputs) -> MemoryArbiterOutputs {
        let stale = outputs.granted.filter(|&owner| self.responder != Some(owner));
        if let Some(response) = stale.and_then(|owner| outputs.responses.get_mut(owner)) {
            *response = MemoryResponse::default();
        }
        outputs
    }

    /// Runs one cycle: evaluates the arbiter against the memory's current
    /// response, then clocks the memory with the forwarded request and the
    /// arbiter with the same inputs.
    ///
    /// A response reaches the owner only when that accessor also owned the
    /// port at the previous edge; after a hand-over the new owner sees an
    /// idle response until its own request has been answered.
    ///
    /// # Returns
    ///
    /// The outputs observed during the cycle, before the edge.
    pub fn tick(&mut self, accessors: &[MemoryRequest]) -> MemoryArbiterOutputs {
        let inputs = MemoryArbiterInputs {
            accessors,
            memory: self.memory.response(),
        };
        let outputs = self.route_response(self.arbiter.evaluate(&inputs));
        self.memory.clock(&outputs.port);
        self.arbiter.clock(&inputs);
        self.responder = outputs.granted.filter(|_| outputs.port.enable);

        self.stats.cycles += 1;
        if outputs.granted.is_some() && outputs.granted != self.last_granted {
            self.stats.memory_grants += 1;
        }
        let waiting = accessors
            .iter()
            .enumerate()
            .filter(|&(i, a)| a.enable && outputs.granted != Some(i))
            .count();
        self.stats.memory_stalls += waiting as u64;
        self.last_granted = outputs.granted;
        outputs
    }

    /// Resets the arbiter and the memory's response. Memory contents are kept.
    pub fn reset(&mut self) {
        self.arbiter.reset();
        self.memory.reset();
        self.last_granted = None;
        self.responder = None;
    }
}
