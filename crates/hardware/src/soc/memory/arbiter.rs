//! Memory port arbiter.
//!
//! Several accessors share a single memory port. The arbiter picks one owner,
//! forwards the owner's request lines to the port, and routes the memory's
//! response back to the owner alone. Two policies are supported (see
//! [`ArbitrationMode`]):
//! 1. **Combinational:** The lowest-indexed enabled accessor owns the port,
//!    re-decided every cycle from the current `enable` lines.
//! 2. **Registered:** Ownership is a register. The owner keeps the port until it
//!    drops `enable`, which releases the port on that edge. A new owner is only
//!    chosen on an edge where the memory is not signalling `ready`, so a
//!    completing transaction is never handed to a different accessor.

use tracing::debug;

use crate::common::{ByteMask, MemoryOperation, Word, WordAddress};
use crate::config::{ArbitrationMode, MemoryConfig};
use crate::core::arbiter::{Requester, select_lowest};
use crate::core::traits::{Clocked, Combinational};

/// Request lines driven by an accessor, and by the arbiter onto the port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryRequest {
    /// A transaction is requested.
    pub enable: bool,
    /// Read or write.
    pub operation: MemoryOperation,
    /// Byte lanes written.
    pub byte_mask: ByteMask,
    /// Target word.
    pub word_address: WordAddress,
    /// Data written.
    pub data_out: Word,
}

impl MemoryRequest {
    /// A full-word read of `word_address`.
    pub const fn read(word_address: WordAddress) -> Self {
        Self {
            enable: true,
            operation: MemoryOperation::Read,
            byte_mask: ByteMask::FULL,
            word_address,
            data_out: 0,
        }
    }

    /// A write of `data_out` to the lanes of `word_address` selected by `byte_mask`.
    pub const fn write(word_address: WordAddress, byte_mask: ByteMask, data_out: Word) -> Self {
        Self {
            enable: true,
            operation: MemoryOperation::Write,
            byte_mask,
            word_address,
            data_out,
        }
    }
}

impl Requester for MemoryRequest {
    fn requesting(&self) -> bool {
        self.enable
    }
}

/// Response lines from the memory, and from the arbiter to an accessor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryResponse {
    /// The transaction has completed.
    pub ready: bool,
    /// Read data.
    pub data_in: Word,
}

/// Inputs sampled by the memory arbiter.
#[derive(Clone, Copy, Debug)]
pub struct MemoryArbiterInputs<'a> {
    /// One request per accessor.
    pub accessors: &'a [MemoryRequest],
    /// Current response of the external memory.
    pub memory: MemoryResponse,
}

/// Outputs of the memory arbiter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryArbiterOutputs {
    /// Lines driven onto the memory port.
    pub port: MemoryRequest,
    /// Accessor owning the port this cycle.
    pub granted: Option<usize>,
    /// Per accessor: the memory's response for the owner, idle for everyone else.
    pub responses: Vec<MemoryResponse>,
}

/// Arbiter for the shared memory port.
#[derive(Clone, Debug)]
pub struct MemoryArbiter {
    accessor_count: usize,
    word_address_bits: u32,
    mode: ArbitrationMode,
    owner: Option<usize>,
}

impl MemoryArbiter {
    /// Creates an arbiter sized by `config`, with no owner.
    pub const fn new(config: &MemoryConfig) -> Self {
        Self {
            accessor_count: config.accessor_count,
            word_address_bits: config.word_address_bits,
            mode: config.arbitration,
            owner: None,
        }
    }

    /// Grant policy in effect.
    pub const fn mode(&self) -> ArbitrationMode {
        self.mode
    }

    /// Registered owner; always `None` in combinational mode.
    pub const fn owner(&self) -> Option<usize> {
        self.owner
    }

    fn accessors<'a>(&self, inputs: &MemoryArbiterInputs<'a>) -> &'a [MemoryRequest] {
        &inputs.accessors[..inputs.accessors.len().min(self.accessor_count)]
    }

    fn lowest_enabled(accessors: &[MemoryRequest]) -> Option<usize> {
        select_lowest(accessors, 1).first().copied()
    }
}

impl Combinational for MemoryArbiter {
    type Inputs<'a> = MemoryArbiterInputs<'a>;
    type Outputs = MemoryArbiterOutputs;

    fn evaluate(&self, inputs: &MemoryArbiterInputs<'_>) -> MemoryArbiterOutputs {
        let accessors = self.accessors(inputs);
        let granted = match self.mode {
            ArbitrationMode::Combinational => Self::lowest_enabled(accessors),
            ArbitrationMode::Registered => self.owner,
        };

        let mut responses = vec![MemoryResponse::default(); self.accessor_count];
        let port = match granted.and_then(|i| accessors.get(i).map(|req| (i, req))) {
            Some((i, req)) => {
                responses[i] = inputs.memory;
                MemoryRequest {
                    word_address: req.word_address.truncate(self.word_address_bits),
                    ..*req
                }
            }
            None => MemoryRequest::default(),
        };

        MemoryArbiterOutputs {
            port,
            granted,
            responses,
        }
    }
}

impl Clocked for MemoryArbiter {
    fn clock(&mut self, inputs: &MemoryArbiterInputs<'_>) {
        if self.mode == ArbitrationMode::Combinational {
            return;
        }
        let accessors = self.accessors(inputs);
        match self.owner {
            Some(owner) if !accessors.get(owner).is_some_and(|a| a.enable) => {
                debug!(accessor = owner, "memory port released");
                self.owner = None;
            }
            None if !inputs.memory.ready => {
                self.owner = Self::lowest_enabled(accessors);
                if let Some(owner) = self.owner {
                    debug!(accessor = owner, "memory port granted");
                }
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.owner = None;
    }
}
