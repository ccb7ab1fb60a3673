//! External memory behind the shared port.
//!
//! [`MemoryPort`] is the seam between the arbiter and whatever sits on the other
//! side of the port. Its response is registered: it depends only on requests
//! seen at earlier clock edges, never combinationally on the current request.
//!
//! [`WordMemory`] is the bundled reference model: a flat array of words that
//! answers every request on the edge after it is first presented.

use tracing::trace;

use super::arbiter::{MemoryRequest, MemoryResponse};
use crate::common::{MemoryOperation, Word, WordAddress};

/// A memory attached to the port.
pub trait MemoryPort: Send + Sync {
    /// Response lines for the current cycle.
    fn response(&self) -> MemoryResponse;

    /// Samples the port's request lines on a clock edge.
    fn clock(&mut self, request: &MemoryRequest);

    /// Clears any in-flight response. Contents are kept.
    fn reset(&mut self);
}

/// Word-addressed memory with single-cycle latency.
///
/// While `enable` is held, the request is performed on every edge and `ready`
/// stays high; writes only touch the lanes selected by the byte mask. Addresses
/// wrap modulo the memory size.
#[derive(Clone, Debug)]
pub struct WordMemory {
    words: Vec<Word>,
    response: MemoryResponse,
}

impl WordMemory {
    /// Creates a zeroed memory of `size_words` words (at least one).
    pub fn new(size_words: usize) -> Self {
        Self {
            words: vec![0; size_words.max(1)],
            response: MemoryResponse::default(),
        }
    }

    /// Size in words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; the memory holds at least one word.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn slot(&self, addr: WordAddress) -> usize {
        addr.val() as usize % self.words.len()
    }

    /// Reads a word directly, bypassing the port.
    pub fn peek(&self, addr: WordAddress) -> Word {
        self.words[self.slot(addr)]
    }

    /// Copies `data` into consecutive words starting at `base`, bypassing the port.
    pub fn load(&mut self, base: WordAddress, data: &[Word]) {
        for (offset, &word) in data.iter().enumerate() {
            let slot = (self.slot(base) + offset) % self.words.len();
            self.words[slot] = word;
        }
    }
}

impl MemoryPort for WordMemory {
    fn response(&self) -> MemoryResponse {
        self.response
    }

    fn clock(&mut self, request: &MemoryRequest) {
        if !request.enable {
            self.response = MemoryResponse::default();
            return;
        }
        let slot = self.slot(request.word_address);
        let data_in = match request.operation {
            MemoryOperation::Read => self.words[slot],
            MemoryOperation::Write => {
                self.words[slot] = request.byte_mask.merge(self.words[slot], request.data_out);
                0
            }
        };
        trace!(
            addr = %request.word_address,
            op = ?request.operation,
            data = self.words[slot],
            "memory access"
        );
        self.response = MemoryResponse {
            ready: true,
            data_in,
        };
    }

    fn reset(&mut self) {
        self.response = MemoryResponse::default();
    }
}
