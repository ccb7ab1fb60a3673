//! Operand slot.
//!
//! The slot's lifetime follows its station's `occupied` line:
//! 1. **Unoccupied:** The slot is empty and reports nothing loaded.
//! 2. **Allocation:** On the first occupied cycle the slot takes one of two modes
//!    from its inputs: preloaded with a value, or awaiting a producer's tag.
//! 3. **Snooping:** An awaiting slot compares its tag against every bus. The cycle a
//!    matching broadcast is seen, `loaded` goes high with that value.
//! 4. **Sticky:** Once loaded the value is held until the station is released,
//!    regardless of later bus traffic or input changes.
//!
//! The mode is fixed at allocation; changing `source` or the preload inputs while
//! occupied has no effect.

use tracing::debug;

use crate::common::{StationIndex, Word};
use crate::core::bus::BusSnapshot;
use crate::core::traits::{Clocked, Combinational};

/// Where an operand's value comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSource {
    /// The value is known at dispatch.
    Preloaded(Word),
    /// The value will be broadcast by the named station.
    AwaitingTag(StationIndex),
}

impl OperandSource {
    /// Builds a source from the raw `preload_requested`, `preloaded_value`, and
    /// `source_index` lines.
    pub const fn from_lines(preload: bool, value: Word, source: StationIndex) -> Self {
        if preload {
            Self::Preloaded(value)
        } else {
            Self::AwaitingTag(source)
        }
    }
}

impl Default for OperandSource {
    fn default() -> Self {
        Self::AwaitingTag(StationIndex(0))
    }
}

/// Registered state of an operand slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotState {
    /// Station not occupied.
    #[default]
    Empty,
    /// Loaded at allocation from the preload inputs.
    Preloaded(Word),
    /// Waiting for a broadcast from this station.
    Watching(StationIndex),
    /// Loaded from a broadcast.
    Captured(Word),
}

impl SlotState {
    /// The held value, if loaded.
    pub const fn value(self) -> Option<Word> {
        match self {
            Self::Preloaded(v) | Self::Captured(v) => Some(v),
            Self::Empty | Self::Watching(_) => None,
        }
    }
}

/// Inputs sampled by an operand slot.
#[derive(Clone, Copy, Debug)]
pub struct SlotInputs<'a> {
    /// The owning station holds an instruction.
    pub occupied: bool,
    /// Value source used at allocation.
    pub source: OperandSource,
    /// This cycle's broadcasts.
    pub bus: &'a BusSnapshot,
}

/// Outputs of an operand slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotOutputs {
    /// A value is available.
    pub loaded: bool,
    /// The value; `0` while not loaded.
    pub value: Word,
}

impl SlotOutputs {
    const fn from_value(value: Option<Word>) -> Self {
        match value {
            Some(value) => Self {
                loaded: true,
                value,
            },
            None => Self {
                loaded: false,
                value: 0,
            },
        }
    }
}

/// One operand of a reservation station.
#[derive(Clone, Debug, Default)]
pub struct OperandSlot {
    state: SlotState,
}

impl OperandSlot {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            state: SlotState::Empty,
        }
    }

    /// Current registered state.
    pub const fn state(&self) -> SlotState {
        self.state
    }

    /// Whether the slot has been allocated.
    pub fn occupied(&self) -> bool {
        self.state != SlotState::Empty
    }

    /// Value the slot resolves to against `inputs`, before the edge.
    fn resolve(&self, inputs: &SlotInputs<'_>) -> Option<Word> {
        match self.state {
            SlotState::Preloaded(v) | SlotState::Captured(v) => Some(v),
            SlotState::Watching(tag) => inputs.bus.lookup(tag),
            SlotState::Empty => match inputs.source {
                OperandSource::Preloaded(v) => Some(v),
                OperandSource::AwaitingTag(tag) => inputs.bus.lookup(tag),
            },
        }
    }
}

impl Combinational for OperandSlot {
    type Inputs<'a> = SlotInputs<'a>;
    type Outputs = SlotOutputs;

    fn evaluate(&self, inputs: &SlotInputs<'_>) -> SlotOutputs {
        if !inputs.occupied {
            return SlotOutputs::default();
        }
        SlotOutputs::from_value(self.resolve(inputs))
    }
}

impl Clocked for OperandSlot {
    fn clock(&mut self, inputs: &SlotInputs<'_>) {
        if !inputs.occupied {
            self.state = SlotState::Empty;
            return;
        }
        let next = match (self.state, self.resolve(inputs)) {
            (SlotState::Empty, _) => match inputs.source {
                OperandSource::Preloaded(v) => SlotState::Preloaded(v),
                OperandSource::AwaitingTag(tag) => inputs
                    .bus
                    .lookup(tag)
                    .map_or(SlotState::Watching(tag), SlotState::Captured),
            },
            (SlotState::Watching(tag), Some(v)) => {
                debug!(%tag, value = v, "operand captured");
                SlotState::Captured(v)
            }
            (state, _) => state,
        };
        self.state = next;
    }

    fn reset(&mut self) {
        self.state = SlotState::Empty;
    }
}
