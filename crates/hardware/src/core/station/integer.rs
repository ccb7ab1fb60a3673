//! Integer reservation station.
//!
//! Holds an [`AluOp`] and two [`OperandSlot`]s. The station is allocated by a
//! `set_occupied` pulse and released by a `reset_occupied` pulse; while occupied
//! it reports `result_ready` as soon as both slots are loaded, with the ALU
//! result computed combinationally from the loaded values.
//!
//! Next-state occupancy is `set || (occupied && !reset)`: when both pulses
//! arrive in the same cycle the station stays occupied. Operation and operand
//! sources are only latched on the unoccupied-to-occupied transition, so an
//! occupied station that sees both pulses keeps its current instruction.

use tracing::debug;

use super::operand::{OperandSlot, OperandSource, SlotInputs};
use crate::common::{StationIndex, Word};
use crate::core::bus::BusSnapshot;
use crate::core::traits::{Clocked, Combinational};
use crate::core::units::alu::{Alu, AluOp};

/// Inputs sampled by an integer station.
#[derive(Clone, Copy, Debug)]
pub struct StationInputs<'a> {
    /// Allocation pulse.
    pub set_occupied: bool,
    /// Release pulse.
    pub reset_occupied: bool,
    /// Operation latched at allocation.
    pub operation: AluOp,
    /// Source of operand `a`, latched at allocation.
    pub a: OperandSource,
    /// Source of operand `b`, latched at allocation.
    pub b: OperandSource,
    /// This cycle's broadcasts.
    pub bus: &'a BusSnapshot,
}

impl<'a> StationInputs<'a> {
    /// Inputs with no pulses, observing `bus`.
    pub fn idle(bus: &'a BusSnapshot) -> Self {
        Self {
            set_occupied: false,
            reset_occupied: false,
            operation: AluOp::default(),
            a: OperandSource::default(),
            b: OperandSource::default(),
            bus,
        }
    }

    /// Inputs that allocate the station with `operation` on `a` and `b`.
    pub fn allocate(
        operation: AluOp,
        a: OperandSource,
        b: OperandSource,
        bus: &'a BusSnapshot,
    ) -> Self {
        Self {
            set_occupied: true,
            operation,
            a,
            b,
            ..Self::idle(bus)
        }
    }

    /// Inputs that release the station.
    pub fn release(bus: &'a BusSnapshot) -> Self {
        Self {
            reset_occupied: true,
            ..Self::idle(bus)
        }
    }

    /// Drives the pulses from a level `occupied` line: high holds or allocates
    /// the station, low releases it.
    pub const fn with_level(mut self, occupied: bool) -> Self {
        self.set_occupied = occupied;
        self.reset_occupied = !occupied;
        self
    }
}

/// Outputs of an integer station.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StationOutputs {
    /// Registered occupancy.
    pub occupied: bool,
    /// Both operands loaded; `result` is valid.
    pub result_ready: bool,
    /// ALU result; `0` while not ready.
    pub result: Word,
}

/// An integer reservation station.
#[derive(Clone, Debug, Default)]
pub struct IntegerStation {
    index: StationIndex,
    occupied: bool,
    operation: AluOp,
    a: OperandSlot,
    b: OperandSlot,
}

impl IntegerStation {
    /// Creates an unoccupied station. `index` is only used for logging.
    pub fn new(index: StationIndex) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Registered occupancy.
    pub const fn occupied(&self) -> bool {
        self.occupied
    }

    /// Operation latched at allocation.
    pub const fn operation(&self) -> AluOp {
        self.operation
    }

    /// Operand slot `a`.
    pub const fn a(&self) -> &OperandSlot {
        &self.a
    }

    /// Operand slot `b`.
    pub const fn b(&self) -> &OperandSlot {
        &self.b
    }

    const fn slot_inputs<'a>(
        &self,
        source: OperandSource,
        bus: &'a BusSnapshot,
    ) -> SlotInputs<'a> {
        SlotInputs {
            occupied: self.occupied,
            source,
            bus,
        }
    }
}

impl Combinational for IntegerStation {
    type Inputs<'a> = StationInputs<'a>;
    type Outputs = StationOutputs;

    fn evaluate(&self, inputs: &StationInputs<'_>) -> StationOutputs {
        let a = self.a.evaluate(&self.slot_inputs(inputs.a, inputs.bus));
        let b = self.b.evaluate(&self.slot_inputs(inputs.b, inputs.bus));
        let result_ready = self.occupied && a.loaded && b.loaded;
        StationOutputs {
            occupied: self.occupied,
            result_ready,
            result: if result_ready {
                Alu::execute(self.operation, a.value, b.value)
            } else {
                0
            },
        }
    }
}

impl Clocked for IntegerStation {
    fn clock(&mut self, inputs: &StationInputs<'_>) {
        let next = inputs.set_occupied || (self.occupied && !inputs.reset_occupied);
        match (self.occupied, next) {
            (false, true) => {
                self.operation = inputs.operation;
                debug!(station = %self.index, op = %inputs.operation, "allocated");
            }
            (true, false) => debug!(station = %self.index, "released"),
            _ => {}
        }
        self.occupied = next;
        let a = self.slot_inputs(inputs.a, inputs.bus);
        let b = self.slot_inputs(inputs.b, inputs.bus);
        self.a.clock(&a);
        self.b.clock(&b);
    }

    fn reset(&mut self) {
        self.occupied = false;
        self.operation = AluOp::default();
        self.a.reset();
        self.b.reset();
    }
}
