//! Operand slot tests.
//!
//! The sequences drive the slot with a level `occupied` line and check the
//! outputs after each rising edge.

use cdbsim_core::common::StationIndex;
use cdbsim_core::core::bus::BusSnapshot;
use cdbsim_core::core::station::{OperandSlot, OperandSource, SlotInputs, SlotOutputs, SlotState};
use cdbsim_core::core::traits::{Clocked, Combinational};

use crate::common::harness::{FlatBusDriver, bus_with, init_tracing, step};

fn inputs(occupied: bool, source: OperandSource, bus: &BusSnapshot) -> SlotInputs<'_> {
    SlotInputs {
        occupied,
        source,
        bus,
    }
}

#[test]
fn preload_then_bus_capture_sequence() {
    init_tracing();
    let mut slot = OperandSlot::new();
    let mut driver = FlatBusDriver::new(2, 2);
    let idle = driver.snapshot();

    slot.reset();
    let out = step(&mut slot, &inputs(false, OperandSource::Preloaded(0), &idle));
    assert!(!slot.occupied());
    assert!(!out.loaded);

    let out = step(&mut slot, &inputs(true, OperandSource::Preloaded(0xCAFEBABE), &idle));
    assert_eq!(
        out,
        SlotOutputs {
            loaded: true,
            value: 0xCAFEBABE
        }
    );

    let _ = step(&mut slot, &inputs(false, OperandSource::Preloaded(0), &idle));
    assert!(!slot.occupied());

    let waiting = OperandSource::AwaitingTag(StationIndex(2));
    let out = step(&mut slot, &inputs(true, waiting, &idle));
    assert!(!out.loaded);

    driver.assert_bus(1, 2, 0xFACEFEED);
    let hit = driver.snapshot();
    let out = step(&mut slot, &inputs(true, waiting, &hit));
    assert_eq!(
        out,
        SlotOutputs {
            loaded: true,
            value: 0xFACEFEED
        }
    );
}

#[test]
fn capture_survives_bus_release() {
    let mut slot = OperandSlot::new();
    let waiting = OperandSource::AwaitingTag(StationIndex(1));
    let _ = step(&mut slot, &inputs(true, waiting, &BusSnapshot::idle(2)));
    let _ = step(&mut slot, &inputs(true, waiting, &bus_with(2, &[(0, 1, 60)])));

    let out = step(&mut slot, &inputs(true, waiting, &BusSnapshot::idle(2)));
    assert_eq!(out.value, 60);
    assert!(out.loaded);
    assert_eq!(slot.state(), SlotState::Captured(60));
}

#[test]
fn later_broadcast_does_not_overwrite_capture() {
    let mut slot = OperandSlot::new();
    let waiting = OperandSource::AwaitingTag(StationIndex(1));
    let _ = step(&mut slot, &inputs(true, waiting, &bus_with(2, &[(0, 1, 60)])));
    let out = step(&mut slot, &inputs(true, waiting, &bus_with(2, &[(0, 1, 99)])));
    assert_eq!(out.value, 60);
}

#[test]
fn matching_broadcast_is_visible_before_the_edge() {
    let mut slot = OperandSlot::new();
    let waiting = OperandSource::AwaitingTag(StationIndex(3));
    let _ = step(&mut slot, &inputs(true, waiting, &BusSnapshot::idle(2)));

    let hit = bus_with(2, &[(1, 3, 42)]);
    let out = slot.evaluate(&inputs(true, waiting, &hit));
    assert_eq!(
        out,
        SlotOutputs {
            loaded: true,
            value: 42
        }
    );
    assert_eq!(slot.state(), SlotState::Watching(StationIndex(3)));
}

#[test]
fn lowest_bus_wins_on_duplicate_tag() {
    let mut slot = OperandSlot::new();
    let waiting = OperandSource::AwaitingTag(StationIndex(2));
    let both = bus_with(2, &[(0, 2, 111), (1, 2, 222)]);
    let out = step(&mut slot, &inputs(true, waiting, &both));
    assert_eq!(out.value, 111);
}

#[test]
fn unknown_tag_never_matches() {
    let mut slot = OperandSlot::new();
    let waiting = OperandSource::AwaitingTag(StationIndex(9));
    let out = step(&mut slot, &inputs(true, waiting, &bus_with(2, &[(0, 1, 5), (1, 3, 6)])));
    assert!(!out.loaded);
}

#[test]
fn source_change_while_occupied_is_ignored() {
    let mut slot = OperandSlot::new();
    let idle = BusSnapshot::idle(2);
    let _ = step(&mut slot, &inputs(true, OperandSource::Preloaded(7), &idle));
    let out = step(
        &mut slot,
        &inputs(true, OperandSource::AwaitingTag(StationIndex(0)), &idle),
    );
    assert_eq!(out.value, 7);
}

#[test]
fn release_clears_capture() {
    let mut slot = OperandSlot::new();
    let waiting = OperandSource::AwaitingTag(StationIndex(0));
    let _ = step(&mut slot, &inputs(true, waiting, &bus_with(1, &[(0, 0, 1)])));
    let _ = step(&mut slot, &inputs(false, waiting, &BusSnapshot::idle(1)));
    let out = step(&mut slot, &inputs(true, waiting, &BusSnapshot::idle(1)));
    assert!(!out.loaded);
}

#[test]
fn evaluation_is_idempotent() {
    let mut slot = OperandSlot::new();
    let waiting = OperandSource::AwaitingTag(StationIndex(1));
    let _ = step(&mut slot, &inputs(true, waiting, &BusSnapshot::idle(2)));
    let hit = bus_with(2, &[(0, 1, 9)]);
    let i = inputs(true, waiting, &hit);
    assert_eq!(slot.evaluate(&i), slot.evaluate(&i));
}
