//! Memory port tests.
//!
//! The arbiter is exercised directly with hand-driven `memory_ready` /
//! `memory_data_in` lines, and end to end through [`MemorySystem`].

use cdbsim_core::MemorySystem;
use cdbsim_core::common::{ByteMask, MemoryOperation, WordAddress};
use cdbsim_core::config::{ArbitrationMode, MemoryConfig};
use cdbsim_core::core::traits::{Clocked, Combinational};
use cdbsim_core::soc::memory::{
    MemoryArbiter, MemoryArbiterInputs, MemoryArbiterOutputs, MemoryPort, MemoryRequest,
    MemoryResponse, WordMemory,
};
use pretty_assertions::assert_eq;

use crate::common::harness::{init_tracing, step};

const ADDR: WordAddress = WordAddress(0xAFEBABE);

fn config(arbitration: ArbitrationMode) -> MemoryConfig {
    MemoryConfig {
        arbitration,
        ..MemoryConfig::default()
    }
}

/// Accessor 0's read and accessor 1's write, with independent enables.
struct Accessors([MemoryRequest; 2]);

impl Accessors {
    fn new() -> Self {
        Self([
            MemoryRequest {
                enable: false,
                ..MemoryRequest::read(ADDR)
            },
            MemoryRequest {
                enable: false,
                ..MemoryRequest::write(ADDR, ByteMask(0b0101), 0xFACEFEED)
            },
        ])
    }

    fn enable(&mut self, accessor: usize, enable: bool) -> &mut Self {
        self.0[accessor].enable = enable;
        self
    }
}

fn with_read_mask(mut accessors: Accessors) -> Accessors {
    accessors.0[0].byte_mask = ByteMask(0b1010);
    accessors
}

fn drive<'a>(accessors: &'a Accessors, ready: bool, data_in: u32) -> MemoryArbiterInputs<'a> {
    MemoryArbiterInputs {
        accessors: &accessors.0,
        memory: MemoryResponse { ready, data_in },
    }
}

fn assert_forwarded(out: &MemoryArbiterOutputs, expected: &MemoryRequest) {
    assert_eq!(&out.port, expected);
}

#[test]
fn registered_grant_sequence() {
    init_tracing();
    let mut arb = MemoryArbiter::new(&config(ArbitrationMode::Registered));
    let mut acc = with_read_mask(Accessors::new());
    arb.reset();
    let out = step(&mut arb, &drive(&acc, false, 0));
    assert!(!out.port.enable);

    // read uncontested
    let _ = acc.enable(0, true);
    let out = step(&mut arb, &drive(&acc, false, 0));
    assert_forwarded(&out, &acc.0[0]);
    assert_eq!(out.port.operation, MemoryOperation::Read);

    let out = step(&mut arb, &drive(&acc, true, 0xFACEFEED));
    assert!(out.port.enable);
    assert_eq!(out.responses[0].data_in, 0xFACEFEED);
    assert_eq!(out.responses[1], MemoryResponse::default());

    let _ = acc.enable(0, false);
    let out = step(&mut arb, &drive(&acc, true, 0xFACEFEED));
    assert!(!out.port.enable);
    let _ = step(&mut arb, &drive(&acc, false, 0));

    // write uncontested
    let _ = acc.enable(1, true);
    let out = step(&mut arb, &drive(&acc, false, 0));
    assert_forwarded(&out, &acc.0[1]);
    let out = step(&mut arb, &drive(&acc, true, 0));
    assert!(out.port.enable);
    let _ = acc.enable(1, false);
    let out = step(&mut arb, &drive(&acc, true, 0));
    assert!(!out.port.enable);
    let _ = step(&mut arb, &drive(&acc, false, 0));

    // read & write contested: accessor 0 first
    let _ = acc.enable(0, true).enable(1, true);
    let out = step(&mut arb, &drive(&acc, false, 0));
    assert_forwarded(&out, &acc.0[0]);
    assert_eq!(out.granted, Some(0));

    let out = step(&mut arb, &drive(&acc, true, 0xFACEFEED));
    assert_eq!(out.responses[0].data_in, 0xFACEFEED);
    assert!(!out.responses[1].ready);

    // releasing on a ready edge does not hand the port straight over
    let _ = acc.enable(0, false);
    let out = step(&mut arb, &drive(&acc, true, 0xFACEFEED));
    assert!(!out.port.enable);

    let _ = step(&mut arb, &drive(&acc, false, 0));
    let _ = step(&mut arb, &drive(&acc, false, 0));
    let out = step(&mut arb, &drive(&acc, false, 0));
    assert_forwarded(&out, &acc.0[1]);
    assert_eq!(out.port.data_out, 0xFACEFEED);
    assert_eq!(out.port.byte_mask, ByteMask(0b0101));

    let out = step(&mut arb, &drive(&acc, true, 0));
    assert!(out.port.enable);
    let _ = acc.enable(1, false);
    let out = step(&mut arb, &drive(&acc, true, 0));
    assert!(!out.port.enable);
}

#[test]
fn combinational_grant_follows_enables() {
    init_tracing();
    let arb = MemoryArbiter::new(&config(ArbitrationMode::Combinational));
    let mut acc = with_read_mask(Accessors::new());

    assert!(!arb.evaluate(&drive(&acc, false, 0)).port.enable);

    let _ = acc.enable(1, true);
    let out = arb.evaluate(&drive(&acc, false, 0));
    assert_eq!(out.granted, Some(1));
    assert_forwarded(&out, &acc.0[1]);

    // accessor 0 pre-empts as soon as it asserts
    let _ = acc.enable(0, true);
    let out = arb.evaluate(&drive(&acc, true, 0x1234));
    assert_eq!(out.granted, Some(0));
    assert_forwarded(&out, &acc.0[0]);
    assert_eq!(
        out.responses,
        vec![
            MemoryResponse {
                ready: true,
                data_in: 0x1234
            },
            MemoryResponse::default()
        ]
    );

    // accessor 1's held write is serviced once accessor 0 drops, unchanged
    let _ = acc.enable(0, false);
    let out = arb.evaluate(&drive(&acc, false, 0));
    assert_eq!(out.granted, Some(1));
    assert_eq!(out.port.data_out, 0xFACEFEED);
    assert_eq!(out.port.operation, MemoryOperation::Write);
}

#[test]
fn combinational_mode_has_no_owner_state() {
    let mut arb = MemoryArbiter::new(&config(ArbitrationMode::Combinational));
    let mut acc = Accessors::new();
    let _ = acc.enable(0, true);
    arb.clock(&drive(&acc, false, 0));
    assert_eq!(arb.owner(), None);
}

#[test]
fn address_truncated_to_port_width() {
    let arb = MemoryArbiter::new(&MemoryConfig {
        word_address_bits: 8,
        ..MemoryConfig::default()
    });
    let requests = [MemoryRequest::read(WordAddress(0x1_23)), MemoryRequest::default()];
    let out = arb.evaluate(&MemoryArbiterInputs {
        accessors: &requests,
        memory: MemoryResponse::default(),
    });
    assert_eq!(out.port.word_address, WordAddress(0x23));
}

#[test]
fn evaluation_is_idempotent() {
    let arb = MemoryArbiter::new(&MemoryConfig::default());
    let mut acc = Accessors::new();
    let _ = acc.enable(0, true).enable(1, true);
    let inputs = drive(&acc, true, 5);
    assert_eq!(arb.evaluate(&inputs), arb.evaluate(&inputs));
}

#[test]
fn system_write_then_read_back() {
    init_tracing();
    let mut system = MemorySystem::new(&MemoryConfig {
        size_words: 64,
        ..MemoryConfig::default()
    });
    system.memory_mut().load(WordAddress(4), &[0x1122_3344]);

    let write = MemoryRequest::write(WordAddress(4), ByteMask(0b0101), 0xFACEFEED);
    let out = system.tick(&[MemoryRequest::default(), write]);
    assert_eq!(out.granted, Some(1));
    assert!(!out.responses[1].ready);
    let out = system.tick(&[MemoryRequest::default(), write]);
    assert!(out.responses[1].ready);
    assert_eq!(system.memory().peek(WordAddress(4)), 0x11CE_33ED);

    let read = MemoryRequest::read(WordAddress(4));
    let _ = system.tick(&[read, MemoryRequest::default()]);
    let out = system.tick(&[read, MemoryRequest::default()]);
    assert_eq!(
        out.responses[0],
        MemoryResponse {
            ready: true,
            data_in: 0x11CE_33ED
        }
    );
    assert_eq!(system.stats.memory_grants, 2);
}

#[test]
fn system_contention_counts_stalls() {
    let mut system = MemorySystem::new(&MemoryConfig::default());
    let both = [
        MemoryRequest::read(WordAddress(0)),
        MemoryRequest::write(WordAddress(1), ByteMask::FULL, 9),
    ];
    for _ in 0..3 {
        let out = system.tick(&both);
        assert_eq!(out.granted, Some(0));
    }
    let out = system.tick(&[MemoryRequest::default(), both[1]]);
    assert_eq!(out.granted, Some(1));
    let _ = system.tick(&[MemoryRequest::default(), both[1]]);

    assert_eq!(system.stats.memory_stalls, 3);
    assert_eq!(system.stats.memory_grants, 2);
    assert_eq!(system.memory().peek(WordAddress(1)), 9);
}

#[test]
fn word_memory_drops_ready_when_idle() {
    let mut mem = WordMemory::new(8);
    mem.clock(&MemoryRequest::read(WordAddress(0)));
    assert!(mem.response().ready);
    mem.clock(&MemoryRequest::default());
    assert_eq!(mem.response(), MemoryResponse::default());
}

#[test]
fn handover_withholds_previous_owners_read_data() {
    init_tracing();
    let mut system = MemorySystem::new(&MemoryConfig {
        size_words: 8,
        ..MemoryConfig::default()
    });
    system.memory_mut().load(WordAddress(0), &[0xAAAA_AAAA, 0xBBBB_BBBB]);
    let idle = MemoryRequest::default();
    let second = MemoryRequest::read(WordAddress(1));

    let _ = system.tick(&[MemoryRequest::read(WordAddress(0)), idle]);

    // Memory now answers accessor 0's read while accessor 1 owns the port.
    let out = system.tick(&[idle, second]);
    assert_eq!(out.granted, Some(1));
    assert_eq!(out.responses, vec![MemoryResponse::default(); 2]);

    let out = system.tick(&[idle, second]);
    assert_eq!(
        out.responses[1],
        MemoryResponse {
            ready: true,
            data_in: 0xBBBB_BBBB
        }
    );
    assert_eq!(system.stats.memory_grants, 2);
}
