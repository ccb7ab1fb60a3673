//! Result buses and the bus arbiter.
//!
//! A cycle's broadcasts are captured in an immutable [`BusSnapshot`]: one
//! [`Bus`] per result bus, each carrying an `asserted` flag, the `source`
//! station index (the tag), and the broadcast value. The snapshot is produced
//! once per cycle by [`BusArbiter`] and then read by every snooping operand slot.
//!
//! For interfacing with packed signal vectors, a snapshot converts to and from
//! [`FlatBus`], where the per-bus fields are concatenated bit vectors.

use tracing::{debug, trace};

use crate::common::bits::{flatten_lanes, get_bit, set_bit, unflatten_lanes, words_for_bits};
use crate::common::constants::WORD_BITS;
use crate::common::{StationIndex, Word};
use crate::config::BusConfig;
use crate::core::arbiter::{Requester, select_lowest};
use crate::core::traits::Combinational;

/// A single result bus for one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bus {
    /// A station is driving this bus.
    pub asserted: bool,
    /// Station driving the bus; meaningless when not asserted.
    pub source: StationIndex,
    /// Broadcast value; meaningless when not asserted.
    pub value: Word,
}

impl Bus {
    /// An undriven bus.
    pub const IDLE: Self = Self {
        asserted: false,
        source: StationIndex(0),
        value: 0,
    };

    /// Whether this bus is asserted and carries `tag`.
    #[inline(always)]
    pub fn carries(&self, tag: StationIndex) -> bool {
        self.asserted && self.source == tag
    }
}

/// Immutable view of every bus for one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusSnapshot {
    buses: Vec<Bus>,
}

impl BusSnapshot {
    /// Snapshot with `bus_count` idle buses.
    pub fn idle(bus_count: usize) -> Self {
        Self {
            buses: vec![Bus::IDLE; bus_count],
        }
    }

    /// Wraps an explicit set of buses.
    pub const fn from_buses(buses: Vec<Bus>) -> Self {
        Self { buses }
    }

    /// All buses in index order.
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    /// Number of buses.
    pub fn len(&self) -> usize {
        self.buses.len()
    }

    /// Whether the snapshot has no buses at all.
    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    /// Number of asserted buses.
    pub fn asserted_count(&self) -> usize {
        self.buses.iter().filter(|b| b.asserted).count()
    }

    /// Finds the value broadcast for `tag` this cycle.
    ///
    /// If more than one bus carries the tag, the lowest-indexed bus wins.
    /// A tag naming a station that does not exist never matches.
    pub fn lookup(&self, tag: StationIndex) -> Option<Word> {
        self.buses.iter().find(|b| b.carries(tag)).map(|b| b.value)
    }

    /// Packs the snapshot into flattened vectors.
    ///
    /// `source` fields are truncated to `index_bits`.
    pub fn to_flat(&self, index_bits: u32) -> FlatBus {
        let mut asserted = vec![0; words_for_bits(self.buses.len())];
        for (i, bus) in self.buses.iter().enumerate() {
            if bus.asserted {
                set_bit(&mut asserted, i);
            }
        }
        let sources: Vec<u32> = self.buses.iter().map(|b| b.source.val() as u32).collect();
        let values: Vec<u32> = self.buses.iter().map(|b| b.value).collect();
        FlatBus {
            asserted,
            source: flatten_lanes(&sources, index_bits as usize),
            value: flatten_lanes(&values, WORD_BITS as usize),
        }
    }

    /// Unpacks `bus_count` buses from flattened vectors.
    pub fn from_flat(flat: &FlatBus, bus_count: usize, index_bits: u32) -> Self {
        let sources = unflatten_lanes(&flat.source, index_bits as usize, bus_count);
        let values = unflatten_lanes(&flat.value, WORD_BITS as usize, bus_count);
        let buses = (0..bus_count)
            .map(|i| Bus {
                asserted: get_bit(&flat.asserted, i),
                source: StationIndex(sources[i] as usize),
                value: values[i],
            })
            .collect();
        Self { buses }
    }
}

/// Bus fields as packed bit vectors.
///
/// Bit `i` of `asserted` is bus `i`'s flag, lane `i` of `source` is its
/// `index_bits`-wide tag, and lane `i` of `value` is its 32-bit value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatBus {
    /// One bit per bus.
    pub asserted: Vec<u32>,
    /// `index_bits` bits per bus.
    pub source: Vec<u32>,
    /// 32 bits per bus.
    pub value: Vec<u32>,
}

/// A station's request for a result bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StationRequest {
    /// The station has a result to broadcast.
    pub ready: bool,
    /// The result.
    pub value: Word,
}

impl Requester for StationRequest {
    fn requesting(&self) -> bool {
        self.ready
    }
}

/// Outputs of the bus arbiter for one cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusArbiterOutputs {
    /// The cycle's broadcasts.
    pub snapshot: BusSnapshot,
    /// Per station: echoes the request's `ready` flag.
    pub is_asserting: Vec<bool>,
    /// Per station: the bus it was granted, if any.
    pub granted: Vec<Option<usize>>,
}

impl BusArbiterOutputs {
    /// Number of stations that requested a bus but did not get one.
    pub fn stalled(&self) -> usize {
        self.is_asserting
            .iter()
            .zip(&self.granted)
            .filter(|(asserting, granted)| **asserting && granted.is_none())
            .count()
    }
}

/// Fixed-priority arbiter granting result buses to ready stations.
///
/// Bus `k` carries the `k`-th lowest-indexed ready station. Stations that do
/// not fit on a bus this cycle stay ready and try again next cycle.
///
/// Note that `is_asserting` mirrors `ready` rather than the grant: a station
/// uses the grant vector, not `is_asserting`, to learn that its result went out.
#[derive(Clone, Debug)]
pub struct BusArbiter {
    station_count: usize,
    bus_count: usize,
}

impl BusArbiter {
    /// Creates an arbiter sized by `config`.
    pub const fn new(config: &BusConfig) -> Self {
        Self {
            station_count: config.station_count,
            bus_count: config.bus_count,
        }
    }

    /// Number of buses driven.
    pub const fn bus_count(&self) -> usize {
        self.bus_count
    }

    /// Number of stations arbitrated.
    pub const fn station_count(&self) -> usize {
        self.station_count
    }
}

impl Combinational for BusArbiter {
    /// One request per station; missing entries are treated as not ready and
    /// entries beyond `station_count` are ignored.
    type Inputs<'a> = [StationRequest];
    type Outputs = BusArbiterOutputs;

    fn evaluate(&self, requests: &[StationRequest]) -> BusArbiterOutputs {
        let requests = &requests[..requests.len().min(self.station_count)];
        let grants = select_lowest(requests, self.bus_count);

        let mut buses = vec![Bus::IDLE; self.bus_count];
        let mut granted = vec![None; self.station_count];
        for (bus, &station) in grants.iter().enumerate() {
            buses[bus] = Bus {
                asserted: true,
                source: StationIndex(station),
                value: requests[station].value,
            };
            granted[station] = Some(bus);
            trace!(bus, station, value = requests[station].value, "bus grant");
        }

        let mut is_asserting = vec![false; self.station_count];
        for (flag, request) in is_asserting.iter_mut().zip(requests) {
            *flag = request.ready;
        }

        let outputs = BusArbiterOutputs {
            snapshot: BusSnapshot::from_buses(buses),
            is_asserting,
            granted,
        };
        let stalled = outputs.stalled();
        if stalled > 0 {
            debug!(stalled, buses = self.bus_count, "bus contention");
        }
        outputs
    }
}
