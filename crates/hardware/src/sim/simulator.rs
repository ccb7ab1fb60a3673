//! Simulator: stations, bus arbiter, and register file stepped as one core.
//!
//! Each call to [`Simulator::tick`] is one clock cycle, resolved in two phases:
//! 1. **Evaluate:** Every station's registered readiness and result become a bus
//!    request; the arbiter turns the requests into the cycle's [`BusSnapshot`].
//! 2. **Commit:** Broadcasts with a destination register go through the register
//!    file's write ports, every station clocks against the same snapshot
//!    (snooping for its operands), granted stations are released, and pending
//!    dispatches are allocated.
//!
//! Requests are computed against an idle bus, so a station's readiness never
//! depends combinationally on the broadcasts it is competing for. A value
//! captured off a bus therefore makes its consumer ready on the following cycle.

use tracing::{debug, trace};

use crate::common::{ConfigError, SimError, StationIndex, Word};
use crate::config::Config;
use crate::core::bus::{BusArbiter, BusSnapshot, StationRequest};
use crate::core::register_file::{RegisterFile, RegisterFileInputs, WritePort};
use crate::core::station::{IntegerStation, OperandSource, StationInputs};
use crate::core::traits::{Clocked, Combinational};
use crate::core::units::alu::AluOp;
use crate::stats::SimStats;

/// Where a dispatched operand comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceOperand {
    /// An immediate value.
    Value(Word),
    /// The result of the instruction in the named station.
    Tag(StationIndex),
    /// The committed contents of a register, read at dispatch.
    Register(usize),
}

/// An instruction waiting for the next edge to be allocated.
#[derive(Clone, Copy, Debug)]
struct Dispatch {
    operation: AluOp,
    a: OperandSource,
    b: OperandSource,
    destination: Option<usize>,
}

/// Top-level simulator for the execution core.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    stations: Vec<IntegerStation>,
    destinations: Vec<Option<usize>>,
    pending: Vec<Option<Dispatch>>,
    arbiter: BusArbiter,
    register_file: RegisterFile,
    /// Activity counters.
    pub stats: SimStats,
}

impl Simulator {
    /// Builds a core sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns any [`ConfigError`] reported by [`Config::validate`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let station_count = config.bus.station_count;
        Ok(Self {
            config: config.clone(),
            stations: (0..station_count)
                .map(|i| IntegerStation::new(StationIndex(i)))
                .collect(),
            destinations: vec![None; station_count],
            pending: vec![None; station_count],
            arbiter: BusArbiter::new(&config.bus),
            register_file: RegisterFile::new(&config.register_file),
            stats: SimStats::default(),
        })
    }

    /// Configuration the core was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// All stations, in index order.
    pub fn stations(&self) -> &[IntegerStation] {
        &self.stations
    }

    /// One station, if it exists.
    pub fn station(&self, index: StationIndex) -> Option<&IntegerStation> {
        self.stations.get(index.val())
    }

    /// The register file.
    pub const fn register_file(&self) -> &RegisterFile {
        &self.register_file
    }

    /// Mutable access to the register file, for seeding initial contents.
    pub const fn register_file_mut(&mut self) -> &mut RegisterFile {
        &mut self.register_file
    }

    /// True when no station is occupied and nothing is waiting to be allocated.
    pub fn is_idle(&self) -> bool {
        self.stations.iter().all(|s| !s.occupied()) && self.pending.iter().all(Option::is_none)
    }

    fn check_register(&self, index: usize) -> Result<(), SimError> {
        if index < self.register_file.len() {
            Ok(())
        } else {
            Err(SimError::NoSuchRegister {
                index,
                count: self.register_file.len(),
            })
        }
    }

    fn resolve(&self, operand: SourceOperand) -> Result<OperandSource, SimError> {
        match operand {
            SourceOperand::Value(v) => Ok(OperandSource::Preloaded(v)),
            SourceOperand::Tag(tag) => Ok(OperandSource::AwaitingTag(tag)),
            SourceOperand::Register(index) => {
                self.check_register(index)?;
                Ok(OperandSource::Preloaded(self.register_file.read(index)))
            }
        }
    }

    /// Queues an instruction for allocation into `station` on the next edge.
    ///
    /// # Arguments
    ///
    /// * `station`     - Station to allocate.
    /// * `operation`   - ALU operation.
    /// * `a`, `b`      - Operand sources; register operands are read immediately.
    /// * `destination` - Register written when the result is broadcast, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoSuchStation`] or [`SimError::StationBusy`] if the
    /// station cannot take an instruction, and [`SimError::NoSuchRegister`] if a
    /// register operand or the destination is out of range.
    pub fn dispatch(
        &mut self,
        station: StationIndex,
        operation: AluOp,
        a: SourceOperand,
        b: SourceOperand,
        destination: Option<usize>,
    ) -> Result<(), SimError> {
        let i = station.val();
        let Some(target) = self.stations.get(i) else {
            return Err(SimError::NoSuchStation(station));
        };
        if target.occupied() || self.pending[i].is_some() {
            return Err(SimError::StationBusy(station));
        }
        if let Some(rd) = destination {
            self.check_register(rd)?;
        }
        let dispatch = Dispatch {
            operation,
            a: self.resolve(a)?,
            b: self.resolve(b)?,
            destination,
        };
        debug!(%station, op = %operation, ?a, ?b, ?destination, "dispatch");
        self.pending[i] = Some(dispatch);
        self.stats.dispatches += 1;
        Ok(())
    }

    /// Bus requests from every station's registered state.
    fn requests(&self) -> Vec<StationRequest> {
        let idle = BusSnapshot::idle(self.arbiter.bus_count());
        self.stations
            .iter()
            .map(|s| {
                let out = s.evaluate(&StationInputs::idle(&idle));
                StationRequest {
                    ready: out.result_ready,
                    value: out.result,
                }
            })
            .collect()
    }

    /// Advances the core by one clock cycle.
    ///
    /// # Returns
    ///
    /// The cycle's bus snapshot.
    pub fn tick(&mut self) -> BusSnapshot {
        let requests = self.requests();
        let arbitration = self.arbiter.evaluate(&requests);
        let snapshot = &arbitration.snapshot;

        let mut writes = vec![WritePort::default(); self.register_file.write_ports()];
        for (port, bus) in writes.iter_mut().zip(snapshot.buses()) {
            if !bus.asserted {
                continue;
            }
            if let Some(rd) = self.destinations[bus.source.val()] {
                *port = WritePort::write(rd, bus.value);
            }
        }
        let rf_inputs = RegisterFileInputs {
            read_index: &[],
            writes: &writes,
        };
        let resolved = self.register_file.resolve_writes(&writes);
        self.register_file.clock(&rf_inputs);

        for (i, station) in self.stations.iter_mut().enumerate() {
            let mut inputs = StationInputs::idle(snapshot);
            inputs.reset_occupied = arbitration.granted[i].is_some();
            if let Some(d) = self.pending[i].take() {
                inputs.set_occupied = true;
                inputs.operation = d.operation;
                inputs.a = d.a;
                inputs.b = d.b;
                self.destinations[i] = d.destination;
            } else if inputs.reset_occupied {
                self.destinations[i] = None;
            }
            station.clock(&inputs);
        }

        self.stats.cycles += 1;
        self.stats.broadcasts += snapshot.asserted_count() as u64;
        self.stats.bus_stalls += arbitration.stalled() as u64;
        self.stats.register_writes += resolved.landed.len() as u64;
        self.stats.dropped_writes += resolved.dropped as u64;

        if self.config.general.trace {
            debug!(
                cycle = self.stats.cycles,
                broadcasts = snapshot.asserted_count(),
                stalled = arbitration.stalled(),
                writes = resolved.landed.len(),
                "cycle"
            );
        }
        trace!(?snapshot, "bus snapshot");
        arbitration.snapshot
    }

    /// Ticks until the core is idle or `max_cycles` have elapsed.
    ///
    /// # Returns
    ///
    /// The number of cycles run.
    pub fn run_until_idle(&mut self, max_cycles: u64) -> u64 {
        let mut ran = 0;
        while ran < max_cycles && !self.is_idle() {
            let _ = self.tick();
            ran += 1;
        }
        ran
    }

    /// Returns every station, the register file, and pending dispatches to their
    /// power-on state. Statistics are kept.
    pub fn reset(&mut self) {
        for station in &mut self.stations {
            station.reset();
        }
        self.register_file.reset();
        self.destinations.fill(None);
        self.pending.fill(None);
    }
}
