//! Simulation statistics collection and reporting.
//!
//! This module tracks activity counters for the execution core. It provides:
//! 1. **Cycles and throughput:** Elapsed cycles, dispatches, broadcasts, and derived
//!    broadcasts per cycle.
//! 2. **Bus contention:** Station-cycles spent ready but without a bus.
//! 3. **Write-back:** Register writes that landed and conflicting writes that were dropped.
//! 4. **Memory port:** Grants handed out and accessor-cycles spent waiting for the port.

use std::io::{self, Write};
use std::time::Instant;

/// Simulation statistics structure tracking all activity counters.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions accepted into a station.
    pub dispatches: u64,
    /// Results driven onto a bus.
    pub broadcasts: u64,
    /// Station-cycles with a ready result that did not win a bus.
    pub bus_stalls: u64,
    /// Register writes that landed.
    pub register_writes: u64,
    /// Enabled register writes dropped by a lower-indexed port's write to the same register.
    pub dropped_writes: u64,
    /// Cycles on which the memory port passed to an accessor other than the
    /// previous cycle's owner. A transaction held across cycles by the same
    /// owner counts once.
    pub memory_grants: u64,
    /// Accessor-cycles with `enable` high while another accessor held the port.
    pub memory_stalls: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            dispatches: 0,
            broadcasts: 0,
            bus_stalls: 0,
            register_writes: 0,
            dropped_writes: 0,
            memory_grants: 0,
            memory_stalls: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"bus"`, `"register_file"`, `"memory"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "bus", "register_file", "memory"];

impl SimStats {
    /// Average number of broadcasts per cycle.
    pub fn broadcasts_per_cycle(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.broadcasts as f64 / self.cycles as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print (see [`STATS_SECTIONS`]), or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let _ = self.write_sections(&mut io::stdout().lock(), sections);
    }

    /// Writes the requested statistics sections to `out`.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `out`.
    pub fn write_sections<W: Write>(&self, out: &mut W, sections: &[String]) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };

        if want("summary") {
            writeln!(out, "\n==========================================================")?;
            writeln!(out, "EXECUTION CORE SIMULATION STATISTICS")?;
            writeln!(out, "==========================================================")?;
            writeln!(out, "host_seconds             {seconds:.4} s")?;
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "sim_freq                 {khz:.2} kHz")?;
            writeln!(out, "sim_dispatches           {}", self.dispatches)?;
            writeln!(out, "sim_broadcasts           {}", self.broadcasts)?;
            writeln!(out, "sim_bpc                  {:.4}", self.broadcasts_per_cycle())?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("bus") {
            writeln!(out, "RESULT BUSES")?;
            writeln!(out, "  bus.stalls             {}", self.bus_stalls)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("register_file") {
            writeln!(out, "REGISTER FILE")?;
            writeln!(out, "  rf.writes              {}", self.register_writes)?;
            writeln!(out, "  rf.dropped             {}", self.dropped_writes)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("memory") {
            writeln!(out, "MEMORY PORT")?;
            writeln!(out, "  mem.grants             {}", self.memory_grants)?;
            writeln!(out, "  mem.stalls             {}", self.memory_stalls)?;
            writeln!(out, "==========================================================")?;
        }
        Ok(())
    }

    /// Prints every statistics section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
