//! CPU state and the per-cycle tick driver.
//!
//! The `Cpu` owns all architectural and microarchitectural state: program
//! counter, register files, pipeline latches, the configured data memory
//! and branch predictor, and the statistics and trace collectors. One call
//! to [`Cpu::tick`] simulates one clock cycle.

use crate::common::RegisterFile;
use crate::config::Config;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::core::pipeline::stages;
use crate::core::units::bru::{BranchPredictor, PredictorWrapper};
use crate::core::units::mem::DataMemory;
use crate::stats::SimStats;
use crate::trace::Trace;

/// The simulated processor.
///
/// Fields are public so hosts and tests can inspect and seed state between
/// ticks; the trace vector is read-only to observers by convention.
pub struct Cpu {
    /// Program counter (byte address into the program image).
    pub pc: u32,
    /// Total byte count of the program image; fetch stops at this address.
    pub max_pc: u32,
    /// Program image (Harvard-style, separate from data memory).
    pub program: Vec<u8>,
    /// Integer and floating-point register files.
    pub regs: RegisterFile,
    /// Data memory (bare RAM or cache-fronted RAM).
    pub mem: DataMemory,
    /// Configured branch predictor.
    pub predictor: PredictorWrapper,

    /// IF/ID pipeline latch.
    pub if_id: IfId,
    /// ID/EX pipeline latch.
    pub id_ex: IdEx,
    /// EX/MEM pipeline latch.
    pub ex_mem: ExMem,
    /// MEM/WB pipeline latch.
    pub mem_wb: MemWb,
    /// Snapshot of EX/MEM taken at the top of the current tick.
    pub ex_mem_prev: ExMem,
    /// Snapshot of MEM/WB taken at the top of the current tick.
    pub mem_wb_prev: MemWb,

    /// Stall requested by decode; consumed by fetch within the same tick.
    pub stall: bool,
    /// Flush requested by decode or execute; consumed by the next stage
    /// upstream within the same tick.
    pub flush: bool,
    /// Fetch has seen the end-of-program sentinel.
    pub halted: bool,
    /// Verbose diagnostics to stdout/stderr.
    pub debug: bool,

    /// Aggregate statistics counters.
    pub stats: SimStats,
    /// Per-cycle snapshots and observation logs.
    pub trace: Trace,

    cycle: u64,
    stall_this_cycle: bool,
    flush_this_cycle: bool,
}

impl Cpu {
    /// Creates a CPU for a program image under the given configuration.
    ///
    /// All latches start invalid and the PC starts at zero.
    pub fn new(program: Vec<u8>, config: &Config) -> Self {
        let max_pc = program.len() as u32;
        Self {
            pc: 0,
            max_pc,
            program,
            regs: RegisterFile::new(),
            mem: DataMemory::from_config(config),
            predictor: PredictorWrapper::from_config(config),
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            ex_mem_prev: ExMem::default(),
            mem_wb_prev: MemWb::default(),
            stall: false,
            flush: false,
            halted: false,
            debug: config.general.debug,
            stats: SimStats::default(),
            trace: Trace::default(),
            cycle: 0,
            stall_this_cycle: false,
            flush_this_cycle: false,
        }
    }

    /// Simulates one clock cycle.
    ///
    /// The EX/MEM and MEM/WB latches are snapshotted first, then the stages
    /// run in reverse dataflow order (WB, MEM, EX, ID, IF) so each consumes
    /// the latch contents produced in the previous cycle, and execute's
    /// forwarding observes only previous-cycle results.
    pub fn tick(&mut self) {
        self.cycle += 1;
        self.stats.cycles = self.cycle;
        self.stall_this_cycle = false;
        self.flush_this_cycle = false;

        self.ex_mem_prev = self.ex_mem.clone();
        self.mem_wb_prev = self.mem_wb.clone();

        stages::wb_stage(self);
        stages::mem_stage(self);
        stages::execute_stage(self);
        stages::decode_stage(self);
        stages::fetch_stage(self);

        self.refresh_derived_counters();
        self.trace.capture(
            self.cycle,
            self.stall_this_cycle,
            self.flush_this_cycle,
            &self.if_id,
            &self.id_ex,
            &self.ex_mem,
            &self.mem_wb,
        );
    }

    /// Current cycle number (1-based after the first tick).
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Whether all four pipeline latches are bubbles.
    pub fn pipeline_empty(&self) -> bool {
        !self.if_id.valid && !self.id_ex.valid && !self.ex_mem.valid && !self.mem_wb.valid
    }

    /// Whether the run is complete: fetch has stopped and the pipeline has
    /// drained.
    pub fn finished(&self) -> bool {
        (self.halted || self.pc >= self.max_pc) && self.pipeline_empty()
    }

    /// Reads a half-word from the program image; `None` past the end.
    pub(crate) fn read_program_half(&self, addr: u32) -> Option<u16> {
        let idx = addr as usize;
        if idx + 2 > self.program.len() {
            return None;
        }
        Some(u16::from_le_bytes([self.program[idx], self.program[idx + 1]]))
    }

    /// Asserts a pipeline flush and counts it.
    pub(crate) fn raise_flush(&mut self) {
        self.flush = true;
        self.flush_this_cycle = true;
        self.stats.flushes += 1;
    }

    /// Asserts a one-cycle stall and counts it.
    pub(crate) fn raise_stall(&mut self) {
        self.stall = true;
        self.stall_this_cycle = true;
        self.stats.stalls += 1;
    }

    /// Mirrors device-owned counters into the statistics block.
    fn refresh_derived_counters(&mut self) {
        if let Some((hits, misses)) = self.mem.cache_stats() {
            self.stats.cache_hits = hits;
            self.stats.cache_misses = misses;
        }
        self.stats.predictor_correct = self.predictor.correct();
        self.stats.predictor_incorrect = self.predictor.incorrect();
    }
}
