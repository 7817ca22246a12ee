//! Simulation statistics collection and reporting.
//!
//! This module tracks the aggregate counters for a run:
//! 1. **Cycle accounting:** Total cycles, retired instructions, and the
//!    derived CPI and pipeline utilization.
//! 2. **Instruction mix:** Counts by opcode family (R, I, load, store,
//!    branch, jump, upper-immediate).
//! 3. **Control flow:** Stalls, flushes, taken/not-taken branches,
//!    mispredictions, and predictor accuracy.
//! 4. **Memory:** Loads/stores issued and cache hit/miss counters mirrored
//!    from the data-memory device.

use crate::isa::rv32f::opcodes as f_opcodes;
use crate::isa::rv32i::opcodes;

/// Simulation statistics structure tracking all performance counters.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    /// Total simulated cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed by writeback.
    pub instructions_retired: u64,
    /// Total instructions decoded.
    pub instructions_decoded: u64,

    /// Count of R-type instructions decoded.
    pub inst_r_type: u64,
    /// Count of I-type ALU instructions decoded.
    pub inst_i_type: u64,
    /// Count of load instructions decoded (integer and FP).
    pub inst_load: u64,
    /// Count of store instructions decoded (integer and FP).
    pub inst_store: u64,
    /// Count of conditional branch instructions decoded.
    pub inst_branch: u64,
    /// Count of jump instructions decoded (JAL/JALR).
    pub inst_jump: u64,
    /// Count of upper-immediate instructions decoded (LUI/AUIPC).
    pub inst_upper_imm: u64,
    /// Count of floating-point computation instructions decoded.
    pub inst_fp: u64,

    /// One-cycle load-use stalls inserted.
    pub stalls: u64,
    /// Pipeline flushes asserted (redirects and recoveries).
    pub flushes: u64,

    /// Conditional branches and jumps resolved taken.
    pub branches_taken: u64,
    /// Conditional branches resolved not taken.
    pub branches_not_taken: u64,
    /// Conditional branches whose predicted next PC was wrong.
    pub branch_mispredictions: u64,
    /// Predictor-reported correct predictions.
    pub predictor_correct: u64,
    /// Predictor-reported incorrect predictions.
    pub predictor_incorrect: u64,

    /// Loads issued to the data memory.
    pub memory_reads: u64,
    /// Stores issued to the data memory.
    pub memory_writes: u64,
    /// Cache hits, mirrored from the device.
    pub cache_hits: u64,
    /// Cache misses, mirrored from the device.
    pub cache_misses: u64,
}

/// Returns the family name for a major opcode, for snapshots and reports.
pub fn family_name(opcode: u32) -> &'static str {
    match opcode {
        opcodes::OP_REG => "R-type",
        opcodes::OP_IMM => "I-type",
        opcodes::OP_LOAD => "Load",
        opcodes::OP_STORE => "Store",
        opcodes::OP_BRANCH => "Branch",
        opcodes::OP_JAL | opcodes::OP_JALR => "Jump",
        opcodes::OP_LUI | opcodes::OP_AUIPC => "Upper-Imm",
        f_opcodes::OP_LOAD_FP => "Load",
        f_opcodes::OP_STORE_FP => "Store",
        f_opcodes::OP_FP => "FP",
        _ => "Unknown",
    }
}

/// Section names for selective stats output.
///
/// Valid identifiers: `"summary"`, `"instruction_mix"`, `"branch"`,
/// `"memory"`. Pass an empty slice to `print_sections` to print all.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "branch", "memory"];

impl SimStats {
    /// Counts a decoded instruction under its opcode family.
    pub fn count_decoded(&mut self, opcode: u32) {
        self.instructions_decoded += 1;
        match opcode {
            opcodes::OP_REG => self.inst_r_type += 1,
            opcodes::OP_IMM => self.inst_i_type += 1,
            opcodes::OP_LOAD | f_opcodes::OP_LOAD_FP => self.inst_load += 1,
            opcodes::OP_STORE | f_opcodes::OP_STORE_FP => self.inst_store += 1,
            opcodes::OP_BRANCH => self.inst_branch += 1,
            opcodes::OP_JAL | opcodes::OP_JALR => self.inst_jump += 1,
            opcodes::OP_LUI | opcodes::OP_AUIPC => self.inst_upper_imm += 1,
            f_opcodes::OP_FP => self.inst_fp += 1,
            _ => {}
        }
    }

    /// Cycles per retired instruction.
    pub fn cpi(&self) -> f64 {
        self.cycles as f64 / self.instructions_retired.max(1) as f64
    }

    /// Retired instructions per cycle.
    pub fn utilization(&self) -> f64 {
        self.instructions_retired as f64 / self.cycles.max(1) as f64
    }

    /// Fraction of cache accesses that hit, in [0, 1].
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    /// Predictor accuracy over the predictions the pipeline used, in
    /// percent.
    pub fn predictor_accuracy(&self) -> f64 {
        let total = self.predictor_correct + self.predictor_incorrect;
        if total == 0 {
            0.0
        } else {
            100.0 * self.predictor_correct as f64 / total as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`].
    /// Pass an empty slice to print everything.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let instr = self.instructions_decoded.max(1) as f64;

        if want("summary") {
            println!("==========================================================");
            println!("PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("cycles                   {}", self.cycles);
            println!("instructions_retired     {}", self.instructions_retired);
            println!("cpi                      {:.4}", self.cpi());
            println!("utilization              {:.4}", self.utilization());
            println!("stalls                   {}", self.stalls);
            println!("flushes                  {}", self.flushes);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let line = |name: &str, count: u64| {
                println!(
                    "  op.{:<18} {} ({:.2}%)",
                    name,
                    count,
                    100.0 * count as f64 / instr
                );
            };
            println!("INSTRUCTION MIX ({} decoded)", self.instructions_decoded);
            line("r_type", self.inst_r_type);
            line("i_type", self.inst_i_type);
            line("load", self.inst_load);
            line("store", self.inst_store);
            line("branch", self.inst_branch);
            line("jump", self.inst_jump);
            line("upper_imm", self.inst_upper_imm);
            line("fp", self.inst_fp);
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            println!("BRANCH PREDICTION");
            println!("  taken                  {}", self.branches_taken);
            println!("  not_taken              {}", self.branches_not_taken);
            println!("  mispredictions         {}", self.branch_mispredictions);
            println!(
                "  predictions            {}",
                self.predictor_correct + self.predictor_incorrect
            );
            println!("  accuracy               {:.2}%", self.predictor_accuracy());
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            println!("MEMORY");
            println!("  loads                  {}", self.memory_reads);
            println!("  stores                 {}", self.memory_writes);
            println!("  cache.hits             {}", self.cache_hits);
            println!("  cache.misses           {}", self.cache_misses);
            println!("  cache.hit_rate         {:.2}%", self.cache_hit_rate() * 100.0);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
