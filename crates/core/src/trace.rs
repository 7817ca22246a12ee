//! Per-cycle pipeline snapshots and observation logs.
//!
//! This module records what the pipeline looked like on every cycle, plus
//! three best-effort observation logs:
//! 1. **Snapshots:** One entry per cycle with each latch's PC, disassembly,
//!    and key datum, and whether a stall or flush occurred.
//! 2. **Memory log:** One entry per load/store issued to the data memory.
//! 3. **Register log:** One entry per committed register change.
//! 4. **RAW edges:** Producer/consumer dependency pairs within a bounded
//!    cycle window, for visualization only.
//!
//! Everything here is by-value copies of live state; nothing recorded can
//! affect execution.

use crate::common::constants::{OPCODE_MASK, REGISTER_COUNT};
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::core::pipeline::signals::ControlSignals;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::Decoded;
use crate::stats::family_name;

/// Maximum producer-to-consumer distance, in cycles, recorded as a RAW edge.
const DEPENDENCY_WINDOW: u64 = 10;

/// View of the IF/ID latch in a snapshot.
#[derive(Clone, Debug, Default)]
pub struct FetchView {
    /// Whether the latch held an instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw instruction bits.
    pub inst: u32,
    /// Disassembled text.
    pub disasm: String,
}

/// View of the ID/EX latch in a snapshot.
#[derive(Clone, Debug, Default)]
pub struct DecodeView {
    /// Whether the latch held an instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Opcode family name (R-type, Load, Branch, ...).
    pub family: &'static str,
    /// Disassembled text.
    pub disasm: String,
}

/// View of the EX/MEM latch in a snapshot.
#[derive(Clone, Debug, Default)]
pub struct ExecuteView {
    /// Whether the latch held an instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// ALU/FPU result or memory address.
    pub alu_result: u32,
    /// Disassembled text.
    pub disasm: String,
}

/// View of the MEM/WB latch in a snapshot.
#[derive(Clone, Debug, Default)]
pub struct WritebackView {
    /// Whether the latch held an instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Value the instruction commits to its destination.
    pub write_value: u32,
    /// Disassembled text.
    pub disasm: String,
}

/// One cycle's pipeline contents.
#[derive(Clone, Debug, Default)]
pub struct PipelineSnapshot {
    /// Cycle number.
    pub cycle: u64,
    /// Whether a stall was asserted during this cycle.
    pub stall: bool,
    /// Whether a flush was asserted during this cycle.
    pub flush: bool,
    /// IF/ID latch contents.
    pub if_id: FetchView,
    /// ID/EX latch contents.
    pub id_ex: DecodeView,
    /// EX/MEM latch contents.
    pub ex_mem: ExecuteView,
    /// MEM/WB latch contents.
    pub mem_wb: WritebackView,
}

/// Kind of a logged data-memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemAccessKind {
    /// Load operation.
    Load,
    /// Store operation.
    Store,
}

/// One logged data-memory access.
#[derive(Clone, Debug)]
pub struct MemoryAccessRecord {
    /// Cycle on which the access was issued.
    pub cycle: u64,
    /// Byte address of the access.
    pub addr: u32,
    /// Load or store.
    pub kind: MemAccessKind,
    /// Loaded or stored value.
    pub value: u32,
    /// PC of the issuing instruction.
    pub pc: u32,
    /// Whether the access hit in the cache; `None` when no cache is
    /// configured.
    pub cache_hit: Option<bool>,
}

/// One logged register-file change.
#[derive(Clone, Debug)]
pub struct RegisterChangeRecord {
    /// Cycle on which the write committed.
    pub cycle: u64,
    /// Destination register index.
    pub index: usize,
    /// Value before the write.
    pub old: u32,
    /// Value after the write.
    pub new: u32,
    /// PC of the committing instruction.
    pub pc: u32,
}

/// One read-after-write dependency edge between two instructions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDependency {
    /// PC of the producing instruction.
    pub producer_pc: u32,
    /// PC of the consuming instruction.
    pub consumer_pc: u32,
    /// Register carrying the dependency.
    pub reg: usize,
}

/// Collected observation state for a run.
#[derive(Default)]
pub struct Trace {
    /// Per-cycle pipeline snapshots, one per tick, unbounded.
    pub snapshots: Vec<PipelineSnapshot>,
    /// Data-memory access log.
    pub memory_log: Vec<MemoryAccessRecord>,
    /// Register change log.
    pub register_log: Vec<RegisterChangeRecord>,
    /// RAW dependency edges within the cycle window.
    pub dependencies: Vec<RawDependency>,
    /// Most recent decoded writer of each integer register (pc, cycle).
    last_writer: [Option<(u32, u64)>; REGISTER_COUNT],
}

impl Trace {
    /// Appends the per-cycle snapshot of all four latches.
    #[allow(clippy::too_many_arguments)]
    pub fn capture(
        &mut self,
        cycle: u64,
        stall: bool,
        flush: bool,
        if_id: &IfId,
        id_ex: &IdEx,
        ex_mem: &ExMem,
        mem_wb: &MemWb,
    ) {
        let dis = |valid: bool, inst: u32| {
            if valid {
                disassemble(inst)
            } else {
                String::new()
            }
        };

        self.snapshots.push(PipelineSnapshot {
            cycle,
            stall,
            flush,
            if_id: FetchView {
                valid: if_id.valid,
                pc: if_id.pc,
                inst: if_id.inst,
                disasm: dis(if_id.valid, if_id.inst),
            },
            id_ex: DecodeView {
                valid: id_ex.valid,
                pc: id_ex.pc,
                family: if id_ex.valid {
                    family_name(id_ex.inst & OPCODE_MASK)
                } else {
                    ""
                },
                disasm: dis(id_ex.valid, id_ex.inst),
            },
            ex_mem: ExecuteView {
                valid: ex_mem.valid,
                pc: ex_mem.pc,
                alu_result: ex_mem.alu,
                disasm: dis(ex_mem.valid, ex_mem.inst),
            },
            mem_wb: WritebackView {
                valid: mem_wb.valid,
                pc: mem_wb.pc,
                write_value: mem_wb.write_value(),
                disasm: dis(mem_wb.valid, mem_wb.inst),
            },
        });
    }

    /// Records dependency edges for an instruction entering decode, then
    /// registers it as the latest writer of its destination.
    pub fn record_decode(&mut self, cycle: u64, pc: u32, d: &Decoded, ctrl: &ControlSignals) {
        // Only integer-file sources participate; FP indices name a
        // different register file.
        let sources = [
            (d.rs1, ctrl.rs1_fp),
            (d.rs2, ctrl.rs2_fp),
        ];
        for (src, is_fp) in sources {
            if src == 0 || is_fp {
                continue;
            }
            if let Some((producer_pc, producer_cycle)) = self.last_writer[src] {
                if cycle.saturating_sub(producer_cycle) <= DEPENDENCY_WINDOW {
                    self.dependencies.push(RawDependency {
                        producer_pc,
                        consumer_pc: pc,
                        reg: src,
                    });
                }
            }
        }

        if ctrl.reg_write && d.rd != 0 {
            self.last_writer[d.rd] = Some((pc, cycle));
        }
    }

    /// Appends a data-memory access record.
    pub fn record_memory_access(
        &mut self,
        cycle: u64,
        addr: u32,
        kind: MemAccessKind,
        value: u32,
        pc: u32,
        cache_hit: Option<bool>,
    ) {
        self.memory_log.push(MemoryAccessRecord {
            cycle,
            addr,
            kind,
            value,
            pc,
            cache_hit,
        });
    }

    /// Appends a register-change record.
    pub fn record_register_change(&mut self, cycle: u64, index: usize, old: u32, new: u32, pc: u32) {
        self.register_log.push(RegisterChangeRecord {
            cycle,
            index,
            old,
            new,
            pc,
        });
    }
}
