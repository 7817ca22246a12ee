//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the four registers carried between the five pipeline
//! stages: IF/ID, ID/EX, EX/MEM, MEM/WB. Each latch carries a `valid` bit
//! (`valid = false` denotes a bubble that contributes nothing observable
//! downstream), the PC, and the original 32-bit encoding so any stage can be
//! disassembled. Latches are plain value types; the per-tick snapshots taken
//! of EX/MEM and MEM/WB are by-value copies and never alias live state.

use crate::core::pipeline::signals::ControlSignals;

/// IF/ID pipeline latch (Fetch to Decode).
///
/// Carries the fetched instruction, already expanded to 32 bits when it was
/// a compressed encoding.
#[derive(Clone, Default, Debug)]
pub struct IfId {
    /// Whether the latch holds an in-flight instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding (expanded for compressed instructions).
    pub inst: u32,
    /// Whether the instruction was fetched as a 16-bit compressed encoding.
    pub compressed: bool,
    /// The original 16-bit encoding, when `compressed` is set.
    pub raw16: u16,
}

impl IfId {
    /// Size in bytes the instruction occupies in the program image.
    pub fn inst_size(&self) -> u32 {
        if self.compressed { 2 } else { 4 }
    }
}

/// ID/EX pipeline latch (Decode to Execute).
///
/// Carries the decoded control bits, register-file read values, and the
/// sign-extended immediate, plus the branch prediction recorded by decode.
#[derive(Clone, Default, Debug)]
pub struct IdEx {
    /// Whether the latch holds an in-flight instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Size of the instruction in bytes (2 for compressed, 4 otherwise).
    pub inst_size: u32,
    /// Destination register index (rd).
    pub rd: usize,
    /// First source register index (rs1).
    pub rs1: usize,
    /// Second source register index (rs2).
    pub rs2: usize,
    /// Sign-extended immediate value.
    pub imm: i32,
    /// Value read from the rs1 register (integer or FP file).
    pub rv1: u32,
    /// Value read from the rs2 register (integer or FP file).
    pub rv2: u32,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
    /// Whether decode predicted this instruction taken.
    pub pred_taken: bool,
    /// The next PC decode predicted (target or fall-through).
    pub pred_target: u32,
}

/// EX/MEM pipeline latch (Execute to Memory).
#[derive(Clone, Default, Debug)]
pub struct ExMem {
    /// Whether the latch holds an in-flight instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Size of the instruction in bytes.
    pub inst_size: u32,
    /// Destination register index (rd).
    pub rd: usize,
    /// ALU/FPU result, memory address, or link value.
    pub alu: u32,
    /// Forwarded rs2 value for store instructions.
    pub store_data: u32,
    /// Control signals for downstream pipeline stages.
    pub ctrl: ControlSignals,
}

/// MEM/WB pipeline latch (Memory to Writeback).
#[derive(Clone, Default, Debug)]
pub struct MemWb {
    /// Whether the latch holds an in-flight instruction.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Size of the instruction in bytes.
    pub inst_size: u32,
    /// Destination register index (rd).
    pub rd: usize,
    /// ALU/FPU result (for non-load instructions).
    pub alu: u32,
    /// Data loaded from memory, extended to 32 bits.
    pub mem_data: u32,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
}

impl MemWb {
    /// The value this instruction commits to its destination register.
    pub fn write_value(&self) -> u32 {
        if self.ctrl.mem_to_reg {
            self.mem_data
        } else {
            self.alu
        }
    }
}
