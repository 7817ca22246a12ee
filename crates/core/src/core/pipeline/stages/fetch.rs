//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the pipeline. It reads the
//! program image at the current PC, expands compressed encodings to their
//! 32-bit equivalents, and advances the PC by the instruction size. A
//! pending stall holds the latch unchanged; a pending flush drops the
//! wrong-path slot; an all-zero half-word is the end-of-program sentinel.

use crate::common::constants::{
    COMPRESSED_INSTRUCTION_MASK, COMPRESSED_INSTRUCTION_VALUE, INSTRUCTION_SIZE_16,
    INSTRUCTION_SIZE_32,
};
use crate::core::Cpu;
use crate::core::pipeline::latches::IfId;
use crate::isa::rvc::expand::expand;

/// Executes the instruction fetch stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
///
/// # Behavior
///
/// - A stall asserted by decode holds the IF/ID latch for one cycle.
/// - A flush asserted by decode (predicted-taken branch or jump) drops the
///   just-fetched wrong-path instruction.
/// - Past the end of the image, or after the halt sentinel, the latch stays
///   invalid so the pipeline can drain.
/// - A 16-bit encoding whose low bits are not `11` is expanded; reserved
///   expansions become bubbles but still advance the PC.
pub fn fetch_stage(cpu: &mut Cpu) {
    if cpu.stall {
        cpu.stall = false;
        return;
    }
    if cpu.flush {
        cpu.if_id = IfId::default();
        cpu.flush = false;
        return;
    }
    if cpu.halted || cpu.pc >= cpu.max_pc {
        cpu.if_id = IfId::default();
        return;
    }

    let pc = cpu.pc;
    let Some(half) = cpu.read_program_half(pc) else {
        cpu.if_id = IfId::default();
        cpu.halted = true;
        return;
    };

    if half == 0 {
        // End-of-program sentinel; stop fetching and let the pipeline drain.
        cpu.halted = true;
        cpu.if_id = IfId::default();
        return;
    }

    if (half & COMPRESSED_INSTRUCTION_MASK) != COMPRESSED_INSTRUCTION_VALUE {
        let expanded = expand(half);
        cpu.pc = pc.wrapping_add(INSTRUCTION_SIZE_16);
        if expanded == 0 {
            log::debug!("IF  pc={:#06x} reserved compressed encoding {:#06x}", pc, half);
            cpu.if_id = IfId::default();
            return;
        }
        log::debug!("IF  pc={:#06x} inst={:#06x} (compressed)", pc, half);
        cpu.if_id = IfId {
            valid: true,
            pc,
            inst: expanded,
            compressed: true,
            raw16: half,
        };
    } else {
        let Some(upper) = cpu.read_program_half(pc.wrapping_add(2)) else {
            cpu.if_id = IfId::default();
            cpu.halted = true;
            return;
        };
        let inst = ((upper as u32) << 16) | (half as u32);
        cpu.pc = pc.wrapping_add(INSTRUCTION_SIZE_32);
        log::debug!("IF  pc={:#06x} inst={:#010x}", pc, inst);
        cpu.if_id = IfId {
            valid: true,
            pc,
            inst,
            compressed: false,
            raw16: 0,
        };
    }
}
