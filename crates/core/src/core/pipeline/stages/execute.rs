//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline:
//! 1. **Operand Resolution:** Forwards in-flight results from the per-tick
//!    snapshots of the EX/MEM and MEM/WB latches.
//! 2. **Arithmetic Execution:** Invokes the integer ALU or the FPU.
//! 3. **Branch Resolution:** Compares the actual outcome against the
//!    prediction recorded by decode, redirects and flushes on a mismatch,
//!    and trains the predictor.
//! 4. **Jumps:** Computes the link value; JALR resolves its
//!    register-relative target here.

use crate::core::Cpu;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::ExMem;
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::units::alu::Alu;
use crate::core::units::bru::BranchPredictor;
use crate::core::units::fpu::Fpu;
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::opcodes;

/// Bit mask clearing the low bit of a JALR target.
const JALR_ALIGNMENT_MASK: u32 = !1;

/// Executes the instruction execute stage.
///
/// Consumes the ID/EX latch, resolves operands through the forwarding
/// network, performs the ALU or FPU operation, resolves control flow, and
/// writes the EX/MEM latch.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn execute_stage(cpu: &mut Cpu) {
    if !cpu.id_ex.valid {
        cpu.ex_mem = ExMem::default();
        return;
    }

    let id = cpu.id_ex.clone();
    let (fwd1, fwd2) = hazards::forward_operands(&id, &cpu.ex_mem_prev, &cpu.mem_wb_prev);
    let store_data = fwd2;

    let op_a = match id.ctrl.a_src {
        OpASrc::Reg1 => fwd1,
        OpASrc::Pc => id.pc,
        OpASrc::Zero => 0,
    };
    let op_b = match id.ctrl.b_src {
        OpBSrc::Reg2 => fwd2,
        OpBSrc::Imm => id.imm as u32,
        OpBSrc::Zero => 0,
    };

    let (mut alu_out, zero) = if id.ctrl.alu.is_fp() {
        (Fpu::execute(id.ctrl.alu, op_a, op_b), false)
    } else {
        Alu::execute(id.ctrl.alu, op_a, op_b)
    };

    let fallthrough = id.pc.wrapping_add(id.inst_size);

    if id.ctrl.jump {
        let is_jalr = id.inst.opcode() == opcodes::OP_JALR;
        let actual_target = if is_jalr {
            fwd1.wrapping_add(id.imm as u32) & JALR_ALIGNMENT_MASK
        } else {
            id.pc.wrapping_add(id.imm as u32)
        };

        // The link value rides in the ALU slot to writeback.
        alu_out = fallthrough;

        let predicted = if id.pred_taken {
            id.pred_target
        } else {
            fallthrough
        };
        if actual_target != predicted {
            cpu.pc = actual_target;
            cpu.raise_flush();
        }
        // Jumps are always taken; they are counted with the jump family,
        // not against the branch predictor.
        cpu.stats.branches_taken += 1;
        log::debug!("EX  pc={:#06x} jump -> {:#06x}", id.pc, actual_target);
    }

    if id.ctrl.branch {
        let taken = zero;
        let target = id.pc.wrapping_add(id.imm as u32);
        let actual_next = if taken { target } else { fallthrough };
        let predicted_next = if id.pred_taken {
            id.pred_target
        } else {
            fallthrough
        };

        if actual_next != predicted_next {
            cpu.stats.branch_mispredictions += 1;
            cpu.pc = actual_next;
            cpu.raise_flush();
            log::debug!(
                "EX  pc={:#06x} branch mispredicted, redirect -> {:#06x}",
                id.pc,
                actual_next
            );
        }

        cpu.predictor.update(id.pc, target, taken);
        if taken {
            cpu.stats.branches_taken += 1;
        } else {
            cpu.stats.branches_not_taken += 1;
        }
    }

    cpu.ex_mem = ExMem {
        valid: true,
        pc: id.pc,
        inst: id.inst,
        inst_size: id.inst_size,
        rd: id.rd,
        alu: alu_out,
        store_data,
        ctrl: id.ctrl,
    };
}
