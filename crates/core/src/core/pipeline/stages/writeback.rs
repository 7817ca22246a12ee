//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the pipeline. It commits
//! results to the integer or floating-point register file, records
//! register changes for the trace, and counts retired instructions.
//! Every valid MEM/WB latch retires, so the retired count equals the
//! committed-instruction count.

use crate::core::Cpu;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn wb_stage(cpu: &mut Cpu) {
    if !cpu.mem_wb.valid {
        return;
    }

    let wb = cpu.mem_wb.clone();
    let val = wb.write_value();

    if wb.ctrl.fp_reg_write {
        cpu.regs.write_f(wb.rd, val);
        log::debug!("WB  pc={:#06x} f{} <= {:#010x}", wb.pc, wb.rd, val);
    } else if wb.ctrl.reg_write && wb.rd != 0 {
        let old = cpu.regs.read(wb.rd);
        cpu.regs.write(wb.rd, val);
        cpu.trace
            .record_register_change(cpu.cycle(), wb.rd, old, val, wb.pc);
        log::debug!("WB  pc={:#06x} x{} <= {:#010x}", wb.pc, wb.rd, val);
    }

    cpu.stats.instructions_retired += 1;
}
