//! Data hazard detection and forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency
//! when data dependencies exist between instructions:
//! 1. **Load-Use Detection:** Identifies the one hazard forwarding cannot
//!    cover, a load immediately followed by a consumer of its destination.
//! 2. **Operand Forwarding:** Resolves Read-After-Write hazards by bypassing
//!    the register file with results still in flight.
//!
//! Forwarding reads exclusively from the EX/MEM and MEM/WB snapshots taken
//! at the top of the tick, so the execute stage observes the previous
//! cycle's results regardless of stage evaluation order.

use crate::core::pipeline::latches::{ExMem, IdEx, MemWb};
use crate::core::pipeline::signals::{ControlSignals, OpASrc, OpBSrc};

/// Checks whether the instruction being decoded must stall one cycle
/// behind an in-flight load.
///
/// A load-use hazard exists when the instruction currently in the ID/EX
/// latch is a load whose destination is a source of the instruction being
/// decoded. The loaded value only becomes forwardable from the MEM/WB
/// snapshot one cycle later, so decode inserts exactly one bubble.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX latch as it stood at the start of this tick
///   (the potential producer load).
/// * `rs1` / `rs2` - Source register indices of the incoming instruction.
/// * `ctrl` - Decoded control signals of the incoming instruction,
///   used to determine which sources it actually reads and from which
///   register file.
pub fn need_load_use_stall(id_ex: &IdEx, rs1: usize, rs2: usize, ctrl: &ControlSignals) -> bool {
    if !id_ex.valid || !id_ex.ctrl.mem_read {
        return false;
    }

    let producer_fp = id_ex.ctrl.fp_reg_write;
    if !producer_fp && id_ex.rd == 0 {
        return false;
    }

    let reads_rs1 = ctrl.a_src == OpASrc::Reg1 || ctrl.rs1_fp;
    let reads_rs2 = ctrl.b_src == OpBSrc::Reg2 || ctrl.mem_write || ctrl.rs2_fp;

    (reads_rs1 && ctrl.rs1_fp == producer_fp && id_ex.rd == rs1)
        || (reads_rs2 && ctrl.rs2_fp == producer_fp && id_ex.rd == rs2)
}

/// Forwards register values from the pipeline snapshots to resolve data
/// hazards.
///
/// For each source operand independently, the priority is:
/// 1. The EX/MEM snapshot's ALU result, when that instruction writes the
///    matching register (loads are excluded there; their latch holds the
///    address, and the load-use stall guarantees the value is never needed
///    from that position).
/// 2. The MEM/WB snapshot, selecting the loaded value for loads and the
///    ALU result otherwise.
/// 3. The value read from the register file during decode.
///
/// Destination x0 never forwards; floating-point operands match only
/// floating-point producers.
///
/// # Returns
///
/// A tuple `(rs1_val, rs2_val)` of the most recent available values.
pub fn forward_operands(id: &IdEx, ex_mem_prev: &ExMem, mem_wb_prev: &MemWb) -> (u32, u32) {
    let matches = |dest: usize, dest_fp: bool, src: usize, src_fp: bool| -> bool {
        dest_fp == src_fp && dest == src && (dest_fp || dest != 0)
    };

    let resolve = |src: usize, src_fp: bool, latched: u32| -> u32 {
        if ex_mem_prev.valid
            && (ex_mem_prev.ctrl.reg_write || ex_mem_prev.ctrl.fp_reg_write)
            && !ex_mem_prev.ctrl.mem_read
            && matches(ex_mem_prev.rd, ex_mem_prev.ctrl.fp_reg_write, src, src_fp)
        {
            return ex_mem_prev.alu;
        }
        if mem_wb_prev.valid
            && (mem_wb_prev.ctrl.reg_write || mem_wb_prev.ctrl.fp_reg_write)
            && matches(mem_wb_prev.rd, mem_wb_prev.ctrl.fp_reg_write, src, src_fp)
        {
            return mem_wb_prev.write_value();
        }
        latched
    };

    (
        resolve(id.rs1, id.ctrl.rs1_fp, id.rv1),
        resolve(id.rs2, id.ctrl.rs2_fp, id.rv2),
    )
}
