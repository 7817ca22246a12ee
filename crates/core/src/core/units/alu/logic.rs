//! ALU logical, comparison, and branch-condition operations.
//!
//! The branch-comparison operations produce 1 when the branch condition
//! holds and 0 otherwise; the ALU turns that into the zero flag the
//! Execute stage uses to resolve conditional branches.

use crate::core::pipeline::signals::AluOp;

/// Executes a logical, comparison, or branch-condition operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a logic variant).
/// * `a`  - First operand (32-bit value).
/// * `b`  - Second operand (32-bit value).
///
/// # Returns
///
/// The 32-bit result (0 or 1 for comparisons). Returns `0` for
/// non-logic opcodes.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Xor => a ^ b,
        AluOp::Slt => ((a as i32) < (b as i32)) as u32,
        AluOp::Sltu => (a < b) as u32,
        AluOp::BranchEq => (a == b) as u32,
        AluOp::BranchNe => (a != b) as u32,
        AluOp::BranchLt => ((a as i32) < (b as i32)) as u32,
        AluOp::BranchGe => ((a as i32) >= (b as i32)) as u32,
        AluOp::BranchLtu => (a < b) as u32,
        AluOp::BranchGeu => (a >= b) as u32,
        _ => 0,
    }
}
