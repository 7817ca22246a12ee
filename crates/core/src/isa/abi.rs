//! RISC-V Application Binary Interface (ABI) register names.
//!
//! Defines the standard ABI names of the 32 general-purpose registers for
//! use in disassembly and register dumps.

/// ABI names for the 32 general-purpose registers, indexed by register number.
pub const REGISTER_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1",
    "a2", "a3", "a4", "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7",
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6",
];

/// Returns the ABI name for a general-purpose register index.
///
/// Indices outside 0-31 render as `x?`.
pub fn reg_name(idx: usize) -> &'static str {
    REGISTER_NAMES.get(idx).copied().unwrap_or("x?")
}
