//! RV32M multiply/divide extension tables.

/// Function-code (funct3) values for RV32M.
pub mod funct3;

/// Opcode-level selectors for RV32M.
pub mod opcodes;
