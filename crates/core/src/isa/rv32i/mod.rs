//! RV32I base integer instruction set tables.

/// Function-code (funct3) values for RV32I.
pub mod funct3;

/// Function-code (funct7) values for RV32I.
pub mod funct7;

/// Major opcodes for RV32I.
pub mod opcodes;
