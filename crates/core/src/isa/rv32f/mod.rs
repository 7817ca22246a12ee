//! RV32F single-precision floating-point extension tables.

/// Function-code (funct3) values for RV32F.
pub mod funct3;

/// Function-code (funct7) values for RV32F.
pub mod funct7;

/// Major opcodes for RV32F.
pub mod opcodes;
