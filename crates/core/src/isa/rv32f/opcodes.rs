//! RV32F major opcodes.

/// Single-precision floating-point load (FLW).
pub const OP_LOAD_FP: u32 = 0b0000111;

/// Single-precision floating-point store (FSW).
pub const OP_STORE_FP: u32 = 0b0100111;

/// Single-precision floating-point computation (OP-FP).
pub const OP_FP: u32 = 0b1010011;
