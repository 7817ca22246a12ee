//! RV32F funct3 values.

/// FLW/FSW width selector (32-bit word).
pub const WIDTH_WORD: u32 = 0b010;

/// Sign-injection: copy sign (FSGNJ.S).
pub const FSGNJ: u32 = 0b000;
/// Sign-injection: negated sign (FSGNJN.S).
pub const FSGNJN: u32 = 0b001;
/// Sign-injection: XOR sign (FSGNJX.S).
pub const FSGNJX: u32 = 0b010;

/// Minimum (FMIN.S).
pub const FMIN: u32 = 0b000;
/// Maximum (FMAX.S).
pub const FMAX: u32 = 0b001;

/// Ordered less-than-or-equal comparison (FLE.S).
pub const FLE: u32 = 0b000;
/// Ordered less-than comparison (FLT.S).
pub const FLT: u32 = 0b001;
/// Ordered equality comparison (FEQ.S).
pub const FEQ: u32 = 0b010;

/// Bitwise move FP to integer (FMV.X.W).
pub const FMV_X_W: u32 = 0b000;
/// Classification (FCLASS.S).
pub const FCLASS: u32 = 0b001;
