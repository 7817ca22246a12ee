//! RISC-V Base Integer (I) funct7 values.

/// Default function code for the primary R-type encoding.
pub const DEFAULT: u32 = 0b0000000;

/// Alternate encoding selector (SUB instead of ADD).
pub const SUB: u32 = 0b0100000;

/// Alternate encoding selector (SRA instead of SRL).
pub const SRA: u32 = 0b0100000;
