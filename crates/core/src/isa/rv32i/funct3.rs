//! RISC-V Base Integer (I) funct3 values.
//!
//! Defines the 3-bit function codes that select operations within a major
//! opcode.

// OP / OP-IMM arithmetic selectors.

/// ADD/SUB (R-type) and ADDI (I-type).
pub const ADD_SUB: u32 = 0b000;
/// Shift left logical (SLL/SLLI).
pub const SLL: u32 = 0b001;
/// Set less than, signed (SLT/SLTI).
pub const SLT: u32 = 0b010;
/// Set less than, unsigned (SLTU/SLTIU).
pub const SLTU: u32 = 0b011;
/// Bitwise exclusive OR (XOR/XORI).
pub const XOR: u32 = 0b100;
/// Shift right logical/arithmetic (SRL/SRA, SRLI/SRAI).
pub const SRL_SRA: u32 = 0b101;
/// Bitwise OR (OR/ORI).
pub const OR: u32 = 0b110;
/// Bitwise AND (AND/ANDI).
pub const AND: u32 = 0b111;

// Load width selectors.

/// Load byte, sign-extended.
pub const LB: u32 = 0b000;
/// Load half-word, sign-extended.
pub const LH: u32 = 0b001;
/// Load word.
pub const LW: u32 = 0b010;
/// Load byte, zero-extended.
pub const LBU: u32 = 0b100;
/// Load half-word, zero-extended.
pub const LHU: u32 = 0b101;

// Store width selectors.

/// Store byte.
pub const SB: u32 = 0b000;
/// Store half-word.
pub const SH: u32 = 0b001;
/// Store word.
pub const SW: u32 = 0b010;

// Branch condition selectors.

/// Branch if equal.
pub const BEQ: u32 = 0b000;
/// Branch if not equal.
pub const BNE: u32 = 0b001;
/// Branch if less than, signed.
pub const BLT: u32 = 0b100;
/// Branch if greater than or equal, signed.
pub const BGE: u32 = 0b101;
/// Branch if less than, unsigned.
pub const BLTU: u32 = 0b110;
/// Branch if greater than or equal, unsigned.
pub const BGEU: u32 = 0b111;
