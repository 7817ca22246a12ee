//! RV32C encoding constants.
//!
//! Compressed instructions are grouped into three quadrants by their low two
//! bits; within a quadrant the top three bits (funct3) select the operation.

/// Quadrant 0 (low bits 00): stack-pointer-relative and register loads/stores.
pub const QUADRANT_0: u16 = 0b00;
/// Quadrant 1 (low bits 01): immediates, control flow, and register ALU ops.
pub const QUADRANT_1: u16 = 0b01;
/// Quadrant 2 (low bits 10): shifts and stack-pointer loads/stores.
pub const QUADRANT_2: u16 = 0b10;

/// Quadrant 0 funct3 values.
pub mod q0 {
    /// ADDI4SPN: add scaled immediate to stack pointer.
    pub const C_ADDI4SPN: u16 = 0b000;
    /// LW: load word, register-relative.
    pub const C_LW: u16 = 0b010;
    /// SW: store word, register-relative.
    pub const C_SW: u16 = 0b110;
}

/// Quadrant 1 funct3 values.
pub mod q1 {
    /// ADDI: add sign-extended 6-bit immediate.
    pub const C_ADDI: u16 = 0b000;
    /// JAL: jump and link (RV32 only; x1 is the implicit link register).
    pub const C_JAL: u16 = 0b001;
    /// LI: load immediate.
    pub const C_LI: u16 = 0b010;
    /// LUI or ADDI16SP, selected by the destination register.
    pub const C_LUI_ADDI16SP: u16 = 0b011;
    /// Register ALU group: SRLI, SRAI, ANDI, SUB, XOR, OR, AND.
    pub const C_MISC_ALU: u16 = 0b100;
    /// J: unconditional jump.
    pub const C_J: u16 = 0b101;
    /// BEQZ: branch if register is zero.
    pub const C_BEQZ: u16 = 0b110;
    /// BNEZ: branch if register is non-zero.
    pub const C_BNEZ: u16 = 0b111;
}

/// Quadrant 2 funct3 values.
pub mod q2 {
    /// SLLI: shift left logical immediate.
    pub const C_SLLI: u16 = 0b000;
    /// LWSP: load word, stack-pointer-relative.
    pub const C_LWSP: u16 = 0b010;
    /// JR, MV, JALR, ADD group, selected by bit 12 and the register fields.
    pub const C_JR_MV_ADD: u16 = 0b100;
    /// SWSP: store word, stack-pointer-relative.
    pub const C_SWSP: u16 = 0b110;
}
