//! Compressed Instruction Expansion.
//!
//! Provides the `expand` function which converts a 16-bit compressed
//! instruction into its 32-bit uncompressed equivalent. A return value of
//! zero marks a reserved or unsupported encoding; the fetch stage turns it
//! into a bubble.

use super::constants::{QUADRANT_0, QUADRANT_1, QUADRANT_2, q0, q1, q2};
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Link register (x1) used by C.JAL and C.JALR.
const REG_LINK: u32 = 1;

/// Stack pointer (x2) used by the SP-relative encodings.
const REG_SP: u32 = 2;

/// Expands a 16-bit RVC instruction into its 32-bit equivalent.
///
/// Covers the RV32C quadrant 00/01/10 subset: ADDI4SPN, LW, SW, ADDI, JAL,
/// LI, ADDI16SP/LUI, SRLI/SRAI/ANDI/SUB/XOR/OR/AND, J, BEQZ, BNEZ, SLLI,
/// LWSP, JR/MV, JALR/ADD, SWSP. Returns 0 for reserved encodings.
pub fn expand(inst: u16) -> u32 {
    let op = inst & 0x3;
    let funct3 = (inst >> 13) & 0x7;

    match op {
        QUADRANT_0 => match funct3 {
            q0::C_ADDI4SPN => {
                let imm = ((inst >> 6) & 1) << 2
                    | ((inst >> 5) & 1) << 3
                    | ((inst >> 11) & 0x3) << 4
                    | ((inst >> 7) & 0xF) << 6;
                if imm == 0 {
                    return 0;
                }
                let rd = 8 + ((inst >> 2) & 0x7) as u32;
                encode_i(opcodes::OP_IMM, funct3::ADD_SUB, rd, REG_SP, imm as i32)
            }
            q0::C_LW => {
                let imm =
                    ((inst >> 6) & 1) << 2 | ((inst >> 10) & 0x7) << 3 | ((inst >> 5) & 1) << 6;
                let rs1 = 8 + ((inst >> 7) & 0x7) as u32;
                let rd = 8 + ((inst >> 2) & 0x7) as u32;
                encode_i(opcodes::OP_LOAD, funct3::LW, rd, rs1, imm as i32)
            }
            q0::C_SW => {
                let imm =
                    ((inst >> 6) & 1) << 2 | ((inst >> 10) & 0x7) << 3 | ((inst >> 5) & 1) << 6;
                let rs1 = 8 + ((inst >> 7) & 0x7) as u32;
                let rs2 = 8 + ((inst >> 2) & 0x7) as u32;
                encode_s(opcodes::OP_STORE, funct3::SW, rs1, rs2, imm as i32)
            }
            _ => 0,
        },

        QUADRANT_1 => match funct3 {
            q1::C_ADDI => {
                let imm = imm6(inst);
                let rd = reg_full(inst);
                encode_i(opcodes::OP_IMM, funct3::ADD_SUB, rd, rd, imm)
            }
            q1::C_JAL => encode_j(opcodes::OP_JAL, REG_LINK, cj_offset(inst)),
            q1::C_LI => {
                let rd = reg_full(inst);
                encode_i(opcodes::OP_IMM, funct3::ADD_SUB, rd, 0, imm6(inst))
            }
            q1::C_LUI_ADDI16SP => {
                let rd = reg_full(inst);
                if rd == REG_SP {
                    let imm = sign_extend(
                        (((inst >> 6) & 1) << 4
                            | ((inst >> 2) & 1) << 5
                            | ((inst >> 5) & 1) << 6
                            | ((inst >> 3) & 0x3) << 7
                            | ((inst >> 12) & 1) << 9) as u32,
                        10,
                    );
                    if imm == 0 {
                        return 0;
                    }
                    encode_i(opcodes::OP_IMM, funct3::ADD_SUB, REG_SP, REG_SP, imm)
                } else {
                    let imm = imm6(inst);
                    if imm == 0 || rd == 0 {
                        return 0;
                    }
                    (((imm as u32) & 0xFFFFF) << 12) | (rd << 7) | opcodes::OP_LUI
                }
            }
            q1::C_MISC_ALU => expand_misc_alu(inst),
            q1::C_J => encode_j(opcodes::OP_JAL, 0, cj_offset(inst)),
            q1::C_BEQZ => {
                let rs1 = 8 + ((inst >> 7) & 0x7) as u32;
                encode_b(funct3::BEQ, rs1, 0, cb_offset(inst))
            }
            q1::C_BNEZ => {
                let rs1 = 8 + ((inst >> 7) & 0x7) as u32;
                encode_b(funct3::BNE, rs1, 0, cb_offset(inst))
            }
            _ => 0,
        },

        QUADRANT_2 => match funct3 {
            q2::C_SLLI => {
                let rd = reg_full(inst);
                // RV32 reserves shamt[5] (bit 12) set.
                if rd == 0 || (inst >> 12) & 1 != 0 {
                    return 0;
                }
                let shamt = ((inst >> 2) & 0x1F) as i32;
                encode_i(opcodes::OP_IMM, funct3::SLL, rd, rd, shamt)
            }
            q2::C_LWSP => {
                let rd = reg_full(inst);
                if rd == 0 {
                    return 0;
                }
                let imm = ((inst >> 4) & 0x7) << 2
                    | ((inst >> 12) & 1) << 5
                    | ((inst >> 2) & 0x3) << 6;
                encode_i(opcodes::OP_LOAD, funct3::LW, rd, REG_SP, imm as i32)
            }
            q2::C_JR_MV_ADD => {
                let rd = reg_full(inst);
                let rs2 = ((inst >> 2) & 0x1F) as u32;
                let high = (inst >> 12) & 1;
                match (high, rs2) {
                    (0, 0) => {
                        if rd == 0 {
                            return 0;
                        }
                        // C.JR: jalr x0, 0(rd)
                        encode_i(opcodes::OP_JALR, 0, 0, rd, 0)
                    }
                    // C.MV: add rd, x0, rs2
                    (0, _) => encode_r(funct3::ADD_SUB, funct7::DEFAULT, rd, 0, rs2),
                    (1, 0) => {
                        if rd == 0 {
                            // C.EBREAK is not part of the supported subset.
                            return 0;
                        }
                        // C.JALR: jalr x1, 0(rd)
                        encode_i(opcodes::OP_JALR, 0, REG_LINK, rd, 0)
                    }
                    // C.ADD: add rd, rd, rs2
                    (1, _) => encode_r(funct3::ADD_SUB, funct7::DEFAULT, rd, rd, rs2),
                    _ => 0,
                }
            }
            q2::C_SWSP => {
                let rs2 = ((inst >> 2) & 0x1F) as u32;
                let imm = ((inst >> 9) & 0xF) << 2 | ((inst >> 7) & 0x3) << 6;
                encode_s(opcodes::OP_STORE, funct3::SW, REG_SP, rs2, imm as i32)
            }
            _ => 0,
        },

        _ => 0,
    }
}

/// Expands the quadrant 1 register-ALU group (funct3 = 100).
fn expand_misc_alu(inst: u16) -> u32 {
    let rd = 8 + ((inst >> 7) & 0x7) as u32;
    match (inst >> 10) & 0x3 {
        0b00 => {
            // C.SRLI; shamt[5] is reserved on RV32.
            if (inst >> 12) & 1 != 0 {
                return 0;
            }
            let shamt = ((inst >> 2) & 0x1F) as i32;
            encode_i(opcodes::OP_IMM, funct3::SRL_SRA, rd, rd, shamt)
        }
        0b01 => {
            if (inst >> 12) & 1 != 0 {
                return 0;
            }
            let shamt = ((inst >> 2) & 0x1F) as i32;
            encode_i(
                opcodes::OP_IMM,
                funct3::SRL_SRA,
                rd,
                rd,
                shamt | ((funct7::SRA as i32) << 5),
            )
        }
        0b10 => encode_i(opcodes::OP_IMM, funct3::AND, rd, rd, imm6(inst)),
        0b11 => {
            if (inst >> 12) & 1 != 0 {
                return 0;
            }
            let rs2 = 8 + ((inst >> 2) & 0x7) as u32;
            match (inst >> 5) & 0x3 {
                0b00 => encode_r(funct3::ADD_SUB, funct7::SUB, rd, rd, rs2),
                0b01 => encode_r(funct3::XOR, funct7::DEFAULT, rd, rd, rs2),
                0b10 => encode_r(funct3::OR, funct7::DEFAULT, rd, rd, rs2),
                _ => encode_r(funct3::AND, funct7::DEFAULT, rd, rd, rs2),
            }
        }
        _ => 0,
    }
}

/// Extracts the full 5-bit register field at bits 11:7.
fn reg_full(inst: u16) -> u32 {
    ((inst >> 7) & 0x1F) as u32
}

/// Extracts the sign-extended 6-bit immediate (bit 12 and bits 6:2).
fn imm6(inst: u16) -> i32 {
    sign_extend((((inst >> 2) & 0x1F) | ((inst >> 12) & 1) << 5) as u32, 6)
}

/// Extracts the CJ-format jump offset (C.J/C.JAL).
fn cj_offset(inst: u16) -> i32 {
    let i = inst as u32;
    let combined = ((i >> 12) & 1) << 11
        | ((i >> 11) & 1) << 4
        | ((i >> 9) & 0x3) << 8
        | ((i >> 8) & 1) << 10
        | ((i >> 7) & 1) << 6
        | ((i >> 6) & 1) << 7
        | ((i >> 3) & 0x7) << 1
        | ((i >> 2) & 1) << 5;
    sign_extend(combined, 12)
}

/// Extracts the CB-format branch offset (C.BEQZ/C.BNEZ).
fn cb_offset(inst: u16) -> i32 {
    let i = inst as u32;
    let combined = ((i >> 12) & 1) << 8
        | ((i >> 10) & 0x3) << 3
        | ((i >> 5) & 0x3) << 6
        | ((i >> 3) & 0x3) << 1
        | ((i >> 2) & 1) << 5;
    sign_extend(combined, 9)
}

/// Packs an I-type instruction.
fn encode_i(opcode: u32, f3: u32, rd: u32, rs1: u32, imm: i32) -> u32 {
    (((imm as u32) & 0xFFF) << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | opcode
}

/// Packs an R-type instruction under the OP opcode.
fn encode_r(f3: u32, f7: u32, rd: u32, rs1: u32, rs2: u32) -> u32 {
    (f7 << 25) | (rs2 << 20) | (rs1 << 15) | (f3 << 12) | (rd << 7) | opcodes::OP_REG
}

/// Packs an S-type instruction.
fn encode_s(opcode: u32, f3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    (((imm >> 5) & 0x7F) << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (f3 << 12)
        | ((imm & 0x1F) << 7)
        | opcode
}

/// Packs a B-type instruction under the BRANCH opcode.
fn encode_b(f3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    (((imm >> 12) & 1) << 31)
        | (((imm >> 5) & 0x3F) << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (f3 << 12)
        | (((imm >> 1) & 0xF) << 8)
        | (((imm >> 11) & 1) << 7)
        | opcodes::OP_BRANCH
}

/// Packs a J-type instruction under the JAL opcode.
fn encode_j(opcode: u32, rd: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    (((imm >> 20) & 1) << 31)
        | (((imm >> 1) & 0x3FF) << 21)
        | (((imm >> 11) & 1) << 20)
        | (((imm >> 12) & 0xFF) << 12)
        | (rd << 7)
        | opcode
}

/// Sign extends a value of `bits` width to a 32-bit signed integer.
fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((val << shift) as i32) >> shift
}
