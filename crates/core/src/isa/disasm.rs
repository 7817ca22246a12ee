//! Instruction disassembly.
//!
//! Renders supported instructions as assembly text for the per-cycle
//! pipeline snapshots and debug output. Each pipeline latch keeps the
//! original encoding, so any stage can be rendered without reconstructing
//! the instruction.

use crate::isa::abi::reg_name;
use crate::isa::decode::decode;
use crate::isa::rv32f::opcodes as fp_opcodes;
use crate::isa::rv32f::{funct3 as f_funct3, funct7 as f_funct7};
use crate::isa::rv32i::{funct3, funct7, opcodes};
use crate::isa::rv32m::{funct3 as m_funct3, opcodes as m_opcodes};

/// Disassembles a 32-bit instruction into assembly text.
///
/// Unrecognized encodings render as `.word <hex>`; the all-zero sentinel
/// renders as `halt`.
pub fn disassemble(inst: u32) -> String {
    if inst == 0 {
        return "halt".to_string();
    }

    let d = decode(inst);
    let rd = reg_name(d.rd);
    let rs1 = reg_name(d.rs1);
    let rs2 = reg_name(d.rs2);

    match d.opcode {
        opcodes::OP_LUI => format!("lui {}, {:#x}", rd, (d.imm as u32) >> 12),
        opcodes::OP_AUIPC => format!("auipc {}, {:#x}", rd, (d.imm as u32) >> 12),
        opcodes::OP_JAL => format!("jal {}, {}", rd, d.imm),
        opcodes::OP_JALR => format!("jalr {}, {}({})", rd, d.imm, rs1),
        opcodes::OP_BRANCH => {
            let mnem = match d.funct3 {
                funct3::BEQ => "beq",
                funct3::BNE => "bne",
                funct3::BLT => "blt",
                funct3::BGE => "bge",
                funct3::BLTU => "bltu",
                funct3::BGEU => "bgeu",
                _ => return unknown(inst),
            };
            format!("{} {}, {}, {}", mnem, rs1, rs2, d.imm)
        }
        opcodes::OP_LOAD => {
            let mnem = match d.funct3 {
                funct3::LB => "lb",
                funct3::LH => "lh",
                funct3::LW => "lw",
                funct3::LBU => "lbu",
                funct3::LHU => "lhu",
                _ => return unknown(inst),
            };
            format!("{} {}, {}({})", mnem, rd, d.imm, rs1)
        }
        opcodes::OP_STORE => {
            let mnem = match d.funct3 {
                funct3::SB => "sb",
                funct3::SH => "sh",
                funct3::SW => "sw",
                _ => return unknown(inst),
            };
            format!("{} {}, {}({})", mnem, rs2, d.imm, rs1)
        }
        opcodes::OP_IMM => match d.funct3 {
            funct3::ADD_SUB => format!("addi {}, {}, {}", rd, rs1, d.imm),
            funct3::SLT => format!("slti {}, {}, {}", rd, rs1, d.imm),
            funct3::SLTU => format!("sltiu {}, {}, {}", rd, rs1, d.imm),
            funct3::XOR => format!("xori {}, {}, {}", rd, rs1, d.imm),
            funct3::OR => format!("ori {}, {}, {}", rd, rs1, d.imm),
            funct3::AND => format!("andi {}, {}, {}", rd, rs1, d.imm),
            funct3::SLL => format!("slli {}, {}, {}", rd, rs1, d.imm & 0x1F),
            funct3::SRL_SRA => {
                if d.funct7 == funct7::SRA {
                    format!("srai {}, {}, {}", rd, rs1, d.imm & 0x1F)
                } else {
                    format!("srli {}, {}, {}", rd, rs1, d.imm & 0x1F)
                }
            }
            _ => unknown(inst),
        },
        opcodes::OP_REG => {
            let mnem = if d.funct7 == m_opcodes::M_EXTENSION {
                match d.funct3 {
                    m_funct3::MUL => "mul",
                    m_funct3::MULH => "mulh",
                    m_funct3::MULHSU => "mulhsu",
                    m_funct3::MULHU => "mulhu",
                    m_funct3::DIV => "div",
                    m_funct3::DIVU => "divu",
                    m_funct3::REM => "rem",
                    m_funct3::REMU => "remu",
                    _ => return unknown(inst),
                }
            } else {
                match (d.funct3, d.funct7) {
                    (funct3::ADD_SUB, funct7::DEFAULT) => "add",
                    (funct3::ADD_SUB, funct7::SUB) => "sub",
                    (funct3::SLL, _) => "sll",
                    (funct3::SLT, _) => "slt",
                    (funct3::SLTU, _) => "sltu",
                    (funct3::XOR, _) => "xor",
                    (funct3::SRL_SRA, funct7::SRA) => "sra",
                    (funct3::SRL_SRA, _) => "srl",
                    (funct3::OR, _) => "or",
                    (funct3::AND, _) => "and",
                    _ => return unknown(inst),
                }
            };
            format!("{} {}, {}, {}", mnem, rd, rs1, rs2)
        }
        fp_opcodes::OP_LOAD_FP => format!("flw f{}, {}({})", d.rd, d.imm, rs1),
        fp_opcodes::OP_STORE_FP => format!("fsw f{}, {}({})", d.rs2, d.imm, rs1),
        fp_opcodes::OP_FP => disassemble_fp(&d),
        _ => unknown(inst),
    }
}

/// Disassembles an OP-FP instruction.
fn disassemble_fp(d: &crate::isa::instruction::Decoded) -> String {
    let fr = |i: usize| format!("f{}", i);
    match d.funct7 {
        f_funct7::FADD => format!("fadd.s {}, {}, {}", fr(d.rd), fr(d.rs1), fr(d.rs2)),
        f_funct7::FSUB => format!("fsub.s {}, {}, {}", fr(d.rd), fr(d.rs1), fr(d.rs2)),
        f_funct7::FMUL => format!("fmul.s {}, {}, {}", fr(d.rd), fr(d.rs1), fr(d.rs2)),
        f_funct7::FDIV => format!("fdiv.s {}, {}, {}", fr(d.rd), fr(d.rs1), fr(d.rs2)),
        f_funct7::FSQRT => format!("fsqrt.s {}, {}", fr(d.rd), fr(d.rs1)),
        f_funct7::FSGNJ => {
            let mnem = match d.funct3 {
                f_funct3::FSGNJ => "fsgnj.s",
                f_funct3::FSGNJN => "fsgnjn.s",
                f_funct3::FSGNJX => "fsgnjx.s",
                _ => return unknown(d.raw),
            };
            format!("{} {}, {}, {}", mnem, fr(d.rd), fr(d.rs1), fr(d.rs2))
        }
        f_funct7::FMIN_MAX => {
            let mnem = if d.funct3 == f_funct3::FMIN {
                "fmin.s"
            } else {
                "fmax.s"
            };
            format!("{} {}, {}, {}", mnem, fr(d.rd), fr(d.rs1), fr(d.rs2))
        }
        f_funct7::FCMP => {
            let mnem = match d.funct3 {
                f_funct3::FEQ => "feq.s",
                f_funct3::FLT => "flt.s",
                f_funct3::FLE => "fle.s",
                _ => return unknown(d.raw),
            };
            format!("{} {}, {}, {}", mnem, reg_name(d.rd), fr(d.rs1), fr(d.rs2))
        }
        f_funct7::FCVT_W_S => format!("fcvt.w.s {}, {}", reg_name(d.rd), fr(d.rs1)),
        f_funct7::FCVT_S_W => format!("fcvt.s.w {}, {}", fr(d.rd), reg_name(d.rs1)),
        f_funct7::FCLASS_MV_X_W => {
            if d.funct3 == f_funct3::FCLASS {
                format!("fclass.s {}, {}", reg_name(d.rd), fr(d.rs1))
            } else {
                format!("fmv.x.w {}, {}", reg_name(d.rd), fr(d.rs1))
            }
        }
        f_funct7::FMV_W_X => format!("fmv.w.x {}, {}", fr(d.rd), reg_name(d.rs1)),
        _ => unknown(d.raw),
    }
}

fn unknown(inst: u32) -> String {
    format!(".word {:#010x}", inst)
}
