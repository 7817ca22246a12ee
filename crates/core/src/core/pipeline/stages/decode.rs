//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline:
//! 1. **Decoding:** Converts the raw instruction bits into control signals.
//! 2. **Hazard Detection:** Inserts the one-cycle load-use bubble.
//! 3. **Register Read:** Reads source operands from the integer or
//!    floating-point register file.
//! 4. **Branch Prediction:** Consults the predictor for conditional
//!    branches and redirects the PC for predicted-taken branches and JAL.

use crate::core::Cpu;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::IdEx;
use crate::core::pipeline::signals::{AluOp, ControlSignals, MemWidth, OpASrc, OpBSrc};
use crate::core::units::bru::BranchPredictor;
use crate::isa::decode::decode as instruction_decode;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::Decoded;
use crate::isa::rv32f::opcodes as f_opcodes;
use crate::isa::rv32f::{funct3 as f_funct3, funct7 as f_funct7};
use crate::isa::rv32i::{funct3 as i_funct3, funct7 as i_funct7, opcodes as i_opcodes};
use crate::isa::rv32m::{funct3 as m_funct3, opcodes as m_opcodes};

/// Format field of an OP-FP funct7 (low two bits); `00` is single precision.
const FP_FMT_MASK: u32 = 0x3;

/// Executes the instruction decode stage.
///
/// Consumes the IF/ID latch, derives control signals, reads source
/// operands, performs branch prediction, and writes the ID/EX latch. An
/// undecodable instruction becomes a bubble; a load-use hazard leaves the
/// IF/ID latch in place and inserts a bubble instead.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn decode_stage(cpu: &mut Cpu) {
    if cpu.flush {
        cpu.id_ex = IdEx::default();
        cpu.flush = false;
        return;
    }

    if !cpu.if_id.valid {
        cpu.id_ex = IdEx::default();
        return;
    }

    let inst = cpu.if_id.inst;
    let pc = cpu.if_id.pc;
    let inst_size = cpu.if_id.inst_size();
    let d = instruction_decode(inst);

    let ctrl = match derive_controls(&d) {
        Ok(c) => c,
        Err(()) => {
            if cpu.debug {
                eprintln!("ID: undecodable instruction {:#010x} at pc={:#06x}", inst, pc);
            }
            cpu.id_ex = IdEx::default();
            return;
        }
    };

    // Load-use hazard: the load ahead of us has not reached memory yet, so
    // hold this instruction in IF/ID and send one bubble down instead.
    if hazards::need_load_use_stall(&cpu.id_ex, d.rs1, d.rs2, &ctrl) {
        log::debug!("ID  pc={:#06x} load-use stall", pc);
        cpu.raise_stall();
        cpu.id_ex = IdEx::default();
        return;
    }

    cpu.stats.count_decoded(d.opcode);
    cpu.trace
        .record_decode(cpu.cycle(), pc, &d, &ctrl);

    let rv1 = if ctrl.rs1_fp {
        cpu.regs.read_f(d.rs1)
    } else {
        cpu.regs.read(d.rs1)
    };
    let rv2 = if ctrl.rs2_fp {
        cpu.regs.read_f(d.rs2)
    } else {
        cpu.regs.read(d.rs2)
    };

    let fallthrough = pc.wrapping_add(inst_size);
    let mut pred_taken = false;
    let mut pred_target = fallthrough;

    if ctrl.branch {
        let target = pc.wrapping_add(d.imm as u32);
        let pred = cpu.predictor.predict(pc, target, fallthrough);
        pred_taken = pred.taken;
        pred_target = pred.target;
        if pred.taken {
            // Speculative redirect; IF drops the wrong-path slot this tick.
            cpu.pc = pred.target;
            cpu.raise_flush();
        }
    } else if ctrl.jump && d.opcode == i_opcodes::OP_JAL {
        // The JAL target is fully decodable here, so redirect immediately
        // and record an always-taken, always-correct prediction for EX.
        let target = pc.wrapping_add(d.imm as u32);
        pred_taken = true;
        pred_target = target;
        cpu.pc = target;
        cpu.raise_flush();
    }

    if cpu.debug {
        println!("ID: {}", disassemble(inst));
    }

    cpu.id_ex = IdEx {
        valid: true,
        pc,
        inst,
        inst_size,
        rd: d.rd,
        rs1: d.rs1,
        rs2: d.rs2,
        imm: d.imm,
        rv1,
        rv2,
        ctrl,
        pred_taken,
        pred_target,
    };
}

/// Derives the control signals for a decoded instruction.
///
/// Returns `Err(())` for unrecognized opcodes, illegal funct3/funct7
/// combinations, and non-single-precision FP formats; the caller turns
/// those into bubbles.
fn derive_controls(d: &Decoded) -> Result<ControlSignals, ()> {
    let mut c = ControlSignals {
        a_src: OpASrc::Reg1,
        b_src: OpBSrc::Imm,
        alu: AluOp::Add,
        ..Default::default()
    };

    match d.opcode {
        i_opcodes::OP_LUI => {
            c.reg_write = true;
            c.upper_imm = true;
            c.a_src = OpASrc::Zero;
        }
        i_opcodes::OP_AUIPC => {
            c.reg_write = true;
            c.upper_imm = true;
            c.a_src = OpASrc::Pc;
        }
        i_opcodes::OP_JAL => {
            c.reg_write = true;
            c.jump = true;
        }
        i_opcodes::OP_JALR => {
            if d.funct3 != 0 {
                return Err(());
            }
            c.reg_write = true;
            c.jump = true;
        }
        i_opcodes::OP_BRANCH => {
            c.branch = true;
            c.b_src = OpBSrc::Reg2;
            c.alu = match d.funct3 {
                i_funct3::BEQ => AluOp::BranchEq,
                i_funct3::BNE => AluOp::BranchNe,
                i_funct3::BLT => AluOp::BranchLt,
                i_funct3::BGE => AluOp::BranchGe,
                i_funct3::BLTU => AluOp::BranchLtu,
                i_funct3::BGEU => AluOp::BranchGeu,
                _ => return Err(()),
            };
        }
        i_opcodes::OP_LOAD => {
            c.reg_write = true;
            c.mem_read = true;
            c.mem_to_reg = true;
            let (width, signed) = match d.funct3 {
                i_funct3::LB => (MemWidth::Byte, true),
                i_funct3::LH => (MemWidth::Half, true),
                i_funct3::LW => (MemWidth::Word, true),
                i_funct3::LBU => (MemWidth::Byte, false),
                i_funct3::LHU => (MemWidth::Half, false),
                _ => return Err(()),
            };
            c.width = width;
            c.signed_load = signed;
        }
        i_opcodes::OP_STORE => {
            c.mem_write = true;
            c.width = match d.funct3 {
                i_funct3::SB => MemWidth::Byte,
                i_funct3::SH => MemWidth::Half,
                i_funct3::SW => MemWidth::Word,
                _ => return Err(()),
            };
        }
        i_opcodes::OP_IMM => {
            c.reg_write = true;
            c.alu = match d.funct3 {
                i_funct3::ADD_SUB => AluOp::Add,
                i_funct3::SLT => AluOp::Slt,
                i_funct3::SLTU => AluOp::Sltu,
                i_funct3::XOR => AluOp::Xor,
                i_funct3::OR => AluOp::Or,
                i_funct3::AND => AluOp::And,
                i_funct3::SLL => {
                    if d.funct7 != i_funct7::DEFAULT {
                        return Err(());
                    }
                    AluOp::Sll
                }
                i_funct3::SRL_SRA => match d.funct7 {
                    i_funct7::DEFAULT => AluOp::Srl,
                    i_funct7::SRA => AluOp::Sra,
                    _ => return Err(()),
                },
                _ => return Err(()),
            };
        }
        i_opcodes::OP_REG => {
            c.reg_write = true;
            c.b_src = OpBSrc::Reg2;
            if d.funct7 == m_opcodes::M_EXTENSION {
                c.alu = match d.funct3 {
                    m_funct3::MUL => AluOp::Mul,
                    m_funct3::MULH => AluOp::Mulh,
                    m_funct3::MULHSU => AluOp::Mulhsu,
                    m_funct3::MULHU => AluOp::Mulhu,
                    m_funct3::DIV => AluOp::Div,
                    m_funct3::DIVU => AluOp::Divu,
                    m_funct3::REM => AluOp::Rem,
                    m_funct3::REMU => AluOp::Remu,
                    _ => return Err(()),
                };
            } else {
                c.alu = match (d.funct3, d.funct7) {
                    (i_funct3::ADD_SUB, i_funct7::DEFAULT) => AluOp::Add,
                    (i_funct3::ADD_SUB, i_funct7::SUB) => AluOp::Sub,
                    (i_funct3::SLL, i_funct7::DEFAULT) => AluOp::Sll,
                    (i_funct3::SLT, i_funct7::DEFAULT) => AluOp::Slt,
                    (i_funct3::SLTU, i_funct7::DEFAULT) => AluOp::Sltu,
                    (i_funct3::XOR, i_funct7::DEFAULT) => AluOp::Xor,
                    (i_funct3::SRL_SRA, i_funct7::DEFAULT) => AluOp::Srl,
                    (i_funct3::SRL_SRA, i_funct7::SRA) => AluOp::Sra,
                    (i_funct3::OR, i_funct7::DEFAULT) => AluOp::Or,
                    (i_funct3::AND, i_funct7::DEFAULT) => AluOp::And,
                    _ => return Err(()),
                };
            }
        }
        f_opcodes::OP_LOAD_FP => {
            if d.funct3 != f_funct3::WIDTH_WORD {
                return Err(());
            }
            c.fp_reg_write = true;
            c.mem_read = true;
            c.mem_to_reg = true;
            c.width = MemWidth::Word;
        }
        f_opcodes::OP_STORE_FP => {
            if d.funct3 != f_funct3::WIDTH_WORD {
                return Err(());
            }
            c.mem_write = true;
            c.rs2_fp = true;
            c.width = MemWidth::Word;
        }
        f_opcodes::OP_FP => derive_fp_controls(d, &mut c)?,
        _ => return Err(()),
    }

    Ok(c)
}

/// Derives control signals for the OP-FP opcode.
fn derive_fp_controls(d: &Decoded, c: &mut ControlSignals) -> Result<(), ()> {
    // Only the single-precision format is supported.
    if d.funct7 & FP_FMT_MASK != 0 {
        return Err(());
    }

    c.rs1_fp = true;
    c.rs2_fp = true;
    c.fp_reg_write = true;
    c.b_src = OpBSrc::Reg2;

    c.alu = match d.funct7 {
        f_funct7::FADD => AluOp::FAdd,
        f_funct7::FSUB => AluOp::FSub,
        f_funct7::FMUL => AluOp::FMul,
        f_funct7::FDIV => AluOp::FDiv,
        f_funct7::FSQRT => {
            if d.rs2 != 0 {
                return Err(());
            }
            AluOp::FSqrt
        }
        f_funct7::FSGNJ => match d.funct3 {
            f_funct3::FSGNJ => AluOp::FSgnJ,
            f_funct3::FSGNJN => AluOp::FSgnJn,
            f_funct3::FSGNJX => AluOp::FSgnJx,
            _ => return Err(()),
        },
        f_funct7::FMIN_MAX => match d.funct3 {
            f_funct3::FMIN => AluOp::FMin,
            f_funct3::FMAX => AluOp::FMax,
            _ => return Err(()),
        },
        f_funct7::FCMP => {
            c.fp_reg_write = false;
            c.reg_write = true;
            match d.funct3 {
                f_funct3::FEQ => AluOp::FEq,
                f_funct3::FLT => AluOp::FLt,
                f_funct3::FLE => AluOp::FLe,
                _ => return Err(()),
            }
        }
        f_funct7::FCVT_W_S => {
            if d.rs2 != 0 {
                return Err(());
            }
            c.fp_reg_write = false;
            c.reg_write = true;
            AluOp::FCvtWS
        }
        f_funct7::FCVT_S_W => {
            if d.rs2 != 0 {
                return Err(());
            }
            c.rs1_fp = false;
            AluOp::FCvtSW
        }
        f_funct7::FCLASS_MV_X_W => {
            c.fp_reg_write = false;
            c.reg_write = true;
            match d.funct3 {
                f_funct3::FMV_X_W => AluOp::FMvXW,
                f_funct3::FCLASS => AluOp::FClass,
                _ => return Err(()),
            }
        }
        f_funct7::FMV_W_X => {
            if d.funct3 != 0 {
                return Err(());
            }
            c.rs1_fp = false;
            AluOp::FMvWX
        }
        _ => return Err(()),
    };

    Ok(())
}
