//! Compressed-instruction expansion tests.
//!
//! Each case checks a hand-assembled 16-bit encoding against the expected
//! 32-bit expansion (or against zero for reserved encodings).

use rvpipe_core::isa::decode::decode;
use rvpipe_core::isa::rv32i::opcodes;
use rvpipe_core::isa::rvc::expand::expand;

#[test]
fn c_addi_expands_to_addi() {
    // c.addi x8, 4  => 000 0 01000 00100 01
    let c = 0b000_0_01000_00100_01u16;
    let d = decode(expand(c));
    assert_eq!(d.opcode, opcodes::OP_IMM);
    assert_eq!(d.rd, 8);
    assert_eq!(d.rs1, 8);
    assert_eq!(d.imm, 4);
}

#[test]
fn c_addi_negative_immediate() {
    // c.addi x8, -1: imm6 = 111111
    let c = 0b000_1_01000_11111_01u16;
    let d = decode(expand(c));
    assert_eq!(d.imm, -1);
}

#[test]
fn c_li_expands_to_addi_from_x0() {
    // c.li x10, 7
    let c = 0b010_0_01010_00111_01u16;
    let d = decode(expand(c));
    assert_eq!(d.opcode, opcodes::OP_IMM);
    assert_eq!(d.rd, 10);
    assert_eq!(d.rs1, 0);
    assert_eq!(d.imm, 7);
}

#[test]
fn c_lw_expands_with_scaled_offset() {
    // c.lw x10, 8(x9): funct3=010, uimm[5:3]=001 -> inst[12:10],
    // rs1'=001 (x9), uimm[2]=0 inst[6], uimm[6]=0 inst[5], rd'=010 (x10).
    let c = 0b010_001_001_0_0_010_00u16;
    let d = decode(expand(c));
    assert_eq!(d.opcode, opcodes::OP_LOAD);
    assert_eq!(d.rd, 10);
    assert_eq!(d.rs1, 9);
    assert_eq!(d.funct3, 0b010);
    assert_eq!(d.imm, 8);
}

#[test]
fn c_sw_expands_with_scaled_offset() {
    // c.sw x10, 8(x9)
    let c = 0b110_001_001_0_0_010_00u16;
    let d = decode(expand(c));
    assert_eq!(d.opcode, opcodes::OP_STORE);
    assert_eq!(d.rs1, 9);
    assert_eq!(d.rs2, 10);
    assert_eq!(d.imm, 8);
}

#[test]
fn c_addi4spn_zero_immediate_is_reserved() {
    let c = 0b000_00000000_010_00u16;
    assert_eq!(expand(c), 0);
}

#[test]
fn c_addi4spn_expands_to_sp_relative_addi() {
    // nzuimm = 8: only uimm[3] is set, which lives at inst[5]; rd' = x10.
    let c = 0b000_00000001_010_00u16;
    let d = decode(expand(c));
    assert_eq!(d.opcode, opcodes::OP_IMM);
    assert_eq!(d.rd, 10);
    assert_eq!(d.rs1, 2);
    assert_eq!(d.imm, 8);
}

#[test]
fn c_j_expands_to_jal_x0() {
    // c.j with offset +8: offset[3:1] lives at inst[5:3], so offset[3]
    // is inst[5].
    let c = (0b101u16 << 13) | (1 << 5) | 0b01;
    let d = decode(expand(c));
    assert_eq!(d.opcode, opcodes::OP_JAL);
    assert_eq!(d.rd, 0);
    assert_eq!(d.imm, 8);
}

#[test]
fn c_jal_links_x1() {
    let c = 0b001_00000000000_01u16 | (1 << 3); // offset bit -> imm[1]
    let d = decode(expand(c));
    assert_eq!(d.opcode, opcodes::OP_JAL);
    assert_eq!(d.rd, 1);
    assert_eq!(d.imm, 2);
}

#[test]
fn c_beqz_expands_to_beq_with_x0() {
    // c.beqz x8, +4: offset[2:1]=10 -> inst[4:3] = 0b10.
    let c = 0b110_000_000_0010_0_01u16;
    let d = decode(expand(c));
    assert_eq!(d.opcode, opcodes::OP_BRANCH);
    assert_eq!(d.rs1, 8);
    assert_eq!(d.rs2, 0);
    assert_eq!(d.funct3, 0b000);
    assert_eq!(d.imm, 4);
}

#[test]
fn c_mv_and_c_add_expand_to_op() {
    // c.mv x10, x11
    let mv = 0b100_0_01010_01011_10u16;
    let d = decode(expand(mv));
    assert_eq!(d.opcode, opcodes::OP_REG);
    assert_eq!(d.rd, 10);
    assert_eq!(d.rs1, 0);
    assert_eq!(d.rs2, 11);

    // c.add x10, x11
    let add = 0b100_1_01010_01011_10u16;
    let d = decode(expand(add));
    assert_eq!(d.rd, 10);
    assert_eq!(d.rs1, 10);
    assert_eq!(d.rs2, 11);
}

#[test]
fn c_jr_and_c_jalr_expand_to_jalr() {
    // c.jr x1
    let jr = 0b100_0_00001_00000_10u16;
    let d = decode(expand(jr));
    assert_eq!(d.opcode, opcodes::OP_JALR);
    assert_eq!(d.rd, 0);
    assert_eq!(d.rs1, 1);

    // c.jalr x5
    let jalr = 0b100_1_00101_00000_10u16;
    let d = decode(expand(jalr));
    assert_eq!(d.opcode, opcodes::OP_JALR);
    assert_eq!(d.rd, 1);
    assert_eq!(d.rs1, 5);
}

#[test]
fn c_lwsp_and_c_swsp_are_sp_relative() {
    // c.lwsp x10, 4(sp): uimm[4:2]=001 lives at inst[6:4].
    let lwsp = 0b010_0_01010_001_00_10u16;
    let d = decode(expand(lwsp));
    assert_eq!(d.opcode, opcodes::OP_LOAD);
    assert_eq!(d.rs1, 2);
    assert_eq!(d.rd, 10);
    assert_eq!(d.imm, 4);

    // c.swsp x10, 4(sp): uimm[5:2]=0001 lives at inst[12:9].
    let swsp = 0b110_0001_00_01010_10u16;
    let d = decode(expand(swsp));
    assert_eq!(d.opcode, opcodes::OP_STORE);
    assert_eq!(d.rs1, 2);
    assert_eq!(d.rs2, 10);
    assert_eq!(d.imm, 4);
}

#[test]
fn misc_alu_group_expands() {
    // c.srli x8, 3
    let srli = 0b100_0_00_000_00011_01u16;
    let d = decode(expand(srli));
    assert_eq!(d.opcode, opcodes::OP_IMM);
    assert_eq!(d.funct3, 0b101);
    assert_eq!(d.imm & 0x1F, 3);

    // c.andi x8, -1
    let andi = 0b100_1_10_000_11111_01u16;
    let d = decode(expand(andi));
    assert_eq!(d.funct3, 0b111);
    assert_eq!(d.imm, -1);

    // c.sub x8, x9
    let sub = 0b100_0_11_000_00_001_01u16;
    let d = decode(expand(sub));
    assert_eq!(d.opcode, opcodes::OP_REG);
    assert_eq!(d.funct7, 0b0100000);
    assert_eq!(d.rd, 8);
    assert_eq!(d.rs2, 9);
}

#[test]
fn rv64_only_encodings_are_reserved() {
    // c.slli with shamt[5] set is reserved on RV32.
    let slli = 0b000_1_01010_00001_10u16;
    assert_eq!(expand(slli), 0);

    // Quadrant 0 funct3=011 (c.ld on RV64) is not part of the subset.
    let ld = 0b011_001_001_00_010_00u16;
    assert_eq!(expand(ld), 0);
}
