//! Disassembly rendering tests.

use crate::common::builder::inst;
use rvpipe_core::isa::disasm::disassemble;

#[test]
fn renders_integer_instructions() {
    assert_eq!(disassemble(inst().addi(5, 0, 5).build()), "addi t0, zero, 5");
    assert_eq!(disassemble(inst().add(10, 5, 6).build()), "add a0, t0, t1");
    assert_eq!(disassemble(inst().sub(10, 5, 6).build()), "sub a0, t0, t1");
    assert_eq!(disassemble(inst().mul(10, 5, 6).build()), "mul a0, t0, t1");
}

#[test]
fn renders_memory_instructions() {
    assert_eq!(disassemble(inst().lw(5, 2, 0).build()), "lw t0, 0(sp)");
    assert_eq!(disassemble(inst().sw(2, 6, -4).build()), "sw t1, -4(sp)");
    assert_eq!(disassemble(inst().flw(1, 2, 8).build()), "flw f1, 8(sp)");
}

#[test]
fn renders_control_flow() {
    assert_eq!(disassemble(inst().beq(5, 0, -8).build()), "beq t0, zero, -8");
    assert_eq!(disassemble(inst().jal(1, 16).build()), "jal ra, 16");
    assert_eq!(disassemble(inst().jalr(0, 1, 0).build()), "jalr zero, 0(ra)");
    assert_eq!(disassemble(inst().lui(10, 0x12345).build()), "lui a0, 0x12345");
}

#[test]
fn renders_fp_instructions() {
    assert_eq!(disassemble(inst().fadd_s(1, 2, 3).build()), "fadd.s f1, f2, f3");
    assert_eq!(disassemble(inst().fmv_w_x(1, 5).build()), "fmv.w.x f1, t0");
    assert_eq!(disassemble(inst().flt_s(10, 1, 2).build()), "flt.s a0, f1, f2");
}

#[test]
fn renders_halt_and_unknown_words() {
    assert_eq!(disassemble(0), "halt");
    assert_eq!(disassemble(0xFFFF_FFFF), ".word 0xffffffff");
}
