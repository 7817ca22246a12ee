//! Forwarding network tests.
//!
//! The execute stage reads operands from the EX/MEM and MEM/WB snapshots
//! taken at the top of the tick; these tests pin down each leg of that
//! priority chain through end-to-end programs.

use crate::common::builder::inst;
use crate::common::harness::TestContext;

#[test]
fn forwards_from_ex_mem_snapshot_to_the_next_instruction() {
    // The second addi consumes t0 one cycle after it is produced.
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 3).build(),
        inst().addi(5, 5, 4).build(),
        inst().add(10, 5, 5).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 14);
    assert_eq!(ctx.cpu().stats.stalls, 0);
}

#[test]
fn forwards_from_mem_wb_snapshot_across_one_gap() {
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 5).build(),
        inst().nop().build(),
        inst().add(10, 5, 5).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 10);
}

#[test]
fn newer_result_wins_over_older_one() {
    // Both in-flight instructions write t0; the consumer must see the
    // EX/MEM (newer) value, not the MEM/WB one.
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 1).build(),
        inst().addi(5, 0, 2).build(),
        inst().add(10, 5, 0).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 2);
}

#[test]
fn destination_x0_never_forwards() {
    let mut ctx = TestContext::new(&[
        inst().addi(0, 0, 5).build(),
        inst().add(10, 0, 0).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.get_reg(0), 0);
}

#[test]
fn store_data_is_forwarded_from_the_producer() {
    // The sw consumes t0 as store data one cycle after it is produced.
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 42).build(),
        inst().sw(2, 5, 0).build(),
    ]);
    ctx.set_reg(2, 0x100);
    ctx.run_to_completion();

    use rvpipe_core::core::units::mem::{AccessSize, MemoryDevice};
    let resp = ctx.cpu_mut().mem.load(0x100, AccessSize::Word);
    assert!(resp.ok);
    assert_eq!(resp.data, 42);
}

#[test]
fn fp_results_forward_within_the_fp_domain() {
    // f1 reaches the fadd via MEM/WB, f2 via EX/MEM; the result moves back
    // through the integer file via fmv.x.w.
    let mut ctx = TestContext::new(&[
        inst().fmv_w_x(1, 5).build(),
        inst().fmv_w_x(2, 6).build(),
        inst().fadd_s(3, 1, 2).build(),
        inst().fmv_x_w(10, 3).build(),
    ]);
    ctx.set_reg(5, 2.5_f32.to_bits());
    ctx.set_reg(6, 3.5_f32.to_bits());
    ctx.run_to_completion();
    assert_eq!(f32::from_bits(ctx.get_reg(10)), 6.0);
}

#[test]
fn fp_and_integer_registers_with_same_index_do_not_alias() {
    // x5 and f5 are distinct; writing f5 must not forward into an integer
    // consumer of x5.
    let mut ctx = TestContext::new(&[
        inst().fmv_w_x(5, 6).build(),
        inst().add(10, 5, 0).build(),
    ]);
    ctx.set_reg(5, 11);
    ctx.set_reg(6, 99);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 11);
}
