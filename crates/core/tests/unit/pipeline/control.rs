//! Control-flow tests: jumps, branch resolution, flush behavior, and the
//! absorbing error paths (misaligned access, undecodable instructions,
//! the halt sentinel).

use crate::common::builder::inst;
use crate::common::harness::TestContext;
use rvpipe_core::config::{Config, PredictorKind};

#[test]
fn jal_skips_the_following_instruction_and_links() {
    let mut ctx = TestContext::new(&[
        inst().jal(1, 8).build(),
        inst().addi(10, 0, 99).build(),
        inst().addi(11, 0, 7).build(),
    ]);
    ctx.run_to_completion();

    assert_eq!(ctx.get_reg(10), 0, "wrong-path instruction must not commit");
    assert_eq!(ctx.get_reg(11), 7);
    assert_eq!(ctx.get_reg(1), 4, "link is the jump's fall-through");
}

#[test]
fn jal_asserts_a_flush_in_decode() {
    let mut ctx = TestContext::new(&[
        inst().jal(0, 8).build(),
        inst().addi(10, 0, 99).build(),
        inst().addi(11, 0, 7).build(),
    ]);
    ctx.run_to_completion();
    assert!(ctx.cpu().stats.flushes >= 1);
    assert_eq!(ctx.get_reg(10), 0);
}

#[test]
fn predicted_taken_flush_drops_the_fetch_slot() {
    // With an always-taken predictor the branch redirects in decode; the
    // IF/ID latch is invalid at the end of that tick.
    let mut config = Config::default();
    config.predictor.kind = PredictorKind::StaticTaken;
    let mut ctx = TestContext::with_config(
        &[
            inst().beq(0, 0, 8).build(),
            inst().addi(10, 0, 99).build(),
            inst().addi(11, 0, 7).build(),
        ],
        config,
    );

    // Cycle 1 fetches the branch; cycle 2 decodes, predicts taken, and
    // flushes the slot fetch just produced.
    ctx.run(2);
    assert!(!ctx.cpu().if_id.valid);

    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.get_reg(11), 7);
}

#[test]
fn jalr_redirects_through_a_register_target() {
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 12).build(),
        inst().jalr(1, 5, 0).build(),
        inst().addi(10, 0, 99).build(),
        inst().addi(11, 0, 7).build(),
    ]);
    ctx.run_to_completion();

    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.get_reg(11), 7);
    assert_eq!(ctx.get_reg(1), 8);
}

#[test]
fn jalr_clears_the_low_target_bit() {
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 13).build(),
        inst().jalr(0, 5, 0).build(),
        inst().addi(10, 0, 99).build(),
        inst().addi(11, 0, 7).build(),
    ]);
    ctx.run_to_completion();
    // Target 13 & ~1 = 12.
    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.get_reg(11), 7);
}

#[test]
fn mispredicted_branch_squashes_the_wrong_path() {
    // Default predictor is static not-taken; a taken branch mispredicts
    // once and the fall-through instruction must not commit.
    let mut ctx = TestContext::new(&[
        inst().beq(0, 0, 8).build(),
        inst().addi(10, 0, 99).build(),
        inst().addi(11, 0, 7).build(),
    ]);
    ctx.run_to_completion();

    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.get_reg(11), 7);
    assert_eq!(ctx.cpu().stats.branch_mispredictions, 1);
    assert_eq!(ctx.cpu().stats.branches_taken, 1);
}

#[test]
fn not_taken_branch_with_not_taken_prediction_does_not_flush() {
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 1).build(),
        inst().bne(5, 5, 8).build(),
        inst().addi(11, 0, 7).build(),
    ]);
    ctx.run_to_completion();

    assert_eq!(ctx.get_reg(11), 7);
    assert_eq!(ctx.cpu().stats.flushes, 0);
    assert_eq!(ctx.cpu().stats.branches_not_taken, 1);
    assert_eq!(ctx.cpu().stats.branch_mispredictions, 0);
}

#[test]
fn branch_operands_are_forwarded() {
    // blt compares a freshly-produced value.
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, -3).build(),
        inst().blt(5, 0, 8).build(),
        inst().addi(10, 0, 99).build(),
        inst().addi(11, 0, 7).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.get_reg(11), 7);
}

#[test]
fn halt_sentinel_stops_fetch_and_drains() {
    let mut ctx = TestContext::new(&[
        inst().addi(10, 0, 5).build(),
        0x0000_0000,
        inst().addi(10, 0, 9).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 5);
    assert!(ctx.cpu().halted);
}

#[test]
fn undecodable_instruction_becomes_a_bubble() {
    let mut ctx = TestContext::new(&[
        inst().addi(10, 0, 5).build(),
        0xFFFF_FFFF,
        inst().addi(11, 0, 7).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 5);
    assert_eq!(ctx.get_reg(11), 7);
}

#[test]
fn misaligned_load_is_absorbed_as_zero() {
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 0x102).build(),
        inst().lw(10, 5, 1).build(),
        inst().addi(11, 0, 7).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 0);
    assert_eq!(ctx.get_reg(11), 7);
}

#[test]
fn out_of_bounds_store_is_discarded() {
    let mut ctx = TestContext::new(&[
        inst().lui(5, 0x80000 >> 12).build(),
        inst().sw(5, 6, 0).build(),
        inst().addi(11, 0, 7).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(11), 7);
}

#[test]
fn writes_to_x0_are_discarded_by_the_pipeline() {
    let mut ctx = TestContext::new(&[
        inst().addi(0, 0, 5).build(),
        inst().add(10, 0, 0).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.get_reg(10), 0);
}

#[test]
fn retired_count_matches_committed_instructions() {
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 1).build(),
        inst().sw(2, 5, 0).build(),
        inst().addi(6, 0, 2).build(),
    ]);
    ctx.set_reg(2, 0x100);
    ctx.run_to_completion();
    // The store retires even though it writes no register.
    assert_eq!(ctx.cpu().stats.instructions_retired, 3);
}

#[test]
fn compressed_instructions_advance_pc_by_two() {
    // c.li a0, 7 ; c.addi a0, 1 (raw RVC encodings).
    let image = vec![0x1D, 0x45, 0x05, 0x05];
    let mut ctx = TestContext::from_bytes(image, Config::default());
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 8);
}

#[test]
fn compressed_and_standard_instructions_mix() {
    // c.li a0, 7 followed by a 32-bit addi a0, a0, 1.
    let mut image = vec![0x1D, 0x45];
    image.extend_from_slice(&inst().addi(10, 10, 1).build().to_le_bytes());
    let mut ctx = TestContext::from_bytes(image, Config::default());
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 8);
}
