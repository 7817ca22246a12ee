//! End-to-end scenarios exercising the whole pipeline, the cache, and the
//! predictors together.

use crate::common::builder::inst;
use crate::common::harness::TestContext;
use rvpipe_core::config::{CacheKind, Config, PredictorKind};

/// Arithmetic through the full pipeline: a0 = 5 + 7.
#[test]
fn arithmetic_program_drains_with_result() {
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 5).build(),
        inst().addi(6, 0, 7).build(),
        inst().add(10, 5, 6).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 12);
    assert!(ctx.cpu().pipeline_empty());
}

/// Back-to-back dependent arithmetic resolved purely by forwarding.
#[test]
fn dependent_chain_needs_no_stall() {
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 3).build(),
        inst().addi(5, 5, 4).build(),
        inst().add(10, 5, 5).build(),
    ]);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 14);
    assert_eq!(ctx.cpu().stats.stalls, 0);
}

/// Store, load back, and consume immediately: one load-use bubble.
#[test]
fn load_use_round_trip() {
    let mut ctx = TestContext::new(&[
        inst().addi(6, 0, 42).build(),
        inst().sw(2, 6, 0).build(),
        inst().lw(5, 2, 0).build(),
        inst().add(10, 5, 0).build(),
    ]);
    ctx.set_reg(2, 0x100);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 42);
    assert!(ctx.cpu().stats.stalls <= 1);
}

/// A warmed-up bimodal predictor mispredicts a loop back-edge exactly
/// once; every later iteration is predicted taken in decode.
#[test]
fn bimodal_loop_warms_up_after_one_misprediction() {
    let mut config = Config::default();
    config.predictor.kind = PredictorKind::Bimodal;
    let mut ctx = TestContext::with_config(
        &[
            inst().addi(5, 0, 0).build(),
            inst().addi(6, 0, 1).build(),
            inst().beq(5, 0, -8).build(),
        ],
        config,
    );

    // The loop never exits; run a fixed window covering several trips.
    ctx.run(60);

    let stats = &ctx.cpu().stats;
    assert_eq!(stats.branch_mispredictions, 1);
    assert!(stats.branches_taken >= 4, "taken={}", stats.branches_taken);
    assert_eq!(
        stats.predictor_correct + stats.predictor_incorrect,
        stats.branches_taken + stats.branches_not_taken
    );
}

/// Direct-mapped cache with 32-byte lines: two loads in a fresh line miss,
/// two within the filled line hit.
#[test]
fn direct_mapped_fill_then_hit_pattern() {
    let mut config = Config::default();
    config.cache.kind = CacheKind::DirectMapped;
    config.cache.size_bytes = 1024;
    config.cache.line_bytes = 32;
    let mut ctx = TestContext::with_config(
        &[
            inst().lw(5, 2, 0).build(),
            inst().lw(6, 2, 4).build(),
            inst().lw(7, 2, 28).build(),
            inst().lw(28, 2, 32).build(),
        ],
        config,
    );
    ctx.set_reg(2, 0x100);
    ctx.run_to_completion();

    let stats = &ctx.cpu().stats;
    assert_eq!(stats.memory_reads, 4);
    assert_eq!(stats.cache_hits, 2);
    assert_eq!(stats.cache_misses, 2);

    // Each access in the memory log carries its hit/miss attribution.
    let hits: Vec<bool> = ctx
        .cpu()
        .trace
        .memory_log
        .iter()
        .map(|r| r.cache_hit.unwrap())
        .collect();
    assert_eq!(hits, vec![false, true, true, false]);
}

/// 2-way LRU eviction through the pipeline: four lines into one set, then
/// a re-access of the first misses again.
#[test]
fn two_way_set_conflict_evicts_lru() {
    let mut config = Config::default();
    config.cache.kind = CacheKind::SetAssociative;
    config.cache.size_bytes = 64;
    config.cache.line_bytes = 16;
    config.cache.ways = 2;
    let mut ctx = TestContext::with_config(
        &[
            inst().lw(5, 2, 0).build(),
            inst().lw(6, 2, 64).build(),
            inst().lw(7, 2, 128).build(),
            inst().lw(28, 2, 192).build(),
            inst().lw(29, 2, 0).build(),
        ],
        config,
    );
    ctx.set_reg(2, 0);
    ctx.run_to_completion();

    assert_eq!(ctx.cpu().stats.cache_hits, 0);
    assert_eq!(ctx.cpu().stats.cache_misses, 5);
}

/// Loaded values flow through the cache hierarchy unchanged.
#[test]
fn cached_loads_return_stored_values() {
    let mut config = Config::default();
    config.cache.kind = CacheKind::FullyAssociative;
    config.cache.size_bytes = 256;
    config.cache.line_bytes = 32;
    let mut ctx = TestContext::with_config(
        &[
            inst().addi(6, 0, 1234).build(),
            inst().sw(2, 6, 0).build(),
            inst().lw(5, 2, 0).build(),
            inst().add(10, 5, 0).build(),
        ],
        config,
    );
    ctx.set_reg(2, 0x200);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(10), 1234);
}

/// Narrow loads extend correctly through the pipeline.
#[test]
fn sign_and_zero_extension_of_narrow_loads() {
    let mut ctx = TestContext::new(&[
        inst().addi(6, 0, -1).build(),
        inst().sh(2, 6, 0).build(),
        inst().lh(5, 2, 0).build(),
        inst().lbu(7, 2, 0).build(),
    ]);
    ctx.set_reg(2, 0x100);
    ctx.run_to_completion();
    assert_eq!(ctx.get_reg(5), u32::MAX);
    assert_eq!(ctx.get_reg(7), 0xFF);
}

/// Cycle cap terminates an infinite loop and keeps state inspectable.
#[test]
fn cycle_cap_bounds_infinite_loops() {
    let mut config = Config::default();
    config.general.cycle_cap = 100;
    let mut ctx = TestContext::with_config(
        &[inst().jal(0, 0).build()],
        config,
    );
    use rvpipe_core::sim::RunOutcome;
    let outcome = ctx.sim.run();
    assert_eq!(outcome, RunOutcome::CycleCapExceeded);
    assert_eq!(ctx.cpu().stats.cycles, 100);
}

/// CPI and utilization derive from cycles and retires.
#[test]
fn derived_statistics_are_consistent() {
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 1).build(),
        inst().addi(6, 0, 2).build(),
        inst().add(10, 5, 6).build(),
    ]);
    ctx.run_to_completion();

    let stats = &ctx.cpu().stats;
    assert_eq!(stats.instructions_retired, 3);
    let cpi = stats.cpi();
    assert!((cpi - stats.cycles as f64 / 3.0).abs() < 1e-9);
    assert!(stats.utilization() <= 1.0);
}

/// The per-cycle trace covers every simulated cycle and records RAW
/// dependency edges between producer and consumer.
#[test]
fn trace_records_cycles_and_dependencies() {
    let mut ctx = TestContext::new(&[
        inst().addi(5, 0, 5).build(),
        inst().add(10, 5, 0).build(),
    ]);
    ctx.run_to_completion();

    let cpu = ctx.cpu();
    assert_eq!(cpu.trace.snapshots.len() as u64, cpu.stats.cycles);
    assert!(
        cpu.trace
            .dependencies
            .iter()
            .any(|d| d.producer_pc == 0 && d.consumer_pc == 4 && d.reg == 5)
    );
    assert!(
        cpu.trace
            .register_log
            .iter()
            .any(|r| r.index == 10 && r.new == 5)
    );
}
