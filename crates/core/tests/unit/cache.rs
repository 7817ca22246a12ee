//! Cache contract tests.
//!
//! Exercises the write-through/write-allocate policy, LRU promotion and
//! eviction, the per-shape geometries, and the fill-abort path, using the
//! mockall lower-device where interaction order matters.

use crate::common::mocks::{FaultingMemory, MockLowerMemory};
use mockall::predicate::eq;
use rvpipe_core::core::units::mem::{AccessSize, Cache, MemResp, MemoryDevice, Ram};

fn ram(bytes: usize) -> Ram {
    Ram::new(bytes)
}

#[test]
fn load_miss_increments_misses_exactly_once() {
    let mut cache = Cache::direct_mapped(ram(4096), 1024, 32);
    let resp = cache.load(0x100, AccessSize::Word);
    assert!(resp.ok);
    assert_eq!(cache.misses(), 1);
    assert_eq!(cache.hits(), 0);
}

#[test]
fn load_after_fill_hits_same_line() {
    let mut cache = Cache::direct_mapped(ram(4096), 1024, 32);
    cache.load(0x100, AccessSize::Word);
    let resp = cache.load(0x104, AccessSize::Word);
    assert!(resp.ok);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.misses(), 1);
}

#[test]
fn write_through_updates_lower_memory() {
    let mut cache = Cache::direct_mapped(ram(4096), 1024, 32);
    assert!(cache.store(0x40, 0xDEAD_BEEF, AccessSize::Word));

    // A load through the lower device, bypassing the cache, sees the value.
    let lower = cache.lower_mut().load(0x40, AccessSize::Word);
    assert!(lower.ok);
    assert_eq!(lower.data, 0xDEAD_BEEF);
}

#[test]
fn write_allocate_leaves_line_resident_after_store_miss() {
    let mut cache = Cache::direct_mapped(ram(4096), 1024, 32);
    assert!(!cache.contains(0x80));
    cache.store(0x80, 1, AccessSize::Word);
    assert!(cache.contains(0x80));
    assert_eq!(cache.misses(), 1);
}

#[test]
fn store_hit_counts_a_hit_and_patches_the_line() {
    let mut cache = Cache::direct_mapped(ram(4096), 1024, 32);
    cache.load(0x40, AccessSize::Word);
    cache.store(0x40, 0x55, AccessSize::Word);
    assert_eq!(cache.hits(), 1);
    assert_eq!(cache.load(0x40, AccessSize::Word).data, 0x55);
}

#[test]
fn fill_reads_whole_line_from_lower_device() {
    let mut lower = MockLowerMemory::new();
    // A 16-byte line fills with four word loads at line_base, +4, +8, +12.
    for off in [0u32, 4, 8, 12] {
        lower
            .expect_load()
            .with(eq(0x20 + off), eq(AccessSize::Word))
            .times(1)
            .returning(|addr, _| MemResp {
                ok: true,
                data: addr,
            });
    }

    let mut cache = Cache::direct_mapped(lower, 64, 16);
    let resp = cache.load(0x24, AccessSize::Word);
    assert!(resp.ok);
    assert_eq!(resp.data, 0x24);
}

#[test]
fn store_miss_forwards_the_store_after_the_fill() {
    let mut lower = MockLowerMemory::new();
    lower
        .expect_load()
        .returning(|_, _| MemResp { ok: true, data: 0 });
    lower
        .expect_store()
        .with(eq(0x10), eq(7u32), eq(AccessSize::Word))
        .times(1)
        .returning(|_, _, _| true);

    let mut cache = Cache::direct_mapped(lower, 64, 16);
    assert!(cache.store(0x10, 7, AccessSize::Word));
}

#[test]
fn fill_abort_propagates_the_fault() {
    let mut cache = Cache::direct_mapped(FaultingMemory, 64, 16);
    assert!(!cache.load(0x10, AccessSize::Word).ok);
    assert!(!cache.store(0x10, 1, AccessSize::Word));
    // The miss was still counted.
    assert_eq!(cache.misses(), 2);
}

#[test]
fn misaligned_access_is_rejected_without_side_effects() {
    let mut cache = Cache::direct_mapped(ram(4096), 1024, 32);
    assert!(!cache.load(0x41, AccessSize::Word).ok);
    assert!(!cache.load(0x41, AccessSize::Half).ok);
    assert!(!cache.store(0x42, 1, AccessSize::Word));
    assert_eq!(cache.hits() + cache.misses(), 0);
}

#[test]
fn direct_mapped_conflict_evicts_the_only_way() {
    // 2 lines of 32 bytes; addresses 0 and 64 share line 0.
    let mut cache = Cache::direct_mapped(ram(4096), 64, 32);
    cache.load(0, AccessSize::Word);
    cache.load(64, AccessSize::Word);
    assert!(!cache.contains(0));
    assert!(cache.contains(64));
}

#[test]
fn hit_promotes_the_way_to_mru() {
    // One 2-way set. After A, B, a hit on A makes B the LRU victim.
    let mut cache = Cache::fully_associative(ram(4096), 32, 16);
    cache.load(0x00, AccessSize::Word); // A
    cache.load(0x10, AccessSize::Word); // B
    cache.load(0x00, AccessSize::Word); // hit A -> MRU
    cache.load(0x20, AccessSize::Word); // evicts B
    assert!(cache.contains(0x00));
    assert!(!cache.contains(0x10));
    assert!(cache.contains(0x20));
}

#[test]
fn fully_associative_evicts_least_recently_accessed() {
    // Four lines; the fifth distinct line replaces the first.
    let mut cache = Cache::fully_associative(ram(4096), 64, 16);
    for base in [0u32, 16, 32, 48] {
        cache.load(base, AccessSize::Word);
    }
    cache.load(64, AccessSize::Word);
    assert!(!cache.contains(0));
    for base in [16u32, 32, 48, 64] {
        assert!(cache.contains(base), "line {:#x} should be resident", base);
    }
}

#[test]
fn set_associative_bounds_residency_per_set() {
    // 2-way, 2 sets, 16-byte lines. Even line numbers map to set 0; after
    // three distinct even lines only two can be resident.
    let mut cache = Cache::set_associative(ram(4096), 64, 16, 2);
    cache.load(0, AccessSize::Word); // line 0, set 0
    cache.load(64, AccessSize::Word); // line 4, set 0
    cache.load(128, AccessSize::Word); // line 8, set 0 -> evicts line 0
    let resident = [0u32, 64, 128]
        .iter()
        .filter(|&&a| cache.contains(a))
        .count();
    assert_eq!(resident, 2);
    assert!(!cache.contains(0));
}

#[test]
fn two_way_lru_eviction_sequence() {
    // All four lines land in set 0; a 2-way set holds only two, so the
    // re-access of the first line misses again: 0 hits, 5 misses.
    let mut cache = Cache::set_associative(ram(4096), 64, 16, 2);
    for base in [0u32, 64, 128, 192, 0] {
        cache.load(base, AccessSize::Word);
    }
    assert_eq!(cache.hits(), 0);
    assert_eq!(cache.misses(), 5);
}

#[test]
fn cached_bytes_match_lower_memory_after_fill() {
    let mut base = ram(4096);
    base.poke_bytes(0x100, &[0x11, 0x22, 0x33, 0x44]);
    let mut cache = Cache::direct_mapped(base, 1024, 32);

    assert_eq!(cache.load(0x100, AccessSize::Word).data, 0x4433_2211);
    assert_eq!(cache.load(0x102, AccessSize::Half).data, 0x4433);
    assert_eq!(cache.load(0x103, AccessSize::Byte).data, 0x44);
}
