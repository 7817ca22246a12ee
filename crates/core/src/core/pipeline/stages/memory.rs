//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the pipeline. Loads and
//! stores are issued to the configured data-memory device; a rejected
//! access (misaligned or out of bounds) is absorbed as a no-op, with the
//! load result forced to zero. Loads narrower than a word are sign- or
//! zero-extended here, not in the device.

use crate::core::Cpu;
use crate::core::pipeline::latches::MemWb;
use crate::core::pipeline::signals::MemWidth;
use crate::core::units::mem::{AccessSize, MemoryDevice};
use crate::trace::MemAccessKind;

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn mem_stage(cpu: &mut Cpu) {
    if !cpu.ex_mem.valid {
        cpu.mem_wb = MemWb::default();
        return;
    }

    let ex = cpu.ex_mem.clone();
    let mut mem_data = 0u32;

    if ex.ctrl.mem_read || ex.ctrl.mem_write {
        let size = match ex.ctrl.width {
            MemWidth::Byte => AccessSize::Byte,
            MemWidth::Half => AccessSize::Half,
            _ => AccessSize::Word,
        };
        let addr = ex.alu;
        let hits_before = cpu.mem.cache_stats().map(|(h, _)| h);

        if ex.ctrl.mem_read {
            let resp = cpu.mem.load(addr, size);
            if resp.ok {
                mem_data = extend_load(resp.data, ex.ctrl.width, ex.ctrl.signed_load);
            } else {
                log::warn!(
                    "MEM pc={:#06x} rejected load at {:#010x} (misaligned or out of bounds)",
                    ex.pc,
                    addr
                );
            }
            cpu.stats.memory_reads += 1;

            let hit = was_hit(cpu, hits_before);
            cpu.trace.record_memory_access(
                cpu.cycle(),
                addr,
                MemAccessKind::Load,
                mem_data,
                ex.pc,
                hit,
            );
            log::debug!("MEM pc={:#06x} load {:#010x} -> {:#x}", ex.pc, addr, mem_data);
        } else {
            let ok = cpu.mem.store(addr, ex.store_data, size);
            if !ok {
                log::warn!(
                    "MEM pc={:#06x} rejected store at {:#010x} (misaligned or out of bounds)",
                    ex.pc,
                    addr
                );
            }
            cpu.stats.memory_writes += 1;

            let hit = was_hit(cpu, hits_before);
            cpu.trace.record_memory_access(
                cpu.cycle(),
                addr,
                MemAccessKind::Store,
                ex.store_data,
                ex.pc,
                hit,
            );
            log::debug!(
                "MEM pc={:#06x} store {:#x} -> {:#010x}",
                ex.pc,
                ex.store_data,
                addr
            );
        }
    }

    cpu.mem_wb = MemWb {
        valid: true,
        pc: ex.pc,
        inst: ex.inst,
        inst_size: ex.inst_size,
        rd: ex.rd,
        alu: ex.alu,
        mem_data,
        ctrl: ex.ctrl,
    };
}

/// Sign- or zero-extends a narrow load result to 32 bits.
fn extend_load(data: u32, width: MemWidth, signed: bool) -> u32 {
    match (width, signed) {
        (MemWidth::Byte, true) => data as u8 as i8 as i32 as u32,
        (MemWidth::Half, true) => data as u16 as i16 as i32 as u32,
        (MemWidth::Byte, false) => data as u8 as u32,
        (MemWidth::Half, false) => data as u16 as u32,
        _ => data,
    }
}

/// Attributes the access that just completed to a cache hit or miss by
/// differencing the hit counter; `None` when no cache is configured.
fn was_hit(cpu: &Cpu, hits_before: Option<u64>) -> Option<bool> {
    match (hits_before, cpu.mem.cache_stats()) {
        (Some(before), Some((after, _))) => Some(after > before),
        _ => None,
    }
}
