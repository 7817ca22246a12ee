//! Data-memory hierarchy.
//!
//! This module defines the abstract byte-addressable memory device used by
//! the pipeline's Memory stage, and its concrete variants:
//! 1. **Backing RAM:** a flat little-endian byte array.
//! 2. **Caches:** direct-mapped, fully-associative, and N-way
//!    set-associative write-through caches layered over a lower device.
//! 3. **Dispatch:** an enum wrapper that lets the pipeline own either a bare
//!    RAM or a cache-fronted RAM without virtual dispatch on the hot path.

/// Cache implementations (direct-mapped, fully-associative, N-way LRU).
pub mod cache;

/// Backing RAM implementation.
pub mod ram;

pub use cache::Cache;
pub use ram::Ram;

use crate::config::{CacheKind, Config};

/// Width of a single memory access in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessSize {
    /// 8-bit access.
    Byte = 1,
    /// 16-bit access.
    Half = 2,
    /// 32-bit access.
    Word = 4,
}

impl AccessSize {
    /// Returns the access width in bytes.
    #[inline]
    pub fn bytes(self) -> u32 {
        self as u32
    }
}

/// Response of a memory load operation.
///
/// `data` is valid only when `ok` is true. Loads narrower than a word
/// return the value in the low bits; sign or zero extension is performed
/// by the pipeline, not the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemResp {
    /// Whether the access was legal (aligned and in bounds).
    pub ok: bool,
    /// Loaded value, little-endian, in the low bits.
    pub data: u32,
}

impl MemResp {
    /// A failed access: `ok = false`, no data.
    pub const FAULT: MemResp = MemResp { ok: false, data: 0 };
}

/// Abstract byte-addressable memory device.
///
/// Accesses must be naturally aligned (address divisible by the access
/// size) and fall entirely within the device's extent; violations return
/// `ok = false` with no side effect.
pub trait MemoryDevice {
    /// Loads `size` bytes at `addr`, little-endian.
    fn load(&mut self, addr: u32, size: AccessSize) -> MemResp;

    /// Stores the low `size` bytes of `data` at `addr`, little-endian.
    ///
    /// Returns `true` when the access was legal and performed.
    fn store(&mut self, addr: u32, data: u32, size: AccessSize) -> bool;
}

/// Packs up to four little-endian bytes into the low bits of a word.
pub(crate) fn pack_le(bytes: &[u8], size: AccessSize) -> u32 {
    match size {
        AccessSize::Byte => bytes[0] as u32,
        AccessSize::Half => u16::from_le_bytes([bytes[0], bytes[1]]) as u32,
        AccessSize::Word => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
    }
}

/// Unpacks the low bits of a word into little-endian bytes.
pub(crate) fn unpack_le(value: u32, bytes: &mut [u8], size: AccessSize) {
    bytes[0] = value as u8;
    if size != AccessSize::Byte {
        bytes[1] = (value >> 8) as u8;
    }
    if size == AccessSize::Word {
        bytes[2] = (value >> 16) as u8;
        bytes[3] = (value >> 24) as u8;
    }
}

/// Enum wrapper for static dispatch of the configured data memory.
///
/// This avoids vtable lookups in the memory stage while still letting the
/// cache shape be chosen at run time.
pub enum DataMemory {
    /// Bare RAM, no cache.
    Ram(Ram),
    /// RAM fronted by one cache of the configured shape.
    Cached(Cache<Ram>),
}

impl DataMemory {
    /// Builds the data memory described by the configuration.
    pub fn from_config(config: &Config) -> Self {
        let ram = Ram::new(config.memory.ram_size);
        let c = &config.cache;
        match c.kind {
            CacheKind::None => Self::Ram(ram),
            CacheKind::DirectMapped => {
                Self::Cached(Cache::direct_mapped(ram, c.size_bytes, c.line_bytes))
            }
            CacheKind::FullyAssociative => {
                Self::Cached(Cache::fully_associative(ram, c.size_bytes, c.line_bytes))
            }
            CacheKind::SetAssociative => {
                Self::Cached(Cache::set_associative(ram, c.size_bytes, c.line_bytes, c.ways))
            }
        }
    }

    /// Returns the cache hit/miss counters, if a cache is configured.
    pub fn cache_stats(&self) -> Option<(u64, u64)> {
        match self {
            Self::Ram(_) => None,
            Self::Cached(c) => Some((c.hits(), c.misses())),
        }
    }
}

impl MemoryDevice for DataMemory {
    #[inline]
    fn load(&mut self, addr: u32, size: AccessSize) -> MemResp {
        match self {
            Self::Ram(m) => m.load(addr, size),
            Self::Cached(c) => c.load(addr, size),
        }
    }

    #[inline]
    fn store(&mut self, addr: u32, data: u32, size: AccessSize) -> bool {
        match self {
            Self::Ram(m) => m.store(addr, data, size),
            Self::Cached(c) => c.store(addr, data, size),
        }
    }
}
