//! Backing RAM.
//!
//! A fixed-size, byte-addressable, little-endian store with constant-time
//! access and no caching.

use super::{AccessSize, MemResp, MemoryDevice, pack_le, unpack_le};

/// Flat byte-array RAM.
pub struct Ram {
    mem: Vec<u8>,
}

impl Ram {
    /// Creates a zero-filled RAM of `bytes` bytes.
    pub fn new(bytes: usize) -> Self {
        Self { mem: vec![0; bytes] }
    }

    /// Returns the size of the RAM in bytes.
    pub fn size(&self) -> usize {
        self.mem.len()
    }

    /// Copies raw bytes into memory, for pre-loading test data.
    ///
    /// Returns `false` without writing when the range exceeds the extent.
    pub fn poke_bytes(&mut self, addr: u32, src: &[u8]) -> bool {
        let start = addr as usize;
        let Some(end) = start.checked_add(src.len()) else {
            return false;
        };
        if end > self.mem.len() {
            return false;
        }
        self.mem[start..end].copy_from_slice(src);
        true
    }

    /// Checks natural alignment and extent for an access.
    fn check(&self, addr: u32, size: AccessSize) -> bool {
        let bytes = size.bytes();
        addr % bytes == 0 && (addr as usize) + (bytes as usize) <= self.mem.len()
    }
}

impl MemoryDevice for Ram {
    fn load(&mut self, addr: u32, size: AccessSize) -> MemResp {
        if !self.check(addr, size) {
            return MemResp::FAULT;
        }
        MemResp {
            ok: true,
            data: pack_le(&self.mem[addr as usize..], size),
        }
    }

    fn store(&mut self, addr: u32, data: u32, size: AccessSize) -> bool {
        if !self.check(addr, size) {
            return false;
        }
        unpack_le(data, &mut self.mem[addr as usize..], size);
        true
    }
}
