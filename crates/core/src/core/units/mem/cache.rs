//! Write-through, write-allocate cache.
//!
//! One cache type covers all three shapes: direct-mapped is the degenerate
//! case with one way per set, fully-associative the degenerate case with one
//! set, and the general case partitions lines into N-way sets. Replacement
//! is true LRU, kept as an explicit usage order per set: index 0 is the most
//! recently used way and the last index is the victim.
//!
//! Stores update both the cache line and the lower device; store misses
//! first fill the line (write-allocate) and then write through.

use super::{AccessSize, MemResp, MemoryDevice, pack_le, unpack_le};

/// A single cache line: valid bit, tag, and line data.
///
/// The tag is the full line number (`addr >> offset_bits`), so a valid
/// line's data mirrors the lower memory at `tag << offset_bits`.
#[derive(Clone, Default)]
struct CacheLine {
    valid: bool,
    tag: u32,
    data: Vec<u8>,
}

/// Set-associative write-through cache over a lower memory device.
pub struct Cache<M> {
    lower: M,
    line_bytes: u32,
    num_sets: u32,
    ways: u32,
    offset_bits: u32,
    lines: Vec<CacheLine>,
    /// Per-set usage order; index 0 is MRU, the last entry is the victim.
    lru: Vec<Vec<usize>>,
    hits: u64,
    misses: u64,
}

impl<M: MemoryDevice> Cache<M> {
    /// Creates a direct-mapped cache (one way per set).
    pub fn direct_mapped(lower: M, total_bytes: u32, line_bytes: u32) -> Self {
        let lines = total_bytes / line_bytes;
        Self::with_geometry(lower, total_bytes, line_bytes, lines, 1)
    }

    /// Creates a fully-associative cache (one set, LRU over all lines).
    pub fn fully_associative(lower: M, total_bytes: u32, line_bytes: u32) -> Self {
        let lines = total_bytes / line_bytes;
        Self::with_geometry(lower, total_bytes, line_bytes, 1, lines)
    }

    /// Creates an N-way set-associative cache.
    pub fn set_associative(lower: M, total_bytes: u32, line_bytes: u32, ways: u32) -> Self {
        let sets = total_bytes / line_bytes / ways;
        Self::with_geometry(lower, total_bytes, line_bytes, sets, ways)
    }

    /// Builds a cache with an explicit geometry.
    ///
    /// # Panics
    ///
    /// Total size, line size, and the derived set count must be non-zero
    /// powers of two, and the geometry must tile the total size exactly.
    fn with_geometry(lower: M, total_bytes: u32, line_bytes: u32, sets: u32, ways: u32) -> Self {
        assert!(total_bytes.is_power_of_two(), "cache size must be a power of two");
        assert!(line_bytes.is_power_of_two(), "line size must be a power of two");
        assert!(line_bytes >= 4, "line size must hold at least one word");
        assert!(sets > 0 && sets.is_power_of_two(), "set count must be a power of two");
        assert_eq!(sets * ways * line_bytes, total_bytes, "geometry must tile the cache");

        let line = CacheLine {
            valid: false,
            tag: 0,
            data: vec![0; line_bytes as usize],
        };
        Self {
            lower,
            line_bytes,
            num_sets: sets,
            ways,
            offset_bits: line_bytes.trailing_zeros(),
            lines: vec![line; (sets * ways) as usize],
            lru: (0..sets).map(|_| (0..ways as usize).collect()).collect(),
            hits: 0,
            misses: 0,
        }
    }

    /// Number of cache hits since construction.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of cache misses since construction.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Access to the lower device, for verification that writes propagated.
    pub fn lower_mut(&mut self) -> &mut M {
        &mut self.lower
    }

    /// Whether the line covering `addr` is resident.
    pub fn contains(&self, addr: u32) -> bool {
        let (tag, set, _) = self.decode(addr);
        self.probe(set, tag).is_some()
    }

    /// Splits an address into line tag, set index, and intra-line offset.
    fn decode(&self, addr: u32) -> (u32, usize, usize) {
        let tag = addr >> self.offset_bits;
        let set = (tag & (self.num_sets - 1)) as usize;
        let offset = (addr & (self.line_bytes - 1)) as usize;
        (tag, set, offset)
    }

    /// Searches the ways of a set for a valid, tag-matching line.
    fn probe(&self, set: usize, tag: u32) -> Option<usize> {
        let base = set * self.ways as usize;
        (0..self.ways as usize)
            .find(|&way| self.lines[base + way].valid && self.lines[base + way].tag == tag)
    }

    /// Promotes a way to the most-recently-used position of its set.
    fn touch(&mut self, set: usize, way: usize) {
        let order = &mut self.lru[set];
        if let Some(pos) = order.iter().position(|&w| w == way) {
            order.remove(pos);
        }
        order.insert(0, way);
    }

    /// Fills the set's LRU way with the line covering `addr`.
    ///
    /// The line is assembled from word loads issued to the lower device at
    /// `line_base, line_base + 4, …`. Any failing sub-load aborts the fill
    /// and leaves the victim invalid.
    ///
    /// Returns the filled way, or `None` when the lower device faulted.
    fn fill(&mut self, addr: u32, set: usize, tag: u32) -> Option<usize> {
        let way = *self.lru[set].last().expect("set has at least one way");
        let base = set * self.ways as usize + way;
        let line_base = addr & !(self.line_bytes - 1);

        self.lines[base].valid = false;
        for i in (0..self.line_bytes).step_by(4) {
            let resp = self.lower.load(line_base + i, AccessSize::Word);
            if !resp.ok {
                return None;
            }
            unpack_le(resp.data, &mut self.lines[base].data[i as usize..], AccessSize::Word);
        }
        self.lines[base].tag = tag;
        self.lines[base].valid = true;
        self.touch(set, way);
        Some(way)
    }
}

impl<M: MemoryDevice> MemoryDevice for Cache<M> {
    fn load(&mut self, addr: u32, size: AccessSize) -> MemResp {
        if addr % size.bytes() != 0 {
            return MemResp::FAULT;
        }
        let (tag, set, offset) = self.decode(addr);

        let way = match self.probe(set, tag) {
            Some(way) => {
                self.hits += 1;
                self.touch(set, way);
                way
            }
            None => {
                self.misses += 1;
                match self.fill(addr, set, tag) {
                    Some(way) => way,
                    None => return MemResp::FAULT,
                }
            }
        };

        let line = &self.lines[set * self.ways as usize + way];
        MemResp {
            ok: true,
            data: pack_le(&line.data[offset..], size),
        }
    }

    fn store(&mut self, addr: u32, data: u32, size: AccessSize) -> bool {
        if addr % size.bytes() != 0 {
            return false;
        }
        let (tag, set, offset) = self.decode(addr);

        let way = match self.probe(set, tag) {
            Some(way) => {
                self.hits += 1;
                self.touch(set, way);
                way
            }
            None => {
                self.misses += 1;
                match self.fill(addr, set, tag) {
                    Some(way) => way,
                    None => return false,
                }
            }
        };

        let line = &mut self.lines[set * self.ways as usize + way];
        unpack_le(data, &mut line.data[offset..], size);

        // Write-through: the lower memory is updated on every store.
        self.lower.store(addr, data, size)
    }
}
