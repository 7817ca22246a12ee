//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the simulator. It provides:
//! 1. **Defaults:** Baseline constants (RAM size, cache geometry, predictor
//!    tables, cycle cap).
//! 2. **Structures:** Hierarchical config for general, memory, cache, and
//!    predictor settings.
//! 3. **Enums:** Cache kind and branch predictor kind selectors.
//!
//! Configuration is supplied as JSON (see the CLI's `--config` flag) or via
//! `Config::default()`.

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values define the baseline configuration when not explicitly
/// overridden.
mod defaults {
    /// Data RAM size in bytes (64 KiB).
    pub const RAM_SIZE: usize = 64 * 1024;

    /// Default cache size in bytes (1 KiB).
    pub const CACHE_SIZE: u32 = 1024;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: u32 = 32;

    /// Default cache associativity (2 ways).
    pub const CACHE_WAYS: u32 = 2;

    /// Default predictor table size (2048 entries).
    pub const PREDICTOR_TABLE_SIZE: usize = 2048;

    /// Default global history width in bits.
    pub const PREDICTOR_HISTORY_BITS: u32 = 12;

    /// Default simulation cycle cap.
    pub const CYCLE_CAP: u64 = 10_000;
}

/// Data-cache shape selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CacheKind {
    /// No cache; the pipeline accesses the RAM directly.
    #[default]
    None,
    /// Direct-mapped cache (one way per set).
    DirectMapped,
    /// Fully-associative cache (one set, global LRU).
    FullyAssociative,
    /// N-way set-associative cache with per-set LRU.
    SetAssociative,
}

/// Branch prediction algorithm selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PredictorKind {
    /// Always predict not-taken.
    #[default]
    StaticNotTaken,
    /// Always predict taken.
    StaticTaken,
    /// Per-PC 2-bit saturating counters.
    Bimodal,
    /// Global history XOR PC indexed counters.
    GShare,
    /// Bimodal and GShare with a per-PC chooser.
    Tournament,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use rvpipe_core::config::{CacheKind, Config};
///
/// let config = Config::default();
/// assert_eq!(config.cache.kind, CacheKind::None);
/// assert_eq!(config.memory.ram_size, 64 * 1024);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use rvpipe_core::config::{Config, CacheKind, PredictorKind};
///
/// let json = r#"{
///     "general": { "debug": false, "cycle_cap": 5000 },
///     "memory": { "ram_size": 65536 },
///     "cache": {
///         "kind": "SetAssociative",
///         "size_bytes": 2048,
///         "line_bytes": 32,
///         "ways": 4
///     },
///     "predictor": {
///         "kind": "GShare",
///         "table_size": 1024,
///         "history_bits": 10
///     }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.cache.kind, CacheKind::SetAssociative);
/// assert_eq!(config.predictor.kind, PredictorKind::GShare);
/// assert_eq!(config.general.cycle_cap, 5000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory configuration.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Data cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Branch predictor configuration.
    #[serde(default)]
    pub predictor: PredictorConfig,
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Verbose per-stage diagnostics.
    #[serde(default)]
    pub debug: bool,

    /// Maximum number of cycles before the host terminates the run.
    #[serde(default = "GeneralConfig::default_cycle_cap")]
    pub cycle_cap: u64,
}

impl GeneralConfig {
    /// Returns the default cycle cap.
    fn default_cycle_cap() -> u64 {
        defaults::CYCLE_CAP
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            debug: false,
            cycle_cap: defaults::CYCLE_CAP,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// RAM size in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,
}

impl MemoryConfig {
    /// Returns the default RAM size in bytes.
    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_size: defaults::RAM_SIZE,
        }
    }
}

/// Data cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Cache shape; `None` disables caching.
    #[serde(default)]
    pub kind: CacheKind,

    /// Total cache size in bytes (power of two).
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: u32,

    /// Cache line size in bytes (power of two, at least one word).
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: u32,

    /// Associativity for the set-associative shape.
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: u32,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> u32 {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    fn default_line() -> u32 {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity.
    fn default_ways() -> u32 {
        defaults::CACHE_WAYS
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            kind: CacheKind::default(),
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
        }
    }
}

/// Branch predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Prediction algorithm.
    #[serde(default)]
    pub kind: PredictorKind,

    /// Counter table size (rounded up to a power of two).
    #[serde(default = "PredictorConfig::default_table_size")]
    pub table_size: usize,

    /// Global history width for GShare and tournament.
    #[serde(default = "PredictorConfig::default_history_bits")]
    pub history_bits: u32,
}

impl PredictorConfig {
    /// Returns the default predictor table size.
    fn default_table_size() -> usize {
        defaults::PREDICTOR_TABLE_SIZE
    }

    /// Returns the default global history width.
    fn default_history_bits() -> u32 {
        defaults::PREDICTOR_HISTORY_BITS
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            kind: PredictorKind::default(),
            table_size: defaults::PREDICTOR_TABLE_SIZE,
            history_bits: defaults::PREDICTOR_HISTORY_BITS,
        }
    }
}
