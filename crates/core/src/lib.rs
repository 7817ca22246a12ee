//! Cycle-accurate RV32 pipeline simulator library.
//!
//! This crate implements a cycle-accurate simulator for a 32-bit RISC-V
//! (RV32IMF plus a large RV32C subset) processor with the following:
//! 1. **Core:** Five-stage in-order pipeline (fetch, decode, execute, memory,
//!    writeback), integer and floating-point register files, forwarding and
//!    hazard resolution.
//! 2. **Memory:** Byte-addressable little-endian RAM, optionally fronted by a
//!    direct-mapped, fully-associative, or N-way set-associative
//!    write-through cache with true LRU replacement.
//! 3. **Prediction:** Static, bimodal, GShare, and tournament branch
//!    predictors with per-predictor accuracy accounting.
//! 4. **ISA:** Decoding, disassembly, and compressed-instruction expansion
//!    for the supported RV32 subset.
//! 5. **Observation:** Per-cycle pipeline snapshots, memory and register
//!    change logs, RAW dependency edges, and aggregate statistics.

/// Common types and constants (instruction fields, register files).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (pipeline stages, latches, hazards, functional units).
pub mod core;
/// Instruction set (decode, disassembly, ABI names, RV32I/M/F, RVC).
pub mod isa;
/// Program loader and simulation driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Per-cycle pipeline snapshots and observation logs.
pub mod trace;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds the pipeline, register files, memory, and predictor.
pub use crate::core::Cpu;
/// Simulation driver; owns the CPU and enforces the cycle cap.
pub use crate::sim::Simulator;
