//! Functional units consumed by the pipeline stages.
//!
//! 1. **ALU:** combinational integer arithmetic, logic, shifts, and branch
//!    comparisons.
//! 2. **FPU:** combinational single-precision floating-point operations.
//! 3. **BRU:** the pluggable branch predictor family.
//! 4. **MEM:** the data-memory hierarchy (RAM and cache variants).

/// Integer arithmetic logic unit.
pub mod alu;

/// Branch prediction unit.
pub mod bru;

/// Single-precision floating-point unit.
pub mod fpu;

/// Data-memory devices (RAM, caches).
pub mod mem;
