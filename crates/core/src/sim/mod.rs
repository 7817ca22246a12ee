//! Program loading and simulation driving.
//!
//! 1. **Loader:** Converts a hex-character program file into the
//!    instruction byte array.
//! 2. **Simulator:** Owns the CPU, drives `tick()`, and enforces the cycle
//!    cap.

/// Hex program-image loader.
pub mod loader;

/// Simulation driver.
pub mod simulator;

pub use loader::{LoadError, load_program, parse_program};
pub use simulator::{RunOutcome, Simulator};
