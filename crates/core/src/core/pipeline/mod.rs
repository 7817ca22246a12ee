//! Instruction pipeline implementation.
//!
//! This module contains the five-stage in-order pipeline:
//! 1. **Latches:** Inter-stage buffers (IF/ID, ID/EX, EX/MEM, MEM/WB).
//! 2. **Signals:** Control signals generated during instruction decode.
//! 3. **Hazards:** Forwarding and load-use stall detection.
//! 4. **Stages:** Fetch, Decode, Execute, Memory, and Writeback.

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory,
/// writeback).
pub mod stages;
