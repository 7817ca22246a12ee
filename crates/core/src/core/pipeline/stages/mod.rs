//! Pipeline stage implementations.
//!
//! One function per stage, each reading its input latch and writing its
//! output latch on the owning [`Cpu`](crate::core::Cpu). The tick driver
//! invokes them in reverse dataflow order (WB, MEM, EX, ID, IF) so every
//! stage consumes the latch contents produced in the previous cycle.

/// Instruction decode stage.
pub mod decode;

/// Execute stage.
pub mod execute;

/// Instruction fetch stage.
pub mod fetch;

/// Memory access stage.
pub mod memory;

/// Writeback stage.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
