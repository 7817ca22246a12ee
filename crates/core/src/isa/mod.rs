//! Instruction set support for the RV32 subset.
//!
//! This module contains the decoding infrastructure for the supported
//! instruction set. It includes:
//! 1. **Field Extraction:** Bit-level accessors for instruction fields.
//! 2. **Decoding:** Immediate generation and structured decode output.
//! 3. **Extensions:** Opcode and function-code tables for RV32I, RV32M,
//!    RV32F, and the RV32C compressed subset.
//! 4. **Disassembly:** Textual rendering of decoded instructions.

/// ABI register names.
pub mod abi;

/// Instruction decoding (immediates, field extraction).
pub mod decode;

/// Textual disassembly of supported instructions.
pub mod disasm;

/// Instruction bit-field accessors and the decoded-instruction structure.
pub mod instruction;

/// RV32F single-precision floating-point extension tables.
pub mod rv32f;

/// RV32I base integer instruction set tables.
pub mod rv32i;

/// RV32M multiply/divide extension tables.
pub mod rv32m;

/// RV32C compressed instruction expansion.
pub mod rvc;
