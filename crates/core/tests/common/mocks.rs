use mockall::mock;
use rvpipe_core::core::units::mem::{AccessSize, MemResp, MemoryDevice};

mock! {
    /// mockall-generated lower memory device for cache contract tests.
    pub LowerMemory {}

    impl MemoryDevice for LowerMemory {
        fn load(&mut self, addr: u32, size: AccessSize) -> MemResp;
        fn store(&mut self, addr: u32, data: u32, size: AccessSize) -> bool;
    }
}

/// A lower device that faults on every access, for fill-abort tests.
pub struct FaultingMemory;

impl MemoryDevice for FaultingMemory {
    fn load(&mut self, _addr: u32, _size: AccessSize) -> MemResp {
        MemResp::FAULT
    }

    fn store(&mut self, _addr: u32, _data: u32, _size: AccessSize) -> bool {
        false
    }
}
