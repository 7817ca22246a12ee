use rvpipe_core::Simulator;
use rvpipe_core::config::Config;
use rvpipe_core::core::Cpu;

/// Test harness wrapping a simulator with convenience accessors.
pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    /// Builds a context running `instructions` under the default config.
    pub fn new(instructions: &[u32]) -> Self {
        Self::with_config(instructions, Config::default())
    }

    /// Builds a context running `instructions` under a custom config.
    pub fn with_config(instructions: &[u32], config: Config) -> Self {
        Self::from_bytes(assemble(instructions), config)
    }

    /// Builds a context from a raw byte image, for compressed and
    /// truncated programs.
    pub fn from_bytes(image: Vec<u8>, config: Config) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            sim: Simulator::new(image, &config),
        }
    }

    /// Convenience accessor for the CPU.
    pub fn cpu(&self) -> &Cpu {
        &self.sim.cpu
    }

    /// Mutable convenience accessor for the CPU.
    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.sim.cpu
    }

    /// Sets a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: u32) {
        self.sim.cpu.regs.write(reg, val);
    }

    /// Reads a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> u32 {
        self.sim.cpu.regs.read(reg)
    }

    /// Runs the CPU for a specific number of cycles.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.sim.step();
        }
    }

    /// Runs until the pipeline drains or the cycle cap fires.
    pub fn run_to_completion(&mut self) {
        self.sim.run();
    }
}

/// Encodes 32-bit instructions as a little-endian program image.
pub fn assemble(instructions: &[u32]) -> Vec<u8> {
    instructions
        .iter()
        .flat_map(|inst| inst.to_le_bytes())
        .collect()
}
