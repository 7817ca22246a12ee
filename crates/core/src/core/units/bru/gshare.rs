//! GShare branch predictor.
//!
//! GShare correlates global branch history with the program counter using an
//! XOR hash, letting the same static branch reach different counters in
//! different execution contexts. After every resolved branch the outcome is
//! shifted into the global history register, truncated to the configured
//! width.

use super::predictor::saturate;
use super::{BranchPredictor, Prediction};

/// Initial counter state: weakly not-taken.
const INITIAL_COUNTER: u8 = 1;

/// GShare predictor state.
pub struct GSharePredictor {
    /// Pattern history table of 2-bit saturating counters.
    counters: Vec<u8>,
    /// Global history register, LSB = most recent outcome.
    ghr: u32,
    /// Mask truncating the GHR to the configured history width.
    history_mask: u32,
    correct: u64,
    incorrect: u64,
}

impl GSharePredictor {
    /// Creates a GShare predictor.
    ///
    /// # Arguments
    ///
    /// * `table_size` - Number of counters (rounded up to a power of two).
    /// * `history_bits` - Width of the global history register.
    pub fn new(table_size: usize, history_bits: u32) -> Self {
        let size = table_size.max(1).next_power_of_two();
        Self {
            counters: vec![INITIAL_COUNTER; size],
            ghr: 0,
            history_mask: (1u32 << history_bits.min(31)) - 1,
            correct: 0,
            incorrect: 0,
        }
    }

    /// Index of the counter for `pc` under the current history.
    fn index(&self, pc: u32) -> usize {
        let mask = (self.counters.len() - 1) as u32;
        ((((pc >> 2) & mask) ^ (self.ghr & mask)) & mask) as usize
    }

    /// Current global history register value, for tests.
    pub fn history(&self) -> u32 {
        self.ghr
    }
}

impl BranchPredictor for GSharePredictor {
    fn predict(&self, pc: u32, target: u32, fallthrough: u32) -> Prediction {
        let taken = self.counters[self.index(pc)] >= 2;
        Prediction {
            taken,
            target: if taken { target } else { fallthrough },
        }
    }

    fn update(&mut self, pc: u32, _target: u32, taken: bool) {
        let idx = self.index(pc);

        // Score the prediction before training the counter or history.
        if (self.counters[idx] >= 2) == taken {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }

        saturate(&mut self.counters[idx], taken);
        self.ghr = ((self.ghr << 1) | taken as u32) & self.history_mask;
    }

    fn reset(&mut self) {
        self.counters.fill(INITIAL_COUNTER);
        self.ghr = 0;
        self.correct = 0;
        self.incorrect = 0;
    }

    fn correct(&self) -> u64 {
        self.correct
    }

    fn incorrect(&self) -> u64 {
        self.incorrect
    }
}
