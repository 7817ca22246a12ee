//! Bimodal (2-bit saturating counter) branch predictor.
//!
//! A table of 2-bit counters indexed by `(pc >> 2) mod table_size`. A
//! counter of 2 or 3 predicts taken. All counters start at 1 (weakly
//! not-taken).

use super::predictor::saturate;
use super::{BranchPredictor, Prediction};

/// Initial counter state: weakly not-taken.
const INITIAL_COUNTER: u8 = 1;

/// Bimodal predictor state.
pub struct BimodalPredictor {
    counters: Vec<u8>,
    correct: u64,
    incorrect: u64,
}

impl BimodalPredictor {
    /// Creates a bimodal predictor with `table_size` counters.
    ///
    /// The table size is rounded up to a power of two so indexing can mask
    /// instead of divide.
    pub fn new(table_size: usize) -> Self {
        let size = table_size.max(1).next_power_of_two();
        Self {
            counters: vec![INITIAL_COUNTER; size],
            correct: 0,
            incorrect: 0,
        }
    }

    /// Index of the counter for the branch at `pc`.
    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.counters.len() - 1)
    }

    /// Raw counter value for the branch at `pc`, for tests and the
    /// tournament predictor.
    pub fn counter(&self, pc: u32) -> u8 {
        self.counters[self.index(pc)]
    }

    /// Whether the counter at `pc` currently predicts taken.
    pub(crate) fn direction(&self, pc: u32) -> bool {
        self.counter(pc) >= 2
    }
}

impl BranchPredictor for BimodalPredictor {
    fn predict(&self, pc: u32, target: u32, fallthrough: u32) -> Prediction {
        let taken = self.direction(pc);
        Prediction {
            taken,
            target: if taken { target } else { fallthrough },
        }
    }

    fn update(&mut self, pc: u32, _target: u32, taken: bool) {
        // Score the prediction before training the counter.
        if self.direction(pc) == taken {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }

        let idx = self.index(pc);
        saturate(&mut self.counters[idx], taken);
    }

    fn reset(&mut self) {
        self.counters.fill(INITIAL_COUNTER);
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
