//! Static branch predictors.
//!
//! The two trivial policies: always not-taken (predict the fall-through)
//! and always taken (predict the target). Neither keeps any table state;
//! only the accuracy counters change on update.

use super::{BranchPredictor, Prediction};

/// Always predicts conditional branches as not taken.
pub struct NotTakenPredictor {
    correct: u64,
    incorrect: u64,
}

impl NotTakenPredictor {
    /// Creates a new always-not-taken predictor.
    pub fn new() -> Self {
        Self {
            correct: 0,
            incorrect: 0,
        }
    }
}

impl Default for NotTakenPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchPredictor for NotTakenPredictor {
    fn predict(&self, _pc: u32, _target: u32, fallthrough: u32) -> Prediction {
        Prediction {
            taken: false,
            target: fallthrough,
        }
    }

    fn update(&mut self, _pc: u32, _target: u32, taken: bool) {
        if taken {
            self.incorrect += 1;
        } else {
            self.correct += 1;
        }
    }

    fn reset(&mut self) {
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

/// Always predicts conditional branches as taken.
pub struct TakenPredictor {
    correct: u64,
    incorrect: u64,
}

impl TakenPredictor {
    /// Creates a new always-taken predictor.
    pub fn new() -> Self {
        Self {
            correct: 0,
            incorrect: 0,
        }
    }
}

impl Default for TakenPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchPredictor for TakenPredictor {
    fn predict(&self, _pc: u32, target: u32, _fallthrough: u32) -> Prediction {
        Prediction {
            taken: true,
            target,
        }
    }

    fn update(&mut self, _pc: u32, _target: u32, taken: bool) {
        if taken {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    fn reset(&mut self) {
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
