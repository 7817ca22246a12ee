//! Tournament branch predictor.
//!
//! A hybrid predictor holding a bimodal and a GShare component plus a table
//! of 2-bit choosers indexed by `(pc >> 2) mod table_size`. A chooser of 2
//! or 3 selects GShare, otherwise bimodal. Both components train on every
//! resolved branch; the chooser steps toward whichever component was right
//! when exactly one of them was.

use super::bimodal::BimodalPredictor;
use super::gshare::GSharePredictor;
use super::{BranchPredictor, Prediction};

/// Initial chooser state: weakly prefer bimodal.
const INITIAL_CHOOSER: u8 = 1;

/// Tournament predictor state.
pub struct TournamentPredictor {
    bimodal: BimodalPredictor,
    gshare: GSharePredictor,
    choosers: Vec<u8>,
    correct: u64,
    incorrect: u64,
}

impl TournamentPredictor {
    /// Creates a tournament predictor.
    ///
    /// Both components share the same table size; `history_bits` configures
    /// the GShare component.
    pub fn new(table_size: usize, history_bits: u32) -> Self {
        let size = table_size.max(1).next_power_of_two();
        Self {
            bimodal: BimodalPredictor::new(size),
            gshare: GSharePredictor::new(size, history_bits),
            choosers: vec![INITIAL_CHOOSER; size],
            correct: 0,
            incorrect: 0,
        }
    }

    /// Index of the chooser for the branch at `pc`.
    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.choosers.len() - 1)
    }

    /// Whether the chooser currently selects the GShare component.
    fn uses_gshare(&self, pc: u32) -> bool {
        self.choosers[self.index(pc)] >= 2
    }
}

impl BranchPredictor for TournamentPredictor {
    fn predict(&self, pc: u32, target: u32, fallthrough: u32) -> Prediction {
        if self.uses_gshare(pc) {
            self.gshare.predict(pc, target, fallthrough)
        } else {
            self.bimodal.predict(pc, target, fallthrough)
        }
    }

    fn update(&mut self, pc: u32, target: u32, taken: bool) {
        // Both component predictions, before any training.
        let bimodal_pred = self.bimodal.predict(pc, target, target).taken;
        let gshare_pred = self.gshare.predict(pc, target, target).taken;
        let used_pred = if self.uses_gshare(pc) {
            gshare_pred
        } else {
            bimodal_pred
        };

        // Score the prediction the pipeline actually used.
        if used_pred == taken {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }

        // Both components train unconditionally.
        self.bimodal.update(pc, target, taken);
        self.gshare.update(pc, target, taken);

        // The chooser moves only when exactly one component was right.
        let bimodal_correct = bimodal_pred == taken;
        let gshare_correct = gshare_pred == taken;
        if bimodal_correct != gshare_correct {
            let idx = self.index(pc);
            let chooser = &mut self.choosers[idx];
            if gshare_correct {
                if *chooser < 3 {
                    *chooser += 1;
                }
            } else if *chooser > 0 {
                *chooser -= 1;
            }
        }
    }

    fn reset(&mut self) {
        self.bimodal.reset();
        self.gshare.reset();
        self.choosers.fill(INITIAL_CHOOSER);
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
