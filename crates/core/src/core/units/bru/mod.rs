//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the supported branch prediction algorithms: static
//! not-taken, static taken, bimodal 2-bit, GShare, and tournament. Every
//! predictor tracks its own `correct`/`incorrect` counters against the
//! prediction the pipeline actually used, so `correct + incorrect` always
//! equals the number of resolved predictions.

pub use self::predictor::{BranchPredictor, Prediction};

/// Bimodal 2-bit saturating-counter predictor.
pub mod bimodal;

/// Global-history (GShare) predictor.
pub mod gshare;

/// Branch predictor trait and common types.
pub mod predictor;

/// Static predictors (always not-taken, always taken).
pub mod static_bp;

/// Tournament predictor (bimodal + GShare with a chooser).
pub mod tournament;

use self::bimodal::BimodalPredictor;
use self::gshare::GSharePredictor;
use self::static_bp::{NotTakenPredictor, TakenPredictor};
use self::tournament::TournamentPredictor;
use crate::config::{Config, PredictorKind};

/// Enum wrapper for static dispatch of branch predictors.
///
/// This avoids vtable lookups in the decode and execute stages.
pub enum PredictorWrapper {
    /// Always predicts not-taken.
    NotTaken(NotTakenPredictor),
    /// Always predicts taken.
    Taken(TakenPredictor),
    /// Per-PC 2-bit saturating counters.
    Bimodal(BimodalPredictor),
    /// Global history XOR PC indexed counters.
    GShare(GSharePredictor),
    /// Bimodal and GShare with a per-PC chooser.
    Tournament(TournamentPredictor),
}

impl PredictorWrapper {
    /// Creates a branch predictor wrapper based on configuration.
    pub fn from_config(config: &Config) -> Self {
        let p = &config.predictor;
        match p.kind {
            PredictorKind::StaticNotTaken => Self::NotTaken(NotTakenPredictor::new()),
            PredictorKind::StaticTaken => Self::Taken(TakenPredictor::new()),
            PredictorKind::Bimodal => Self::Bimodal(BimodalPredictor::new(p.table_size)),
            PredictorKind::GShare => {
                Self::GShare(GSharePredictor::new(p.table_size, p.history_bits))
            }
            PredictorKind::Tournament => {
                Self::Tournament(TournamentPredictor::new(p.table_size, p.history_bits))
            }
        }
    }
}

impl BranchPredictor for PredictorWrapper {
    #[inline(always)]
    fn predict(&self, pc: u32, target: u32, fallthrough: u32) -> Prediction {
        match self {
            Self::NotTaken(bp) => bp.predict(pc, target, fallthrough),
            Self::Taken(bp) => bp.predict(pc, target, fallthrough),
            Self::Bimodal(bp) => bp.predict(pc, target, fallthrough),
            Self::GShare(bp) => bp.predict(pc, target, fallthrough),
            Self::Tournament(bp) => bp.predict(pc, target, fallthrough),
        }
    }

    #[inline(always)]
    fn update(&mut self, pc: u32, target: u32, taken: bool) {
        match self {
            Self::NotTaken(bp) => bp.update(pc, target, taken),
            Self::Taken(bp) => bp.update(pc, target, taken),
            Self::Bimodal(bp) => bp.update(pc, target, taken),
            Self::GShare(bp) => bp.update(pc, target, taken),
            Self::Tournament(bp) => bp.update(pc, target, taken),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::NotTaken(bp) => bp.reset(),
            Self::Taken(bp) => bp.reset(),
            Self::Bimodal(bp) => bp.reset(),
            Self::GShare(bp) => bp.reset(),
            Self::Tournament(bp) => bp.reset(),
        }
    }

    fn correct(&self) -> u64 {
        match self {
            Self::NotTaken(bp) => bp.correct(),
            Self::Taken(bp) => bp.correct(),
            Self::Bimodal(bp) => bp.correct(),
            Self::GShare(bp) => bp.correct(),
            Self::Tournament(bp) => bp.correct(),
        }
    }

    fn incorrect(&self) -> u64 {
        match self {
            Self::NotTaken(bp) => bp.incorrect(),
            Self::Taken(bp) => bp.incorrect(),
            Self::Bimodal(bp) => bp.incorrect(),
            Self::GShare(bp) => bp.incorrect(),
            Self::Tournament(bp) => bp.incorrect(),
        }
    }
}
