//! Pipelines.
//!
//! The module provides a light [Pipeline] trait, the run [Stage]s and the
//! [CorpusPipeline] that drives sources through normalization, counting and sharding.
mod config;
mod corpus;
mod progress;

pub use config::{PipelineConfig, DEFAULT_MAX_WORDS};
pub use corpus::{process_pair, process_source, CorpusPipeline};
pub use progress::{Progress, REPORT_EVERY};

use std::fmt;

use log::info;

use crate::error::Error;
use crate::sources::DatasetTag;

/// This trait must be implemented for each Pipeline,
/// and is generic over the return type so that
/// any custom pipeline that needs a return type can use the
/// trait aswell.
///
/// Running consumes the pipeline: a finished run cannot be resumed.
pub trait Pipeline<T> {
    fn run(self) -> Result<T, Error>;
}

/// Stages of a run.
///
/// `Idle -> Extracting -> Normalizing(first) -> ... -> Normalizing(last) -> Reporting -> Done`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Idle,
    /// Locating extracted inputs.
    Extracting,
    /// Normalizing, counting and sharding a source.
    Normalizing(DatasetTag),
    /// Computing and saving statistics.
    Reporting,
    Done,
}

impl Stage {
    /// Truth that the run can go from `self` to `next`.
    pub fn can_advance_to(&self, next: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, next),
            (Idle, Extracting)
                | (Extracting, Normalizing(_))
                | (Extracting, Reporting)
                | (Normalizing(_), Normalizing(_))
                | (Normalizing(_), Reporting)
                | (Reporting, Done)
        )
    }

    /// Move to `next`.
    pub fn advance(&mut self, next: Stage) -> Result<(), Error> {
        if !self.can_advance_to(next) {
            return Err(Error::Custom(format!(
                "invalid stage transition from {} to {}",
                self, next
            )));
        }
        info!("{} -> {}", self, next);
        *self = next;
        Ok(())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::Extracting => write!(f, "extracting"),
            Stage::Normalizing(tag) => write!(f, "normalizing({})", tag),
            Stage::Reporting => write!(f, "reporting"),
            Stage::Done => write!(f, "done"),
        }
    }
}
