//! Processing pipeline configuration
use std::path::PathBuf;

use itertools::Itertools;

use crate::{
    error::Error,
    lang::{Language, TARGETS},
    sources::{DatasetTag, ALL_DATASETS},
    writing::DEFAULT_SHARD_CAPACITY,
};

/// Default maximum number of tokens of a text.
pub const DEFAULT_MAX_WORDS: usize = 50;

/// Run configuration.
///
/// Has to be [validated](PipelineConfig::validate) before any processing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PipelineConfig {
    /// Target side language. The source side is always english.
    pub target: Language,
    /// Maximum number of tokens of each side of a pair.
    pub max_words: usize,
    /// Version tag, used in output paths.
    pub dataset_version: String,
    /// Extracted data root.
    pub src: PathBuf,
    /// Processed data root.
    pub dst: PathBuf,
    /// Sources to process, in order.
    pub datasets: Vec<DatasetTag>,
    /// Number of pairs in a full shard.
    pub shard_capacity: usize,
}

impl PipelineConfig {
    /// Configuration with default sources and shard capacity.
    pub fn new(
        target: Language,
        max_words: usize,
        dataset_version: &str,
        src: PathBuf,
        dst: PathBuf,
    ) -> Self {
        Self {
            target,
            max_words,
            dataset_version: dataset_version.to_string(),
            src,
            dst,
            datasets: ALL_DATASETS.to_vec(),
            shard_capacity: DEFAULT_SHARD_CAPACITY,
        }
    }

    /// Check the configuration for basic sanity.
    pub fn validate(&self) -> Result<(), Error> {
        if !TARGETS.contains(&self.target) {
            return Err(Error::Config(format!(
                "target language should be one of es, fr or de (got {})",
                self.target
            )));
        }
        if self.max_words == 0 {
            return Err(Error::Config(
                "maximum number of words should be positive".to_string(),
            ));
        }
        if self.shard_capacity == 0 {
            return Err(Error::Config(
                "shard capacity should be positive".to_string(),
            ));
        }
        if self.dataset_version.trim().is_empty()
            || self.dataset_version.contains(std::path::is_separator)
        {
            return Err(Error::Config(format!(
                "invalid dataset version {:?}",
                self.dataset_version
            )));
        }
        if self.datasets.is_empty() {
            return Err(Error::Config("no dataset to process".to_string()));
        }
        if let Some(tag) = self.datasets.iter().duplicates().next() {
            return Err(Error::Config(format!("dataset {} is listed twice", tag)));
        }
        Ok(())
    }
}
