//! Parallel corpus generation pipeline
//!
//! Sources are processed one after the other, each one completely before the next begins.
//!
//! # Processing
//! 1. The extracted inputs of every configured source are located. A missing file stops the run.
//! 1. For each source, every raw pair is normalized on both sides (english and target language).
//!    A pair is accepted only if both sides are non-empty and within the word limit.
//! 1. Tokens of accepted pairs are counted in the [WordCounts] accumulator.
//! 1. Accepted pairs are written into shards, the last shard being flushed when the source is exhausted.
//! 1. Once every source is done, word statistics and rare words are computed and saved alongside the shards.
//!
//! The run is strictly sequential: the accumulator has a single writer and needs no locking.
use log::{debug, info, trace};

use super::{Pipeline, PipelineConfig, Progress, Stage};
use crate::error::Error;
use crate::lang::Language;
use crate::normalize::normalize;
use crate::report::{save_json_file, RunSummary, SourceSummary};
use crate::sources::{self, SentencePair, Source, SourceAdapter};
use crate::stats::WordCounts;
use crate::writing::{shard_dir, ShardWriter};

pub struct CorpusPipeline {
    config: PipelineConfig,
    counts: WordCounts,
}

impl CorpusPipeline {
    /// Prepare a run, rejecting invalid configurations.
    ///
    /// `counts` is the accumulator the run will update.
    pub fn new(config: PipelineConfig, counts: WordCounts) -> Result<Self, Error> {
        config.validate()?;
        debug!("using configuration {:?}", config);
        Ok(Self { config, counts })
    }
}

impl Pipeline<RunSummary> for CorpusPipeline {
    fn run(mut self) -> Result<RunSummary, Error> {
        let config = &self.config;
        let mut stage = Stage::Idle;

        stage.advance(Stage::Extracting)?;
        for tag in &config.datasets {
            let paths = sources::locate(*tag, &config.src, config.target)?;
            debug!("[{}] inputs: {:?}", tag, paths);
        }

        let mut summaries = Vec::with_capacity(config.datasets.len());
        for tag in &config.datasets {
            stage.advance(Stage::Normalizing(*tag))?;
            let source = Source::open(*tag, &config.src, config.target)?;
            let out = shard_dir(&config.dst, &config.dataset_version, *tag, config.target);
            let writer = ShardWriter::new(&out, config.target, config.shard_capacity);
            summaries.push(process_source(
                source,
                writer,
                config.target,
                config.max_words,
                &mut self.counts,
            )?);
        }

        stage.advance(Stage::Reporting)?;
        let (summary, common) = RunSummary::new(
            &config.dataset_version,
            config.target,
            config.max_words,
            summaries,
            &self.counts,
        );
        summary.log();
        let report_dir = config.dst.join(&config.dataset_version);
        save_json_file(&summary, "summary", &report_dir)?;
        save_json_file(
            &common,
            &format!("{}_common_rare_words", config.target.pair_name()),
            &report_dir,
        )?;

        stage.advance(Stage::Done)?;
        Ok(summary)
    }
}

/// Normalize a raw pair and count its tokens if it is accepted.
///
/// Returns the normalized `(english, target)` texts, or [None] if either side is rejected.
/// Rejected pairs leave `counts` untouched.
pub fn process_pair(
    pair: &SentencePair,
    target: Language,
    max_words: usize,
    counts: &mut WordCounts,
) -> Option<(String, String)> {
    let source_text = normalize(&pair.source_text, Language::En, max_words);
    if source_text.is_empty() {
        trace!("rejected {:?} (english side)", pair);
        return None;
    }
    let target_text = normalize(&pair.target_text, target, max_words);
    if target_text.is_empty() {
        trace!("rejected {:?} ({} side)", pair, target);
        return None;
    }

    counts.record_text(&source_text, Language::En);
    counts.record_text(&target_text, target);
    Some((source_text, target_text))
}

/// Run a whole source through normalization, counting and sharding.
///
/// The writer is finalized once the source is exhausted.
/// Errors stop the processing; shards already flushed stay on disk.
pub fn process_source<S: SourceAdapter>(
    source: S,
    mut writer: ShardWriter,
    target: Language,
    max_words: usize,
    counts: &mut WordCounts,
) -> Result<SourceSummary, Error> {
    let tag = source.tag();
    info!("[{}] processing ~{} records", tag, source.total_hint());

    let mut progress = Progress::new(tag, source.total_hint());
    let mut accepted = 0;
    for pair in source {
        let pair = pair?;
        progress.inc();

        if let Some((source_text, target_text)) = process_pair(&pair, target, max_words, counts) {
            writer.append(source_text, target_text);
            writer.maybe_flush()?;
            accepted += 1;
        }
    }
    progress.finish();

    let output = writer.dst().to_path_buf();
    let stats = writer.finalize()?;
    debug_assert_eq!(stats.nb_pairs, accepted);

    Ok(SourceSummary {
        dataset: tag,
        original_pairs: progress.seen(),
        accepted_pairs: accepted,
        nb_shards: stats.nb_shards,
        output,
    })
}
