//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use bicorpus::{
    error::Error,
    lang::Language,
    pipeline::{PipelineConfig, DEFAULT_MAX_WORDS},
    sources::{DatasetTag, ALL_DATASETS},
};

#[derive(Debug, StructOpt)]
#[structopt(name = "bicorpus", about = "parallel corpus generation tool.")]
/// Holds every command that is callable by the `bicorpus` command.
pub enum Bicorpus {
    #[structopt(about = "Run pipeline")]
    Pipeline(Pipeline),
    #[structopt(about = "Normalize text from stdin")]
    Normalize(Normalize),
}

#[derive(Debug, StructOpt)]
/// Pipeline command and parameters.
pub struct Pipeline {
    #[structopt(
        short = "l",
        long = "language",
        parse(try_from_str = Language::parse_target),
        help = "target language (es, fr or de)"
    )]
    pub language: Language,
    #[structopt(
        short = "w",
        long = "max-words",
        help = "maximum number of tokens per sentence (default: 50)"
    )]
    pub max_words: Option<usize>,
    #[structopt(
        long = "dataset-version",
        default_value = "v1.0.0",
        help = "version tag of the generated dataset"
    )]
    pub dataset_version: String,
    #[structopt(
        parse(from_os_str),
        long = "src",
        default_value = "data/extracted_data",
        help = "extracted data location"
    )]
    pub src: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "dst",
        default_value = "data/processed_data",
        help = "processed data destination"
    )]
    pub dst: PathBuf,
    #[structopt(
        short = "d",
        long = "datasets",
        help = "datasets to process, in order (default: tatoeba europarl paracrawl)"
    )]
    pub datasets: Vec<DatasetTag>,
    #[structopt(
        long = "shard-size",
        help = "number of pairs in a shard",
        default_value = "1000000"
    )]
    pub shard_size: usize,
}

impl From<Pipeline> for PipelineConfig {
    fn from(p: Pipeline) -> Self {
        let mut config =
            PipelineConfig::new(
                p.language,
                p.max_words.unwrap_or(DEFAULT_MAX_WORDS),
                &p.dataset_version,
                p.src,
                p.dst,
            );
        config.datasets = if p.datasets.is_empty() {
            ALL_DATASETS.to_vec()
        } else {
            p.datasets
        };
        config.shard_capacity = p.shard_size;
        config
    }
}

#[derive(Debug, StructOpt)]
/// Normalize command and parameters.
///
/// Reads lines from stdin and writes normalized lines on stdout.
/// Rejected lines are written as empty lines.
pub struct Normalize {
    #[structopt(
        short = "l",
        long = "language",
        default_value = "en",
        help = "language of the text (en, es, fr or de)"
    )]
    pub language: Language,
    #[structopt(
        short = "w",
        long = "max-words",
        help = "maximum number of tokens per line (default: 50)"
    )]
    pub max_words: Option<usize>,
}

impl Normalize {
    /// Maximum number of tokens, checked the same way as for the pipeline.
    pub fn max_words(&self) -> Result<usize, Error> {
        match self.max_words.unwrap_or(DEFAULT_MAX_WORDS) {
            0 => Err(Error::Config(
                "maximum number of words should be positive".to_string(),
            )),
            n => Ok(n),
        }
    }
}
