//! # Bicorpus
//!
//! Builds english-centric parallel corpora from extracted Tatoeba, Europarl and ParaCrawl releases.
//!
//! ```sh
//! bicorpus pipeline -l fr
//! bicorpus pipeline -l de -w 30 --dataset-version v1.1.0 -d tatoeba europarl
//! echo "Hello,   World!!" | bicorpus normalize -l en
//! ```
use std::io::{self, BufRead, BufWriter, Write};

use structopt::StructOpt;

use bicorpus::error::Error;
use bicorpus::normalize::normalize;
use bicorpus::pipeline::{CorpusPipeline, Pipeline, PipelineConfig};
use bicorpus::stats::WordCounts;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Bicorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Bicorpus::Pipeline(p) => {
            let config = PipelineConfig::from(p);
            let p = CorpusPipeline::new(config, WordCounts::new())?;
            let summary = p.run()?;
            info!(
                "done: {} accepted pairs",
                summary
                    .sources
                    .iter()
                    .map(|s| s.accepted_pairs)
                    .sum::<u64>()
            );
        }

        cli::Bicorpus::Normalize(n) => {
            let max_words = n.max_words()?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            for line in stdin.lock().lines() {
                let line = line?;
                writeln!(out, "{}", normalize(&line, n.language, max_words))?;
            }
            out.flush()?;
        }
    };
    Ok(())
}
