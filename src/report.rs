//! Run summaries and their JSON persistence.
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::info;
use serde::Serialize;

use crate::{
    error::Error,
    lang::Language,
    sources::DatasetTag,
    stats::{common_words, RareWords, WordCounts},
};

/// What happened to a source.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SourceSummary {
    pub dataset: DatasetTag,
    /// Number of raw pairs read.
    pub original_pairs: u64,
    /// Number of pairs that made it to the shards.
    pub accepted_pairs: u64,
    pub nb_shards: usize,
    pub output: PathBuf,
}

/// Word statistics of a language.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LanguageSummary {
    pub unique_words: usize,
    pub total_words: u64,
    pub rare_words: usize,
}

/// Summary of a whole run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub dataset_version: String,
    pub target: Language,
    pub max_words: usize,
    pub sources: Vec<SourceSummary>,
    pub languages: BTreeMap<Language, LanguageSummary>,
    pub common_rare_words: usize,
}

/// Rare words found in both languages of the pair, along with the rare words of each language.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CommonRareWords {
    pub languages: (Language, Language),
    pub words: RareWords,
    pub rare_words: BTreeMap<Language, RareWords>,
}

impl RunSummary {
    /// Build the summary once every source has been processed.
    ///
    /// Returns the common rare words along with the summary.
    pub fn new(
        dataset_version: &str,
        target: Language,
        max_words: usize,
        sources: Vec<SourceSummary>,
        counts: &WordCounts,
    ) -> (Self, CommonRareWords) {
        let (target_rare, en_rare) = rayon::join(
            || counts.rare_words(target),
            || counts.rare_words(Language::En),
        );
        let words = common_words(&target_rare, &en_rare);
        let rare_words: BTreeMap<Language, RareWords> =
            [(target, target_rare), (Language::En, en_rare)]
                .into_iter()
                .collect();

        let languages: BTreeMap<Language, LanguageSummary> = rare_words
            .iter()
            .map(|(lang, rare)| {
                let summary = LanguageSummary {
                    unique_words: counts.unique_words(*lang),
                    total_words: counts.total_words(*lang),
                    rare_words: rare.len(),
                };
                (*lang, summary)
            })
            .collect();
        let common = CommonRareWords {
            languages: (target, Language::En),
            words,
            rare_words,
        };

        let summary = Self {
            dataset_version: dataset_version.to_string(),
            target,
            max_words,
            sources,
            languages,
            common_rare_words: common.words.len(),
        };
        (summary, common)
    }

    /// Print the summary in the logs.
    pub fn log(&self) {
        for source in &self.sources {
            info!(
                "[{}] {} original pairs, {} accepted pairs, {} shards",
                source.dataset, source.original_pairs, source.accepted_pairs, source.nb_shards
            );
        }
        for (lang, summary) in &self.languages {
            info!(
                "[{}] {} unique words, {} rare words",
                lang, summary.unique_words, summary.rare_words
            );
        }
        info!(
            "[en-{}] {} common rare words",
            self.target, self.common_rare_words
        );
    }
}

/// Save `value` as a pretty-printed `<file_name>.json` into `dir`.
///
/// Creates `dir` if it doesn't exist and overwrites existing files.
pub fn save_json_file<T: Serialize>(value: &T, file_name: &str, dir: &Path) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(dir)?;
    let mut path = dir.to_path_buf();
    path.push(format!("{}.json", file_name));

    write_json(value, File::create(&path)?)?;
    info!("{}.json file saved successfully.", file_name);
    Ok(path)
}

/// Write `value` as pretty-printed JSON into `w`, flushing it.
pub fn write_json<T: Serialize, W: Write>(value: &T, w: W) -> Result<(), Error> {
    let mut w = BufWriter::new(w);
    serde_json::to_writer_pretty(&mut w, value)?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn summary() {
        let mut counts = WordCounts::new();
        counts.record_text("the xylophone plays", Language::En);
        counts.record_text("el xylophone suena", Language::Es);

        let (summary, common) = RunSummary::new("v1", Language::Es, 10, vec![], &counts);
        assert_eq!(summary.languages[&Language::En].unique_words, 3);
        assert_eq!(summary.languages[&Language::Es].rare_words, 1);
        assert_eq!(summary.common_rare_words, 1);
        assert!(common.words.contains("xylophone"));
        assert_eq!(common.rare_words[&Language::En].len(), 1);
        assert_eq!(common.words, counts.common_rare_words(Language::Es, Language::En));
    }

    #[test]
    fn save_and_reload() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("v1");
        let counts = WordCounts::new();
        let sources = vec![SourceSummary {
            dataset: DatasetTag::Tatoeba,
            original_pairs: 3,
            accepted_pairs: 2,
            nb_shards: 1,
            output: PathBuf::from("v1/tatoeba/en-de"),
        }];
        let (summary, _) = RunSummary::new("v1", Language::De, 10, sources, &counts);

        let path = save_json_file(&summary, "summary", &out).unwrap();
        assert_eq!(path, out.join("summary.json"));

        let json: serde_json::Value =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(json["target"], "de");
        assert_eq!(json["sources"][0]["dataset"], "tatoeba");
        assert_eq!(json["sources"][0]["accepted_pairs"], 2);
        assert_eq!(json["languages"]["en"]["unique_words"], 0);
    }

    /// Writer that always fails, as a full disk would.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_reported() {
        let (summary, _) = RunSummary::new("v1", Language::Fr, 10, vec![], &WordCounts::new());
        assert!(matches!(write_json(&summary, FullDisk), Err(Error::Io(_))));
    }
}
