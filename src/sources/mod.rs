/*! Raw sentence pair sources.

Each dataset family has its own raw shape, and a dedicated adapter turning it into a stream of [SentencePair]:

- [TatoebaSource]: tab-separated sentence table (`en \t target \t attribution`),
- [EuroparlSource]: two line-aligned monolingual files,
- [ParacrawlSource]: crawled bilingual records, read as byte strings from an (optionally gzipped) tab-separated dump.

Adapters implement [SourceAdapter], and are grouped behind the [Source] enum so that the pipeline
can pick one from configuration.

Sources are expected to be already downloaded and extracted, following this layout (relative to the extracted data root):

```text
tatoeba/<lang>-en/<iso3>.txt
europarl/<lang>-en/europarl-v7.<lang>-en.en
europarl/<lang>-en/europarl-v7.<lang>-en.<lang>
paracrawl/<lang>-en/en-<lang>.txt.gz (or en-<lang>.txt)
```
!*/
mod europarl;
mod paracrawl;
mod tatoeba;

use std::{
    fmt,
    io::BufRead,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{error::Error, lang::Language};

pub use europarl::EuroparlSource;
pub use paracrawl::ParacrawlSource;
pub use tatoeba::TatoebaSource;

/// Dataset families.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetTag {
    Tatoeba,
    Europarl,
    Paracrawl,
}

/// Every dataset family, in default processing order.
pub const ALL_DATASETS: [DatasetTag; 3] = [
    DatasetTag::Tatoeba,
    DatasetTag::Europarl,
    DatasetTag::Paracrawl,
];

impl DatasetTag {
    pub fn name(&self) -> &'static str {
        match self {
            DatasetTag::Tatoeba => "tatoeba",
            DatasetTag::Europarl => "europarl",
            DatasetTag::Paracrawl => "paracrawl",
        }
    }
}

impl FromStr for DatasetTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tatoeba" => Ok(DatasetTag::Tatoeba),
            "europarl" => Ok(DatasetTag::Europarl),
            "paracrawl" => Ok(DatasetTag::Paracrawl),
            _ => Err(Error::Config(format!("unknown dataset {:?}", s))),
        }
    }
}

impl fmt::Display for DatasetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw (not normalized yet) pair of sentences.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SentencePair {
    pub source_text: String,
    pub target_text: String,
    pub dataset_tag: DatasetTag,
}

impl SentencePair {
    pub fn new(source_text: String, target_text: String, dataset_tag: DatasetTag) -> Self {
        Self {
            source_text,
            target_text,
            dataset_tag,
        }
    }
}

/// Enables iterating on raw pairs and progress computation.
pub trait SourceAdapter: Iterator<Item = Result<SentencePair, Error>> {
    fn tag(&self) -> DatasetTag;

    /// Approximate number of records in the source.
    fn total_hint(&self) -> u64;
}

/// Holds the different kinds of sources.
pub enum Source {
    Tatoeba(TatoebaSource),
    Europarl(EuroparlSource),
    Paracrawl(ParacrawlSource),
}

impl Source {
    /// Open the source of `tag` for the `target` language, from the extracted data root `src`.
    ///
    /// Fails with [Error::MissingInput] if an expected file is absent.
    pub fn open(tag: DatasetTag, src: &Path, target: Language) -> Result<Self, Error> {
        let paths = locate(tag, src, target)?;
        let source = match tag {
            DatasetTag::Tatoeba => Source::Tatoeba(TatoebaSource::new(&paths[0])?),
            DatasetTag::Europarl => {
                Source::Europarl(EuroparlSource::new(&paths[0], &paths[1])?)
            }
            DatasetTag::Paracrawl => Source::Paracrawl(ParacrawlSource::new(&paths[0])?),
        };
        Ok(source)
    }
}

impl SourceAdapter for Source {
    fn tag(&self) -> DatasetTag {
        match self {
            Self::Tatoeba(s) => s.tag(),
            Self::Europarl(s) => s.tag(),
            Self::Paracrawl(s) => s.tag(),
        }
    }

    fn total_hint(&self) -> u64 {
        match self {
            Self::Tatoeba(s) => s.total_hint(),
            Self::Europarl(s) => s.total_hint(),
            Self::Paracrawl(s) => s.total_hint(),
        }
    }
}

impl Iterator for Source {
    type Item = Result<SentencePair, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Tatoeba(s) => s.next(),
            Self::Europarl(s) => s.next(),
            Self::Paracrawl(s) => s.next(),
        }
    }
}

/// Expected input files of a dataset family.
///
/// For europarl, the english side comes first.
pub fn expected_paths(tag: DatasetTag, src: &Path, target: Language) -> Vec<PathBuf> {
    let dir: PathBuf = [
        src,
        Path::new(tag.name()),
        Path::new(&format!("{}-en", target.code())),
    ]
    .iter()
    .collect();
    match tag {
        DatasetTag::Tatoeba => vec![dir.join(format!("{}.txt", target.iso3()))],
        DatasetTag::Europarl => {
            let stem = format!("europarl-v7.{}-en", target.code());
            vec![
                dir.join(format!("{}.{}", stem, Language::En.code())),
                dir.join(format!("{}.{}", stem, target.code())),
            ]
        }
        DatasetTag::Paracrawl => vec![dir.join(format!("en-{}.txt.gz", target.code()))],
    }
}

/// Check that the input files of a dataset family are there and return their paths.
///
/// The paracrawl dump may be either gzipped or not.
pub fn locate(tag: DatasetTag, src: &Path, target: Language) -> Result<Vec<PathBuf>, Error> {
    let mut paths = expected_paths(tag, src, target);
    for path in paths.iter_mut() {
        if path.is_file() {
            continue;
        }
        if tag == DatasetTag::Paracrawl {
            let plain = path.with_extension("");
            if plain.is_file() {
                *path = plain;
                continue;
            }
        }
        return Err(Error::MissingInput(path.clone()));
    }
    Ok(paths)
}

/// Count lines (newline-terminated or not) without decoding them.
pub(crate) fn count_lines<R: BufRead>(mut reader: R) -> std::io::Result<usize> {
    let mut count = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(count);
        }
        count += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn dataset_names() {
        for tag in ALL_DATASETS {
            assert_eq!(tag.name().parse::<DatasetTag>().unwrap(), tag);
        }
        assert!(matches!("wmt".parse::<DatasetTag>(), Err(Error::Config(_))));
    }

    #[test]
    fn count() {
        assert_eq!(count_lines(&b""[..]).unwrap(), 0);
        assert_eq!(count_lines(&b"a\nb\n"[..]).unwrap(), 2);
        assert_eq!(count_lines(&b"a\nb"[..]).unwrap(), 2);
        assert_eq!(count_lines(&b"\xff\xfe\n\n"[..]).unwrap(), 2);
    }

    #[test]
    fn missing_input() {
        let src = tempdir().unwrap();
        for tag in ALL_DATASETS {
            let err = Source::open(tag, src.path(), Language::Fr).err().unwrap();
            match err {
                Error::MissingInput(p) => assert!(p.starts_with(src.path().join(tag.name()))),
                e => panic!("unexpected error {:?}", e),
            }
        }
    }

    #[test]
    fn paracrawl_plain_fallback() {
        let src = tempdir().unwrap();
        let dir = src.path().join("paracrawl").join("de-en");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("en-de.txt"), "hello\thallo\n").unwrap();

        let paths = locate(DatasetTag::Paracrawl, src.path(), Language::De).unwrap();
        assert_eq!(paths, vec![dir.join("en-de.txt")]);
    }

    #[test]
    fn europarl_half_missing() {
        let src = tempdir().unwrap();
        let paths = expected_paths(DatasetTag::Europarl, src.path(), Language::Es);
        fs::create_dir_all(paths[0].parent().unwrap()).unwrap();
        fs::write(&paths[0], "hello\n").unwrap();

        match locate(DatasetTag::Europarl, src.path(), Language::Es) {
            Err(Error::MissingInput(p)) => assert_eq!(p, paths[1]),
            other => panic!("unexpected result {:?}", other.map(|_| ())),
        }
    }
}
