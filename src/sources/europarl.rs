//! Line-aligned monolingual files (europarl).
//!
//! Line `n` of the english file is the translation of line `n` of the target file.
//! Alignment is only checked on line counts: files of different lengths are rejected
//! instead of being silently zipped short.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::debug;

use super::{count_lines, DatasetTag, SentencePair, SourceAdapter};
use crate::error::Error;

pub struct EuroparlSource {
    source_path: PathBuf,
    target_path: PathBuf,
    source: BufReader<File>,
    target: BufReader<File>,
    total: u64,
    line: u64,
}

impl EuroparlSource {
    /// Open a couple of aligned files.
    ///
    /// Fails with [Error::Alignment] if their line counts differ.
    pub fn new(source_path: &Path, target_path: &Path) -> Result<Self, Error> {
        let source_lines = count_lines(BufReader::new(File::open(source_path)?))?;
        let target_lines = count_lines(BufReader::new(File::open(target_path)?))?;
        if source_lines != target_lines {
            return Err(Error::Alignment {
                left: source_path.to_path_buf(),
                right: target_path.to_path_buf(),
                left_lines: source_lines,
                right_lines: target_lines,
            });
        }
        debug!(
            "{:?} and {:?} are aligned on {} lines",
            source_path, target_path, source_lines
        );

        Ok(Self {
            source_path: source_path.to_path_buf(),
            target_path: target_path.to_path_buf(),
            source: BufReader::new(File::open(source_path)?),
            target: BufReader::new(File::open(target_path)?),
            total: source_lines as u64,
            line: 0,
        })
    }

    /// Get next line (read until `\n`), decoding invalid UTF-8 lossily.
    fn next_line(reader: &mut BufReader<File>) -> Option<Result<String, Error>> {
        let mut buf = Vec::new();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Err(e) => Some(Err(Error::Io(e))),
            _ => {
                let line = String::from_utf8_lossy(&buf);
                Some(Ok(line.trim_end_matches(&['\n', '\r'][..]).to_string()))
            }
        }
    }
}

impl SourceAdapter for EuroparlSource {
    fn tag(&self) -> DatasetTag {
        DatasetTag::Europarl
    }

    fn total_hint(&self) -> u64 {
        self.total
    }
}

impl Iterator for EuroparlSource {
    type Item = Result<SentencePair, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let pair = match (
            Self::next_line(&mut self.source),
            Self::next_line(&mut self.target),
        ) {
            (None, None) => return None,
            (Some(Err(e)), _) | (_, Some(Err(e))) => Err(e),
            (Some(Ok(source)), Some(Ok(target))) => {
                Ok(SentencePair::new(source, target, DatasetTag::Europarl))
            }
            // files changed since they were opened
            (source, _) => {
                let read = self.line as usize;
                let (left_lines, right_lines) = if source.is_some() {
                    (read + 1, read)
                } else {
                    (read, read + 1)
                };
                Err(Error::Alignment {
                    left: self.source_path.clone(),
                    right: self.target_path.clone(),
                    left_lines,
                    right_lines,
                })
            }
        };
        self.line += 1;
        Some(pair)
    }
}
