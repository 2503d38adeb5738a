//! Crawled bilingual records (paracrawl).
//!
//! Dumps are large tab-separated files `en \t target`, usually gzipped (multi-member gzip is supported).
//! Crawled text is not guaranteed to be valid UTF-8, so records are read as byte strings and decoded lossily.
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use csv::{ByteRecordsIntoIter, ReaderBuilder};
use flate2::read::MultiGzDecoder;
use log::{debug, warn};

use super::{count_lines, DatasetTag, SentencePair, SourceAdapter};
use crate::error::Error;

pub struct ParacrawlSource {
    records: ByteRecordsIntoIter<Box<dyn Read>>,
    total: u64,
    row: u64,
}

impl ParacrawlSource {
    /// Open a dump, gzipped if its extension is `.gz`.
    pub fn new(path: &Path) -> Result<Self, Error> {
        let total = count_lines(BufReader::new(Self::open_raw(path)?))? as u64;
        debug!("{:?}: {} records", path, total);

        let records = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(Self::open_raw(path)?)
            .into_byte_records();

        Ok(Self {
            records,
            total,
            row: 0,
        })
    }

    fn open_raw(path: &Path) -> Result<Box<dyn Read>, Error> {
        let f = File::open(path)?;
        let is_gzip = path.extension().map_or(false, |ext| ext == "gz");
        if is_gzip {
            Ok(Box::new(MultiGzDecoder::new(BufReader::new(f))))
        } else {
            Ok(Box::new(f))
        }
    }
}

impl SourceAdapter for ParacrawlSource {
    fn tag(&self) -> DatasetTag {
        DatasetTag::Paracrawl
    }

    fn total_hint(&self) -> u64 {
        self.total
    }
}

impl Iterator for ParacrawlSource {
    type Item = Result<SentencePair, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(r) => r,
                Err(e) => return Some(Err(e.into())),
            };
            self.row += 1;

            match (record.get(0), record.get(1)) {
                (Some(en), Some(target)) => {
                    return Some(Ok(SentencePair::new(
                        String::from_utf8_lossy(en).into_owned(),
                        String::from_utf8_lossy(target).into_owned(),
                        DatasetTag::Paracrawl,
                    )))
                }
                _ => warn!("skipping record {} with {} fields", self.row, record.len()),
            }
        }
    }
}
