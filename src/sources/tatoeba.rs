//! Tab-separated sentence table (tatoeba/anki exports).
//!
//! Rows are `en \t target \t attribution`. The attribution column, and any
//! other trailing column, is ignored. Invalid UTF-8 is decoded lossily.
use std::{fs::File, io::BufReader, path::Path};

use csv::{ByteRecordsIntoIter, ReaderBuilder};
use log::{debug, warn};

use super::{count_lines, DatasetTag, SentencePair, SourceAdapter};
use crate::error::Error;

pub struct TatoebaSource {
    records: ByteRecordsIntoIter<File>,
    total: u64,
    row: u64,
}

impl TatoebaSource {
    pub fn new(path: &Path) -> Result<Self, Error> {
        let total = count_lines(BufReader::new(File::open(path)?))? as u64;
        debug!("{:?}: {} rows", path, total);

        // sentences can hold quotes, so quoting is disabled
        let records = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_path(path)?
            .into_byte_records();

        Ok(Self {
            records,
            total,
            row: 0,
        })
    }
}

impl SourceAdapter for TatoebaSource {
    fn tag(&self) -> DatasetTag {
        DatasetTag::Tatoeba
    }

    fn total_hint(&self) -> u64 {
        self.total
    }
}

impl Iterator for TatoebaSource {
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
                        DatasetTag::Tatoeba,
                    )))
                }
                _ => warn!("skipping row {} with {} columns", self.row, record.len()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn rows() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            "Go.\tVa !\tCC-BY 2.0 (France) Attribution: tatoeba.org #2877272 (CM)\n\
             He said \"hi\".\tIl a dit « salut ».\tCC-BY 2.0\n\
             orphan\n\
             Run!\tCours !\n"
        )
        .unwrap();

        let source = TatoebaSource::new(f.path()).unwrap();
        assert_eq!(source.total_hint(), 4);
        assert_eq!(source.tag(), DatasetTag::Tatoeba);

        let pairs: Vec<SentencePair> = source.map(|p| p.unwrap()).collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].source_text, "Go.");
        assert_eq!(pairs[0].target_text, "Va !");
        assert_eq!(pairs[1].source_text, "He said \"hi\".");
        assert_eq!(pairs[1].target_text, "Il a dit « salut ».");
        assert_eq!(pairs[2].source_text, "Run!");
        assert!(pairs.iter().all(|p| p.dataset_tag == DatasetTag::Tatoeba));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"Go.\tVa !\nCaf\xe9\tCaf\xc3\xa9\nRun!\tCours !\n")
            .unwrap();

        let pairs: Vec<SentencePair> = TatoebaSource::new(f.path())
            .unwrap()
            .map(|p| p.unwrap())
            .collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[1].source_text, "Caf\u{fffd}");
        assert_eq!(pairs[1].target_text, "Café");
        assert_eq!(pairs[2].source_text, "Run!");
    }
}
