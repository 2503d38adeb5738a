//! Fixed-capacity shard writer for sentence pairs.
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::lang::Language;

use super::shard_path;

/// Number of pairs in a full shard.
pub const DEFAULT_SHARD_CAPACITY: usize = 1_000_000;

/// What a [ShardWriter] has written once finalized.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ShardStats {
    pub nb_shards: usize,
    pub nb_pairs: u64,
}

/// Buffers accepted pairs and writes them in shards of `capacity` pairs.
///
/// Both sides are kept in two parallel buffers, so that a shard is always
/// written as two files with the same number of lines.
/// Nothing is created/written unless a shard is flushed.
/// Existing shard files are overwritten, not appended to, and shards
/// beyond the last one written are removed on [finalize](ShardWriter::finalize).
pub struct ShardWriter {
    dst: PathBuf,
    target: Language,
    capacity: usize,
    source_buf: Vec<String>,
    target_buf: Vec<String>,
    shard_idx: usize,
    nb_pairs: u64,
}

impl ShardWriter {
    /// Create a new [ShardWriter] writing into `dst`.
    ///
    /// `capacity` must not be zero.
    pub fn new(dst: &Path, target: Language, capacity: usize) -> Self {
        debug_assert!(capacity > 0, "shard capacity should be positive");
        Self {
            dst: dst.to_path_buf(),
            target,
            capacity,
            source_buf: Vec::new(),
            target_buf: Vec::new(),
            shard_idx: 0,
            nb_pairs: 0,
        }
    }

    /// Buffer an accepted pair.
    pub fn append(&mut self, source_text: String, target_text: String) {
        self.source_buf.push(source_text);
        self.target_buf.push(target_text);
    }

    /// Write a shard if the buffers hold `capacity` pairs.
    ///
    /// Returns truth that a shard has been written.
    pub fn maybe_flush(&mut self) -> Result<bool, Error> {
        if self.source_buf.len() >= self.capacity {
            self.flush()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Write the remaining buffered pairs as the last shard, even if it is not full.
    ///
    /// Writes nothing if the buffers are empty.
    /// Shards left over by a previous, longer run are removed.
    pub fn finalize(mut self) -> Result<ShardStats, Error> {
        if !self.source_buf.is_empty() {
            self.flush()?;
        }
        self.remove_stale()?;
        info!(
            "{:?}: {} pairs in {} shards",
            self.dst, self.nb_pairs, self.shard_idx
        );
        Ok(ShardStats {
            nb_shards: self.shard_idx,
            nb_pairs: self.nb_pairs,
        })
    }

    /// Number of pairs waiting to be written.
    pub fn buffered(&self) -> usize {
        self.source_buf.len()
    }

    /// Index of the next shard to be written.
    pub fn shard_idx(&self) -> usize {
        self.shard_idx
    }

    /// Directory the shards are written into.
    pub fn dst(&self) -> &Path {
        &self.dst
    }

    fn flush(&mut self) -> Result<(), Error> {
        debug_assert_eq!(self.source_buf.len(), self.target_buf.len());
        std::fs::create_dir_all(&self.dst)?;

        Self::write_lines(
            &shard_path(&self.dst, self.shard_idx, Language::En),
            &self.source_buf,
        )?;
        Self::write_lines(
            &shard_path(&self.dst, self.shard_idx, self.target),
            &self.target_buf,
        )?;

        debug!(
            "shard {} of {:?} holds {} pairs",
            self.shard_idx,
            self.dst,
            self.source_buf.len()
        );
        self.nb_pairs += self.source_buf.len() as u64;
        self.shard_idx += 1;
        self.source_buf.clear();
        self.target_buf.clear();
        Ok(())
    }

    /// Remove shards from `shard_idx` onwards.
    fn remove_stale(&self) -> Result<(), Error> {
        let mut idx = self.shard_idx;
        loop {
            let paths = [
                shard_path(&self.dst, idx, Language::En),
                shard_path(&self.dst, idx, self.target),
            ];
            if !paths.iter().any(|p| p.exists()) {
                return Ok(());
            }
            for path in paths.iter().filter(|p| p.exists()) {
                info!("removing stale shard {:?}", path);
                std::fs::remove_file(path)?;
            }
            idx += 1;
        }
    }

    fn write_lines(path: &Path, lines: &[String]) -> Result<(), Error> {
        info!("creating {:?}", path);
        let mut w = BufWriter::new(File::create(path)?);
        for line in lines {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
        }
        w.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};

    use tempfile::tempdir;

    use super::*;

    fn read_lines(path: &Path) -> Vec<String> {
        let f = File::open(path).unwrap();
        BufReader::new(f).lines().map(|l| l.unwrap()).collect()
    }

    fn feed(writer: &mut ShardWriter, nb: usize) {
        for i in 0..nb {
            writer.append(format!("sentence {}", i), format!("phrase {}", i));
            writer.maybe_flush().unwrap();
        }
    }

    #[test]
    fn nothing_written_when_empty() {
        let dst = tempdir().unwrap();
        let out = dst.path().join("en-fr");
        let w = ShardWriter::new(&out, Language::Fr, 3);
        let stats = w.finalize().unwrap();

        assert_eq!(stats, ShardStats::default());
        assert!(!out.exists());
    }

    #[test]
    fn full_shards_then_remainder() {
        let dst = tempdir().unwrap();
        let mut w = ShardWriter::new(dst.path(), Language::Fr, 3);
        feed(&mut w, 7);
        assert_eq!(w.shard_idx(), 2);
        assert_eq!(w.buffered(), 1);

        let stats = w.finalize().unwrap();
        assert_eq!(stats.nb_shards, 3);
        assert_eq!(stats.nb_pairs, 7);

        let expected_sizes = [3, 3, 1];
        let mut i = 0;
        for (idx, size) in expected_sizes.iter().enumerate() {
            let en = read_lines(&shard_path(dst.path(), idx, Language::En));
            let fr = read_lines(&shard_path(dst.path(), idx, Language::Fr));
            assert_eq!(en.len(), *size);
            assert_eq!(fr.len(), *size);
            for (en_line, fr_line) in en.iter().zip(fr.iter()) {
                assert_eq!(en_line, &format!("sentence {}", i));
                assert_eq!(fr_line, &format!("phrase {}", i));
                i += 1;
            }
        }
        assert!(!shard_path(dst.path(), 3, Language::En).exists());
    }

    #[test]
    fn exact_multiple_has_no_trailing_shard() {
        let dst = tempdir().unwrap();
        let mut w = ShardWriter::new(dst.path(), Language::De, 2);
        feed(&mut w, 4);
        let stats = w.finalize().unwrap();

        assert_eq!(stats.nb_shards, 2);
        assert!(!shard_path(dst.path(), 2, Language::De).exists());
    }

    #[test]
    fn shards_are_overwritten() {
        let dst = tempdir().unwrap();
        let mut w = ShardWriter::new(dst.path(), Language::Es, 10);
        feed(&mut w, 5);
        w.finalize().unwrap();

        let mut w = ShardWriter::new(dst.path(), Language::Es, 10);
        feed(&mut w, 2);
        w.finalize().unwrap();

        assert_eq!(read_lines(&shard_path(dst.path(), 0, Language::En)).len(), 2);
        assert_eq!(read_lines(&shard_path(dst.path(), 0, Language::Es)).len(), 2);
    }

    #[test]
    fn stale_shards_are_removed() {
        let dst = tempdir().unwrap();
        let mut w = ShardWriter::new(dst.path(), Language::Fr, 1);
        feed(&mut w, 3);
        assert_eq!(w.finalize().unwrap().nb_shards, 3);
        assert!(shard_path(dst.path(), 2, Language::En).exists());

        let mut w = ShardWriter::new(dst.path(), Language::Fr, 1);
        feed(&mut w, 2);
        assert_eq!(w.finalize().unwrap().nb_shards, 2);
        assert!(shard_path(dst.path(), 1, Language::Fr).exists());
        assert!(!shard_path(dst.path(), 2, Language::En).exists());
        assert!(!shard_path(dst.path(), 2, Language::Fr).exists());

        // nothing accepted at all
        let w = ShardWriter::new(dst.path(), Language::Fr, 1);
        assert_eq!(w.finalize().unwrap().nb_shards, 0);
        assert!(!shard_path(dst.path(), 0, Language::En).exists());
        assert!(!shard_path(dst.path(), 1, Language::Fr).exists());
    }

    #[test]
    fn default_capacity() {
        let dst = tempdir().unwrap();
        let mut w = ShardWriter::new(dst.path(), Language::Fr, DEFAULT_SHARD_CAPACITY);
        for _ in 0..DEFAULT_SHARD_CAPACITY + 1 {
            w.append("a".to_string(), "b".to_string());
            w.maybe_flush().unwrap();
        }
        let stats = w.finalize().unwrap();
        assert_eq!(stats.nb_shards, 2);
        assert_eq!(stats.nb_pairs, DEFAULT_SHARD_CAPACITY as u64 + 1);

        for lang in [Language::En, Language::Fr] {
            assert_eq!(
                read_lines(&shard_path(dst.path(), 0, lang)).len(),
                DEFAULT_SHARD_CAPACITY
            );
            assert_eq!(read_lines(&shard_path(dst.path(), 1, lang)).len(), 1);
        }
    }
}
