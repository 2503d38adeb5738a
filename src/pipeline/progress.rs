//! Per-source progress reporting.
use log::info;

use crate::sources::DatasetTag;

/// Number of records between two progress reports.
pub const REPORT_EVERY: u64 = 1_000;

/// Tracks how many records of a source have been read.
///
/// The total is an approximation given by the source, so the
/// reported percentage is capped at 100.
#[derive(Debug)]
pub struct Progress {
    tag: DatasetTag,
    total: u64,
    seen: u64,
}

impl Progress {
    pub fn new(tag: DatasetTag, total: u64) -> Self {
        Self { tag, total, seen: 0 }
    }

    /// Count one record, reporting every [REPORT_EVERY] records.
    ///
    /// Returns the reported percentage, if any.
    pub fn inc(&mut self) -> Option<f64> {
        self.seen += 1;
        if self.seen % REPORT_EVERY == 0 {
            let percent = self.percent();
            info!(
                "[{}] {:.1}% ({}/{})",
                self.tag, percent, self.seen, self.total
            );
            Some(percent)
        } else {
            None
        }
    }

    /// Report completion.
    pub fn finish(&self) {
        info!("[{}] 100.0% ({} records)", self.tag, self.seen);
    }

    pub fn seen(&self) -> u64 {
        self.seen
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.seen as f64 * 100.0 / self.total as f64).min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_every_thousand() {
        let mut p = Progress::new(DatasetTag::Europarl, 4_000);
        let reports: Vec<f64> = (0..4_500).filter_map(|_| p.inc()).collect();
        assert_eq!(reports, vec![25.0, 50.0, 75.0, 100.0]);
        assert_eq!(p.seen(), 4_500);
    }

    #[test]
    fn capped_and_empty() {
        let mut p = Progress::new(DatasetTag::Tatoeba, 10);
        for _ in 0..20 {
            p.inc();
        }
        assert_eq!(p.percent(), 100.0);
        assert_eq!(Progress::new(DatasetTag::Paracrawl, 0).percent(), 100.0);
    }
}
