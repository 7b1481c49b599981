//! Run summary statistics.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RunWarning;

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ledger the rows were appended to.
    pub ledger: PathBuf,
    /// Whether this run created the ledger and wrote its header.
    pub header_written: bool,
    /// Candidate files yielded by traversal.
    pub found: u64,
    /// Rows appended to the ledger.
    pub recorded: u64,
    /// Candidates that could not be processed.
    pub failed: u64,
    /// Bytes read across recorded files.
    pub bytes_processed: u64,
    /// Per-file and traversal warnings, in the order they occurred.
    pub warnings: Vec<RunWarning>,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl RunSummary {
    /// Create an empty summary for a ledger.
    pub fn new(ledger: impl Into<PathBuf>) -> Self {
        Self {
            ledger: ledger.into(),
            ..Self::default()
        }
    }

    /// Record a successfully appended row.
    pub fn record(&mut self, bytes: u64) {
        self.recorded += 1;
        self.bytes_processed += bytes;
    }

    /// Record a per-candidate failure.
    pub fn fail(&mut self, warning: RunWarning) {
        self.failed += 1;
        self.warnings.push(warning);
    }

    /// Record a traversal warning that did not correspond to a candidate.
    pub fn warn(&mut self, warning: RunWarning) {
        self.warnings.push(warning);
    }

    /// True when every candidate found was recorded.
    pub fn all_recorded(&self) -> bool {
        self.found == self.recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarningKind;

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::new("checksums.csv");
        summary.found = 3;
        summary.record(10);
        summary.record(5);
        summary.fail(RunWarning::new("c", "Read error", WarningKind::ReadError));
        summary.warn(RunWarning::traversal("dir", "unreadable"));

        assert_eq!(summary.recorded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.bytes_processed, 15);
        assert_eq!(summary.warnings.len(), 2);
        assert!(!summary.all_recorded());
    }
}
