//! Run progress callbacks.

use std::path::Path;

use fixity_core::{DigestProgress, DigestResult, RunSummary, RunWarning};

/// Receives events while a run progresses.
///
/// All methods default to no-ops, so an observer only implements what it
/// displays. Events arrive on the thread that called `run`, in ledger order.
pub trait CollectObserver {
    /// The root was validated and the ledger is open.
    fn on_start(&mut self, _root: &Path, _ledger: &Path) {}

    /// A candidate file is about to be processed.
    fn on_candidate(&mut self, _path: &Path) {}

    /// Hashing progress for the current file (sequential runs only).
    fn on_progress(&mut self, _path: &Path, _progress: DigestProgress) {}

    /// A checksum row was appended to the ledger.
    fn on_digest(&mut self, _result: &DigestResult) {}

    /// A size row was appended to the ledger.
    fn on_size(&mut self, _path: &Path, _bytes: u64) {}

    /// A candidate or directory was skipped because of an error.
    fn on_failed(&mut self, _warning: &RunWarning) {}

    /// The run completed and the ledger was flushed.
    fn on_finish(&mut self, _summary: &RunSummary) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl CollectObserver for NullObserver {}
