//! File-size ledgers.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use fixity_core::{FilterPolicy, FixityError, RunSummary, RunWarning};
use fixity_ledger::{LedgerRow, LedgerSchema, LedgerWriter, path_field};
use fixity_scan::{PathClassifier, Traversal, platform_classifier};

use crate::ledger_guard::LedgerGuard;
use crate::observer::CollectObserver;

/// Default destination for size ledgers.
pub const DEFAULT_SIZES_OUTPUT: &str = "file_sizes.csv";

/// Records `File Path,Size` rows for every candidate under a root.
///
/// Shares traversal, filter policy and append semantics with
/// [`Collector`](crate::Collector); no file content is read.
#[derive(Debug, Clone)]
pub struct SizeLister {
    root: PathBuf,
    output: PathBuf,
    policy: FilterPolicy,
    raw: bool,
    classifier: Arc<dyn PathClassifier>,
}

impl SizeLister {
    /// Create a lister writing human-readable sizes.
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            policy: FilterPolicy::default(),
            raw: false,
            classifier: platform_classifier(),
        }
    }

    /// Set the hidden/system exclusion policy.
    pub fn with_policy(mut self, policy: FilterPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Write byte counts instead of human-readable sizes.
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Use a specific classifier strategy.
    pub fn with_classifier(mut self, classifier: Arc<dyn PathClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Run the listing. Same failure contract as a checksum run.
    pub fn run(&self, observer: &mut dyn CollectObserver) -> Result<RunSummary, FixityError> {
        let start = Instant::now();

        let candidates = Traversal::new(&self.root, self.policy)
            .with_classifier(Arc::clone(&self.classifier))
            .candidates()?;

        let mut ledger = LedgerWriter::open(&self.output, LedgerSchema::sizes())?;
        let guard = LedgerGuard::new(ledger.path());
        let mut summary = RunSummary::new(ledger.path());
        summary.header_written = ledger.header_written();
        observer.on_start(&self.root, ledger.path());

        for item in candidates {
            let candidate = match item {
                Ok(candidate) if guard.is_ledger(candidate.path()) => continue,
                Ok(candidate) => candidate,
                Err(warning) => {
                    warn!(path = %warning.path.display(), message = %warning.message, "traversal warning");
                    observer.on_failed(&warning);
                    summary.warn(warning);
                    continue;
                }
            };
            summary.found += 1;
            let path = candidate.path();
            observer.on_candidate(path);

            let field = match path_field(path) {
                Ok(field) => field,
                Err(err) => {
                    let warning = err.to_warning();
                    warn!(path = %path.display(), error = %err, "skipping file");
                    observer.on_failed(&warning);
                    summary.fail(warning);
                    continue;
                }
            };

            match std::fs::metadata(path) {
                Ok(metadata) => {
                    let bytes = metadata.len();
                    ledger.append_row(&LedgerRow::new([field, self.format(bytes)]))?;
                    summary.record(bytes);
                    observer.on_size(path, bytes);
                }
                Err(e) => {
                    let warning = RunWarning::read_error(path, &e);
                    warn!(path = %path.display(), error = %e, "skipping file");
                    observer.on_failed(&warning);
                    summary.fail(warning);
                }
            }
        }

        ledger.finish()?;
        summary.duration = start.elapsed();
        info!(
            root = %self.root.display(),
            ledger = %summary.ledger.display(),
            found = summary.found,
            total_bytes = summary.bytes_processed,
            "size listing finished"
        );
        observer.on_finish(&summary);

        Ok(summary)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn format(&self, bytes: u64) -> String {
        if self.raw {
            bytes.to_string()
        } else {
            format_size(bytes)
        }
    }
}

/// Format size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
