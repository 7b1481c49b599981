//! Checksum collection runs.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use fixity_core::{Candidate, CollectConfig, DigestResult, FixityError, RunSummary, RunWarning};
use fixity_digest::{Digester, ParallelDigester};
use fixity_ledger::{LedgerSchema, LedgerWriter, path_field};
use fixity_scan::{Candidates, PathClassifier, Traversal, platform_classifier};

use crate::ledger_guard::LedgerGuard;
use crate::observer::CollectObserver;

/// Drives one traversal-and-record pass into a checksum ledger.
#[derive(Debug, Clone)]
pub struct Collector {
    config: CollectConfig,
    classifier: Arc<dyn PathClassifier>,
}

impl Collector {
    /// Create a collector using the platform classifier.
    pub fn new(config: CollectConfig) -> Self {
        Self {
            config,
            classifier: platform_classifier(),
        }
    }

    /// Use a specific classifier strategy.
    pub fn with_classifier(mut self, classifier: Arc<dyn PathClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &CollectConfig {
        &self.config
    }

    /// Run the collection.
    ///
    /// A missing root fails before the ledger is opened, so nothing is
    /// created or modified. Ledger errors abort the run. Files that cannot
    /// be read are reported to `observer`, counted in the summary and
    /// skipped.
    pub fn run(&self, observer: &mut dyn CollectObserver) -> Result<RunSummary, FixityError> {
        let start = Instant::now();
        let config = &self.config;

        let candidates = Traversal::new(&config.root, config.policy)
            .with_classifier(Arc::clone(&self.classifier))
            .candidates()?;

        let mut ledger =
            LedgerWriter::open(&config.output, LedgerSchema::checksums(config.algorithm))?;
        let guard = LedgerGuard::new(ledger.path());

        let mut summary = RunSummary::new(ledger.path());
        summary.header_written = ledger.header_written();
        observer.on_start(&config.root, ledger.path());

        let digester = Digester::new(config.algorithm).with_chunk_size(config.chunk_size);

        let mut run = Run {
            ledger: &mut ledger,
            guard: &guard,
            summary: &mut summary,
            observer: &mut *observer,
        };

        if config.is_parallel() {
            let parallel = ParallelDigester::new(digester, config.threads)?;
            debug!(threads = parallel.threads(), "digesting in parallel");
            run.parallel(candidates, &parallel)?;
        } else {
            run.sequential(candidates, &digester)?;
        }

        ledger.finish()?;
        summary.duration = start.elapsed();

        info!(
            root = %config.root.display(),
            ledger = %summary.ledger.display(),
            found = summary.found,
            recorded = summary.recorded,
            failed = summary.failed,
            "collection finished"
        );
        observer.on_finish(&summary);

        Ok(summary)
    }
}

/// Mutable state of one run.
struct Run<'a> {
    ledger: &'a mut LedgerWriter,
    guard: &'a LedgerGuard,
    summary: &'a mut RunSummary,
    observer: &'a mut dyn CollectObserver,
}

impl Run<'_> {
    fn sequential(&mut self, candidates: Candidates, digester: &Digester) -> Result<(), FixityError> {
        for item in candidates {
            let Some(candidate) = self.accept(item) else {
                continue;
            };
            let path = candidate.path();
            self.observer.on_candidate(path);

            let observer = &mut *self.observer;
            let result =
                digester.digest_with_progress(path, &mut |p| observer.on_progress(path, p));
            self.record(path, result)?;
        }
        Ok(())
    }

    fn parallel(
        &mut self,
        candidates: Candidates,
        parallel: &ParallelDigester,
    ) -> Result<(), FixityError> {
        let batch_size = parallel.batch_size().max(1);
        let mut batch: Vec<PathBuf> = Vec::with_capacity(batch_size);

        for item in candidates {
            let Some(candidate) = self.accept(item) else {
                continue;
            };
            batch.push(candidate.into_path());
            if batch.len() == batch_size {
                self.flush_batch(&mut batch, parallel)?;
            }
        }
        self.flush_batch(&mut batch, parallel)
    }

    fn flush_batch(
        &mut self,
        batch: &mut Vec<PathBuf>,
        parallel: &ParallelDigester,
    ) -> Result<(), FixityError> {
        if batch.is_empty() {
            return Ok(());
        }
        let results = parallel.digest_batch(batch);
        for (path, result) in batch.drain(..).zip(results) {
            self.observer.on_candidate(&path);
            self.record(&path, result)?;
        }
        Ok(())
    }

    /// Filter traversal output down to candidates that should be digested.
    fn accept(&mut self, item: Result<Candidate, RunWarning>) -> Option<Candidate> {
        match item {
            Ok(candidate) if self.guard.is_ledger(candidate.path()) => {
                debug!(path = %candidate.path().display(), "skipping the ledger itself");
                None
            }
            Ok(candidate) => {
                self.summary.found += 1;
                // Unrepresentable names are skipped before any bytes are read.
                if let Err(err) = path_field(candidate.path()) {
                    self.fail(candidate.path(), &err);
                    return None;
                }
                Some(candidate)
            }
            Err(warning) => {
                warn!(path = %warning.path.display(), message = %warning.message, "traversal warning");
                self.observer.on_failed(&warning);
                self.summary.warn(warning);
                None
            }
        }
    }

    /// Append a digest to the ledger or record its failure.
    fn record(
        &mut self,
        path: &Path,
        result: Result<DigestResult, FixityError>,
    ) -> Result<(), FixityError> {
        match result {
            Ok(result) => {
                self.ledger.append_digest(&result)?;
                self.summary.record(result.bytes_read);
                self.observer.on_digest(&result);
            }
            Err(err) => self.fail(path, &err),
        }
        Ok(())
    }

    fn fail(&mut self, path: &Path, err: &FixityError) {
        let warning = err.to_warning();
        warn!(path = %path.display(), error = %err, "skipping file");
        self.observer.on_failed(&warning);
        self.summary.fail(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;
    use fixity_core::FilterPolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_basic_run() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("a.txt"), "hello").unwrap();
        fs::write(data.join(".hidden"), "x").unwrap();
        let output = temp.path().join("checksums.csv");

        let summary = Collector::new(CollectConfig::new(&data, &output))
            .run(&mut NullObserver)
            .unwrap();

        assert_eq!(summary.found, 1);
        assert_eq!(summary.recorded, 1);
        assert!(summary.header_written);
        assert!(summary.all_recorded());
    }

    #[test]
    fn test_ledger_inside_root_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "hello").unwrap();
        let output = temp.path().join("checksums.csv");

        let mut config = CollectConfig::new(temp.path(), &output);
        config.policy = FilterPolicy::include_all();
        let summary = Collector::new(config).run(&mut NullObserver).unwrap();

        assert_eq!(summary.found, 1);
        let content = fs::read_to_string(&output).unwrap();
        assert!(!content.contains("checksums.csv,"));
    }
}
