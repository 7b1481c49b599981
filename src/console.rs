//! Console rendering of collection runs.

use std::io::{self, Write};
use std::path::Path;

use fixity_collect::{
    ChecksumAlgorithm, CollectObserver, DigestProgress, DigestResult, RunSummary, RunWarning,
    format_size,
};

/// Prints per-file progress to stdout and failures to stderr.
pub struct ConsoleObserver {
    algorithm: ChecksumAlgorithm,
    quiet: bool,
    raw_sizes: bool,
}

impl ConsoleObserver {
    pub fn checksums(algorithm: ChecksumAlgorithm, quiet: bool) -> Self {
        Self {
            algorithm,
            quiet,
            raw_sizes: false,
        }
    }

    pub fn sizes(raw: bool, quiet: bool) -> Self {
        Self {
            algorithm: ChecksumAlgorithm::default(),
            quiet,
            raw_sizes: raw,
        }
    }
}

impl CollectObserver for ConsoleObserver {
    fn on_start(&mut self, root: &Path, ledger: &Path) {
        if !self.quiet {
            eprintln!("Scanning {} into {}...", root.display(), ledger.display());
        }
    }

    fn on_candidate(&mut self, path: &Path) {
        if self.quiet {
            return;
        }
        println!(
            "Generating {} checksum for {}",
            self.algorithm,
            display_name(path)
        );
    }

    fn on_progress(&mut self, _path: &Path, progress: DigestProgress) {
        if self.quiet || progress.is_complete() {
            return;
        }
        print!("[{}%]\r", progress.percent);
        io::stdout().flush().ok();
    }

    fn on_digest(&mut self, result: &DigestResult) {
        if !self.quiet {
            println!(
                "Calculated {} checksum is {}\n",
                result.algorithm, result.digest
            );
        }
    }

    fn on_size(&mut self, path: &Path, bytes: u64) {
        if self.quiet {
            return;
        }
        let size = if self.raw_sizes {
            bytes.to_string()
        } else {
            format_size(bytes)
        };
        println!("{}: {}", path.display(), size);
    }

    fn on_failed(&mut self, warning: &RunWarning) {
        eprintln!("Skipped {}", warning);
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        if self.quiet {
            return;
        }
        println!(
            "Found {} file(s), recorded {}, failed {} in {:.2}s",
            summary.found,
            summary.recorded,
            summary.failed,
            summary.duration.as_secs_f64()
        );
        println!("Ledger: {}", summary.ledger.display());
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
