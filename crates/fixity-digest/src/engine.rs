//! Streaming file digests with bounded memory.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::trace;

use fixity_core::{ChecksumAlgorithm, DEFAULT_CHUNK_SIZE, DigestProgress, DigestResult, FixityError};

use crate::hasher::ChecksumHasher;

/// Computes the checksum of one file at a time, chunk by chunk.
///
/// Memory use is one buffer of `chunk_size` bytes regardless of file size.
#[derive(Debug, Clone)]
pub struct Digester {
    algorithm: ChecksumAlgorithm,
    chunk_size: usize,
}

impl Digester {
    /// Create a digester reading 1 MiB chunks.
    pub fn new(algorithm: ChecksumAlgorithm) -> Self {
        Self {
            algorithm,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the read chunk size. Zero is treated as one byte.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Digest a file without progress reporting.
    pub fn digest(&self, path: &Path) -> Result<DigestResult, FixityError> {
        self.digest_with_progress(path, &mut |_| {})
    }

    /// Digest a file, reporting progress after each chunk.
    ///
    /// The file size is sampled once when the file is opened. `on_progress`
    /// sees a non-decreasing percentage and is called with 100% exactly once,
    /// after end-of-file. An empty file produces only that final event.
    pub fn digest_with_progress(
        &self,
        path: &Path,
        on_progress: &mut dyn FnMut(DigestProgress),
    ) -> Result<DigestResult, FixityError> {
        let mut file = File::open(path).map_err(|e| FixityError::io(path, e))?;
        let total_bytes = file.metadata().map_err(|e| FixityError::io(path, e))?.len();

        let mut hasher = ChecksumHasher::new(self.algorithm);
        let mut buffer = vec![0u8; self.chunk_size];
        let mut bytes_read: u64 = 0;
        let mut last_percent: u8 = 0;

        loop {
            let n = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(FixityError::io(path, e)),
            };
            hasher.update(&buffer[..n]);
            bytes_read += n as u64;

            let progress = DigestProgress::new(bytes_read, total_bytes);
            // 100% is reserved for end-of-file.
            if progress.percent > last_percent && progress.percent < 100 {
                last_percent = progress.percent;
                on_progress(progress);
            }
        }

        on_progress(DigestProgress::complete(bytes_read, total_bytes));

        let digest = hasher.finalize_hex();
        trace!(path = %path.display(), algorithm = %self.algorithm, bytes_read, "digest complete");

        Ok(DigestResult::new(path, self.algorithm, digest, bytes_read))
    }
}

impl Default for Digester {
    fn default() -> Self {
        Self::new(ChecksumAlgorithm::default())
    }
}
