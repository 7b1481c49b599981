//! Parallel digests with order-preserving results.

use std::path::PathBuf;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use fixity_core::{DigestResult, FixityError};

use crate::engine::Digester;

/// Digests batches of files on a dedicated rayon pool.
///
/// Files in a batch share no state; results come back in the order the
/// paths were given, so the ledger order matches discovery order.
#[derive(Debug)]
pub struct ParallelDigester {
    digester: Digester,
    pool: ThreadPool,
}

impl ParallelDigester {
    /// Build a pool with `threads` workers (0 = one per CPU).
    pub fn new(digester: Digester, threads: usize) -> Result<Self, FixityError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("fixity-digest-{i}"))
            .build()
            .map_err(|e| FixityError::invalid_config(format!("cannot start digest pool: {e}")))?;
        Ok(Self { digester, pool })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Suggested batch length for this pool.
    pub fn batch_size(&self) -> usize {
        self.threads() * 4
    }

    pub fn digester(&self) -> &Digester {
        &self.digester
    }

    /// Digest every path, returning results in input order.
    pub fn digest_batch(&self, paths: &[PathBuf]) -> Vec<Result<DigestResult, FixityError>> {
        self.pool.install(|| {
            paths
                .par_iter()
                .map(|path| self.digester.digest(path))
                .collect()
        })
    }
}
