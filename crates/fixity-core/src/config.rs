//! Run configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::candidate::Classification;
use crate::digest::ChecksumAlgorithm;

/// Reference read size for streaming digests (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1 << 20;

/// Which classified entries are skipped during traversal.
///
/// Built once from the command line and passed by value; it never changes
/// for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPolicy {
    /// Skip dot-files and entries carrying the native hidden attribute.
    #[serde(default = "default_true")]
    pub exclude_hidden: bool,

    /// Skip well-known platform artifacts and entries with the system attribute.
    #[serde(default = "default_true")]
    pub exclude_system: bool,
}

impl FilterPolicy {
    /// Policy with both exclusions toggled independently.
    pub fn new(exclude_hidden: bool, exclude_system: bool) -> Self {
        Self {
            exclude_hidden,
            exclude_system,
        }
    }

    /// Policy that keeps every entry.
    pub fn include_all() -> Self {
        Self::new(false, false)
    }

    /// Check whether an entry with this classification is skipped.
    pub fn excludes(&self, classification: Classification) -> bool {
        (self.exclude_hidden && classification.hidden)
            || (self.exclude_system && classification.system)
    }

    /// True when at least one exclusion is enabled.
    pub fn is_active(&self) -> bool {
        self.exclude_hidden || self.exclude_system
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Configuration for one collection run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct CollectConfig {
    /// File or directory to scan.
    pub root: PathBuf,

    /// Destination ledger.
    #[builder(default = "PathBuf::from(\"checksums.csv\")")]
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Hidden/system exclusion policy.
    #[builder(default)]
    #[serde(default)]
    pub policy: FilterPolicy,

    /// Digest function used for every file in the run.
    #[builder(default)]
    #[serde(default)]
    pub algorithm: ChecksumAlgorithm,

    /// Bytes read per chunk while hashing.
    #[builder(default = "DEFAULT_CHUNK_SIZE")]
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Digest worker threads (1 = sequential, 0 = auto-detect).
    #[builder(default = "1")]
    #[serde(default = "default_threads")]
    pub threads: usize,
}

fn default_true() -> bool {
    true
}

fn default_output() -> PathBuf {
    PathBuf::from("checksums.csv")
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_threads() -> usize {
    1
}

impl CollectConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            _ => {}
        }
        if let Some(ref output) = self.output {
            if output.as_os_str().is_empty() {
                return Err("Output path cannot be empty".to_string());
            }
        }
        if self.chunk_size == Some(0) {
            return Err("Chunk size must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl CollectConfig {
    /// Create a new config builder.
    pub fn builder() -> CollectConfigBuilder {
        CollectConfigBuilder::default()
    }

    /// Create a config for scanning `root` into `output` with defaults.
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            policy: FilterPolicy::default(),
            algorithm: ChecksumAlgorithm::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            threads: 1,
        }
    }

    /// Root path being scanned.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when digests run on more than one thread.
    pub fn is_parallel(&self) -> bool {
        self.threads != 1
    }
}
