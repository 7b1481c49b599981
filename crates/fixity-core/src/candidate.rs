//! Candidate files and their hidden/system classification.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Hidden/system status of a filesystem entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    /// Dot-prefixed name or native hidden attribute.
    pub hidden: bool,
    /// Well-known platform artifact or native system attribute.
    pub system: bool,
}

impl Classification {
    /// Neither hidden nor system.
    pub const NONE: Self = Self {
        hidden: false,
        system: false,
    };

    /// Create a classification from its two flags.
    pub fn new(hidden: bool, system: bool) -> Self {
        Self { hidden, system }
    }

    /// Combine two classifications, keeping any flag set in either.
    pub fn union(self, other: Self) -> Self {
        Self {
            hidden: self.hidden || other.hidden,
            system: self.system || other.system,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_system(&self) -> bool {
        self.system
    }
}

/// A file that survived directory pruning and the filter policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Full path as discovered under the root.
    pub path: PathBuf,
    /// Classification computed when the entry was evaluated.
    pub classification: Classification,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(path: impl Into<PathBuf>, classification: Classification) -> Self {
        Self {
            path: path.into(),
            classification,
        }
    }

    /// Path of the candidate file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the candidate, returning its path.
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}
