//! Core types and configuration for fixity.
//!
//! This crate provides the data model shared by the fixity crates: filter
//! policy, path classification, digest results, run configuration and the
//! error taxonomy that separates fatal run failures from per-file warnings.

mod candidate;
mod config;
mod digest;
mod error;
mod summary;

pub use candidate::{Candidate, Classification};
pub use config::{CollectConfig, CollectConfigBuilder, DEFAULT_CHUNK_SIZE, FilterPolicy};
pub use digest::{ChecksumAlgorithm, DigestProgress, DigestResult};
pub use error::{FixityError, RunWarning, WarningKind};
pub use summary::RunSummary;
