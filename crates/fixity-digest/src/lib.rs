//! Checksum computation for fixity.
//!
//! This crate hashes files as a stream of fixed-size chunks so that memory
//! use stays constant for multi-gigabyte media files:
//!
//! - **Algorithms** - MD5 (default), SHA-256 and BLAKE3, one per run
//! - **Progress** - a callback sees the running percentage of each file
//! - **Parallelism** - optional rayon pool for hashing several files at
//!   once, returning results in discovery order
//!
//! ```rust,no_run
//! use std::path::Path;
//! use fixity_digest::{ChecksumAlgorithm, Digester};
//!
//! let digester = Digester::new(ChecksumAlgorithm::Md5);
//! let result = digester
//!     .digest_with_progress(Path::new("reel1.mov"), &mut |p| eprint!("[{}%]\r", p.percent))
//!     .unwrap();
//!
//! println!("{}  {}", result.digest, result.path.display());
//! ```

mod engine;
mod hasher;
mod parallel;

pub use engine::Digester;
pub use hasher::{ChecksumHasher, digest_bytes};
pub use parallel::ParallelDigester;

// Re-export core types
pub use fixity_core::{ChecksumAlgorithm, DigestProgress, DigestResult, FixityError};
