//! Candidate discovery for fixity.
//!
//! This crate walks a file or directory root and yields the files that a
//! collection run should digest, applying the hidden/system exclusion
//! policy as it goes.
//!
//! # Overview
//!
//! - **Classification** via a [`PathClassifier`] strategy chosen once per
//!   platform (name rules everywhere, native attribute bits on Windows and
//!   macOS)
//! - **Pruning**: excluded directories are dropped before they are read, so
//!   nothing beneath them is ever visited
//! - **Deterministic order**: serial jwalk traversal sorted by file name
//!
//! # Example
//!
//! ```rust,no_run
//! use fixity_scan::{FilterPolicy, Traversal};
//!
//! let traversal = Traversal::new("/path/to/archive", FilterPolicy::default());
//! for candidate in traversal.candidates().unwrap() {
//!     match candidate {
//!         Ok(candidate) => println!("{}", candidate.path().display()),
//!         Err(warning) => eprintln!("skipped: {warning}"),
//!     }
//! }
//! ```

mod classify;
mod walker;

pub use classify::{
    DenyEntry, MacClassifier, MatchMode, NameClassifier, PathClassifier, SYSTEM_DENYLIST,
    UnixClassifier, WindowsClassifier, platform_classifier,
};
pub use walker::{Candidates, Traversal, traverse};

// Re-export core types for convenience
pub use fixity_core::{Candidate, Classification, FilterPolicy, FixityError, RunWarning};
