//! Collection runs for fixity.
//!
//! A run walks a root, filters hidden and system entries, and appends one
//! ledger row per candidate file. [`Collector`] records checksums and
//! [`SizeLister`] records file sizes. Both report events through a
//! [`CollectObserver`] and return a [`RunSummary`].
//!
//! ```rust,no_run
//! use fixity_collect::{CollectConfig, Collector, NullObserver};
//!
//! let config = CollectConfig::new("/archive/tapes", "checksums.csv");
//! let summary = Collector::new(config).run(&mut NullObserver).unwrap();
//! println!("recorded {} of {} files", summary.recorded, summary.found);
//! ```

mod collector;
mod ledger_guard;
mod observer;
mod sizes;

pub use collector::Collector;
pub use observer::{CollectObserver, NullObserver};
pub use sizes::{DEFAULT_SIZES_OUTPUT, SizeLister, format_size};

pub use fixity_core::{
    ChecksumAlgorithm, CollectConfig, CollectConfigBuilder, DigestProgress, DigestResult,
    FilterPolicy, FixityError, RunSummary, RunWarning, WarningKind,
};
pub use fixity_scan::{PathClassifier, platform_classifier};
