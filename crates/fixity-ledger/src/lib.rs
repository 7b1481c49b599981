//! Append-only CSV ledger for fixity.
//!
//! A ledger is a flat CSV file with one header row followed by one row per
//! recorded file. Runs append to an existing ledger without rewriting its
//! header, and every row is flushed as soon as it is written so that an
//! interrupted run leaves only complete rows behind.
//!
//! ```rust,no_run
//! use fixity_ledger::{ChecksumAlgorithm, LedgerSchema, LedgerWriter, LedgerRow};
//!
//! let schema = LedgerSchema::checksums(ChecksumAlgorithm::Md5);
//! let mut ledger = LedgerWriter::open("checksums.csv", schema).unwrap();
//! ledger
//!     .append_row(&LedgerRow::new(["a.txt", "5d41402abc4b2a76b9719d911017c592"]))
//!     .unwrap();
//! ledger.finish().unwrap();
//! ```

mod schema;
mod writer;

pub use schema::{LedgerRow, LedgerSchema, path_field};
pub use writer::LedgerWriter;

pub use fixity_core::{ChecksumAlgorithm, DigestResult, FixityError};
