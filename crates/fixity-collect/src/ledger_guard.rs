//! Keeps a run from recording its own ledger.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Identifies the ledger file when it lies inside the scanned tree.
#[derive(Debug, Clone, Default)]
pub(crate) struct LedgerGuard {
    file_name: Option<OsString>,
    canonical: Option<PathBuf>,
}

impl LedgerGuard {
    /// Capture the identity of an opened ledger.
    pub(crate) fn new(ledger: &Path) -> Self {
        Self {
            file_name: ledger.file_name().map(OsString::from),
            canonical: ledger.canonicalize().ok(),
        }
    }

    /// True when `path` is the ledger. Only same-named files are resolved.
    pub(crate) fn is_ledger(&self, path: &Path) -> bool {
        let (Some(name), Some(canonical)) = (&self.file_name, &self.canonical) else {
            return false;
        };
        if path.file_name() != Some(name.as_os_str()) {
            return false;
        }
        path.canonicalize().is_ok_and(|p| &p == canonical)
    }
}
