//! Ledger column schema and rows.

use std::path::Path;

use serde::{Deserialize, Serialize};

use fixity_core::{ChecksumAlgorithm, DigestResult, FixityError};

/// Ordered column names declared by a ledger's header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSchema {
    columns: Vec<String>,
}

impl LedgerSchema {
    /// Schema with arbitrary columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// `Filename,<ALGORITHM> Checksum`.
    pub fn checksums(algorithm: ChecksumAlgorithm) -> Self {
        Self::new(["Filename".to_string(), algorithm.column_name()])
    }

    /// `File Path,Size`.
    pub fn sizes() -> Self {
        Self::new(["File Path", "Size"])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns every row must have.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One record appended to a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    fields: Vec<String>,
}

impl LedgerRow {
    /// Row from raw field values.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// `<path>,<hex digest>` row for a checksum ledger.
    pub fn from_digest(result: &DigestResult) -> Result<Self, FixityError> {
        Ok(Self::new([path_field(&result.path)?, result.digest.clone()]))
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Render a path as a ledger field.
///
/// Fails for paths that are not valid UTF-8; a lossy rendering would name a
/// file that does not exist.
pub fn path_field(path: &Path) -> Result<String, FixityError> {
    path.to_str()
        .map(str::to_owned)
        .ok_or_else(|| FixityError::InvalidPath {
            path: path.to_path_buf(),
        })
}
