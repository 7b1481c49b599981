//! Digest algorithm selection and per-file digest results.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Checksum function applied to every file of a run.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    /// 128-bit MD5, the customary fixity checksum.
    #[default]
    #[strum(to_string = "md5")]
    Md5,
    /// 256-bit SHA-2.
    #[strum(to_string = "sha256")]
    Sha256,
    /// 256-bit BLAKE3.
    #[strum(to_string = "blake3")]
    Blake3,
}

impl ChecksumAlgorithm {
    /// Upper-case label used in ledger headers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha256 => "SHA256",
            Self::Blake3 => "BLAKE3",
        }
    }

    /// Ledger column holding this algorithm's digests, e.g. `MD5 Checksum`.
    pub fn column_name(&self) -> String {
        format!("{} Checksum", self.label())
    }

    /// Length of the lowercase hex digest.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha256 | Self::Blake3 => 64,
        }
    }
}

/// Outcome of hashing one file end to end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestResult {
    /// File that was hashed.
    pub path: PathBuf,
    /// Algorithm that produced `digest`.
    pub algorithm: ChecksumAlgorithm,
    /// Lowercase hexadecimal digest.
    pub digest: String,
    /// Bytes consumed from the file.
    pub bytes_read: u64,
}

impl DigestResult {
    /// Create a new digest result.
    pub fn new(
        path: impl Into<PathBuf>,
        algorithm: ChecksumAlgorithm,
        digest: impl Into<String>,
        bytes_read: u64,
    ) -> Self {
        Self {
            path: path.into(),
            algorithm,
            digest: digest.into(),
            bytes_read,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check the digest has the algorithm's length and alphabet.
    pub fn is_well_formed(&self) -> bool {
        self.digest.len() == self.algorithm.hex_len()
            && self
                .digest
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

/// Progress of a single streaming digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestProgress {
    /// Bytes hashed so far.
    pub bytes_read: u64,
    /// File size sampled before reading started.
    pub total_bytes: u64,
    /// Whole percentage complete, 0..=100.
    pub percent: u8,
}

impl DigestProgress {
    /// Compute progress for `bytes_read` out of `total_bytes`.
    ///
    /// Clamped to 100 when the file grew while being read. An empty file is
    /// always complete.
    pub fn new(bytes_read: u64, total_bytes: u64) -> Self {
        let percent = if total_bytes == 0 {
            100
        } else {
            (u128::from(bytes_read) * 100 / u128::from(total_bytes)).min(100) as u8
        };
        Self {
            bytes_read,
            total_bytes,
            percent,
        }
    }

    /// Final progress event for a stream that reached end-of-file.
    pub fn complete(bytes_read: u64, total_bytes: u64) -> Self {
        Self {
            bytes_read,
            total_bytes,
            percent: 100,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }
}
