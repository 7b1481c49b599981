//! Running hash state for the supported algorithms.

use blake3::Hasher as Blake3;
use md5::{Digest, Md5};
use sha2::Sha256;

use fixity_core::ChecksumAlgorithm;

/// Incremental hasher for one [`ChecksumAlgorithm`].
#[derive(Clone)]
pub enum ChecksumHasher {
    Md5(Md5),
    Sha256(Sha256),
    Blake3(Box<Blake3>),
}

impl ChecksumHasher {
    /// Create an empty hash state.
    pub fn new(algorithm: ChecksumAlgorithm) -> Self {
        match algorithm {
            ChecksumAlgorithm::Md5 => Self::Md5(Md5::new()),
            ChecksumAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            ChecksumAlgorithm::Blake3 => Self::Blake3(Box::new(Blake3::new())),
        }
    }

    /// Algorithm this state belongs to.
    pub fn algorithm(&self) -> ChecksumAlgorithm {
        match self {
            Self::Md5(_) => ChecksumAlgorithm::Md5,
            Self::Sha256(_) => ChecksumAlgorithm::Sha256,
            Self::Blake3(_) => ChecksumAlgorithm::Blake3,
        }
    }

    /// Feed a chunk.
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => Digest::update(h, data),
            Self::Sha256(h) => Digest::update(h, data),
            Self::Blake3(h) => {
                h.update(data);
            }
        }
    }

    /// Finish and return the lowercase hex digest.
    pub fn finalize_hex(self) -> String {
        match self {
            Self::Md5(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
            Self::Blake3(h) => h.finalize().to_hex().to_string(),
        }
    }
}

/// Hash an in-memory buffer.
pub fn digest_bytes(algorithm: ChecksumAlgorithm, data: &[u8]) -> String {
    let mut hasher = ChecksumHasher::new(algorithm);
    hasher.update(data);
    hasher.finalize_hex()
}
