//! Hashing utilities for artifact key derivation.

use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute SHA256 hash of a string.
pub fn sha256_str(s: &str) -> String {
    sha256_bytes(s.as_bytes())
}

/// Short (8 hex char) hash of a string, for filenames.
pub fn short_hash(s: &str) -> String {
    sha256_str(s)[..8].to_string()
}
