//! SHA-256 fingerprints of movement text.
//!
//! A fingerprint is the lowercase hex digest of `"{date}|{title}|{description}"`.
//! Comparison is byte-exact: any formatting difference in the source counts as
//! a new movement.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded fingerprint.
pub const FINGERPRINT_LEN: usize = 64;

pub fn movement_fingerprint(date: &str, title: &str, description: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.as_bytes());
    hasher.update(b"|");
    hasher.update(title.as_bytes());
    hasher.update(b"|");
    hasher.update(description.as_bytes());
    format!("{:x}", hasher.finalize())
}
