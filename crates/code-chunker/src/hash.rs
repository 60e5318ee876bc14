use sha2::{Digest, Sha256};
use std::fmt::Write as _;

/// Number of hex characters kept from the digest
pub const HASH_LEN: usize = 16;

/// Content address of a chunk: the first 16 lowercase hex chars of the
/// SHA-256 of `content`.
#[must_use]
pub fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let mut out = hex_encode_lower(&digest);
    out.truncate(HASH_LEN);
    out
}

fn hex_encode_lower(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}
