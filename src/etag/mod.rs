//! Conditional-GET tokens for lessons queries.

use sha2::{Digest, Sha256};

/// Quoted hex digest over the raw selectors and the snapshot version.
pub fn fingerprint(class_selector: &str, teacher_selector: &str, version: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"c");
    hasher.update(class_selector.as_bytes());
    hasher.update(b"t");
    hasher.update(teacher_selector.as_bytes());
    hasher.update(version.as_bytes());
    format!("\"{}\"", hex::encode(hasher.finalize()))
}

/// Literal comparison of the client's `If-None-Match` value with the computed token.
pub fn matches(conditional: Option<&str>, computed: &str) -> bool {
    conditional == Some(computed)
}
