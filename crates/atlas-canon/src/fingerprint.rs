use crate::canon::canonical_json_bytes;
use atlas_error::AtlasError;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Compute the structural fingerprint of a UI tree: the hex-encoded
/// SHA-256 digest of its canonical JSON encoding.
///
/// Two trees that differ only in object-key order or insignificant
/// whitespace produce the same fingerprint, since both hash the same
/// canonical bytes.
pub fn compute_structural<T: Serialize>(tree: &T) -> Result<String, AtlasError> {
    let bytes = canonical_json_bytes(tree)?;
    Ok(hex_sha256(&bytes))
}

/// Compute the visual fingerprint of a screenshot: the hex-encoded SHA-256
/// digest of the raw image bytes.
///
/// Perceptual (near-duplicate-tolerant) hashing is explicitly out of scope;
/// any single differing byte produces a different fingerprint.
pub fn compute_visual(image_bytes: &[u8]) -> String {
    hex_sha256(image_bytes)
}

/// Compute the semantic fingerprint of user-visible text: the hex-encoded
/// SHA-256 digest of the trimmed, lower-cased, whitespace-collapsed text.
pub fn compute_semantic(text: &str) -> String {
    hex_sha256(normalize_text(text).as_bytes())
}

fn hex_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Trim, lower-case, and collapse internal whitespace runs to single spaces.
fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Merge two fingerprint maps, with `self` taking priority on key collision.
///
/// Mirrors the producer-side `merge_fingerprints` helper: useful when a
/// driver refines a fingerprint (e.g. adds a `visual` hash after an initial
/// `structural`-only observation) without discarding prior values.
pub fn merge(base: &BTreeMap<String, String>, overlay: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut merged = overlay.clone();
    merged.extend(base.clone());
    merged
}
