use atlas_error::AtlasError;
use serde::Serialize;
use serde_json::Value;

/// Produce the canonical JSON byte representation of a value.
///
/// Canonical form: object keys sorted lexicographically (guaranteed by
/// `serde_json::Value`'s `BTreeMap`-backed object representation as long as
/// the `preserve_order` feature is not enabled), compact separators (no
/// whitespace — `serde_json::to_string` never inserts any), UTF-8, and
/// non-finite floats rejected rather than silently coerced to `null`.
///
/// # Errors
///
/// Returns [`AtlasError::ValidationFailure`] if `value` contains a
/// non-finite float anywhere in its structure, or [`AtlasError::Internal`]
/// if serialization itself fails.
pub fn canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, AtlasError> {
    let v = serde_json::to_value(value)
        .map_err(|e| AtlasError::internal(format!("failed to encode payload: {e}")))?;
    reject_non_finite(&v)?;
    serde_json::to_string(&v)
        .map(String::into_bytes)
        .map_err(|e| AtlasError::internal(format!("failed to encode payload: {e}")))
}

/// Canonicalize an already-constructed [`Value`] (e.g. one parsed from an
/// inbound request body) without re-serializing a typed value first.
pub fn canonicalize_value(value: &Value) -> Result<Vec<u8>, AtlasError> {
    reject_non_finite(value)?;
    serde_json::to_string(value)
        .map(String::into_bytes)
        .map_err(|e| AtlasError::internal(format!("failed to encode payload: {e}")))
}

/// Recursively reject NaN/Infinity.
///
/// `serde_json::Number` cannot itself hold a non-finite float — the
/// checked-construction path used by [`serde_json::to_value`] maps a
/// non-finite `f64` to `Value::Null` rather than erroring, which would
/// silently defeat the "NaN/Infinity rejected" contract. Domain types that
/// carry raw floats (e.g. `Transition::confidence`) validate finiteness at
/// construction time instead; this pass exists to make the rejection
/// explicit and to cover values assembled directly from untrusted
/// `serde_json::Value` trees (e.g. free-form `metadata`) where a caller
/// bypassed typed construction.
fn reject_non_finite(value: &Value) -> Result<(), AtlasError> {
    match value {
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if !f.is_finite() {
                    return Err(AtlasError::validation(
                        "canonical JSON payload contains a non-finite number",
                    ));
                }
            }
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                reject_non_finite(item)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            for v in map.values() {
                reject_non_finite(v)?;
            }
            Ok(())
        }
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
    }
}
