use crate::canon::canonicalize_value;
use atlas_error::AtlasError;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;
use std::sync::OnceLock;

/// Configuration for a [`Signer`].
#[derive(Debug, Clone)]
pub struct SignerConfig {
    /// Shared secret used as the HMAC key. Must be kept private.
    pub secret: String,
    /// Name of the hash algorithm to use with HMAC. Only `"sha256"` is
    /// supported today; the field exists so a second algorithm can be added
    /// without a breaking change.
    pub algorithm: String,
}

impl SignerConfig {
    /// Build a config with the default algorithm (`"sha256"`).
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: "sha256".to_string(),
        }
    }
}

/// HMAC-based payload signer.
///
/// Not a full security framework: single shared secret, no key rotation, no
/// multi-tenant secrets. Intended to detect accidental corruption and to
/// give trusted-pipeline output a basic integrity check.
pub struct Signer {
    key: Vec<u8>,
}

impl Signer {
    /// Construct a signer from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AtlasError::ValidationFailure`] if `config.algorithm` is
    /// not a supported hash algorithm.
    pub fn new(config: SignerConfig) -> Result<Self, AtlasError> {
        if config.algorithm != "sha256" {
            return Err(AtlasError::validation(format!(
                "unsupported hash algorithm: {}",
                config.algorithm
            )));
        }
        Ok(Self {
            key: config.secret.into_bytes(),
        })
    }

    /// Compute a signature for the given payload.
    ///
    /// Returns a URL-safe base64 string without padding, suitable for
    /// embedding alongside the payload.
    pub fn sign(&self, payload: &Value) -> Result<String, AtlasError> {
        let canon = canonicalize_value(payload)?;
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.key)
            .expect("HMAC accepts any key length");
        mac.update(&canon);
        let digest = mac.finalize().into_bytes();
        Ok(URL_SAFE_NO_PAD.encode(digest))
    }

    /// Verify that `signature` matches `payload` under this signer's key.
    ///
    /// Uses constant-time comparison. Returns `false` (never an error) for
    /// an empty or malformed signature.
    pub fn verify(&self, payload: &Value, signature: &str) -> bool {
        if signature.is_empty() {
            return false;
        }
        // Recompute the MAC directly and use its constant-time verify_slice
        // rather than comparing two base64 strings, so the comparison
        // operates on the raw digest bytes.
        let Ok(canon) = canonicalize_value(payload) else {
            return false;
        };
        let Ok(given) = URL_SAFE_NO_PAD.decode(signature) else {
            return false;
        };
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.key)
            .expect("HMAC accepts any key length");
        mac.update(&canon);
        mac.verify_slice(&given).is_ok()
    }

    /// Return a copy of `record` with a signature embedded under `field`.
    ///
    /// The signature is computed over `record` **without** `field`, so that
    /// hashing is never self-referential.
    pub fn sign_record(&self, record: &Map<String, Value>, field: &str) -> Result<Map<String, Value>, AtlasError> {
        let mut payload = record.clone();
        payload.remove(field);
        let sig = self.sign(&Value::Object(payload.clone()))?;
        payload.insert(field.to_string(), Value::String(sig));
        Ok(payload)
    }

    /// Verify a record that embeds its signature under `field`.
    ///
    /// Returns `false` if the field is absent or the signature is invalid.
    pub fn verify_record(&self, record: &Map<String, Value>, field: &str) -> bool {
        let Some(Value::String(signature)) = record.get(field) else {
            return false;
        };
        let mut payload = record.clone();
        payload.remove(field);
        self.verify(&Value::Object(payload), signature)
    }
}

static DEFAULT_SIGNER: OnceLock<Signer> = OnceLock::new();

/// Configure a process-wide default signer.
///
/// After calling this, [`sign_with_default`] and [`verify_with_default`] are
/// usable. Intended for the daemon, which holds exactly one configured
/// secret for its lifetime.
///
/// # Errors
///
/// Returns an error if a default signer has already been configured, or if
/// `config` is invalid.
pub fn configure_default_signer(config: SignerConfig) -> Result<(), AtlasError> {
    let signer = Signer::new(config)?;
    DEFAULT_SIGNER
        .set(signer)
        .map_err(|_| AtlasError::internal("default signer already configured"))
}

/// Sign `payload` with the process-wide default signer.
///
/// # Errors
///
/// Returns [`AtlasError::Internal`] if no default signer has been configured.
pub fn sign_with_default(payload: &Value) -> Result<String, AtlasError> {
    DEFAULT_SIGNER
        .get()
        .ok_or_else(|| AtlasError::internal("default signer is not configured"))?
        .sign(payload)
}

/// Verify `payload`/`signature` against the process-wide default signer.
///
/// Returns `false` (never an error) if no default signer has been
/// configured.
pub fn verify_with_default(payload: &Value, signature: &str) -> bool {
    match DEFAULT_SIGNER.get() {
        Some(signer) => signer.verify(payload, signature),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signer() -> Signer {
        Signer::new(SignerConfig::new("top-secret")).unwrap()
    }

    #[test]
    fn sign_is_order_independent() {
        let s = signer();
        let a = json!({"b": 2, "a": 1});
        let b = json!({"a": 1, "b": 2});
        assert_eq!(s.sign(&a).unwrap(), s.sign(&b).unwrap());
    }

    #[test]
    fn verify_round_trips() {
        let s = signer();
        let payload = json!({"x": 1});
        let sig = s.sign(&payload).unwrap();
        assert!(s.verify(&payload, &sig));
        assert!(!s.verify(&json!({"x": 2}), &sig));
    }

    #[test]
    fn verify_rejects_empty_signature() {
        let s = signer();
        assert!(!s.verify(&json!({"x": 1}), ""));
    }

    #[test]
    fn sign_record_round_trips() {
        let s = signer();
        let mut record = Map::new();
        record.insert("x".to_string(), json!(1));
        let signed = s.sign_record(&record, "signature").unwrap();
        assert!(s.verify_record(&signed, "signature"));
    }

    #[test]
    fn sign_record_then_resign_is_bit_identical() {
        let s = signer();
        let mut record = Map::new();
        record.insert("x".to_string(), json!(1));
        let signed = s.sign_record(&record, "signature").unwrap();
        let mut stripped = signed.clone();
        stripped.remove("signature");
        let resigned = s.sign_record(&stripped, "signature").unwrap();
        assert_eq!(signed.get("signature"), resigned.get("signature"));
    }

    #[test]
    fn different_secrets_disagree() {
        let a = Signer::new(SignerConfig::new("secret-a")).unwrap();
        let b = Signer::new(SignerConfig::new("secret-b")).unwrap();
        let payload = json!({"x": 1});
        let sig = a.sign(&payload).unwrap();
        assert!(!b.verify(&payload, &sig));
    }
}
