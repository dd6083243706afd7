//! Canonical JSON encoding, content fingerprints, and the HMAC payload
//! signer shared between Atlas producers and the store.
//!
//! This is the canonicalization contract: anything that needs a
//! deterministic byte representation of a value — structural fingerprints,
//! HMAC signing — goes through [`canonical_json_bytes`].

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod canon;
mod fingerprint;
mod signer;

pub use canon::{canonical_json_bytes, canonicalize_value};
pub use fingerprint::{compute_semantic, compute_structural, compute_visual, merge};
pub use signer::{
    Signer, SignerConfig, configure_default_signer, sign_with_default, verify_with_default,
};
