//! The canonical signature test-vector schema.
//!
//! Every vector source (local generators, older corpus files, conformance
//! suites) reduces to one record shape: [`SignatureVector`]. Historical
//! corpus files differ only in which optional fields they carry
//! (`hash`, `comment`, the legacy `der`), so a single serde definition with
//! optional fields replaces the per-shape read loops the sources grew over
//! time.
//!
//! A vector's `valid` flag is ground truth: established by construction
//! (the generator knows whether it corrupted the signature) or by an
//! upstream suite's labeled result. The validation engine checks the
//! external verifier *against* this flag, never the other way around.
//!
//! # Example
//!
//! ```
//! use secp256r1_vectors_core::SignatureVector;
//!
//! let line = r#"{"x":"01","y":"02","r":"03","s":"04","msg":"deadbeef","valid":true}"#;
//! let vector: SignatureVector = serde_json::from_str(line).unwrap();
//! assert!(vector.valid);
//! assert_eq!(vector.x.as_str().len(), 64);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::scalar::Scalar;

/// A single ECDSA signature test vector over P-256/SHA-256.
///
/// Scalars canonicalize on deserialization, so a vector read from any
/// source already satisfies the fixed-width invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureVector {
    /// Legacy DER field from older corpus files; unused and may be empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub der: Option<String>,

    /// The x-coordinate of the public key point.
    pub x: Scalar,

    /// The y-coordinate of the public key point.
    pub y: Scalar,

    /// The R component of the signature.
    pub r: Scalar,

    /// The S component of the signature.
    pub s: Scalar,

    /// Precomputed SHA-256 digest of `msg`, when the source supplies it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<Scalar>,

    /// Whether the signature is expected to verify.
    pub valid: bool,

    /// The signed message, hex-encoded.
    pub msg: String,

    /// Diagnostic provenance: generator index or suite test-case id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl SignatureVector {
    /// Decodes the message into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedRecord`] if `msg` is not valid hex.
    pub fn msg_bytes(&self) -> Result<Vec<u8>> {
        Ok(hex::decode(&self.msg)?)
    }

    /// Builds the raw 64-byte `r || s` signature.
    ///
    /// # Errors
    ///
    /// Propagates scalar decoding failures.
    pub fn raw_signature(&self) -> Result<[u8; 2 * Scalar::BYTE_LEN]> {
        let mut sig = [0u8; 2 * Scalar::BYTE_LEN];
        sig[..Scalar::BYTE_LEN].copy_from_slice(&self.r.to_bytes()?);
        sig[Scalar::BYTE_LEN..].copy_from_slice(&self.s.to_bytes()?);
        Ok(sig)
    }

    /// The vector's identity for deduplication: `(x, y, r, s, hash)`.
    ///
    /// Overlapping conformance downloads repeat vectors; two records with
    /// the same identity are the same logical vector regardless of
    /// comments or source.
    #[must_use]
    pub fn identity_key(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.x,
            self.y,
            self.r,
            self.s,
            self.hash.as_ref().map_or("", Scalar::as_str)
        )
    }
}

/// SHA-256 digest of a message as a canonical scalar.
#[must_use]
pub fn message_digest(msg: &[u8]) -> Scalar {
    let digest: [u8; Scalar::BYTE_LEN] = Sha256::digest(msg).into();
    Scalar::from_bytes(&digest)
}

/// Deduplicates vectors by identity key, first occurrence wins.
///
/// Order of first occurrence is preserved; later duplicates are dropped
/// silently, keeping the first record's metadata.
#[must_use]
pub fn dedupe(vectors: Vec<SignatureVector>) -> Vec<SignatureVector> {
    let mut seen = HashSet::new();
    vectors
        .into_iter()
        .filter(|vector| seen.insert(vector.identity_key()))
        .collect()
}
