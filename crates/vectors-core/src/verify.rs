//! The external verifier contract and its p256-backed reference.
//!
//! The validation engine treats the cryptographic verifier as a black box
//! behind the [`VectorVerifier`] trait: raw 65-byte uncompressed public key,
//! raw 64-byte `r || s` signature, message bytes in, boolean out. Curve is
//! P-256 and the digest is SHA-256 of the message.
//!
//! The contract is total: structurally invalid input (a point off the
//! curve, an out-of-range scalar, an undecodable field) yields `false`,
//! never an error. A black-box verifier's internal failure is
//! indistinguishable from "signature invalid" for reporting purposes, so
//! one pathological vector can never abort validation of the rest of the
//! corpus.
//!
//! [`P256Verifier`] is the reference implementation used to certify
//! corpora before they are pointed at a hardware or precompile
//! implementation.

use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature as P256Signature, VerifyingKey};
use p256::elliptic_curve::sec1::FromEncodedPoint;
use p256::{AffinePoint, EncodedPoint, FieldBytes};

use crate::scalar::{Scalar, uncompressed_point};
use crate::vector::SignatureVector;

/// A P-256/SHA-256 ECDSA verifier.
///
/// Implementations must not mutate their inputs and should return `false`
/// rather than fail for structurally invalid input.
pub trait VectorVerifier {
    /// Verifies a signature over `msg`.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate of the public key point
    /// * `y` - The y-coordinate of the public key point
    /// * `r` - The R component of the signature
    /// * `s` - The S component of the signature
    /// * `msg` - The signed message (hashed with SHA-256 internally)
    ///
    /// # Returns
    ///
    /// `true` if the signature verifies, `false` otherwise.
    fn verify(&self, x: &Scalar, y: &Scalar, r: &Scalar, s: &Scalar, msg: &[u8]) -> bool;

    /// Verifies a whole vector record.
    ///
    /// A message that fails to decode counts as a negative verdict, in
    /// line with the contract's local-catch policy.
    fn verify_vector(&self, vector: &SignatureVector) -> bool {
        match vector.msg_bytes() {
            Ok(msg) => self.verify(&vector.x, &vector.y, &vector.r, &vector.s, &msg),
            Err(_) => false,
        }
    }
}

/// The reference verifier, backed by the pure-Rust `p256` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct P256Verifier;

impl VectorVerifier for P256Verifier {
    fn verify(&self, x: &Scalar, y: &Scalar, r: &Scalar, s: &Scalar, msg: &[u8]) -> bool {
        let point = match uncompressed_point(x, y) {
            Ok(point) => point,
            Err(_) => return false,
        };
        let encoded = match EncodedPoint::from_bytes(point) {
            Ok(encoded) => encoded,
            Err(_) => return false,
        };

        let affine = match Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded)) {
            Some(affine) => affine,
            None => return false, // not on the curve, or the point at infinity
        };
        let verifying_key = match VerifyingKey::from_affine(affine) {
            Ok(key) => key,
            Err(_) => return false,
        };

        let (r_bytes, s_bytes) = match (r.to_bytes(), s.to_bytes()) {
            (Ok(r_bytes), Ok(s_bytes)) => (r_bytes, s_bytes),
            _ => return false,
        };
        let signature = match P256Signature::from_scalars(
            FieldBytes::from(r_bytes),
            FieldBytes::from(s_bytes),
        ) {
            Ok(signature) => signature,
            Err(_) => return false, // r or s out of range
        };

        verifying_key.verify(msg, &signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Generated locally and cross-checked against OpenSSL.
    const KNOWN_GOOD: &str = r#"{
        "der": "",
        "x":"0ed20892f8606b47fdfdea4d102518a6b48e70dc320cf0154a23cdd39468d409",
        "y":"5dd3075b0f3670a6f348a8c1af7d7d3ebf153152055b965fc8f945092e9e79eb",
        "r":"ed090342d9baa6cf3ffa84c1914576c575bef7f3b8fd7cf25bbdee27e40172c8",
        "s":"86e0db2259d8ebb658351590d8ae0861b40fc354627c3a821876e9ce25a12596",
        "hash":"3fec5769b5cf4e310a7d150508e82fb8e3eda1c2c94c61492d3bd8aea99e06c9",
        "valid":true,
        "msg":"deadbeef0000",
        "comment":"generation 0"
    }"#;

    // Conformance case with r replaced by n - r: must not verify.
    const KNOWN_BAD: &str = r#"{
        "der":"",
        "x":"2927b10512bae3eddcfe467828128bad2903269919f7086069c8c4df6c732838",
        "y":"c7787964eaac00e5921fb1498a60f4606766b3d9685001558d1a974e7341513e",
        "r":"d45c5740946b2a147f59262ee6f5bc90bd01ed280528b62b3aed5fc93f06f739",
        "s":"b329f479a2bbd0a5c384ee1493b1f5186a87139cac5df4087c134b49156847db",
        "hash":"26d5db7c72ff1b658469bcb33844cafc9ded063ed62f2c6e8f8d971519c27873",
        "valid":false,
        "msg":"313233343030",
        "comment":"replaced r by n - r"
    }"#;

    #[test]
    fn accepts_known_good_vector() {
        let vector: SignatureVector = serde_json::from_str(KNOWN_GOOD).unwrap();
        assert!(P256Verifier.verify_vector(&vector));
        assert_eq!(P256Verifier.verify_vector(&vector), vector.valid);
    }

    #[test]
    fn rejects_known_bad_vector() {
        let vector: SignatureVector = serde_json::from_str(KNOWN_BAD).unwrap();
        assert!(!P256Verifier.verify_vector(&vector));
        assert_eq!(P256Verifier.verify_vector(&vector), vector.valid);
    }

    #[test]
    fn rejects_point_off_curve() {
        let mut vector: SignatureVector = serde_json::from_str(KNOWN_GOOD).unwrap();
        vector.y = Scalar::canonical(&"01".repeat(32));
        assert!(!P256Verifier.verify_vector(&vector));
    }

    #[test]
    fn rejects_all_zero_input() {
        let zero = Scalar::canonical("");
        assert!(!P256Verifier.verify(&zero, &zero, &zero, &zero, b""));
    }

    #[test]
    fn rejects_out_of_range_scalar() {
        let mut vector: SignatureVector = serde_json::from_str(KNOWN_GOOD).unwrap();
        // Larger than the group order n.
        vector.s = Scalar::canonical(&"ff".repeat(32));
        assert!(!P256Verifier.verify_vector(&vector));
    }

    #[test]
    fn undecodable_message_is_a_negative_verdict() {
        let mut vector: SignatureVector = serde_json::from_str(KNOWN_GOOD).unwrap();
        vector.msg = "not-hex".to_string();
        assert!(!P256Verifier.verify_vector(&vector));
    }
}
