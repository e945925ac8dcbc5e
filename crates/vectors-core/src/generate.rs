//! Synthetic corpus generators.
//!
//! Two corpora come out of here: an all-valid set for benchmarking a
//! verifier on representative input, and a mixed set where a configurable
//! fraction of signatures is deliberately corrupted. Each vector gets a
//! fresh keypair and the message `"deadbeef"` followed by the vector index
//! as four hex digits. The message is *hex*, not UTF-8, matching the
//! corpus files every downstream consumer already reads.
//!
//! Corruption adds 1 (mod 256) to the first signature byte, i.e. the
//! leading byte of `r`. The generator knows whether it corrupted a
//! signature, which is what makes the `valid` label ground truth.
//!
//! Signing is delegated to the `p256` crate; the generators own no curve
//! math.

use p256::ecdsa::signature::Signer;
use p256::ecdsa::{Signature as P256Signature, SigningKey};
use rand::{CryptoRng, Rng, RngCore};

use crate::error::{Error, Result};
use crate::scalar::Scalar;
use crate::vector::{SignatureVector, message_digest};

/// Generates `count` vectors with valid signatures.
///
/// # Errors
///
/// See [`generate_mixed`].
pub fn generate_valid<R>(count: usize, rng: &mut R) -> Result<Vec<SignatureVector>>
where
    R: RngCore + CryptoRng,
{
    generate_mixed(count, 0.0, rng)
}

/// Generates `count` vectors, corrupting each signature with the given
/// probability.
///
/// # Arguments
///
/// * `count` - Number of vectors to generate
/// * `invalid_probability` - Chance in `0.0..=1.0` that a vector's
///   signature is corrupted and labeled `valid: false`
/// * `rng` - Randomness for key generation and corruption decisions
///
/// # Returns
///
/// A [`Result`] containing the generated vectors, indexed from zero.
///
/// # Errors
///
/// Returns [`Error::CodecInvariant`] if `invalid_probability` is outside
/// `0.0..=1.0`.
pub fn generate_mixed<R>(
    count: usize,
    invalid_probability: f64,
    rng: &mut R,
) -> Result<Vec<SignatureVector>>
where
    R: RngCore + CryptoRng,
{
    if !(0.0..=1.0).contains(&invalid_probability) {
        return Err(Error::CodecInvariant(format!(
            "corruption probability {invalid_probability} outside 0.0..=1.0"
        )));
    }

    let mut vectors = Vec::with_capacity(count);
    for index in 0..count {
        let signing_key = SigningKey::random(rng);
        let verifying_key = signing_key.verifying_key();

        let point = verifying_key.to_encoded_point(false);
        let point_bytes = point.as_bytes();
        let mut x = [0u8; Scalar::BYTE_LEN];
        let mut y = [0u8; Scalar::BYTE_LEN];
        x.copy_from_slice(&point_bytes[1..1 + Scalar::BYTE_LEN]);
        y.copy_from_slice(&point_bytes[1 + Scalar::BYTE_LEN..]);

        let msg = format!("deadbeef{index:04x}");
        let msg_bytes = hex::decode(&msg)?;

        let signature: P256Signature = signing_key.sign(&msg_bytes);
        let sig_bytes = signature.to_bytes();
        let mut r = [0u8; Scalar::BYTE_LEN];
        let mut s = [0u8; Scalar::BYTE_LEN];
        r.copy_from_slice(&sig_bytes[..Scalar::BYTE_LEN]);
        s.copy_from_slice(&sig_bytes[Scalar::BYTE_LEN..]);

        let valid = !rng.gen_bool(invalid_probability);
        if !valid {
            // Nudge the leading signature byte so the vector no longer
            // verifies.
            r[0] = r[0].wrapping_add(1);
        }

        let comment = if valid {
            format!("generation {index}")
        } else {
            format!("generation {index} (invalid)")
        };

        vectors.push(SignatureVector {
            der: Some(String::new()),
            x: Scalar::from_bytes(&x),
            y: Scalar::from_bytes(&y),
            r: Scalar::from_bytes(&r),
            s: Scalar::from_bytes(&s),
            hash: Some(message_digest(&msg_bytes)),
            valid,
            msg,
            comment: Some(comment),
        });
    }

    Ok(vectors)
}
