//! X.509 SubjectPublicKeyInfo containers and PEM armor for P-256 keys.
//!
//! A vector's public key lives in the corpus as raw `(x, y)` coordinates.
//! For consumption by X.509-aware importers, the key is wrapped in the
//! standard SPKI structure:
//!
//! ```text
//! SEQUENCE {
//!   SEQUENCE {
//!     OID 1.2.840.10045.2.1     -- ecPublicKey
//!     OID 1.2.840.10045.3.1.7   -- prime256v1
//!   }
//!   BIT STRING 0x00 || 0x04 || x || y
//! }
//! ```
//!
//! The leading `0x00` inside the BIT STRING is its unused-bits count, not
//! sign padding. The structure is fixed-shape with single-byte lengths; the
//! builders here assert that bound rather than implementing long-form
//! framing.
//!
//! # Example
//!
//! ```
//! use secp256r1_vectors_core::spki::public_key_pem;
//! use secp256r1_vectors_core::Scalar;
//!
//! let x = Scalar::canonical("01");
//! let y = Scalar::canonical("02");
//! let pem = public_key_pem(&x, &y).unwrap();
//! assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
//! assert!(pem.ends_with("-----END PUBLIC KEY-----"));
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};
use crate::scalar::{Scalar, uncompressed_point};

/// DER-encoded ecPublicKey OID (1.2.840.10045.2.1), tag and length included.
const EC_PUBLIC_KEY_OID: [u8; 9] = [0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01];

/// DER-encoded prime256v1 OID (1.2.840.10045.3.1.7), tag and length included.
const PRIME256V1_OID: [u8; 10] = [0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07];

/// ASN.1 SEQUENCE tag.
const TAG_SEQUENCE: u8 = 0x30;

/// ASN.1 BIT STRING tag.
const TAG_BIT_STRING: u8 = 0x03;

/// Largest length expressible in short-form DER framing.
const MAX_SHORT_LEN: usize = 0x7f;

/// PEM line width.
const PEM_LINE_LEN: usize = 64;

const PEM_HEADER: &str = "-----BEGIN PUBLIC KEY-----";
const PEM_FOOTER: &str = "-----END PUBLIC KEY-----";

/// Wraps `content` in a short-form tag/length header.
fn tlv(tag: u8, content: &[u8]) -> Result<Vec<u8>> {
    if content.len() > MAX_SHORT_LEN {
        return Err(Error::CodecInvariant(format!(
            "TLV content of {} bytes requires long-form framing",
            content.len()
        )));
    }
    let mut out = Vec::with_capacity(2 + content.len());
    out.push(tag);
    out.push(content.len() as u8);
    out.extend_from_slice(content);
    Ok(out)
}

/// Builds the SubjectPublicKeyInfo DER structure for a P-256 point.
///
/// # Arguments
///
/// * `x` - The x-coordinate of the public key point
/// * `y` - The y-coordinate of the public key point
///
/// # Returns
///
/// A [`Result`] containing the 91-byte SPKI DER structure.
///
/// # Errors
///
/// Propagates coordinate decoding failures; the length assertions cannot
/// trip for P-256.
pub fn spki_der(x: &Scalar, y: &Scalar) -> Result<Vec<u8>> {
    let point = uncompressed_point(x, y)?;

    let mut algorithm = Vec::with_capacity(EC_PUBLIC_KEY_OID.len() + PRIME256V1_OID.len());
    algorithm.extend_from_slice(&EC_PUBLIC_KEY_OID);
    algorithm.extend_from_slice(&PRIME256V1_OID);
    let algorithm = tlv(TAG_SEQUENCE, &algorithm)?;

    // Unused-bits count, then the uncompressed point.
    let mut subject_key = Vec::with_capacity(1 + point.len());
    subject_key.push(0x00);
    subject_key.extend_from_slice(&point);
    let subject_key = tlv(TAG_BIT_STRING, &subject_key)?;

    let mut body = algorithm;
    body.extend_from_slice(&subject_key);
    tlv(TAG_SEQUENCE, &body)
}

/// Renders a P-256 public key as a PEM-armored SPKI document.
///
/// The output is a pure function of `(x, y)`: base64 of the DER bytes,
/// hard-wrapped at 64 characters, surrounded by `BEGIN`/`END PUBLIC KEY`
/// markers, newline-joined, with no trailing newline after the footer.
///
/// # Arguments
///
/// * `x` - The x-coordinate of the public key point
/// * `y` - The y-coordinate of the public key point
///
/// # Returns
///
/// A [`Result`] containing the PEM text.
///
/// # Errors
///
/// Propagates coordinate decoding failures.
pub fn public_key_pem(x: &Scalar, y: &Scalar) -> Result<String> {
    let der = spki_der(x, y)?;
    let encoded = STANDARD.encode(der);

    let mut lines = Vec::with_capacity(encoded.len() / PEM_LINE_LEN + 3);
    lines.push(PEM_HEADER);
    let mut rest = encoded.as_str();
    while rest.len() > PEM_LINE_LEN {
        let (line, tail) = rest.split_at(PEM_LINE_LEN);
        lines.push(line);
        rest = tail;
    }
    lines.push(rest);
    lines.push(PEM_FOOTER);

    Ok(lines.join("\n"))
}
