//! ASN.1 DER and IEEE P1363 signature codecs.
//!
//! An ECDSA signature is the scalar pair `(r, s)`. Two wire encodings occur
//! in the corpus:
//!
//! - **ASN.1 DER**: `SEQUENCE { INTEGER r, INTEGER s }`, the encoding
//!   produced by OpenSSL and most hardware signers:
//!
//!   ```text
//!   30 len 02 r_len r_bytes 02 s_len s_bytes
//!   ```
//!
//!   Each INTEGER is the 32 canonical bytes, with a leading `0x00`
//!   prepended iff the top bit is set (ASN.1 would otherwise read the
//!   value as negative).
//!
//! - **IEEE P1363**: the fixed-width concatenation `r || s`, 64 bytes, no
//!   framing.
//!
//! The decoder here is deliberately *not* a general ASN.1 parser. It walks
//! a fixed token sequence and rejects everything else, because conformance
//! suites use structurally-hostile signatures to probe exactly such
//! shortcuts; a lenient parse would mislabel those vectors. Which encoding
//! applies to a record is source metadata ([`SignatureEncoding`]), never
//! auto-detected.
//!
//! # Example
//!
//! ```
//! use secp256r1_vectors_core::der;
//! use secp256r1_vectors_core::Scalar;
//!
//! let r = Scalar::canonical("05");
//! let s = Scalar::canonical("01");
//! let encoded = der::encode(&r, &s).unwrap();
//! assert_eq!(der::decode(&encoded).unwrap(), (r, s));
//! ```

use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// ASN.1 SEQUENCE tag.
const TAG_SEQUENCE: u8 = 0x30;

/// ASN.1 INTEGER tag.
const TAG_INTEGER: u8 = 0x02;

/// Largest length expressible in short-form DER framing.
const MAX_SHORT_LEN: usize = 0x7f;

/// The signature encoding declared by a vector source.
///
/// Conformance suites mark each test group as either ASN.1
/// (`EcdsaVerify`) or P1363 (`EcdsaP1363Verify`); the group's declaration
/// is carried here and drives [`SignatureEncoding::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureEncoding {
    /// ASN.1 DER `SEQUENCE { INTEGER, INTEGER }`.
    Asn1,
    /// Fixed-width `r || s`, 128 hex characters.
    P1363,
}

impl SignatureEncoding {
    /// Decodes a hex-encoded signature in this encoding into `(r, s)`.
    ///
    /// # Arguments
    ///
    /// * `sig_hex` - The hex-encoded signature
    ///
    /// # Returns
    ///
    /// A [`Result`] containing the canonical `(r, s)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] if the signature fails the
    /// structural checks of the declared encoding.
    pub fn decode(self, sig_hex: &str) -> Result<(Scalar, Scalar)> {
        match self {
            Self::Asn1 => {
                let bytes = hex::decode(sig_hex)?;
                decode(&bytes)
            }
            Self::P1363 => decode_p1363(sig_hex),
        }
    }
}

/// Encodes `(r, s)` as an ASN.1 DER signature.
///
/// # Arguments
///
/// * `r` - The R component of the signature
/// * `s` - The S component of the signature
///
/// # Returns
///
/// A [`Result`] containing the DER bytes (70 bytes at most for P-256).
///
/// # Errors
///
/// Returns [`Error::CodecInvariant`] if the sequence would need long-form
/// length framing (impossible for P-256 scalars, asserted defensively),
/// and propagates scalar decoding failures.
///
/// # Example
///
/// ```
/// use secp256r1_vectors_core::der;
/// use secp256r1_vectors_core::Scalar;
///
/// let r = Scalar::canonical("05");
/// let s = Scalar::canonical("01");
/// let encoded = der::encode(&r, &s).unwrap();
/// assert_eq!(encoded[0], 0x30);
/// assert_eq!(encoded.len(), 70);
/// ```
pub fn encode(r: &Scalar, s: &Scalar) -> Result<Vec<u8>> {
    let r_int = integer_bytes(r)?;
    let s_int = integer_bytes(s)?;

    let total = 2 + r_int.len() + 2 + s_int.len();
    if total > MAX_SHORT_LEN {
        return Err(Error::CodecInvariant(format!(
            "sequence length {total} requires long-form framing"
        )));
    }

    let mut der = Vec::with_capacity(2 + total);
    der.push(TAG_SEQUENCE);
    der.push(total as u8);
    der.push(TAG_INTEGER);
    der.push(r_int.len() as u8);
    der.extend_from_slice(&r_int);
    der.push(TAG_INTEGER);
    der.push(s_int.len() as u8);
    der.extend_from_slice(&s_int);

    Ok(der)
}

/// INTEGER body for one scalar: 32 canonical bytes, sign-padded when the
/// top bit is set.
fn integer_bytes(scalar: &Scalar) -> Result<Vec<u8>> {
    let bytes = scalar.to_bytes()?;
    let mut out = Vec::with_capacity(Scalar::BYTE_LEN + 1);
    if bytes[0] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// Decodes an ASN.1 DER signature into canonical `(r, s)`.
///
/// The parse is a strict token walk:
///
/// 1. SEQUENCE tag, one length byte equal to `len - 2`.
/// 2. INTEGER with length `0x20` (32 raw bytes) or `0x21` (a `0x00`
///    sign-padding byte then 32 bytes); any other length is a failure.
/// 3. The same for `s`.
/// 4. No trailing bytes.
///
/// # Arguments
///
/// * `der` - The DER-encoded signature bytes
///
/// # Returns
///
/// A [`Result`] containing the canonical `(r, s)` pair.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] on any structural violation.
pub fn decode(der: &[u8]) -> Result<(Scalar, Scalar)> {
    if der.len() < 2 {
        return Err(Error::MalformedRecord("DER sequence header truncated".to_string()));
    }
    if der[0] != TAG_SEQUENCE {
        return Err(Error::MalformedRecord(format!(
            "expected SEQUENCE tag {TAG_SEQUENCE:#04x}, found {:#04x}",
            der[0]
        )));
    }
    if der[1] as usize != der.len() - 2 {
        return Err(Error::MalformedRecord(format!(
            "sequence length {:#04x} does not match {} content bytes",
            der[1],
            der.len() - 2
        )));
    }

    let mut cursor = 2;
    let r = read_integer(der, &mut cursor)?;
    let s = read_integer(der, &mut cursor)?;

    if cursor != der.len() {
        return Err(Error::MalformedRecord(format!(
            "{} trailing bytes after signature",
            der.len() - cursor
        )));
    }

    Ok((r, s))
}

/// Reads one fixed-width INTEGER token at `cursor`, advancing it.
fn read_integer(der: &[u8], cursor: &mut usize) -> Result<Scalar> {
    if der.len() < *cursor + 2 {
        return Err(Error::MalformedRecord("INTEGER header truncated".to_string()));
    }
    if der[*cursor] != TAG_INTEGER {
        return Err(Error::MalformedRecord(format!(
            "expected INTEGER tag {TAG_INTEGER:#04x}, found {:#04x}",
            der[*cursor]
        )));
    }

    let len = der[*cursor + 1] as usize;
    *cursor += 2;

    match len {
        0x21 => {
            if der.len() <= *cursor || der[*cursor] != 0x00 {
                return Err(Error::MalformedRecord(
                    "expected sign-padding byte after length 0x21".to_string(),
                ));
            }
            *cursor += 1;
        }
        0x20 => {}
        other => {
            return Err(Error::MalformedRecord(format!(
                "INTEGER length {other:#04x}, expected 0x20 or 0x21"
            )));
        }
    }

    if der.len() < *cursor + Scalar::BYTE_LEN {
        return Err(Error::MalformedRecord("INTEGER body truncated".to_string()));
    }

    let mut bytes = [0u8; Scalar::BYTE_LEN];
    bytes.copy_from_slice(&der[*cursor..*cursor + Scalar::BYTE_LEN]);
    *cursor += Scalar::BYTE_LEN;

    Ok(Scalar::from_bytes(&bytes))
}

/// Decodes an IEEE P1363 signature into canonical `(r, s)`.
///
/// # Arguments
///
/// * `sig_hex` - Exactly 128 hex characters: `r` then `s`, no framing
///
/// # Returns
///
/// A [`Result`] containing the canonical `(r, s)` pair.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] if the input is not exactly 128
/// characters.
pub fn decode_p1363(sig_hex: &str) -> Result<(Scalar, Scalar)> {
    if sig_hex.len() != 2 * Scalar::HEX_LEN {
        return Err(Error::MalformedRecord(format!(
            "P1363 signature must be {} hex chars, found {}",
            2 * Scalar::HEX_LEN,
            sig_hex.len()
        )));
    }
    let r = sig_hex
        .get(..Scalar::HEX_LEN)
        .ok_or_else(|| Error::MalformedRecord("P1363 signature is not hex".to_string()))?;
    let s = sig_hex
        .get(Scalar::HEX_LEN..)
        .ok_or_else(|| Error::MalformedRecord("P1363 signature is not hex".to_string()))?;
    Ok((Scalar::canonical(r), Scalar::canonical(s)))
}
