//! Canonical fixed-width scalars for P-256 coordinates and signature parts.
//!
//! Every 256-bit quantity in the corpus (the public key coordinates `x` and
//! `y`, the signature components `r` and `s`, and the precomputed message
//! digest) is stored as a [`Scalar`]: a hex string of exactly 64 characters,
//! most-significant byte first, zero-padded on the left.
//!
//! Upstream sources are not this tidy. Conformance suites pad coordinates
//! with an extra leading zero byte, and older corpus files carry
//! short-stripped values. [`Scalar::canonical`] absorbs both: longer input
//! keeps its *last* 64 characters, shorter input is left-padded with `'0'`.
//!
//! # Example
//!
//! ```
//! use secp256r1_vectors_core::Scalar;
//!
//! let scalar = Scalar::canonical("05");
//! assert_eq!(scalar.as_str().len(), 64);
//! assert!(scalar.as_str().ends_with("05"));
//! ```

use core::fmt;
use core::result::Result as CoreResult;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A 256-bit unsigned integer as a canonical 64-hex-character string.
///
/// The canonical form is the storage representation for every scalar field of
/// a signature vector. ASN.1 sign padding never appears here; it exists only
/// inside DER-encoded signatures (see [`crate::der`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scalar(String);

impl Scalar {
    /// Length of the canonical hex representation.
    pub const HEX_LEN: usize = 64;

    /// Length of the byte representation.
    pub const BYTE_LEN: usize = 32;

    /// Canonicalizes a hex string to exactly 64 characters.
    ///
    /// Input longer than 64 characters keeps the **last** 64: excess
    /// high-order data is silently discarded, not rejected. This leniency
    /// exists for upstream records with variable zero padding; a caller
    /// supplying meaningful high-order bytes loses them.
    ///
    /// # Arguments
    ///
    /// * `hex_str` - A hex string of any length
    ///
    /// # Returns
    ///
    /// The canonical [`Scalar`].
    ///
    /// # Example
    ///
    /// ```
    /// use secp256r1_vectors_core::Scalar;
    ///
    /// // Short input is left-padded.
    /// let padded = Scalar::canonical("ff");
    /// assert_eq!(padded.as_str(), format!("{}ff", "0".repeat(62)));
    ///
    /// // An extra leading zero byte is dropped.
    /// let trimmed = Scalar::canonical(&format!("00{}", "11".repeat(32)));
    /// assert_eq!(trimmed.as_str(), "11".repeat(32));
    /// ```
    #[must_use]
    pub fn canonical(hex_str: &str) -> Self {
        let len = hex_str.len();
        if len > Self::HEX_LEN {
            match hex_str.get(len - Self::HEX_LEN..) {
                Some(tail) => Self(tail.to_string()),
                // Splitting inside a multi-byte character: the input is not
                // hex at all. Keep it intact so byte decoding reports it.
                None => Self(hex_str.to_string()),
            }
        } else {
            Self(format!("{hex_str:0>64}"))
        }
    }

    /// Creates a canonical scalar from a 32-byte big-endian value.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; Self::BYTE_LEN]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Decodes the scalar into its 32-byte big-endian value.
    ///
    /// # Returns
    ///
    /// A [`Result`] containing the 32-byte array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] if the content is not valid hex,
    /// or [`Error::CodecInvariant`] if the decoded value is not exactly
    /// 32 bytes (impossible for values built via [`Scalar::canonical`]).
    pub fn to_bytes(&self) -> Result<[u8; Self::BYTE_LEN]> {
        let bytes = hex::decode(&self.0)?;
        bytes.try_into().map_err(|_| {
            Error::CodecInvariant(format!("scalar is not {} bytes", Self::BYTE_LEN))
        })
    }

    /// Returns the canonical hex representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> CoreResult<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> CoreResult<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Scalar::canonical(&s))
    }
}

/// Length of an uncompressed SEC1 point: tag byte plus two coordinates.
pub const UNCOMPRESSED_POINT_LEN: usize = 1 + 2 * Scalar::BYTE_LEN;

/// SEC1 tag for an uncompressed point.
pub const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Builds the 65-byte uncompressed EC point `0x04 || x || y`.
///
/// # Arguments
///
/// * `x` - The x-coordinate of the public key point
/// * `y` - The y-coordinate of the public key point
///
/// # Returns
///
/// A [`Result`] containing the 65-byte point.
///
/// # Errors
///
/// Returns an error if either coordinate fails to decode to 32 bytes; with
/// canonical scalars this only happens for non-hex content.
///
/// # Example
///
/// ```
/// use secp256r1_vectors_core::scalar::{uncompressed_point, UNCOMPRESSED_POINT_TAG};
/// use secp256r1_vectors_core::Scalar;
///
/// let x = Scalar::canonical("01");
/// let y = Scalar::canonical("02");
/// let point = uncompressed_point(&x, &y).unwrap();
/// assert_eq!(point.len(), 65);
/// assert_eq!(point[0], UNCOMPRESSED_POINT_TAG);
/// ```
pub fn uncompressed_point(x: &Scalar, y: &Scalar) -> Result<[u8; UNCOMPRESSED_POINT_LEN]> {
    let mut point = [0u8; UNCOMPRESSED_POINT_LEN];
    point[0] = UNCOMPRESSED_POINT_TAG;
    point[1..1 + Scalar::BYTE_LEN].copy_from_slice(&x.to_bytes()?);
    point[1 + Scalar::BYTE_LEN..].copy_from_slice(&y.to_bytes()?);
    Ok(point)
}
