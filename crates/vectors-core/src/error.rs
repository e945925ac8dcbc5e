//! Error types for the secp256r1 vector toolkit.
//!
//! This module provides the error type [`enum@Error`] covering every failure
//! mode of the codec and validation pipeline.
//!
//! # Error Categories
//!
//! - **Record errors**: a single vector or conformance test case is
//!   malformed or uses an unsupported curve/hash/result variant. These are
//!   recoverable: the pipeline logs and skips the record, never the batch.
//! - **Codec invariant violations**: a canonicalized scalar is not 32 bytes,
//!   or a DER structure would need long-form length framing. These indicate
//!   a programming error and abort the current record's processing.
//! - **I/O errors**: a source file is unreadable or a report unwritable.
//!   These are fatal and abort the run.
//!
//! # Example
//!
//! ```
//! use secp256r1_vectors_core::Error;
//!
//! fn example() -> Result<(), Error> {
//!     let err = Error::MalformedRecord("truncated line".to_string());
//!     assert!(matches!(err, Error::MalformedRecord(_)));
//!     Ok(())
//! }
//! ```

use core::result::Result as CoreResult;

use hex::FromHexError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// The main error type for the secp256r1 vector toolkit.
///
/// Variants map one-to-one onto the pipeline's error-handling policy: record
/// errors are skipped with a warning, invariant violations abort the current
/// record, and I/O errors abort the run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    // =========================================================================
    // Record Errors (log and skip, never abort the batch)
    // =========================================================================
    /// A JSONL line failed to parse, or a signature failed its ASN.1
    /// structural assertions (wrong tag, wrong length, trailing bytes).
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A conformance group uses a curve or hash other than P-256/SHA-256,
    /// or carries a result label outside the known set.
    #[error("unsupported variant: {0}")]
    UnsupportedVariant(String),

    // =========================================================================
    // Codec Invariant Violations (programming-error class)
    // =========================================================================
    /// A codec invariant was violated, e.g. a canonicalized scalar that is
    /// not exactly 32 bytes or a DER structure exceeding single-byte length.
    #[error("codec invariant violated: {0}")]
    CodecInvariant(String),

    // =========================================================================
    // I/O Errors (fatal, abort the run)
    // =========================================================================
    /// Reading a source file or writing a report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FromHexError> for Error {
    fn from(err: FromHexError) -> Self {
        Error::MalformedRecord(format!("hex decoding failed: {err}"))
    }
}

impl From<SerdeJsonError> for Error {
    fn from(err: SerdeJsonError) -> Self {
        Error::MalformedRecord(format!("JSON error: {err}"))
    }
}

/// A specialized [`Result`] type for vector toolkit operations.
///
/// This type alias is used throughout the library to avoid having to
/// specify the error type explicitly.
pub type Result<T> = CoreResult<T, Error>;
