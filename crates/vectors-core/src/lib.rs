//! secp256r1 Test-Vector Corpus Toolkit
//!
//! This crate produces and validates test-vector corpora for secp256r1
//! (NIST P-256) ECDSA verifiers, to certify hardware and precompile
//! implementations against reference behavior.
//!
//! # Overview
//!
//! The heart of the crate is a binary codec and validation pipeline for
//! ECDSA artifacts:
//!
//! - **Scalar codec**: canonical fixed-width hex scalars for `(r, s)` and
//!   public key coordinates
//! - **Signature codecs**: ASN.1 DER and IEEE P1363 encodings, with the
//!   strict decoding conformance suites demand
//! - **Public-key containers**: SPKI DER and PEM armor for X.509-aware
//!   importers
//! - **Ingestion**: newline-delimited JSON corpora, normalized from
//!   heterogeneous sources (local generators, Wycheproof-style suites)
//!   into one canonical schema with deduplication
//! - **Validation**: a sequential engine that checks a verifier's verdict
//!   against every vector's expected-validity label and reports mismatches
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Vector Sources                        │
//! │   generators (generate)  │  conformance suites (wycheproof)  │
//! ├──────────────────────────────────────────────────────────────┤
//! │              JSONL corpus files (ingest, vector)             │
//! ├──────────────────────────────────────────────────────────────┤
//! │    Codecs: scalar │ der (ASN.1 / P1363) │ spki (SPKI/PEM)    │
//! ├──────────────────────────────────────────────────────────────┤
//! │        Validation engine (report) over a VectorVerifier      │
//! │                  reference impl: p256 (verify)               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Round-tripping a DER signature
//!
//! ```
//! use secp256r1_vectors_core::{Scalar, der};
//!
//! let r = Scalar::canonical("05");
//! let s = Scalar::canonical("01");
//!
//! let encoded = der::encode(&r, &s)?;
//! assert_eq!(der::decode(&encoded)?, (r, s));
//! # Ok::<(), secp256r1_vectors_core::Error>(())
//! ```
//!
//! ## Validating a corpus
//!
//! ```
//! use rand::rngs::OsRng;
//! use secp256r1_vectors_core::{P256Verifier, generate, report};
//!
//! let corpus = generate::generate_mixed(8, 0.5, &mut OsRng)?;
//! let outcome = report::validate_corpus(&corpus, &P256Verifier);
//!
//! assert_eq!(outcome.total_vectors, 8);
//! assert!(outcome.is_clean());
//! # Ok::<(), secp256r1_vectors_core::Error>(())
//! ```
//!
//! ## Exporting a public key as PEM
//!
//! ```
//! use secp256r1_vectors_core::{Scalar, spki};
//!
//! let x = Scalar::canonical("01");
//! let y = Scalar::canonical("02");
//! let pem = spki::public_key_pem(&x, &y)?;
//! assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
//! # Ok::<(), secp256r1_vectors_core::Error>(())
//! ```
//!
//! # Error Policy
//!
//! Partial corruption in a source degrades the reported vector count but
//! never aborts a run: malformed records and unsupported suite variants
//! are logged (via `tracing`) and skipped. Only I/O failures are fatal.
//! See [`enum@Error`] for the full taxonomy.

// Modules
pub mod der;
pub mod error;
pub mod generate;
pub mod ingest;
pub mod report;
pub mod scalar;
pub mod spki;
pub mod vector;
pub mod verify;
pub mod wycheproof;

// Re-exports for convenience
pub use error::{Error, Result};
pub use report::{ValidationReport, validate_corpus};
pub use scalar::Scalar;
pub use vector::SignatureVector;
pub use verify::{P256Verifier, VectorVerifier};
