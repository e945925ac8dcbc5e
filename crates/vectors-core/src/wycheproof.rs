//! Normalization of third-party conformance suites to the canonical schema.
//!
//! Conformance suites (Wycheproof and its v1 successor) group test cases by
//! public key, hash, and signature encoding. The two generations differ in
//! one field name (v1 calls the key `publicKey` where v0 called it `key`)
//! and in nothing else this pipeline needs, so one serde alias covers both
//! rather than two parse paths.
//!
//! Many suite cases exercise ASN.1 decoding rather than the curve itself;
//! cases whose signature fails the strict codec are skipped with a warning,
//! as are whole groups on an unsupported curve, hash, or test type. A
//! skipped record degrades the corpus count; it never aborts the batch.
//!
//! Each accepted case becomes a [`SignatureVector`] with a synthesized
//! diagnostic comment `"{source} {type} {sha} #{tcId}: {comment}"` so a
//! mismatch report can be traced back to the originating suite file.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::der::SignatureEncoding;
use crate::error::{Error, Result};
use crate::scalar::Scalar;
use crate::vector::{SignatureVector, dedupe, message_digest};

/// The only curve this pipeline certifies.
const SUPPORTED_CURVE: &str = "secp256r1";

/// The only digest this pipeline certifies.
const SUPPORTED_HASH: &str = "SHA-256";

#[derive(Debug, Deserialize)]
struct SuiteFile {
    #[serde(rename = "testGroups")]
    test_groups: Vec<TestGroup>,
}

#[derive(Debug, Deserialize)]
struct TestGroup {
    /// `EcdsaVerify` (ASN.1 signatures) or `EcdsaP1363Verify` (fixed-width).
    #[serde(rename = "type")]
    group_type: String,

    /// v1 suites name this `publicKey`; v0 suites name it `key`.
    #[serde(rename = "publicKey", alias = "key")]
    public_key: GroupKey,

    sha: String,

    tests: Vec<TestCase>,
}

#[derive(Debug, Deserialize)]
struct GroupKey {
    curve: String,
    wx: String,
    wy: String,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    #[serde(rename = "tcId")]
    tc_id: u64,
    comment: String,
    msg: String,
    sig: String,
    result: String,
}

/// Normalizes one conformance-suite JSON document.
///
/// # Arguments
///
/// * `source` - A short label for the originating file, used in comments
///   and warnings
/// * `json` - The suite document
///
/// # Returns
///
/// A [`Result`] containing the accepted vectors in suite order.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] only if the document itself fails to
/// parse; unsupported groups and malformed cases are skipped with a
/// warning.
pub fn normalize_suite(source: &str, json: &str) -> Result<Vec<SignatureVector>> {
    let suite: SuiteFile = serde_json::from_str(json)?;
    let mut vectors = Vec::new();

    for group in &suite.test_groups {
        let encoding = match group.group_type.as_str() {
            "EcdsaVerify" => SignatureEncoding::Asn1,
            "EcdsaP1363Verify" => SignatureEncoding::P1363,
            other => {
                warn!(source, test_type = other, "skipping group with unsupported test type");
                continue;
            }
        };
        if group.public_key.curve != SUPPORTED_CURVE {
            warn!(source, curve = %group.public_key.curve, "skipping group with unsupported curve");
            continue;
        }
        if group.sha != SUPPORTED_HASH {
            warn!(source, sha = %group.sha, "skipping group with unsupported hash");
            continue;
        }

        let x = Scalar::canonical(&group.public_key.wx);
        let y = Scalar::canonical(&group.public_key.wy);

        for test in &group.tests {
            match normalize_case(source, group, encoding, &x, &y, test) {
                Ok(vector) => vectors.push(vector),
                Err(err) => {
                    warn!(source, tc_id = test.tc_id, %err, "skipping test case");
                }
            }
        }
    }

    Ok(vectors)
}

/// Reduces one suite case to the canonical schema.
fn normalize_case(
    source: &str,
    group: &TestGroup,
    encoding: SignatureEncoding,
    x: &Scalar,
    y: &Scalar,
    test: &TestCase,
) -> Result<SignatureVector> {
    let (r, s) = encoding.decode(&test.sig)?;

    // "acceptable" marks suite-optional behavior. Mapping it to valid=true
    // is a corpus-specific annotation checked against the reference
    // verifier for the vectors present, not a general conformance rule.
    let valid = match test.result.as_str() {
        "valid" | "acceptable" => true,
        "invalid" => false,
        other => {
            return Err(Error::UnsupportedVariant(format!(
                "unknown result label {other:?}"
            )));
        }
    };

    let msg_bytes = hex::decode(&test.msg)?;
    let hash = message_digest(&msg_bytes);

    Ok(SignatureVector {
        der: None,
        x: x.clone(),
        y: y.clone(),
        r,
        s,
        hash: Some(hash),
        valid,
        msg: test.msg.clone(),
        comment: Some(format!(
            "{source} {} {} #{}: {}",
            group.group_type, group.sha, test.tc_id, test.comment
        )),
    })
}

/// Normalizes a conformance-suite file from disk.
///
/// The file name becomes the source label in comments and warnings.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file is unreadable and
/// [`Error::MalformedRecord`] if the document fails to parse.
pub fn load_suite_file(path: impl AsRef<Path>) -> Result<Vec<SignatureVector>> {
    let path = path.as_ref();
    let source = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    let json = fs::read_to_string(path)?;
    normalize_suite(&source, &json)
}

/// Normalizes and merges several conformance files into one corpus.
///
/// Files are processed in declared order; overlapping downloads are
/// collapsed by [`dedupe`], so the first file to contribute a vector keeps
/// its metadata.
///
/// # Errors
///
/// Propagates per-file errors from [`load_suite_file`].
pub fn merge_suite_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SignatureVector>> {
    let mut vectors = Vec::new();
    for path in paths {
        vectors.extend(load_suite_file(path)?);
    }

    let total = vectors.len();
    let deduped = dedupe(vectors);
    debug!(total, unique = deduped.len(), "merged conformance suites");
    Ok(deduped)
}

#[cfg(test)]
mod tests {
    use crate::der;

    use super::*;

    fn suite_json(group_type: &str, key_field: &str, sig: &str, result: &str) -> String {
        format!(
            r#"{{
              "testGroups": [
                {{
                  "type": "{group_type}",
                  "{key_field}": {{
                    "curve": "secp256r1",
                    "wx": "00{x}",
                    "wy": "{y}"
                  }},
                  "sha": "SHA-256",
                  "tests": [
                    {{ "tcId": 1, "comment": "pseudorandom signature", "msg": "313233343030", "sig": "{sig}", "result": "{result}" }}
                  ]
                }}
              ]
            }}"#,
            x = "8d".repeat(32),
            y = "4e".repeat(32),
        )
    }

    fn der_sig_hex() -> String {
        let r = Scalar::canonical(&"11".repeat(32));
        let s = Scalar::canonical(&"22".repeat(32));
        hex::encode(der::encode(&r, &s).unwrap())
    }

    fn p1363_sig_hex() -> String {
        format!("{}{}", "11".repeat(32), "22".repeat(32))
    }

    #[test]
    fn normalizes_v1_asn1_group() {
        let json = suite_json("EcdsaVerify", "publicKey", &der_sig_hex(), "valid");
        let vectors = normalize_suite("suite.json", &json).unwrap();

        assert_eq!(vectors.len(), 1);
        let vector = &vectors[0];
        assert_eq!(vector.x.as_str(), "8d".repeat(32));
        assert_eq!(vector.r.as_str(), "11".repeat(32));
        assert_eq!(vector.s.as_str(), "22".repeat(32));
        assert!(vector.valid);
        assert_eq!(vector.hash, Some(message_digest(&hex::decode("313233343030").unwrap())));
        assert_eq!(
            vector.comment.as_deref(),
            Some("suite.json EcdsaVerify SHA-256 #1: pseudorandom signature")
        );
    }

    #[test]
    fn normalizes_v0_p1363_group() {
        let json = suite_json("EcdsaP1363Verify", "key", &p1363_sig_hex(), "invalid");
        let vectors = normalize_suite("suite.json", &json).unwrap();

        assert_eq!(vectors.len(), 1);
        assert!(!vectors[0].valid);
    }

    #[test]
    fn asn1_and_p1363_normalize_identically() {
        let from_der = normalize_suite(
            "a.json",
            &suite_json("EcdsaVerify", "publicKey", &der_sig_hex(), "valid"),
        )
        .unwrap();
        let from_p1363 = normalize_suite(
            "a.json",
            &suite_json("EcdsaP1363Verify", "key", &p1363_sig_hex(), "valid"),
        )
        .unwrap();

        assert_eq!(from_der[0].identity_key(), from_p1363[0].identity_key());
    }

    #[test]
    fn acceptable_maps_to_valid() {
        let json = suite_json("EcdsaVerify", "publicKey", &der_sig_hex(), "acceptable");
        let vectors = normalize_suite("suite.json", &json).unwrap();
        assert!(vectors[0].valid);
    }

    #[test]
    fn unknown_result_skips_case() {
        let json = suite_json("EcdsaVerify", "publicKey", &der_sig_hex(), "flaky");
        let vectors = normalize_suite("suite.json", &json).unwrap();
        assert!(vectors.is_empty());
    }

    #[test]
    fn malformed_signature_skips_case() {
        let json = suite_json("EcdsaVerify", "publicKey", "3000", "valid");
        let vectors = normalize_suite("suite.json", &json).unwrap();
        assert!(vectors.is_empty());
    }

    #[test]
    fn unsupported_test_type_skips_group() {
        let json = suite_json("EcdsaP1363Sign", "publicKey", &p1363_sig_hex(), "valid");
        let vectors = normalize_suite("suite.json", &json).unwrap();
        assert!(vectors.is_empty());
    }

    #[test]
    fn unsupported_curve_skips_group() {
        let json = suite_json("EcdsaVerify", "publicKey", &der_sig_hex(), "valid")
            .replace("secp256r1", "secp256k1");
        let vectors = normalize_suite("suite.json", &json).unwrap();
        assert!(vectors.is_empty());
    }

    #[test]
    fn unsupported_hash_skips_group() {
        let json = suite_json("EcdsaVerify", "publicKey", &der_sig_hex(), "valid")
            .replace("SHA-256", "SHA-512");
        let vectors = normalize_suite("suite.json", &json).unwrap();
        assert!(vectors.is_empty());
    }

    #[test]
    fn key_coordinates_are_canonicalized() {
        // wx carries a 66-char zero-padded coordinate; the canonical form
        // keeps the trailing 64.
        let json = suite_json("EcdsaVerify", "publicKey", &der_sig_hex(), "valid");
        let vectors = normalize_suite("suite.json", &json).unwrap();
        assert_eq!(vectors[0].x.as_str().len(), Scalar::HEX_LEN);
    }

    #[test]
    fn document_parse_failure_is_an_error() {
        assert!(normalize_suite("suite.json", "{ not json").is_err());
    }
}
