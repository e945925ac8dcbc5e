//! The validation engine and its mismatch report.
//!
//! Validation walks the corpus in ingestion order, asks the verifier for a
//! verdict on each vector, and compares it against the vector's `valid`
//! label. Mismatching vectors are carried in full in the report for
//! post-hoc inspection; the report never fabricates or drops entries, and
//! a pathological vector cannot abort the loop because the verifier
//! contract is total (see [`crate::verify`]).
//!
//! The report serializes as a single JSON object:
//!
//! ```text
//! { "totalVectors": 12000, "mismatchedCount": 0, "mismatchedVectors": [] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::vector::SignatureVector;
use crate::verify::VectorVerifier;

/// The outcome of validating a corpus against a verifier.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Number of vectors checked.
    pub total_vectors: usize,

    /// Number of vectors whose verdict disagreed with their label.
    pub mismatched_count: usize,

    /// The mismatching vectors, in ingestion order.
    pub mismatched_vectors: Vec<SignatureVector>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a vector whose verdict disagreed with its label.
    pub fn record_mismatch(&mut self, vector: SignatureVector) {
        self.mismatched_count += 1;
        self.mismatched_vectors.push(vector);
    }

    /// Whether every verdict matched its label.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.mismatched_count == 0
    }
}

/// Validates a corpus against a verifier.
///
/// Vectors are checked sequentially; the mismatch list preserves
/// ingestion order, so a run over the same corpus is reproducible.
///
/// # Arguments
///
/// * `vectors` - The normalized corpus, in ingestion order
/// * `verifier` - The verifier under certification
///
/// # Returns
///
/// The [`ValidationReport`] for the run.
pub fn validate_corpus<V>(vectors: &[SignatureVector], verifier: &V) -> ValidationReport
where
    V: VectorVerifier + ?Sized,
{
    let mut report = ValidationReport::new();
    report.total_vectors = vectors.len();

    for vector in vectors {
        let verdict = verifier.verify_vector(vector);
        if verdict != vector.valid {
            debug!(
                comment = vector.comment.as_deref().unwrap_or(""),
                expected = vector.valid,
                verdict,
                "vector mismatch"
            );
            report.record_mismatch(vector.clone());
        }
    }

    report
}

/// Writes a report as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the directories cannot be created or
/// the file cannot be written.
pub fn write_report(path: impl AsRef<Path>, report: &ValidationReport) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::scalar::Scalar;

    use super::*;

    /// A verifier with a fixed verdict, for exercising the engine alone.
    struct FixedVerifier(bool);

    impl VectorVerifier for FixedVerifier {
        fn verify(&self, _: &Scalar, _: &Scalar, _: &Scalar, _: &Scalar, _: &[u8]) -> bool {
            self.0
        }
    }

    fn vector(r_hex: &str, valid: bool) -> SignatureVector {
        SignatureVector {
            der: None,
            x: Scalar::canonical("01"),
            y: Scalar::canonical("02"),
            r: Scalar::canonical(r_hex),
            s: Scalar::canonical("04"),
            hash: None,
            valid,
            msg: "00".to_string(),
            comment: Some(format!("vector {r_hex}")),
        }
    }

    #[test]
    fn clean_run_reports_no_mismatches() {
        let corpus = vec![vector("0a", true), vector("0b", true)];
        let report = validate_corpus(&corpus, &FixedVerifier(true));

        assert_eq!(report.total_vectors, 2);
        assert!(report.is_clean());
        assert!(report.mismatched_vectors.is_empty());
    }

    #[test]
    fn mismatches_preserve_ingestion_order() {
        let corpus = vec![
            vector("0a", false),
            vector("0b", true),
            vector("0c", false),
        ];
        let report = validate_corpus(&corpus, &FixedVerifier(true));

        assert_eq!(report.total_vectors, 3);
        assert_eq!(report.mismatched_count, 2);
        assert_eq!(report.mismatched_vectors[0].comment.as_deref(), Some("vector 0a"));
        assert_eq!(report.mismatched_vectors[1].comment.as_deref(), Some("vector 0c"));
    }

    #[test]
    fn report_serializes_camel_case() {
        let corpus = vec![vector("0a", false)];
        let report = validate_corpus(&corpus, &FixedVerifier(true));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"totalVectors\":1"));
        assert!(json.contains("\"mismatchedCount\":1"));
        assert!(json.contains("\"mismatchedVectors\""));
    }

    #[test]
    fn write_report_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("run.json");

        let report = validate_corpus(&[vector("0a", true)], &FixedVerifier(true));
        write_report(&path, &report).unwrap();

        let written: ValidationReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, report);
    }
}
