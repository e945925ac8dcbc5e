//! Streaming ingestion of newline-delimited JSON vector files.
//!
//! A corpus file holds one [`SignatureVector`] object per line, UTF-8, with
//! no trailing-newline requirement on the last line. [`JsonlReader`] turns
//! any [`BufRead`] into an iterator of `Result<SignatureVector>`, one
//! `Result` per record, so the skip-and-log policy stays out of the parse
//! loop: file-level helpers log rejects and keep going, while an I/O error
//! mid-stream stays fatal.
//!
//! Memory use is bounded by the current line; reassembling a line that
//! spans read chunks is [`BufRead`]'s job, not replicated here.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use secp256r1_vectors_core::ingest::JsonlReader;
//!
//! let data = r#"{"x":"01","y":"02","r":"03","s":"04","msg":"00","valid":true}"#;
//! let mut reader = JsonlReader::new(Cursor::new(data));
//! assert!(reader.next().unwrap().is_ok());
//! assert!(reader.next().is_none());
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::vector::SignatureVector;

/// An iterator of vector records over a line-oriented reader.
///
/// Each item is the parse result of one non-blank line. Blank lines are
/// skipped; a malformed line yields `Err(MalformedRecord)` and the iterator
/// continues with the next line; an I/O failure yields `Err(Io)`.
#[derive(Debug)]
pub struct JsonlReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> JsonlReader<R> {
    /// Creates a reader over a line-oriented source.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for JsonlReader<R> {
    type Item = Result<SignatureVector>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(Error::Io(err))),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(serde_json::from_str(&line).map_err(|err| {
                Error::MalformedRecord(format!("line {}: {err}", self.line_no))
            }));
        }
    }
}

/// Reads all vectors from one JSONL file, skipping malformed lines.
///
/// # Arguments
///
/// * `path` - The corpus file to read
///
/// # Returns
///
/// A [`Result`] containing the vectors in line order.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or a read fails
/// mid-stream. Malformed lines are logged and skipped, never fatal.
pub fn read_jsonl_file(path: impl AsRef<Path>) -> Result<Vec<SignatureVector>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let mut vectors = Vec::new();
    for record in JsonlReader::new(BufReader::new(file)) {
        match record {
            Ok(vector) => vectors.push(vector),
            Err(Error::Io(err)) => return Err(Error::Io(err)),
            Err(err) => warn!(path = %path.display(), %err, "skipping malformed record"),
        }
    }

    debug!(path = %path.display(), count = vectors.len(), "read corpus file");
    Ok(vectors)
}

/// Loads and concatenates several corpus files into one ordered sequence.
///
/// Insertion order is file order, then line order within each file: the
/// order the validation report preserves.
///
/// # Errors
///
/// Propagates the first fatal I/O error.
pub fn load_corpus<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SignatureVector>> {
    let mut vectors = Vec::new();
    for path in paths {
        vectors.extend(read_jsonl_file(path)?);
    }
    Ok(vectors)
}

/// Writes vectors as newline-delimited JSON, one compact object per line.
///
/// No trailing newline is written after the last record, matching the
/// corpus files the generators have always produced.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn write_jsonl(path: impl AsRef<Path>, vectors: &[SignatureVector]) -> Result<()> {
    let mut file = File::create(path)?;
    for (index, vector) in vectors.iter().enumerate() {
        if index > 0 {
            file.write_all(b"\n")?;
        }
        let line = serde_json::to_string(vector)?;
        file.write_all(line.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::scalar::Scalar;

    use super::*;

    fn vector_line(r_hex: &str, valid: bool) -> String {
        format!(r#"{{"x":"01","y":"02","r":"{r_hex}","s":"04","msg":"00","valid":{valid}}}"#)
    }

    #[test]
    fn reads_records_in_line_order() {
        let data = format!("{}\n{}", vector_line("0a", true), vector_line("0b", false));
        let vectors: Vec<_> = JsonlReader::new(Cursor::new(data))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(vectors.len(), 2);
        assert!(vectors[0].r.as_str().ends_with("0a"));
        assert!(vectors[1].r.as_str().ends_with("0b"));
    }

    #[test]
    fn malformed_line_yields_record_error_and_continues() {
        let data = format!("{}\nnot json\n{}", vector_line("0a", true), vector_line("0b", true));
        let results: Vec<_> = JsonlReader::new(Cursor::new(data)).collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::MalformedRecord(_))));
        assert!(results[2].is_ok());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let data = format!("\n{}\n\n{}\n", vector_line("0a", true), vector_line("0b", true));
        let vectors: Vec<_> = JsonlReader::new(Cursor::new(data))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let data = vector_line("0c", true);
        let vectors: Vec<_> = JsonlReader::new(Cursor::new(data))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(vectors.len(), 1);
    }

    #[test]
    fn file_roundtrip_preserves_order_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.jsonl");

        let vectors: Vec<SignatureVector> = [("0a", true), ("0b", false), ("0c", true)]
            .iter()
            .map(|(r_hex, valid)| serde_json::from_str(&vector_line(r_hex, *valid)).unwrap())
            .collect();

        write_jsonl(&path, &vectors).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.ends_with('\n'));

        assert_eq!(read_jsonl_file(&path).unwrap(), vectors);
    }

    #[test]
    fn skips_malformed_lines_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.jsonl");
        std::fs::write(&path, format!("{}\n{{broken\n{}", vector_line("0a", true), vector_line("0b", true)))
            .unwrap();

        let vectors = read_jsonl_file(&path).unwrap();
        assert_eq!(vectors.len(), 2);
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(matches!(
            read_jsonl_file("/nonexistent/corpus.jsonl"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn corpus_concatenates_in_declared_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.jsonl");
        let second = dir.path().join("second.jsonl");
        std::fs::write(&first, vector_line("0a", true)).unwrap();
        std::fs::write(&second, vector_line("0b", true)).unwrap();

        let corpus = load_corpus(&[&second, &first]).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0].r, Scalar::canonical("0b"));
        assert_eq!(corpus[1].r, Scalar::canonical("0a"));
    }
}
