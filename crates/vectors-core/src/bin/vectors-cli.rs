//! secp256r1 Vector Toolkit CLI
//!
//! Command-line glue over the corpus library: generate synthetic vector
//! files, normalize downloaded conformance suites, validate a corpus
//! against the reference verifier, and export public keys as PEM.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `generate-valid <count> <out.jsonl>` | Generate an all-valid corpus |
//! | `generate-mixed <count> <probability> <out.jsonl>` | Generate a corpus with corrupted signatures |
//! | `normalize <out.jsonl> <suite.json>...` | Normalize + merge conformance suites |
//! | `validate <report.json> <corpus.jsonl>...` | Validate corpora, write mismatch report |
//! | `pem <x> <y>` | Print a P-256 public key as SPKI PEM |
//!
//! # Quick Start
//!
//! ```bash
//! vectors-cli generate-mixed 10000 0.5 test_vectors/vectors_random_mixed.jsonl
//! vectors-cli validate reports/reference_report.json test_vectors/*.jsonl
//! ```

use std::env;
use std::process;

use rand::rngs::OsRng;
use secp256r1_vectors_core::{
    P256Verifier, Result, Scalar, generate, ingest, report, spki, wycheproof,
};

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    let outcome = match args[1].as_str() {
        "generate-valid" => cmd_generate_valid(&args[2..]),
        "generate-mixed" => cmd_generate_mixed(&args[2..]),
        "normalize" => cmd_normalize(&args[2..]),
        "validate" => cmd_validate(&args[2..]),
        "pem" => cmd_pem(&args[2..]),
        "--help" | "-h" | "help" => {
            print_help();
            return;
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
            process::exit(2);
        }
    };

    if let Err(err) = outcome {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn print_help() {
    println!(
        r#"secp256r1 Vector Toolkit

USAGE:
    vectors-cli <COMMAND>

COMMANDS:
    generate-valid <count> <out.jsonl>
        Generate an all-valid corpus of fresh keypairs and signatures

    generate-mixed <count> <probability> <out.jsonl>
        Generate a corpus where each signature is corrupted with the
        given probability (0.0..=1.0) and labeled accordingly

    normalize <out.jsonl> <suite.json>...
        Normalize conformance suite files to the canonical schema,
        merge and deduplicate them into one corpus file

    validate <report.json> <corpus.jsonl>...
        Check the reference verifier against every vector's expected
        validity and write a mismatch report

    pem <x> <y>
        Print the SPKI PEM for a public key given as hex coordinates

    help
        Show this help message

EXAMPLES:
    vectors-cli generate-valid 2000 test_vectors/vectors_random_valid.jsonl
    vectors-cli normalize test_vectors/vectors_wycheproof.jsonl downloads/*.json
    vectors-cli validate reports/reference_report.json test_vectors/*.jsonl
"#
    );
}

fn cmd_generate_valid(args: &[String]) -> Result<()> {
    let [count, out] = args else {
        usage("generate-valid <count> <out.jsonl>");
    };
    let count = parse_count(count);

    let vectors = generate::generate_valid(count, &mut OsRng)?;
    ingest::write_jsonl(out, &vectors)?;

    println!("Generated {count} valid vectors into {out}");
    Ok(())
}

fn cmd_generate_mixed(args: &[String]) -> Result<()> {
    let [count, probability, out] = args else {
        usage("generate-mixed <count> <probability> <out.jsonl>");
    };
    let count = parse_count(count);
    let probability: f64 = probability
        .parse()
        .unwrap_or_else(|_| usage("generate-mixed: probability must be a number in 0.0..=1.0"));

    let vectors = generate::generate_mixed(count, probability, &mut OsRng)?;
    let invalid = vectors.iter().filter(|vector| !vector.valid).count();
    ingest::write_jsonl(out, &vectors)?;

    println!("Generated {count} vectors ({invalid} invalid) into {out}");
    Ok(())
}

fn cmd_normalize(args: &[String]) -> Result<()> {
    let Some((out, suites)) = args.split_first() else {
        usage("normalize <out.jsonl> <suite.json>...");
    };
    if suites.is_empty() {
        usage("normalize <out.jsonl> <suite.json>...");
    }

    let vectors = wycheproof::merge_suite_files(suites)?;
    ingest::write_jsonl(out, &vectors)?;

    println!(
        "Normalized {} suite file(s) into {} vectors at {out}",
        suites.len(),
        vectors.len()
    );
    Ok(())
}

fn cmd_validate(args: &[String]) -> Result<()> {
    let Some((report_path, corpora)) = args.split_first() else {
        usage("validate <report.json> <corpus.jsonl>...");
    };
    if corpora.is_empty() {
        usage("validate <report.json> <corpus.jsonl>...");
    }

    let vectors = ingest::load_corpus(corpora)?;
    let outcome = report::validate_corpus(&vectors, &P256Verifier);
    report::write_report(report_path, &outcome)?;

    println!("Report written to {report_path}");
    println!("Total number of vectors: {}", outcome.total_vectors);
    println!("Total number of mismatched vectors: {}", outcome.mismatched_count);

    if !outcome.is_clean() {
        process::exit(1);
    }
    Ok(())
}

fn cmd_pem(args: &[String]) -> Result<()> {
    let [x, y] = args else {
        usage("pem <x> <y>");
    };

    let pem = spki::public_key_pem(&Scalar::canonical(x), &Scalar::canonical(y))?;
    println!("{pem}");
    Ok(())
}

fn parse_count(arg: &str) -> usize {
    arg.parse()
        .unwrap_or_else(|_| usage("count must be a non-negative integer"))
}

fn usage(message: &str) -> ! {
    eprintln!("Usage: vectors-cli {message}");
    process::exit(2);
}
