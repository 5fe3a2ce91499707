//! Replay a fixture file and check every record still converges.
//!
//! ```text
//! verify_fixture FILE [--bracketed]
//! ```

use std::process::ExitCode;

use dataset::compact::{Compact, Notation};
use dataset::oracle::Transformer;
use dataset::record::Fixture;
use dataset::telemetry;

fn verify(path: &str, notation: Notation) -> dataset::Result<usize> {
    let json = std::fs::read_to_string(path)?;
    let fixture = Fixture::from_json(&json)?;
    fixture.verify(&Compact::new(notation), &Transformer)?;
    return Ok(fixture.test.len());
}

fn main() -> ExitCode {
    telemetry::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(path) = args.iter().find(|a| !a.starts_with("--")) else {
        eprintln!("usage: verify_fixture FILE [--bracketed]");
        return ExitCode::FAILURE;
    };
    let notation = if args.iter().any(|a| a == "--bracketed") {
        Notation::BRACKETED
    } else {
        Notation::COMPACT
    };

    return match verify(path, notation) {
        Ok(count) => {
            tracing::info!(path = %path, records = count, "fixture verified");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(path = %path, "{err}");
            ExitCode::FAILURE
        }
    };
}
