//! Generate a fixture file.
//!
//! ```text
//! dataset [splices | splicemoves | moves | CONFIG.json]
//! ```
//!
//! The fixture is printed to stdout once every pair has converged. Any
//! failure is logged and exits non-zero without printing a fixture.

use std::process::ExitCode;

use dataset::config::GeneratorConfig;
use dataset::record::Fixture;
use dataset::telemetry;

fn run(arg: &str) -> dataset::Result<()> {
    let config = match GeneratorConfig::preset(arg) {
        Some(config) => config,
        None => GeneratorConfig::load(arg)?,
    };
    let records = config.generator()?.run(config.kind)?;
    Fixture::new(records).write_to(std::io::stdout().lock())?;
    return Ok(());
}

fn main() -> ExitCode {
    telemetry::init();
    let arg = std::env::args().nth(1).unwrap_or_else(|| "splices".to_string());
    return match run(&arg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    };
}
