//! Binary entrypoint for the `spec-checker` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A `.env` file may carry SPEC_CHECKER_* overrides.
    let _ = dotenvy::dotenv();
    match spec_checker::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
