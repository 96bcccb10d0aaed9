//! Reports functions defined more than once at module level.
//!
//! Usage: `find_duplicate_functions [TARGET] [-p GLOB] [-o FILE] [-r]`

use std::process::ExitCode;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    match spec_checker::run_duplicates(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
