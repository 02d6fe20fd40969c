//! athkar - data-migration utilities for the athkar corpus

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = athkar_tools::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
