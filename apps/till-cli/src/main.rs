//! # Till Entry Point
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    match till_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "till stopped");
            eprintln!("till: {err}");
            ExitCode::FAILURE
        }
    }
}
