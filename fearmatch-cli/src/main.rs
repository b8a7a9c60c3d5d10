//! Entry point for the `fearmatch` command-line interface.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use fearmatch_cli::CliError;

#[expect(clippy::print_stderr, reason = "top-level error reporting")]
fn main() -> ExitCode {
    match fearmatch_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::ArgumentParsing(err)) => {
            if err.print().is_err() {
                return ExitCode::FAILURE;
            }
            u8::try_from(err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
        }
        Err(err) => {
            eprintln!("fearmatch: {err}");
            ExitCode::FAILURE
        }
    }
}
