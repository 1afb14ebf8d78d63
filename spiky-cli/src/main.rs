//! Entry point for the `spiky` binary.
#![forbid(unsafe_code)]

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match spiky_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(spiky_cli::CliError::ArgumentParsing(err)) => {
            // Clap renders help and version output through this path too.
            let _ = err.print();
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2))
        }
        Err(err) => {
            eprintln!("spiky: {err}");
            ExitCode::FAILURE
        }
    }
}
