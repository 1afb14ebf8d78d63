//! Command-line interface for running the Spiky points server.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod serve;

pub use error::CliError;

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_LISTEN: &str = "listen";
pub(crate) const ENV_DATABASE: &str = "SPIKY_CMDS_SERVE_DATABASE";

/// Run the Spiky CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// database cannot be opened, or the server fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Serve(args) => serve::run_serve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "spiky",
    about = "Serve city popularity points for the Spiky globe",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve `GET /api/points` from a SQLite city database.
    Serve(serve::ServeArgs),
}

#[cfg(test)]
mod tests;
