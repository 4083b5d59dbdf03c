//! CLI module for the sidecar
//!
//! Provides an operator command-line interface for:
//! - probe: query the health verdict
//! - status: print peer and database diagnostics
//! - stop: request a graceful stop

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, Target};
pub use commands::{probe, run_command, status, stop, Config};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
