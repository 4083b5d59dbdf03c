//! CLI argument definitions using clap
//!
//! Commands:
//! - sidecarctl probe  [--config <path>] [--url <url>]
//! - sidecarctl status [--config <path>] [--url <url>]
//! - sidecarctl stop   [--config <path>] [--url <url>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Operator client for the database appliance sidecar
#[derive(Parser, Debug)]
#[command(name = "sidecarctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where to find the sidecar
#[derive(Args, Debug, Clone, Default)]
pub struct Target {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sidecar base URL, overrides the configuration file
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query the health probe; exits non-zero when unhealthy
    Probe {
        #[command(flatten)]
        target: Target,
    },

    /// Print peer and database status as JSON
    Status {
        #[command(flatten)]
        target: Target,
    },

    /// Step down from the cluster and deregister from discovery
    Stop {
        #[command(flatten)]
        target: Target,
    },
}

impl Command {
    pub fn target(&self) -> &Target {
        match self {
            Command::Probe { target } | Command::Status { target } | Command::Stop { target } => {
                target
            }
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stop_with_url() {
        let cli = Cli::try_parse_from(["sidecarctl", "stop", "--url", "http://10.0.0.4:5433"])
            .unwrap();
        assert!(matches!(cli.command, Command::Stop { .. }));
        assert_eq!(
            cli.command.target().url.as_deref(),
            Some("http://10.0.0.4:5433")
        );
    }

    #[test]
    fn test_parse_status_with_config() {
        let cli = Cli::try_parse_from(["sidecarctl", "status", "--config", "sidecar.json"]).unwrap();
        assert_eq!(
            cli.command.target().config,
            Some(PathBuf::from("sidecar.json"))
        );
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["sidecarctl", "promote"]).is_err());
    }
}
