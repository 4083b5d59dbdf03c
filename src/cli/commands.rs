//! CLI command implementations
//!
//! Commands are thin clients: they read the sidecar's state or ask it to
//! stop, and never decide anything locally.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::SidecarClient;
use crate::health::HealthVerdict;
use crate::http_server::HttpServerConfig;
use crate::logging::{init_logging, LoggingConfig};

use super::args::{Command, Target};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Control API listener
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Base URL of the sidecar (default: the `http` listener, via loopback
    /// when it binds a wildcard address)
    #[serde(default)]
    pub sidecar_url: Option<String>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if let Some(url) = &self.sidecar_url {
            validate_url(url)?;
        }

        if self.logging.level.trim().is_empty() {
            return Err(CliError::config_error("logging.level must not be empty"));
        }

        Ok(())
    }

    /// Resolve the sidecar URL: explicit override, then config, then the
    /// local listener.
    pub fn sidecar_url(&self, override_url: Option<&str>) -> CliResult<String> {
        match override_url.or(self.sidecar_url.as_deref()) {
            Some(url) => {
                validate_url(url)?;
                Ok(url.to_string())
            }
            None => Ok(self.http.local_url()),
        }
    }
}

fn validate_url(url: &str) -> CliResult<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(CliError::config_error(format!(
            "Invalid sidecar URL: '{}'. Must start with http:// or https://",
            url
        )))
    }
}

fn load_config(target: &Target) -> CliResult<Config> {
    match &target.config {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Run a parsed command to completion.
pub fn run_command(command: Command) -> CliResult<()> {
    let config = load_config(command.target())?;
    init_logging(&config.logging)
        .map_err(|e| CliError::config_error(format!("Invalid logging.level: {}", e)))?;

    let url = config.sidecar_url(command.target().url.as_deref())?;
    debug!(%url, "using sidecar");
    let client = SidecarClient::new(url);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        match command {
            Command::Probe { .. } => probe(&client).await,
            Command::Status { .. } => status(&client).await,
            Command::Stop { .. } => stop(&client).await,
        }
    })
}

/// Print the verdict; unhealthy is reported as an error.
pub async fn probe(client: &SidecarClient) -> CliResult<()> {
    let verdict = client.probe().await?;
    println!("{}", verdict);
    match verdict {
        HealthVerdict::Healthy => Ok(()),
        HealthVerdict::Unhealthy => Err(CliError::unhealthy()),
    }
}

/// Print the status document as pretty JSON.
pub async fn status(client: &SidecarClient) -> CliResult<()> {
    let document = client.status().await?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

/// Request a graceful stop.
pub async fn stop(client: &SidecarClient) -> CliResult<()> {
    client.stop().await?;
    println!("stopped");
    Ok(())
}
