//! HTTP Server Configuration
//!
//! Where the control API listens, and how a local client reaches it.

use std::net::{AddrParseError, IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Address to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5433)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5433
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` as configured
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed listen address. `host` must be an IP literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Base URL for a client on the same machine. A wildcard listener is
    /// reached through loopback.
    pub fn local_url(&self) -> String {
        let host = match self.host.parse::<IpAddr>() {
            Ok(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST).to_string(),
            Ok(IpAddr::V6(ip)) => format!("[{}]", ip),
            Ok(ip) => ip.to_string(),
            Err(_) if self.host.is_empty() => Ipv4Addr::LOCALHOST.to_string(),
            Err(_) => self.host.clone(),
        };
        format!("http://{}:{}", host, self.port)
    }
}
