//! Health Verdict and Status Protocol
//!
//! The lightweight probe speaks a small shared protocol understood by load
//! balancers and orchestrators:
//!
//! - Healthy:   `200 {"data":{"status":"healthy"}}`
//! - Unhealthy: `500 {"data":{"status":"unhealthy"}}`

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Well-known path of the lightweight probe
pub const STATUS_PATH: &str = "/.well-known/status";

/// Binary health verdict. Derived on every probe, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthVerdict {
    Healthy,
    Unhealthy,
}

impl HealthVerdict {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// HTTP status code carried by the probe response
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Healthy => StatusCode::OK,
            Self::Unhealthy => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
        }
    }
}

impl std::fmt::Display for HealthVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probe response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBody {
    pub data: StatusData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusData {
    pub status: HealthVerdict,
}

impl From<HealthVerdict> for StatusBody {
    fn from(status: HealthVerdict) -> Self {
        Self {
            data: StatusData { status },
        }
    }
}
