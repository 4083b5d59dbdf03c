//! # Control API HTTP Server
//!
//! HTTP surface exposed to load balancers and the orchestrator.
//!
//! # Endpoints
//!
//! - `/.well-known/status` - Lightweight health probe
//! - `/status` - Peer and database diagnostics
//! - `/stop` - Graceful stop

pub mod config;
pub mod control_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use control_routes::{control_routes, ControlState, StatusDocument};
pub use server::HttpServer;
