//! # HTTP Server
//!
//! Serves the control routes and runs exit hooks once the listener has
//! drained.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::HttpServerConfig;
use super::control_routes::{control_routes, ControlState};
use crate::shutdown::{HookError, ShutdownHooks};

/// HTTP server for the sidecar control API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
    hooks: Arc<ShutdownHooks>,
}

impl HttpServer {
    /// Create a server with default configuration
    pub fn new(state: Arc<ControlState>) -> Self {
        Self::with_config(state, HttpServerConfig::default())
    }

    /// Create a server with custom configuration
    pub fn with_config(state: Arc<ControlState>, config: HttpServerConfig) -> Self {
        let hooks = Arc::new(ShutdownHooks::new());

        // Leave the cluster and discovery before the process goes away.
        let stopper = state.stopper();
        hooks.before_exit("stop", move || async move {
            stopper.stop().await?;
            Ok::<(), HookError>(())
        });

        let router = Self::build_router(state);
        Self {
            config,
            router,
            hooks,
        }
    }

    fn build_router(state: Arc<ControlState>) -> Router {
        control_routes(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Configured listen address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Exit hooks run after the listener stops. Hooks registered here run
    /// before the built-in stop.
    pub fn hooks(&self) -> Arc<ShutdownHooks> {
        self.hooks.clone()
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.bind_addr().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an existing listener until `signal` resolves, then run the
    /// exit hooks.
    pub async fn serve<S>(self, listener: TcpListener, signal: S) -> Result<(), std::io::Error>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        info!(addr = %listener.local_addr()?, "control API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        info!("control API stopped, running exit hooks");
        self.hooks.run().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
}
