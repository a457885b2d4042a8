//! axum integration for the errata catalog
//!
//! [`FaultRouter`] records the methods of every route it registers so that
//! unmatched requests are answered `404` or `405`, and [`Fault`] turns any
//! raised error into exactly one response. [`Server`] assembles a
//! standalone server from configuration.
#![allow(clippy::must_use_candidate)]

mod endpoints;
mod error_handler;
mod extract;
mod fault;
mod registry;
mod responder;
mod router;

use std::net::SocketAddr;

use axum::Router;
use errata_config::Config;
use http::Method;
use tower_http::trace::TraceLayer;

pub use errata_core::{CatalogError, ErrorKind, HttpError};
pub use error_handler::error_handler;
pub use extract::{Json, Path, Query};
pub use fault::Fault;
pub use registry::{Methods, RouteRegistry};
pub use responder::{Body, respond};
pub use router::{FaultRouter, RouteError};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configured endpoint path cannot be routed
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mut app: FaultRouter = FaultRouter::new();

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, Method::GET, endpoints::health)?;
        }

        if config.server.status.enabled {
            let path = format!("{}/{{kind}}", config.server.status.path.trim_end_matches('/'));
            app = app.route(&path, Method::GET, endpoints::status)?;
        }

        let router = app.into_router().layer(TraceLayer::new_for_http());

        Ok(Self {
            router,
            listen_address,
        })
    }

    /// Get the configured listen address
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
