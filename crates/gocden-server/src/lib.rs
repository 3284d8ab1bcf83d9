//! HTTP server for gocden sites.
//!
//! This crate provides:
//! - [`run_server`]: serves a built output directory over HTTP
//! - [`run_dev`]: builds the site, serves it and rebuilds on source changes
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use gocden_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         port: 7153,
//!         output_dir: PathBuf::from("dist"),
//!         base_path: String::new(),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Routing
//!
//! Every request goes through one catch-all route resolved against the
//! output directory: `/` serves `index.html`, `/guide/` serves
//! `guide/index.html` and `/guide/setup` serves `guide/setup.html`.

mod app;
mod dev;
mod error;
mod static_files;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gocden_config::Config;

pub use dev::run_dev;
pub use error::ServerError;
pub use static_files::resolve_request_path;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Port to listen on, on all interfaces.
    pub port: u16,
    /// Directory served.
    pub output_dir: PathBuf,
    /// URL path prefix stripped from requests. Empty serves from `/`.
    pub base_path: String,
}

impl ServerConfig {
    /// Server configuration for a loaded site config rooted at `cwd`.
    #[must_use]
    pub fn from_config(config: &Config, cwd: &Path) -> Self {
        Self {
            port: config.serve.port,
            output_dir: config.output_dir(cwd),
            base_path: config.base_path(),
        }
    }

    fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Shared state of the request handlers.
#[derive(Debug)]
pub(crate) struct AppState {
    pub output_dir: PathBuf,
    pub base_path: String,
}

/// Serve the output directory until Ctrl-C.
///
/// In-flight requests are not drained on shutdown.
///
/// # Errors
///
/// Returns `ServerError::Bind` if the port cannot be bound and
/// `ServerError::Serve` if the server fails while running.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let state = Arc::new(AppState {
        output_dir: config.output_dir,
        base_path: config.base_path,
    });
    let app = app::create_router(state);

    tracing::info!(address = %addr, "Starting server");

    tokio::select! {
        result = axum::serve(listener, app).into_future() => result.map_err(ServerError::Serve),
        () = shutdown_signal() => Ok(()),
    }
}

/// Wait for Ctrl-C.
///
/// Waits forever if the handler can't be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_server_config_from_config() {
        let cwd = Path::new("/projects/handbook");
        let mut config = Config::default_for(cwd);
        config.url = "https://example.com/handbook/".to_owned();
        config.serve.port = 9000;

        let server = ServerConfig::from_config(&config, cwd);

        assert_eq!(server.port, 9000);
        assert_eq!(server.output_dir, PathBuf::from("/projects/handbook/dist"));
        assert_eq!(server.base_path, "/handbook");
        assert_eq!(server.addr().to_string(), "0.0.0.0:9000");
    }
}
