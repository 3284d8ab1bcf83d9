//! Server error types.

use std::net::SocketAddr;

/// Error starting or running the server or dev watcher.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("could not listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
    /// The source directory could not be watched.
    #[error("could not watch the source directory: {0}")]
    Watch(#[from] notify::Error),
    /// The initial build of dev mode failed.
    #[error(transparent)]
    Build(#[from] gocden_site::BuildError),
}
