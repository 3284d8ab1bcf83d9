//! Logging setup.
//!
//! Every run logs to a `gocden-*.log` file in the system temp directory.
//! `--verbose` adds a stderr layer. `RUST_LOG` overrides the default `info`
//! level.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Handle to the process-wide logging setup.
pub(crate) struct Logging {
    log_path: Option<PathBuf>,
}

impl Logging {
    /// Install the global subscriber.
    ///
    /// Logging to the file is skipped if it can't be created.
    pub(crate) fn init(verbose: bool) -> Self {
        let (file, log_path) = match create_log_file() {
            Ok((file, path)) => (Some(file), Some(path)),
            Err(_) => (None, None),
        };

        let file_layer = file.map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
        });
        let stderr_layer = verbose.then(|| fmt::layer().with_writer(std::io::stderr));
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(stderr_layer)
            .init();

        if let Some(path) = &log_path {
            tracing::debug!(path = %path.display(), "Logging to file");
        }

        Self { log_path }
    }

    /// Path of the log file, if one was created.
    pub(crate) fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }
}

/// Create a persistent log file in the temp directory.
fn create_log_file() -> std::io::Result<(File, PathBuf)> {
    tempfile::Builder::new()
        .prefix("gocden-")
        .suffix(".log")
        .tempfile()?
        .keep()
        .map_err(|e| e.error)
}
