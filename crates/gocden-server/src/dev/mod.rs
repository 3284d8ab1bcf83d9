//! Dev mode: build, serve and rebuild on source changes.

mod debouncer;
mod watcher;

use std::sync::Arc;
use std::time::Duration;

use gocden_site::{RebuildOutcome, Site};
use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use self::debouncer::{Debouncer, RebuildPlan};
use crate::{ServerConfig, ServerError, run_server};

/// Quiet period before a burst of changes is rebuilt.
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Capacity of the watcher event channel.
const EVENT_BUFFER: usize = 256;

/// Build the site, serve it and rebuild on source changes until Ctrl-C.
///
/// Per-file build failures are logged and dev mode keeps running.
///
/// # Errors
///
/// Returns an error if the initial build aborts, the source directory can't
/// be watched or the server fails to start.
pub async fn run_dev(site: Arc<Site>, config: ServerConfig) -> Result<(), ServerError> {
    site.build().map(|report| log_report(&report))?;

    let (tx, mut rx) = mpsc::channel::<Event>(EVENT_BUFFER);
    let mut fs_watcher =
        notify::recommended_watcher(move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                let _ = tx.blocking_send(event);
            }
            Err(e) => tracing::warn!(error = %e, "Watch error"),
        })?;

    let source_dir = site.config().source_dir.clone();
    fs_watcher.watch(&source_dir, RecursiveMode::Recursive)?;
    tracing::info!(path = %source_dir.display(), "Watching for changes");

    let output_dir = site.config().output_dir.clone();
    let rebuild_site = Arc::clone(&site);
    let debouncer = Debouncer::new(DEBOUNCE, move |plan| execute(&rebuild_site, plan));

    let events = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            for change in watcher::classify(&event, &output_dir) {
                tracing::debug!(?change, "Source changed");
                debouncer.push(change);
            }
        }
    });

    let result = run_server(config).await;

    events.abort();
    drop(fs_watcher);
    result
}

/// Run a debounced rebuild plan.
fn execute(site: &Site, plan: RebuildPlan) {
    let RebuildPlan::Files { pages, assets } = plan else {
        full_build(site);
        return;
    };

    for asset in &assets {
        match site.copy_asset(asset) {
            Ok(dest) => tracing::info!(dest = %dest.display(), "Copied asset"),
            Err(e) => tracing::warn!(error = %e, "Asset copy failed"),
        }
    }

    for page in &pages {
        match site.rebuild_file(page) {
            Ok(RebuildOutcome::Rebuilt(_)) => {}
            Ok(RebuildOutcome::NeedsFullBuild) => {
                full_build(site);
                return;
            }
            Err(e) => tracing::warn!(error = %e, "Page rebuild failed"),
        }
    }
}

fn full_build(site: &Site) {
    match site.build() {
        Ok(report) => log_report(&report),
        Err(e) => tracing::error!(error = %e, "Build failed"),
    }
}

fn log_report(report: &gocden_site::BuildReport) {
    for error in &report.errors {
        tracing::warn!(error = %error, "File failed to build");
    }
    tracing::info!(
        pages = report.pages,
        failed = report.errors.len(),
        "Site rebuilt"
    );
}
