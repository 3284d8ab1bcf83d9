//! Rebuild debouncing.
//!
//! Editors emit several filesystem events per save. Every change merges into
//! a pending [`RebuildPlan`] and re-arms a timer; the plan runs once the
//! source tree has been quiet for the debounce period.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// A classified source change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Change {
    /// A markdown file's content changed.
    Page(PathBuf),
    /// A static file's content changed.
    Asset(PathBuf),
    /// Files were added, removed or renamed.
    Structure,
}

/// Work to run once the debounce period elapses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RebuildPlan {
    /// Re-render these pages and recopy these assets.
    Files {
        pages: BTreeSet<PathBuf>,
        assets: BTreeSet<PathBuf>,
    },
    /// Rebuild the whole site.
    Full,
}

impl From<Change> for RebuildPlan {
    fn from(change: Change) -> Self {
        let mut plan = Self::Files {
            pages: BTreeSet::new(),
            assets: BTreeSet::new(),
        };
        plan.merge(change);
        plan
    }
}

impl RebuildPlan {
    /// Fold a change into the plan. `Full` absorbs everything.
    pub(crate) fn merge(&mut self, change: Change) {
        let Self::Files { pages, assets } = self else {
            return;
        };
        match change {
            Change::Page(path) => {
                pages.insert(path);
            }
            Change::Asset(path) => {
                assets.insert(path);
            }
            Change::Structure => *self = Self::Full,
        }
    }
}

type Runner = Arc<dyn Fn(RebuildPlan) + Send + Sync>;

#[derive(Default)]
struct Pending {
    plan: Option<RebuildPlan>,
    timer: Option<JoinHandle<()>>,
    /// Bumped on every push. Only the timer armed last may take the plan.
    generation: u64,
}

impl Pending {
    /// Take the plan if `generation` belongs to the timer armed last.
    fn take_if_current(&mut self, generation: u64) -> Option<RebuildPlan> {
        if generation != self.generation {
            return None;
        }
        self.timer = None;
        self.plan.take()
    }
}

/// Timer-reset debouncer.
///
/// Must be used from within a tokio runtime. The runner executes on the
/// blocking thread pool.
pub(crate) struct Debouncer {
    quiet: Duration,
    pending: Arc<Mutex<Pending>>,
    runner: Runner,
}

impl Debouncer {
    pub(crate) fn new<F>(quiet: Duration, runner: F) -> Self
    where
        F: Fn(RebuildPlan) + Send + Sync + 'static,
    {
        Self {
            quiet,
            pending: Arc::new(Mutex::new(Pending::default())),
            runner: Arc::new(runner),
        }
    }

    /// Record a change, cancelling the armed timer and arming a new one.
    pub(crate) fn push(&self, change: Change) {
        let mut pending = lock(&self.pending);

        match pending.plan.as_mut() {
            Some(plan) => plan.merge(change),
            None => pending.plan = Some(change.into()),
        }

        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        pending.generation = pending.generation.wrapping_add(1);
        let generation = pending.generation;

        let shared = Arc::clone(&self.pending);
        let runner = Arc::clone(&self.runner);
        let quiet = self.quiet;
        pending.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;

            let plan = lock(&shared).take_if_current(generation);
            let Some(plan) = plan else {
                return;
            };

            tracing::debug!(?plan, "Running rebuild");
            if let Err(e) = tokio::task::spawn_blocking(move || runner(plan)).await {
                tracing::error!(error = %e, "Rebuild task failed");
            }
        }));
    }
}

fn lock(pending: &Mutex<Pending>) -> MutexGuard<'_, Pending> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}
