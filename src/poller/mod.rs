//! Periodic status polling with strict non-overlap.
//!
//! A [`StatusPoller`] keeps one named query fresh by invoking a caller-supplied
//! async fetch function on a fixed interval. Each invocation is a *refresh
//! cycle*:
//!
//! ```text
//!   cycle N      begin ──── fetch ─────────────────── settle (discarded)
//!                              ▲ cancel
//!   cycle N+1                begin ──── fetch ──── settle (committed)
//! ```
//!
//! Starting a cycle cancels the outstanding one without waiting for it.
//! Cancellation is cooperative: the fetch may observe its
//! [`CancellationToken`] and bail out early, but even if it runs to completion
//! its result is dropped. Every commit checks both the cycle's token and its
//! start-order stamp, so results are applied in start order regardless of
//! completion order.
//!
//! Dropping the poller stops it: the timer task is aborted and every
//! outstanding cycle is cancelled.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use statuswatch::{Error, StatusPoller};
//!
//! # tokio_test::block_on(async {
//! let mut poller = StatusPoller::new();
//! poller
//!     .start("greeting", Duration::from_secs(60), |_signal| async {
//!         Ok::<_, Error>("hello".to_string())
//!     })
//!     .unwrap();
//!
//! let snapshot = poller.snapshot();
//! assert!(snapshot.loading);
//! poller.stop();
//! # });
//! ```

mod state;

pub use state::RefreshState;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::{Error, Result};
use state::Shared;

/// Default refresh interval for every query.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Shortest interval the timer will run at.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T>> + Send>>;
type FetchFn<T> = Arc<dyn Fn(CancellationToken) -> FetchFuture<T> + Send + Sync>;

/// What the presentation layer reads: `{ data, loading, error }`.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub data: Option<Arc<T>>,
    pub loading: bool,
    pub error: Option<Error>,
    pub updated_at: Option<Instant>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            loading: self.loading,
            error: self.error.clone(),
            updated_at: self.updated_at,
        }
    }
}

struct Running<T> {
    query: Arc<str>,
    root: CancellationToken,
    fetch: FetchFn<T>,
    timer: JoinHandle<()>,
}

/// Keeps one query's [`RefreshState`] current.
///
/// Must be started from within a tokio runtime.
pub struct StatusPoller<T> {
    shared: Arc<Shared<T>>,
    running: Option<Running<T>>,
}

impl<T> Default for StatusPoller<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StatusPoller<T> {
    /// Create a stopped poller with empty state.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared::new()),
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Name of the running query.
    pub fn query(&self) -> Option<&str> {
        self.running.as_ref().map(|r| &*r.query)
    }

    /// Copy out the current state for rendering.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.shared.read(|state| Snapshot {
            data: state.last_result.clone(),
            loading: state.is_loading,
            error: state.last_error.clone(),
            updated_at: state.updated_at,
        })
    }

    /// Whether a fetch is currently outstanding.
    pub fn has_in_flight(&self) -> bool {
        self.shared.read(|state| state.in_flight.is_some())
    }

    /// Cancel any outstanding fetch and halt the timer. Idempotent.
    pub fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        running.root.cancel();
        running.timer.abort();
        self.shared.teardown();

        info!(query = %running.query, "Poller stopped");
    }
}

impl<T: Send + Sync + 'static> StatusPoller<T> {
    /// Run one refresh cycle now, then one every `interval` until stopped.
    ///
    /// Fails with [`Error::AlreadyStarted`] if the poller is running.
    pub fn start<F, Fut>(&mut self, query: impl Into<String>, interval: Duration, fetch: F) -> Result<()>
    where
        F: Fn(CancellationToken) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let query: Arc<str> = Arc::from(query.into());

        if let Some(running) = &self.running {
            return Err(Error::AlreadyStarted(running.query.to_string()));
        }

        let fetch: FetchFn<T> = Arc::new(move |signal| Box::pin(fetch(signal)) as FetchFuture<T>);
        let root = CancellationToken::new();
        let interval = interval.max(MIN_INTERVAL);

        info!(query = %query, interval_ms = interval.as_millis() as u64, "Poller started");

        spawn_cycle(&self.shared, &fetch, &root, &query);

        let timer = tokio::spawn(run_timer(
            Arc::clone(&self.shared),
            Arc::clone(&fetch),
            root.clone(),
            Arc::clone(&query),
            interval,
        ));

        self.running = Some(Running {
            query,
            root,
            fetch,
            timer,
        });
        Ok(())
    }

    /// Run an extra cycle immediately, superseding any outstanding one.
    ///
    /// Does nothing when the poller is stopped.
    pub fn refresh_now(&self) {
        match &self.running {
            Some(running) => {
                debug!(query = %running.query, "Manual refresh");
                spawn_cycle(&self.shared, &running.fetch, &running.root, &running.query);
            }
            None => debug!("Manual refresh ignored, poller is stopped"),
        }
    }
}

impl<T> Drop for StatusPoller<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Begin a cycle synchronously and drive its fetch on a separate task.
fn spawn_cycle<T: Send + Sync + 'static>(
    shared: &Arc<Shared<T>>,
    fetch: &FetchFn<T>,
    root: &CancellationToken,
    query: &Arc<str>,
) {
    let cycle = shared.begin_cycle(root, query);
    let pending = fetch(cycle.signal.clone());
    let shared = Arc::clone(shared);

    tokio::spawn(async move {
        let outcome = pending.await;
        shared.settle(&cycle, outcome);
    });
}

async fn run_timer<T: Send + Sync + 'static>(
    shared: Arc<Shared<T>>,
    fetch: FetchFn<T>,
    root: CancellationToken,
    query: Arc<str>,
    interval: Duration,
) {
    // The first cycle already ran in `start`.
    let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = root.cancelled() => break,
            _ = ticker.tick() => spawn_cycle(&shared, &fetch, &root, &query),
        }
    }
}
