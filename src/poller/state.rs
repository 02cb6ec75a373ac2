//! Per-query refresh state and the commit rules applied to it.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Latest view of one polled query.
///
/// Owned by a single [`StatusPoller`](super::StatusPoller); only its refresh
/// cycles mutate it.
#[derive(Debug)]
pub struct RefreshState<T> {
    /// Last successfully fetched payload.
    pub last_result: Option<Arc<T>>,
    /// Last reportable failure, cleared by the next success.
    pub last_error: Option<Error>,
    /// Cancellation handle of the outstanding fetch, if any.
    pub in_flight: Option<CancellationToken>,
    /// Whether the latest cycle is still waiting on its fetch.
    pub is_loading: bool,
    /// When `last_result` was committed.
    pub updated_at: Option<Instant>,
    /// Stamp of the most recently started cycle.
    latest_cycle: u64,
}

impl<T> Default for RefreshState<T> {
    fn default() -> Self {
        Self {
            last_result: None,
            last_error: None,
            in_flight: None,
            is_loading: false,
            updated_at: None,
            latest_cycle: 0,
        }
    }
}

/// One refresh cycle: its start-order stamp and the signal it was given.
#[derive(Debug)]
pub(crate) struct Cycle {
    pub(crate) stamp: u64,
    pub(crate) signal: CancellationToken,
    pub(crate) query: Arc<str>,
}

impl Cycle {
    /// A cycle may commit only if nothing has superseded or torn it down.
    fn is_current<T>(&self, state: &RefreshState<T>) -> bool {
        !self.signal.is_cancelled() && state.latest_cycle == self.stamp
    }
}

/// Refresh state shared between the poller and its in-flight cycles.
#[derive(Debug)]
pub(crate) struct Shared<T> {
    state: Mutex<RefreshState<T>>,
}

impl<T> Shared<T> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(RefreshState::default()),
        }
    }

    /// Start a new cycle, cancelling the outstanding one without waiting.
    pub(crate) fn begin_cycle(&self, root: &CancellationToken, query: &Arc<str>) -> Cycle {
        let mut state = self.state.lock();

        if let Some(previous) = state.in_flight.take() {
            debug!(query = %query, cycle = state.latest_cycle, "Superseding outstanding fetch");
            previous.cancel();
        }

        state.latest_cycle += 1;
        let signal = root.child_token();
        state.in_flight = Some(signal.clone());
        state.is_loading = true;

        debug!(query = %query, cycle = state.latest_cycle, "Refresh cycle started");

        Cycle {
            stamp: state.latest_cycle,
            signal,
            query: Arc::clone(query),
        }
    }

    /// Apply a cycle's outcome, unless the cycle has been superseded.
    pub(crate) fn settle(&self, cycle: &Cycle, outcome: Result<T>) {
        let mut state = self.state.lock();

        if !cycle.is_current(&state) {
            debug!(
                query = %cycle.query,
                cycle = cycle.stamp,
                latest = state.latest_cycle,
                "Discarding superseded fetch result"
            );
            return;
        }

        match outcome {
            Ok(payload) => {
                debug!(query = %cycle.query, cycle = cycle.stamp, "Refresh committed");
                state.last_result = Some(Arc::new(payload));
                state.last_error = None;
                state.updated_at = Some(Instant::now());
            }
            Err(err) if err.is_reportable() => {
                warn!(query = %cycle.query, cycle = cycle.stamp, error = %err, "Refresh failed");
                state.last_error = Some(err);
            }
            Err(err) if err.is_cancelled() => {
                debug!(query = %cycle.query, cycle = cycle.stamp, "Fetch cancelled");
            }
            Err(err) => {
                debug!(query = %cycle.query, cycle = cycle.stamp, error = %err, "Fetch ended without a result");
            }
        }

        state.in_flight = None;
        state.is_loading = false;
    }

    /// Cancel whatever is outstanding and clear the loading flag.
    pub(crate) fn teardown(&self) {
        let mut state = self.state.lock();
        if let Some(in_flight) = state.in_flight.take() {
            in_flight.cancel();
        }
        state.is_loading = false;
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&RefreshState<T>) -> R) -> R {
        f(&self.state.lock())
    }
}
