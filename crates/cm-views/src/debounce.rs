//! Trailing-edge debouncer
//!
//! Every [`Debouncer::push`] replaces the pending item and restarts the quiet
//! window. [`Debouncer::settled`] resolves with the last item once the window
//! elapses without another push. Items superseded inside the window are
//! dropped, never queued.

use std::future;
use std::time::Duration;

use tokio::time::{Instant, sleep_until};

#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_window(&self) -> Duration {
        self.quiet
    }

    /// Record an event, discarding any pending one and restarting the window
    pub fn push(&mut self, item: T) {
        self.pending = Some((item, Instant::now() + self.quiet));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending event, if any
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(item, _)| item)
    }

    /// Wait for the pending event to settle
    ///
    /// Never resolves while nothing is pending. Cancel safe: dropping the
    /// future before it completes leaves the pending event in place.
    pub async fn settled(&mut self) -> T {
        let Some(deadline) = self.pending.as_ref().map(|(_, deadline)| *deadline) else {
            return future::pending().await;
        };

        sleep_until(deadline).await;

        match self.pending.take() {
            Some((item, _)) => item,
            None => future::pending().await,
        }
    }
}
