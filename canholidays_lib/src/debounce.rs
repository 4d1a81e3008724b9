//! Trailing-edge debouncer for rapidly changing input.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Holds the latest pushed value until it has been left alone for `delay`.
///
/// [`push`](Self::push) replaces the pending value and restarts the quiet
/// period. [`settled`](Self::settled) resolves with the value once the period
/// elapses. The pending value is only taken when the timer has fired, so
/// dropping a `settled()` future (e.g. a losing `tokio::select!` branch) is
/// cancel-safe, and dropping the debouncer discards whatever was pending.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet period.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// Drops the pending value without emitting it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Waits for the pending value to settle and returns it.
    ///
    /// Never resolves while nothing is pending.
    pub async fn settled(&mut self) -> T {
        let deadline = match &self.pending {
            Some((_, deadline)) => *deadline,
            None => std::future::pending().await,
        };
        sleep_until(deadline).await;
        // `&mut self` is held across the sleep, so nothing can have replaced it.
        match self.pending.take() {
            Some((value, _)) => value,
            None => std::future::pending().await,
        }
    }
}
