//! Trailing-edge debouncing for search input.
//!
//! Time is passed in explicitly as a [`Duration`] since an arbitrary origin
//! (`performance.now()` in the browser, a test clock elsewhere). The
//! debouncer owns no timer; the host schedules a wake-up at
//! [`Debouncer::deadline`] and calls [`Debouncer::poll`].

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Duration,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new value, replacing any pending one and restarting the
    /// quiet period from `now`.
    pub fn push(&mut self, value: T, now: Duration) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the latest value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Take the pending value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
