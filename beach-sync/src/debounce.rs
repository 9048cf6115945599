//! Deferred work with at most one pending run.

use log::trace;

/// Timer backend. The web build uses `setTimeout`; tests drive a manual clock.
pub trait Scheduler {
    /// Cancels the task when passed back to [`Scheduler::cancel`].
    type Token;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Token;

    /// Cancel a pending task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, token: Self::Token);
}

/// Holds the single pending timer token for a piece of debounced work.
///
/// Scheduling cancels the stored token before storing the new one, so within
/// a quiet window only the most recent request can fire.
///
/// A token whose task is running is parked in `spent` rather than dropped:
/// some backends own the callback through the token, and it must outlive the
/// call. It is released on the next schedule, cancel or drop.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: Option<S::Token>,
    spent: Option<S::Token>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: None,
            spent: None,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Replace any pending task with `task`.
    pub fn schedule(&mut self, task: impl FnOnce() + 'static) {
        self.spent = None;
        if let Some(token) = self.pending.take() {
            trace!("Superseding pending debounced task");
            self.scheduler.cancel(token);
        }
        self.pending = Some(self.scheduler.schedule(self.delay_ms, Box::new(task)));
    }

    /// Drop the pending task, if any, without running it.
    pub fn cancel(&mut self) {
        self.spent = None;
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }

    /// Call from inside the fired task: it is no longer pending.
    pub fn mark_fired(&mut self) {
        self.spent = self.pending.take();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<S: Scheduler> Drop for Debouncer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
