//! Stop conditions: the wall-clock deadline plus an optional external cancel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared early-stop flag, e.g. tripped when a client disconnects.
///
/// Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Why a running search was told to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCause {
    Cancelled,
    DeadlineReached,
}

/// Everything the engine polls at each node expansion.
#[derive(Debug, Clone)]
pub struct StopSignal {
    deadline: Instant,
    cancel: Option<CancelToken>,
}

impl StopSignal {
    #[must_use]
    pub fn at(deadline: Instant) -> Self {
        Self {
            deadline,
            cancel: None,
        }
    }

    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self::at(Instant::now() + budget)
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Cancellation wins over the deadline when both hold.
    #[must_use]
    pub fn poll(&self) -> Option<StopCause> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Some(StopCause::Cancelled);
        }
        if Instant::now() >= self.deadline {
            return Some(StopCause::DeadlineReached);
        }
        None
    }
}
