//! Shared busy flag spanning in-flight operations.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Busy indicator shared by every asynchronous operation.
///
/// One flag covers all operation kinds; overlapping operations are not
/// counted. Whichever operation finishes first lowers the flag even while
/// another is still pending, so only the final settled state is reliable.
#[derive(Debug, Clone, Default)]
pub struct LoadingGate {
    busy: Arc<AtomicBool>,
}

impl LoadingGate {
    /// Create a gate with the flag lowered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag for the lifetime of the returned guard.
    ///
    /// The guard lowers the flag on drop, so it is released on success,
    /// error, panic, and future cancellation alike.
    #[must_use]
    pub fn begin(&self) -> LoadGuard {
        self.busy.store(true, Ordering::SeqCst);
        LoadGuard {
            busy: Arc::clone(&self.busy),
        }
    }

    /// Run `operation` inside a guard span.
    pub async fn run<F: Future>(&self, operation: F) -> F::Output {
        let _busy = self.begin();
        operation.await
    }

    /// Whether an operation currently holds the flag up.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

/// RAII guard produced by [`LoadingGate::begin`].
#[derive(Debug)]
pub struct LoadGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for LoadGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
