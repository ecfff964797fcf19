//! Operation context carrying cancellation and deadline state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cancellable context passed to every vault operation
///
/// Clones share the same cancellation flag. The native credential stores
/// are synchronous and may block on an unlock prompt, so providers accept a
/// context without being able to interrupt a call already in flight.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl Context {
    /// A context that is never cancelled unless [`Context::cancel`] is called
    pub fn background() -> Self {
        Self {
            inner: Arc::new(ContextInner {
                cancelled: AtomicBool::new(false),
                deadline: None,
            }),
        }
    }

    /// A context that expires after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                cancelled: AtomicBool::new(false),
                deadline: Instant::now().checked_add(timeout),
            }),
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// The deadline, if one was set
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Cancelled, or past its deadline
    pub fn is_done(&self) -> bool {
        self.is_cancelled()
            || self
                .inner
                .deadline
                .map(|deadline| Instant::now() >= deadline)
                .unwrap_or(false)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("is_cancelled", &self.is_cancelled())
            .field("deadline", &self.inner.deadline)
            .finish()
    }
}
