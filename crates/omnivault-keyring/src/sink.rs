//! Side channel for index maintenance failures
//!
//! Index failures never fail the enclosing get/set/delete. They are handed
//! to an [`IndexErrorSink`] instead:
//! - `NoOpSink`: drops reports (the default)
//! - `TracingSink`: emits a `tracing` warning
//! - any `Fn(IndexOp, &IndexError) + Send + Sync` closure

use std::sync::Arc;

use tracing::warn;

use crate::index::{IndexError, IndexOp};

/// Receiver for index maintenance failures
pub trait IndexErrorSink: Send + Sync {
    /// Called once per failed index operation
    fn report(&self, op: IndexOp, err: &IndexError);
}

/// Type alias for an Arc-wrapped sink
pub type SharedSink = Arc<dyn IndexErrorSink>;

impl<F> IndexErrorSink for F
where
    F: Fn(IndexOp, &IndexError) + Send + Sync,
{
    fn report(&self, op: IndexOp, err: &IndexError) {
        self(op, err)
    }
}

/// A sink that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl IndexErrorSink for NoOpSink {
    fn report(&self, _op: IndexOp, _err: &IndexError) {}
}

/// A sink that logs every report as a warning
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    service: Option<String>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the service identity in every log line
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
        }
    }
}

impl IndexErrorSink for TracingSink {
    fn report(&self, op: IndexOp, err: &IndexError) {
        warn!(
            service = self.service.as_deref().unwrap_or(""),
            op = op.as_str(),
            error = %err,
            "keyring index operation failed; list results may be incomplete"
        );
    }
}
