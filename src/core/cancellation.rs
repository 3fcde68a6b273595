use super::KernelError;
use anyhow::Result;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A cooperative cancellation signal shared between a search and its caller.
///
/// Clones share the same flag, so a caller may keep one clone and hand the other to a search running on a worker thread.
/// Searches poll the flag once per step; there is no built-in timeout.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Builds a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the cancellation of every search observing this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` iff [`cancel`](Self::cancel) was called on this token or one of its clones.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Returns a [`KernelError::Cancelled`] error if the token is cancelled.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(KernelError::Cancelled.into())
        } else {
            Ok(())
        }
    }
}
