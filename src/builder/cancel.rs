//! Stop signal for a network build
//!
//! Clones share one flag. The builder polls it before each character and
//! again after pacing, so a stop requested during a long pause is honored
//! before the next fetch goes out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag, cheap to clone into a signal handler or another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once any clone has called [`cancel`](Self::cancel)
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Request a stop. Idempotent; there is no way to reset a token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}
