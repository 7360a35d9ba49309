//! Pacing strategies for successive remote fetches

use std::time::Duration;

/// Default spacing between characters when reading a live wiki
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Spaces successive fetches to respect a source's usage policy.
///
/// `pause` is called between two fetches, never before the first.
pub trait Pacer {
    fn pause(&self);
}

/// Sleep for a fixed duration between fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        Self(DEFAULT_DELAY)
    }
}

impl Pacer for FixedDelay {
    fn pause(&self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

/// No spacing; for offline or cached sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&self) {}
}

impl<P: Pacer + ?Sized> Pacer for &P {
    fn pause(&self) {
        (**self).pause()
    }
}

impl<P: Pacer + ?Sized> Pacer for Box<P> {
    fn pause(&self) {
        (**self).pause()
    }
}
