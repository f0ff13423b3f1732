//! Simulated remote-call latency.
//!
//! Login, registration, the initial menu and order loads, and payment all
//! stand in for network calls. Each waits a fixed delay before resolving. The
//! delay is injected so tests can use [`Latency::NONE`] or paused tokio time.

use std::time::Duration;

/// A fixed delay before a simulated remote call resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Latency(Duration);

impl Latency {
    /// Resolve immediately.
    pub const NONE: Self = Self(Duration::ZERO);

    /// Create a latency from a duration.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self(delay)
    }

    /// Create a latency from a number of milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// The configured delay.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.0
    }

    /// Wait out the delay. Returns immediately for a zero delay.
    pub async fn wait(self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}
