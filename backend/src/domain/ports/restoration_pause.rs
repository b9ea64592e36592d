//! Port for the bounded pause between gate evaluations.

use async_trait::async_trait;

/// Waits out the persisted-state restoration window once.
///
/// Implementations must be cancel-safe: dropping the future returned by
/// [`RestorationPause::pause`] abandons the wait without side effects, so a
/// torn-down request never leaves a timer behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestorationPause: Send + Sync {
    /// Wait once for the restoration window.
    async fn pause(&self);
}

/// Pause that completes immediately, for tests and settled deployments.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPause;

#[async_trait]
impl RestorationPause for NoopPause {
    async fn pause(&self) {}
}
