//! Timer-backed pause for the restoration window.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::RestorationPause;

/// Pause backed by the Tokio timer.
///
/// Dropping the future returned by [`RestorationPause::pause`] cancels the
/// underlying sleep, satisfying the port's cancel-safety contract.
#[derive(Debug, Clone, Copy)]
pub struct TokioPause {
    duration: Duration,
}

impl TokioPause {
    /// Wait `duration` each time the gate asks for the restoration pause.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl RestorationPause for TokioPause {
    async fn pause(&self) {
        tokio::time::sleep(self.duration).await;
    }
}
