use async_trait::async_trait;
use std::time::Duration;

/// Defines how a reply is held back before it reaches the user.
///
/// This trait abstracts the passage of time, so tests can record the
/// requested delays instead of sleeping through them.
#[async_trait]
pub trait ReplyPacer: Send + Sync + 'static {
    /// Waits for `delay` before the reply is delivered.
    async fn pause(&self, delay: Duration);
}

/// Production pacer backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

#[async_trait]
impl ReplyPacer for SleepPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
