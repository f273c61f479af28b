use std::time::Duration;

/// Politeness pause between outbound requests.
///
/// Controllers call this between requests instead of sleeping directly so
/// tests can swap in a pacer that returns immediately.
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

#[async_trait::async_trait]
impl Pacer for SleepPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPause;

#[async_trait::async_trait]
impl Pacer for NoPause {
    async fn pause(&self, _delay: Duration) {}
}
