//! src/network/rate_limit.rs
//!
//! Fixed pause before indexing API calls, sized for the free-tier quota.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

/// Delays shorter than this are treated as "no delay".
pub const MIN_FREE_TIER_DELAY: Duration = Duration::from_secs(1);

/// How a delay is actually spent. Swapped out in tests to avoid real waits.
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleep;

#[async_trait]
impl Pause for TokioSleep {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

#[async_trait]
impl Pause for NoPause {
    async fn pause(&self, _duration: Duration) {}
}

/// Blocking, non-adaptive delay applied before each indexing API request.
#[derive(Debug, Clone)]
pub struct FreeTierDelay<P = TokioSleep> {
    delay: Duration,
    pause: P,
}

impl FreeTierDelay<TokioSleep> {
    pub fn new(delay: Duration) -> Self {
        Self::with_pause(delay, TokioSleep)
    }
}

impl<P: Pause> FreeTierDelay<P> {
    pub fn with_pause(delay: Duration, pause: P) -> Self {
        Self { delay, pause }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_active(&self) -> bool {
        self.delay >= MIN_FREE_TIER_DELAY
    }

    /// Wait out the configured delay, if it is at least one second.
    pub async fn wait(&self) {
        if !self.is_active() {
            return;
        }
        info!(
            "[*] Free tier delay: {} seconds (set custom value via FREE_TIER_DELAY env var)",
            self.delay.as_secs_f64()
        );
        self.pause.pause(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Duration>>>);

    #[async_trait]
    impl Pause for Recorder {
        async fn pause(&self, duration: Duration) {
            self.0.lock().unwrap().push(duration);
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn waits_when_delay_is_at_least_one_second() {
        let recorder = Recorder::default();
        let delay = FreeTierDelay::with_pause(Duration::from_secs(4), recorder.clone());
        delay.wait().await;
        delay.wait().await;
        assert_eq!(*recorder.0.lock().unwrap(), vec![Duration::from_secs(4); 2]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn sub_second_delay_is_disabled() {
        let recorder = Recorder::default();
        let delay = FreeTierDelay::with_pause(Duration::from_millis(999), recorder.clone());
        assert!(!delay.is_active());
        delay.wait().await;
        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn tokio_sleep_advances_virtual_time() {
        let start = tokio::time::Instant::now();
        FreeTierDelay::new(Duration::from_secs(2)).wait().await;
        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
