//! Client-side pacing of outbound requests.
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Called once after every resolution, successful or not.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self);
}

/// Waits a fixed interval after each request.
#[derive(Debug, Clone)]
pub struct IntervalThrottle {
    delay: Duration,
}

impl IntervalThrottle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Throttle for IntervalThrottle {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
