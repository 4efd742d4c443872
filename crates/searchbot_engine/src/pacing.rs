use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

/// Suspends the current task. Swapped out in tests to avoid real waits.
#[async_trait::async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait::async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Half-open interval `[min, max)` that delays are drawn from uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub fn from_secs_f64(min: f64, max: f64) -> Self {
        Self::new(Duration::from_secs_f64(min), Duration::from_secs_f64(max))
    }

    /// An empty or inverted range always yields `min`.
    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingSettings {
    /// Pause after each URL pulled from the provider.
    pub url_delay: DelayRange,
    /// Cool-down between two queries.
    pub query_delay: DelayRange,
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            url_delay: DelayRange::from_secs_f64(0.5, 1.5),
            query_delay: DelayRange::from_secs_f64(2.0, 4.0),
        }
    }
}

#[derive(Clone)]
pub struct Pacer {
    settings: PacingSettings,
    sleeper: Arc<dyn Sleeper>,
}

impl Pacer {
    pub fn new(settings: PacingSettings, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { settings, sleeper }
    }

    /// Sleeps for a fresh per-URL delay and returns it.
    pub async fn after_url(&self) -> Duration {
        let delay = self.settings.url_delay.sample();
        self.wait(delay).await;
        delay
    }

    /// Draws the next cool-down without sleeping, so callers can announce it.
    pub fn query_delay(&self) -> Duration {
        self.settings.query_delay.sample()
    }

    pub async fn wait(&self, delay: Duration) {
        if !delay.is_zero() {
            self.sleeper.sleep(delay).await;
        }
    }
}
