//! Token bucket rate limiter.
//!
//! Tokens refill continuously at `rate` per second, capped at a burst of one.
//! The bucket starts full, so the first permission is granted immediately.
//! A negative rate never yields a token; waits then end only on shutdown.

use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, Instant};

use crate::shutdown::ShutdownController;

/// バースト容量（定常レートを超えるバーストは許可しない）
const BURST: f64 = 1.0;

/// Reasons a permission wait ends without a token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimiterError {
    /// Shutdown was requested before or during the wait
    #[error("wait cancelled by shutdown")]
    Cancelled,

    /// The rate is zero (or NaN) and the initial token was already spent
    #[error("rate limit allows no further requests")]
    Exhausted,
}

/// Rate limiter admitting at most `rate` operations per second.
#[derive(Debug)]
pub struct RateLimiter {
    rate: f64,
    tokens: f64,
    last: Instant,
}

impl RateLimiter {
    /// Create a limiter for `rate` operations per second.
    pub fn new(rate: f64) -> Self {
        Self {
            rate,
            tokens: BURST,
            last: Instant::now(),
        }
    }

    /// Configured rate.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Block until one token is available, consuming it.
    pub async fn wait(&mut self, shutdown: &ShutdownController) -> Result<(), LimiterError> {
        if shutdown.is_shutdown_requested() {
            return Err(LimiterError::Cancelled);
        }
        if self.rate.is_infinite() && self.rate > 0.0 {
            return Ok(());
        }
        if self.rate < 0.0 {
            return Self::wait_for_shutdown(shutdown).await;
        }

        loop {
            self.refill();

            if self.tokens >= 1.0 {
                self.tokens -= 1.0;
                return Ok(());
            }

            if !self.refills() {
                return Err(LimiterError::Exhausted);
            }

            let missing = 1.0 - self.tokens;
            // Duration に収まらない待ち時間は無限待ちとして扱う
            let Ok(wait) = Duration::try_from_secs_f64(missing / self.rate) else {
                return Self::wait_for_shutdown(shutdown).await;
            };
            let wait = if wait.is_zero() {
                Duration::from_nanos(1)
            } else {
                wait
            };

            tokio::select! {
                _ = sleep(wait) => {}
                _ = shutdown.wait() => return Err(LimiterError::Cancelled),
            }
        }
    }

    async fn wait_for_shutdown(shutdown: &ShutdownController) -> Result<(), LimiterError> {
        shutdown.wait().await;
        Err(LimiterError::Cancelled)
    }

    fn refills(&self) -> bool {
        self.rate > 0.0 && self.rate.is_finite()
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;

        if self.refills() {
            self.tokens = (self.tokens + dt * self.rate).min(BURST);
        }
    }
}
