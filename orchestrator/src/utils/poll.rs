use async_trait::async_trait;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("Gave up waiting for {what} after {attempts} attempts")]
    Exhausted { what: String, attempts: u32 },
}

/// Exponential backoff with a cap and proportional jitter.
#[derive(Debug, Clone, PartialEq)]
pub struct Backoff {
    /// Delay after the first attempt
    pub initial_delay: Duration,
    /// Upper bound for the delay before jitter is added
    pub max_delay: Duration,
    pub multiplier: u32,
    /// Fraction (0.0 - 1.0) of the delay that may be added at random
    pub jitter_factor: f64,
    pub max_attempts: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            multiplier: 2,
            jitter_factor: 0.2,
            max_attempts: 60,
        }
    }
}

impl Backoff {
    /// Delay after `attempt` (1-based) without jitter: `initial * multiplier^(attempt - 1)`, capped.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.checked_pow(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.initial_delay.checked_mul(factor).unwrap_or(self.max_delay).min(self.max_delay)
    }

    /// Delay after `attempt` (1-based) with up to `jitter_factor` of it added at random.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let capped_delay = self.base_delay(attempt);
        if self.jitter_factor.is_nan() || self.jitter_factor <= 0.0 {
            return capped_delay;
        }
        let jitter = rand::thread_rng().gen_range(0.0..=self.jitter_factor.min(1.0));
        capped_delay + Duration::from_secs_f64(capped_delay.as_secs_f64() * jitter)
    }
}

/// Something that can wait. Production code sleeps on the tokio timer, tests record the requested delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Run `check` until it yields a value, sleeping between attempts according to `backoff`.
///
/// Errors from the check are returned immediately. When the attempt budget is spent the result is
/// [`PollError::Exhausted`], converted into the caller's error type.
pub async fn poll_until<T, E, F, Fut, S>(what: &str, backoff: &Backoff, sleeper: &S, mut check: F) -> Result<T, E>
where
    S: Sleeper + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
    E: From<PollError>,
{
    for attempt in 1..=backoff.max_attempts {
        if let Some(value) = check().await? {
            tracing::debug!(what, attempt, "Poll succeeded");
            return Ok(value);
        }
        if attempt < backoff.max_attempts {
            let delay = backoff.delay_for(attempt);
            tracing::debug!(what, attempt, delay_ms = delay.as_millis() as u64, "Not ready yet, backing off");
            sleeper.sleep(delay).await;
        }
    }

    tracing::warn!(what, attempts = backoff.max_attempts, "Poll attempts exhausted");
    Err(PollError::Exhausted { what: what.to_string(), attempts: backoff.max_attempts }.into())
}
