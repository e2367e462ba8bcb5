//! Randomized pause between consecutive media updates.
//!
//! The media API is called once per chunk with a uniformly random delay in between so
//! a long recording does not hit the service in a tight burst.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::time::Duration;

use crate::core::config::pacing::{MAX_DELAY_MS, MIN_DELAY_MS};
use crate::core::error::{AppError, AppResult};

/// Half-open millisecond range `[min_ms, max_ms)` the delay is sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min_ms: u64,
    max_ms: u64,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min_ms: MIN_DELAY_MS,
            max_ms: MAX_DELAY_MS,
        }
    }
}

impl DelayRange {
    /// Creates a range; `min_ms` must be strictly lower than `max_ms`.
    pub fn new(min_ms: u64, max_ms: u64) -> AppResult<Self> {
        if min_ms >= max_ms {
            return Err(AppError::Validation(format!(
                "empty delay range [{}, {})",
                min_ms, max_ms
            )));
        }
        Ok(Self { min_ms, max_ms })
    }

    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    pub fn contains(&self, delay: Duration) -> bool {
        let ms = delay.as_millis();
        ms >= u128::from(self.min_ms) && ms < u128::from(self.max_ms)
    }
}

/// Samples inter-request delays from a [`DelayRange`].
///
/// The random source is injectable so tests can seed it.
pub struct Pacer {
    range: DelayRange,
    rng: Box<dyn RngCore + Send>,
}

impl std::fmt::Debug for Pacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pacer").field("range", &self.range).finish_non_exhaustive()
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(DelayRange::default())
    }
}

impl Pacer {
    /// Pacer backed by an entropy-seeded generator.
    pub fn new(range: DelayRange) -> Self {
        Self::with_rng(range, StdRng::from_entropy())
    }

    /// Pacer backed by the given generator.
    pub fn with_rng<R>(range: DelayRange, rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        Self {
            range,
            rng: Box::new(rng),
        }
    }

    pub fn range(&self) -> DelayRange {
        self.range
    }

    /// Next delay, uniform in `[min, max)` milliseconds.
    pub fn next_delay(&mut self) -> Duration {
        let ms = self.rng.gen_range(self.range.min_ms..self.range.max_ms);
        Duration::from_millis(ms)
    }
}
