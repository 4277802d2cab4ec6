//! Fixed-window streaming mean and variance.
//!
//! The window is seeded at construction, so it always holds exactly
//! `capacity` observations and both statistics are always defined. Each push
//! evicts the oldest observation and updates both statistics in O(1):
//!
//! ```text
//! mean'     = mean + (x_new - x_old) / N
//! variance' = variance + (x_new - x_old) * (x_new - mean' + x_old - mean) / N
//! ```

use tracing::debug;

use crate::types::error::{QuoterError, QuoterResult};

/// Circular buffer of the last `N` observations of a scalar signal.
///
/// # Example
///
/// ```rust
/// use tick_quoter::market_state::RollingStatistics;
///
/// let mut stats = RollingStatistics::new(4, 10.0).unwrap();
/// stats.push(14.0);
/// assert_eq!(stats.mean(), 11.0);
/// assert_eq!(stats.variance(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RollingStatistics {
    history: Vec<f64>,
    cursor: usize,
    mean: f64,
    variance: f64,
}

impl RollingStatistics {
    /// Creates a window of `capacity` copies of `seed`.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of samples in the window, must be non-zero
    /// * `seed` - Value the window starts filled with, must be finite
    ///
    /// # Errors
    ///
    /// Returns `QuoterError::InvalidConfiguration` if `capacity` is zero or
    /// `seed` is not finite.
    pub fn new(capacity: usize, seed: f64) -> QuoterResult<Self> {
        if capacity == 0 {
            return Err(QuoterError::InvalidConfiguration(
                "window capacity must be greater than 0".to_string(),
            ));
        }

        if !seed.is_finite() {
            return Err(QuoterError::InvalidConfiguration(
                "window seed must be finite".to_string(),
            ));
        }

        Ok(Self {
            history: vec![seed; capacity],
            cursor: 0,
            mean: seed,
            variance: 0.0,
        })
    }

    /// Replaces the oldest observation with `value`.
    ///
    /// Non-finite values are ignored so a single bad sample cannot poison the
    /// window for its whole lifetime.
    pub fn push(&mut self, value: f64) {
        if !value.is_finite() {
            debug!(value, "ignoring non-finite sample");
            return;
        }

        let n = self.history.len() as f64;
        let evicted = std::mem::replace(&mut self.history[self.cursor], value);
        self.cursor = (self.cursor + 1) % self.history.len();

        let previous_mean = self.mean;
        self.mean += (value - evicted) / n;
        self.variance += (value - evicted) * (value - self.mean + evicted - previous_mean) / n;

        // Float drift can push an exact zero slightly negative
        if self.variance < 0.0 {
            self.variance = 0.0;
        }
    }

    /// Recomputes mean and variance exactly from the stored history.
    pub fn resync(&mut self) {
        let n = self.history.len() as f64;
        let mean = self.history.iter().sum::<f64>() / n;
        let variance = self
            .history
            .iter()
            .map(|x| (x - mean) * (x - mean))
            .sum::<f64>()
            / n;

        self.mean = mean;
        self.variance = variance;
    }

    /// Current window mean.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Current population variance of the window, never negative.
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Square root of [`variance`](Self::variance).
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Window length.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.history.len()
    }

    /// Most recently pushed (or seeded) observation.
    #[must_use]
    pub fn last(&self) -> f64 {
        let len = self.history.len();
        self.history[(self.cursor + len - 1) % len]
    }

    /// Observations from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let len = self.history.len();
        (0..len).map(move |i| self.history[(self.cursor + i) % len])
    }
}
