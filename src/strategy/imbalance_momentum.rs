//! Imbalance-triggered momentum quoting for trending instruments.

use crate::strategy::order::{Order, Side};
use crate::strategy::policy::{PolicyInputs, QuotingPolicy};
use crate::types::error::{QuoterError, QuoterResult};

/// Joins the side the book is leaning towards, one order per tick at most.
///
/// When bids dominate (`imbalance >= threshold`) it bids a little below the
/// mean, expecting the dip to be bought; when asks dominate
/// (`imbalance <= -threshold`) it offers a little above:
///
/// ```text
/// bid = mean - variance_coefficient * variance
/// ask = mean + variance_coefficient * variance
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImbalanceMomentum {
    threshold: f64,
    variance_coefficient: f64,
}

impl ImbalanceMomentum {
    /// Default absolute imbalance needed to act.
    pub const DEFAULT_THRESHOLD: f64 = 0.5;
    /// Default offset per unit of variance.
    pub const DEFAULT_VARIANCE_COEFFICIENT: f64 = 0.15;

    /// Creates the policy.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Absolute imbalance that triggers an order, in `(0, 1]`
    /// * `variance_coefficient` - Price offset from the mean per unit of
    ///   variance, must be non-negative
    ///
    /// # Errors
    ///
    /// Returns `QuoterError::InvalidConfiguration` if `threshold` is outside
    /// `(0, 1]` or `variance_coefficient` is negative or not finite.
    pub fn new(threshold: f64, variance_coefficient: f64) -> QuoterResult<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(QuoterError::InvalidConfiguration(
                "imbalance threshold must be in (0, 1]".to_string(),
            ));
        }

        if !variance_coefficient.is_finite() || variance_coefficient < 0.0 {
            return Err(QuoterError::InvalidConfiguration(
                "variance_coefficient must be non-negative and finite".to_string(),
            ));
        }

        Ok(Self {
            threshold,
            variance_coefficient,
        })
    }

    /// Imbalance magnitude that triggers an order.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for ImbalanceMomentum {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            variance_coefficient: Self::DEFAULT_VARIANCE_COEFFICIENT,
        }
    }
}

impl QuotingPolicy for ImbalanceMomentum {
    fn name(&self) -> &'static str {
        "imbalance_momentum"
    }

    fn quote(&mut self, inputs: &PolicyInputs<'_>) -> Vec<Order> {
        let imbalance = inputs.imbalance.value;
        let mean = inputs.statistics.mean();
        let offset = self.variance_coefficient * inputs.statistics.variance();
        let capacity = inputs.capacity;

        let order = if imbalance >= self.threshold && capacity.buy > 0 {
            inputs.order_at(Side::Buy, mean - offset, capacity.buy)
        } else if imbalance <= -self.threshold && capacity.sell > 0 {
            inputs.order_at(Side::Sell, mean + offset, capacity.sell)
        } else {
            None
        };

        order.into_iter().collect()
    }
}
