//! Two-sided quoting around the rolling mean for stable instruments.

use crate::strategy::order::{Order, Side};
use crate::strategy::policy::{PolicyInputs, QuotingPolicy};
use crate::types::error::{QuoterError, QuoterResult};

/// Quotes a bid and an ask straddling the rolling mean.
///
/// ```text
/// half_band = sqrt(variance / band_divisor)
/// bid = mean - half_band      (full remaining buy capacity)
/// ask = mean + half_band      (full remaining sell capacity)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeanReversion {
    band_divisor: f64,
}

impl MeanReversion {
    /// Default divisor applied to the variance before taking the root.
    pub const DEFAULT_BAND_DIVISOR: f64 = 3.0;

    /// Creates the policy.
    ///
    /// # Arguments
    ///
    /// * `band_divisor` - Divisor applied to the variance before the square
    ///   root, must be positive
    ///
    /// # Errors
    ///
    /// Returns `QuoterError::InvalidConfiguration` if `band_divisor` is not a
    /// positive finite number.
    pub fn new(band_divisor: f64) -> QuoterResult<Self> {
        if !band_divisor.is_finite() || band_divisor <= 0.0 {
            return Err(QuoterError::InvalidConfiguration(
                "band_divisor must be positive and finite".to_string(),
            ));
        }

        Ok(Self { band_divisor })
    }

    /// Distance of each quote from the mean for a given variance.
    #[must_use]
    pub fn half_band(&self, variance: f64) -> f64 {
        (variance / self.band_divisor).sqrt()
    }
}

impl Default for MeanReversion {
    fn default() -> Self {
        Self {
            band_divisor: Self::DEFAULT_BAND_DIVISOR,
        }
    }
}

impl QuotingPolicy for MeanReversion {
    fn name(&self) -> &'static str {
        "mean_reversion"
    }

    fn quote(&mut self, inputs: &PolicyInputs<'_>) -> Vec<Order> {
        let mean = inputs.statistics.mean();
        let half_band = self.half_band(inputs.statistics.variance());
        let capacity = inputs.capacity;

        let mut orders = Vec::with_capacity(2);
        if capacity.buy > 0 {
            orders.extend(inputs.order_at(Side::Buy, mean - half_band, capacity.buy));
        }
        if capacity.sell > 0 {
            orders.extend(inputs.order_at(Side::Sell, mean + half_band, capacity.sell));
        }
        orders
    }
}
