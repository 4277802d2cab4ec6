//! Instrument classification and policy parameters.

use crate::strategy::fair_value::FairValueTaker;
use crate::strategy::imbalance_momentum::ImbalanceMomentum;
use crate::strategy::mean_reversion::MeanReversion;
use crate::strategy::policy::QuotingPolicy;
use crate::types::error::QuoterResult;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Behavioural class of an instrument, selecting its quoting policy.
///
/// # Example
///
/// ```rust
/// use tick_quoter::strategy::InstrumentClass;
///
/// let policy = InstrumentClass::trending().build_policy(None).unwrap();
/// assert_eq!(policy.name(), "imbalance_momentum");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "class", rename_all = "snake_case"))]
pub enum InstrumentClass {
    /// Oscillates around a stable value; quoted with [`MeanReversion`].
    Stable {
        /// Variance divisor of the quoting band.
        band_divisor: f64,
    },
    /// Drifts with order flow; quoted with [`ImbalanceMomentum`].
    Trending {
        /// Absolute imbalance needed to act.
        threshold: f64,
        /// Price offset per unit of variance.
        variance_coefficient: f64,
    },
    /// Traded by crossing the spread against a smoothed fair value; quoted
    /// with [`FairValueTaker`].
    FairValue {
        /// Weight kept on the previous fair value each tick.
        smoothing: f64,
        /// Pull of a bought ask on the local fair value.
        reanchor_weight: f64,
    },
}

impl InstrumentClass {
    /// Stable class with default parameters.
    #[must_use]
    pub fn stable() -> Self {
        Self::Stable {
            band_divisor: MeanReversion::DEFAULT_BAND_DIVISOR,
        }
    }

    /// Trending class with default parameters.
    #[must_use]
    pub fn trending() -> Self {
        Self::Trending {
            threshold: ImbalanceMomentum::DEFAULT_THRESHOLD,
            variance_coefficient: ImbalanceMomentum::DEFAULT_VARIANCE_COEFFICIENT,
        }
    }

    /// Fair-value class with default parameters.
    #[must_use]
    pub fn fair_value() -> Self {
        Self::FairValue {
            smoothing: FairValueTaker::DEFAULT_SMOOTHING,
            reanchor_weight: FairValueTaker::DEFAULT_REANCHOR_WEIGHT,
        }
    }

    /// Builds a fresh policy for this class.
    ///
    /// `seed` is the instrument's configured seed price; only policies that
    /// keep their own price state use it.
    ///
    /// # Errors
    ///
    /// Returns `QuoterError::InvalidConfiguration` if the class parameters are
    /// out of range.
    pub fn build_policy(&self, seed: Option<f64>) -> QuoterResult<Box<dyn QuotingPolicy>> {
        Ok(match *self {
            Self::Stable { band_divisor } => Box::new(MeanReversion::new(band_divisor)?),
            Self::Trending {
                threshold,
                variance_coefficient,
            } => Box::new(ImbalanceMomentum::new(threshold, variance_coefficient)?),
            Self::FairValue {
                smoothing,
                reanchor_weight,
            } => Box::new(FairValueTaker::new(smoothing, reanchor_weight, seed)?),
        })
    }
}
