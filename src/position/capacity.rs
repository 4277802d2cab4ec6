//! Remaining order capacity under a symmetric position limit.

use crate::market_state::snapshot::Trade;
use crate::types::error::{QuoterError, QuoterResult};
use crate::types::primitives::Quantity;

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How current position and this window's fills consume the limit.
///
/// Both rules start a buy accumulator and a sell accumulator at the current
/// position, add non-negative fills to the former and negative fills to the
/// latter, and clamp the result at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CapacityRule {
    /// Long exposure consumes buy room; any exposure consumes sell room:
    /// `buy = L - buy_acc`, `sell = L - |sell_acc|`.
    #[default]
    Symmetric,
    /// Only net exposure counts, so inventory can swing from `+L` to `-L`:
    /// `buy = L - buy_acc`, `sell = L + sell_acc`.
    NetExposure,
}

/// How much more may be bought and sold this tick.
///
/// Both fields are non-negative magnitudes.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize, DebugPretty, DisplaySimple)
)]
pub struct RemainingCapacity {
    /// Quantity that may still be bought.
    pub buy: Quantity,
    /// Quantity that may still be sold.
    pub sell: Quantity,
}

impl RemainingCapacity {
    /// Creates a capacity pair, clamping both sides at zero.
    #[must_use]
    pub fn new(buy: Quantity, sell: Quantity) -> Self {
        Self {
            buy: buy.max(0),
            sell: sell.max(0),
        }
    }

    /// Returns true if neither side has room left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.buy == 0 && self.sell == 0
    }
}

/// Computes remaining capacity for one instrument.
///
/// # Example
///
/// ```rust
/// use tick_quoter::position::{CapacityRule, CapacityTracker};
///
/// let tracker = CapacityTracker::new(20, CapacityRule::Symmetric).unwrap();
/// let capacity = tracker.remaining(Some(5), &[]);
/// assert_eq!((capacity.buy, capacity.sell), (15, 15));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CapacityTracker {
    limit: Quantity,
    rule: CapacityRule,
}

impl CapacityTracker {
    /// Creates a tracker for limit `limit`.
    ///
    /// # Arguments
    ///
    /// * `limit` - Symmetric position limit, must be positive
    /// * `rule` - How position and fills consume the limit
    ///
    /// # Errors
    ///
    /// Returns `QuoterError::InvalidConfiguration` if `limit` is not positive.
    pub fn new(limit: Quantity, rule: CapacityRule) -> QuoterResult<Self> {
        if limit <= 0 {
            return Err(QuoterError::InvalidConfiguration(
                "position limit must be positive".to_string(),
            ));
        }

        Ok(Self { limit, rule })
    }

    /// Position limit.
    #[must_use]
    pub fn limit(&self) -> Quantity {
        self.limit
    }

    /// Accounting rule.
    #[must_use]
    pub fn rule(&self) -> CapacityRule {
        self.rule
    }

    /// Remaining capacity given the current position and our fills so far.
    ///
    /// An unknown position yields the full limit on both sides.
    #[must_use]
    pub fn remaining(&self, position: Option<Quantity>, own_trades: &[Trade]) -> RemainingCapacity {
        let Some(position) = position else {
            return RemainingCapacity::new(self.limit, self.limit);
        };

        let (buy_acc, sell_acc) =
            own_trades
                .iter()
                .fold((position, position), |(buy, sell), trade| {
                    if trade.quantity >= 0 {
                        (buy.saturating_add(trade.quantity), sell)
                    } else {
                        (buy, sell.saturating_add(trade.quantity))
                    }
                });

        match self.rule {
            CapacityRule::Symmetric => RemainingCapacity::new(
                self.limit.saturating_sub(buy_acc),
                self.limit.saturating_sub(sell_acc.saturating_abs()),
            ),
            CapacityRule::NetExposure => RemainingCapacity::new(
                self.limit.saturating_sub(buy_acc),
                self.limit.saturating_add(sell_acc),
            ),
        }
    }
}
