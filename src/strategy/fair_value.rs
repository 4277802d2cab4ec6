//! Spread-crossing against a smoothed fair value.

use rust_decimal::prelude::ToPrimitive;

use crate::strategy::order::{Order, Side};
use crate::strategy::policy::{PolicyInputs, QuotingPolicy};
use crate::types::error::{QuoterError, QuoterResult};
use crate::types::primitives::Quantity;

/// Takes liquidity whenever the touch is mispriced against a fair value.
///
/// The fair value is an exponentially smoothed mid price carried across
/// ticks: `fair = smoothing * fair + (1 - smoothing) * mid`. Within a tick:
///
/// 1. If the best ask is below fair, buy it (up to its size and the buy
///    capacity) and pull the local fair value towards the ask by
///    `reanchor_weight`.
/// 2. If the best bid is above the (possibly re-anchored) fair value, sell
///    into it (up to its size and the sell capacity).
#[derive(Debug, Clone, PartialEq)]
pub struct FairValueTaker {
    smoothing: f64,
    reanchor_weight: f64,
    fair_value: Option<f64>,
}

impl FairValueTaker {
    /// Default weight kept on the previous fair value each tick.
    pub const DEFAULT_SMOOTHING: f64 = 0.7;
    /// Default pull of a bought ask on the local fair value.
    pub const DEFAULT_REANCHOR_WEIGHT: f64 = 0.3;

    /// Creates the policy, optionally with an initial fair value.
    ///
    /// # Arguments
    ///
    /// * `smoothing` - Weight kept on the previous fair value, in `[0, 1]`
    /// * `reanchor_weight` - Pull of a bought ask on the local fair value, in `[0, 1]`
    /// * `seed` - Initial fair value; the first observed mid is used if `None`
    ///
    /// # Errors
    ///
    /// Returns `QuoterError::InvalidConfiguration` if a weight is outside
    /// `[0, 1]` or the seed is not finite.
    pub fn new(smoothing: f64, reanchor_weight: f64, seed: Option<f64>) -> QuoterResult<Self> {
        if !(0.0..=1.0).contains(&smoothing) {
            return Err(QuoterError::InvalidConfiguration(
                "smoothing must be between 0.0 and 1.0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&reanchor_weight) {
            return Err(QuoterError::InvalidConfiguration(
                "reanchor_weight must be between 0.0 and 1.0".to_string(),
            ));
        }

        if seed.is_some_and(|s| !s.is_finite()) {
            return Err(QuoterError::InvalidConfiguration(
                "fair value seed must be finite".to_string(),
            ));
        }

        Ok(Self {
            smoothing,
            reanchor_weight,
            fair_value: seed,
        })
    }

    /// Fair value carried into the next tick, if one has been established.
    #[must_use]
    pub fn fair_value(&self) -> Option<f64> {
        self.fair_value
    }

    fn update_fair_value(&mut self, mid: Option<f64>) -> Option<f64> {
        self.fair_value = match (self.fair_value, mid) {
            (Some(fair), Some(mid)) => Some(self.smoothing * fair + (1.0 - self.smoothing) * mid),
            (None, mid) => mid,
            (fair, None) => fair,
        };
        self.fair_value
    }
}

impl Default for FairValueTaker {
    fn default() -> Self {
        Self {
            smoothing: Self::DEFAULT_SMOOTHING,
            reanchor_weight: Self::DEFAULT_REANCHOR_WEIGHT,
            fair_value: None,
        }
    }
}

impl QuotingPolicy for FairValueTaker {
    fn name(&self) -> &'static str {
        "fair_value_taker"
    }

    fn quote(&mut self, inputs: &PolicyInputs<'_>) -> Vec<Order> {
        let view = inputs.level_two;
        let mid = view.mid_price().and_then(|m| m.to_f64());
        let Some(mut fair) = self.update_fair_value(mid) else {
            return Vec::new();
        };

        let capacity = inputs.capacity;
        let mut orders = Vec::with_capacity(2);

        if let Some(ask) = view.best_ask {
            let ask_price = ask.price.to_f64().unwrap_or(f64::NAN);
            let size = clamp_size(ask.magnitude(), capacity.buy);
            if size > 0 && ask_price < fair {
                orders.push(Order::new(inputs.symbol, Side::Buy, ask.price, size));
                fair = (1.0 - self.reanchor_weight) * fair + self.reanchor_weight * ask_price;
            }
        }

        if let Some(bid) = view.best_bid {
            let bid_price = bid.price.to_f64().unwrap_or(f64::NAN);
            let size = clamp_size(bid.magnitude(), capacity.sell);
            if size > 0 && bid_price > fair {
                orders.push(Order::new(inputs.symbol, Side::Sell, bid.price, size));
            }
        }

        orders
    }
}

fn clamp_size(visible: u64, capacity: Quantity) -> Quantity {
    Quantity::try_from(visible).map_or(capacity, |v| v.min(capacity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dec;
    use crate::market_state::{DepthImbalance, LevelTwoView, OrderDepth, RollingStatistics};
    use crate::position::RemainingCapacity;

    fn quote(
        policy: &mut FairValueTaker,
        depth: &OrderDepth,
        capacity: RemainingCapacity,
    ) -> Vec<Order> {
        let view = LevelTwoView::from_depth(depth);
        let stats = RollingStatistics::new(1, 0.0).unwrap();
        policy.quote(&PolicyInputs {
            symbol: "BANANAS",
            level_two: &view,
            statistics: &stats,
            imbalance: DepthImbalance::from_level_two(&view),
            capacity,
            price_precision: 4,
        })
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(FairValueTaker::new(1.5, 0.3, None).is_err());
        assert!(FairValueTaker::new(0.7, -0.1, None).is_err());
        assert!(FairValueTaker::new(0.7, 0.3, Some(f64::NAN)).is_err());
        assert!(FairValueTaker::new(0.7, 0.3, Some(5000.0)).is_ok());
    }

    #[test]
    fn test_first_mid_seeds_fair_value() {
        let mut policy = FairValueTaker::default();
        let depth = OrderDepth::new()
            .with_buy(dec!(5000), 10)
            .with_sell(dec!(5008), -5);

        let orders = quote(&mut policy, &depth, RemainingCapacity::new(20, 20));
        assert!(orders.is_empty());
        assert_eq!(policy.fair_value(), Some(5004.0));
    }

    #[test]
    fn test_fair_value_is_smoothed() {
        let mut policy = FairValueTaker::new(0.7, 0.3, Some(5000.0)).unwrap();
        let depth = OrderDepth::new()
            .with_buy(dec!(5008), 1)
            .with_sell(dec!(5012), -1);
        quote(&mut policy, &depth, RemainingCapacity::new(0, 0));
        // 0.7 * 5000 + 0.3 * 5010
        assert!((policy.fair_value().unwrap() - 5003.0).abs() < 1e-9);
    }

    #[test]
    fn test_cheap_ask_is_bought_up_to_capacity() {
        let mut policy = FairValueTaker::new(1.0, 0.3, Some(5010.0)).unwrap();
        let depth = OrderDepth::new()
            .with_buy(dec!(5000), 10)
            .with_sell(dec!(5007), -30);

        let orders = quote(&mut policy, &depth, RemainingCapacity::new(12, 20));
        assert_eq!(orders, vec![Order::new("BANANAS", Side::Buy, dec!(5007), 12)]);
    }

    #[test]
    fn test_rich_bid_is_sold_up_to_visible_size() {
        let mut policy = FairValueTaker::new(1.0, 0.3, Some(4990.0)).unwrap();
        let depth = OrderDepth::new()
            .with_buy(dec!(5000), 10)
            .with_sell(dec!(5007), -5);

        let orders = quote(&mut policy, &depth, RemainingCapacity::new(20, 20));
        assert_eq!(orders, vec![Order::new("BANANAS", Side::Sell, dec!(5000), 10)]);
    }

    #[test]
    fn test_reanchoring_after_buy_can_block_sell() {
        // crossed book: both sides mispriced against fair 5005
        let depth = OrderDepth::new()
            .with_buy(dec!(5006), 4)
            .with_sell(dec!(5004), -4);

        // without re-anchoring both sides trade
        let mut policy = FairValueTaker::new(1.0, 0.0, Some(5005.0)).unwrap();
        assert_eq!(quote(&mut policy, &depth, RemainingCapacity::new(20, 20)).len(), 2);

        // pulling fair fully onto the bought ask (5004) still leaves 5006 rich
        let mut policy = FairValueTaker::new(1.0, 1.0, Some(5005.0)).unwrap();
        assert_eq!(quote(&mut policy, &depth, RemainingCapacity::new(20, 20)).len(), 2);

        // a bid at exactly the re-anchored value is not sold into
        let depth = OrderDepth::new()
            .with_buy(dec!(5004), 4)
            .with_sell(dec!(5004), -4);
        let mut policy = FairValueTaker::new(1.0, 1.0, Some(5005.0)).unwrap();
        let orders = quote(&mut policy, &depth, RemainingCapacity::new(20, 20));
        assert_eq!(orders, vec![Order::new("BANANAS", Side::Buy, dec!(5004), 4)]);
    }

    #[test]
    fn test_zero_volume_touch_is_not_taken() {
        let mut policy = FairValueTaker::new(1.0, 1.0, Some(5010.0)).unwrap();
        let depth = OrderDepth::new()
            .with_buy(dec!(5000), 10)
            .with_sell(dec!(5005), 0);

        let orders = quote(&mut policy, &depth, RemainingCapacity::new(20, 20));
        assert!(orders.is_empty());

        // fair stays at 5006 rather than moving onto the empty 5005 ask,
        // so the 5005.5 bid is not rich enough to sell into
        let depth = OrderDepth::new()
            .with_buy(dec!(5005.5), 3)
            .with_sell(dec!(5005), 0);
        let mut policy = FairValueTaker::new(1.0, 1.0, Some(5006.0)).unwrap();
        assert!(quote(&mut policy, &depth, RemainingCapacity::new(20, 20)).is_empty());

        let depth = OrderDepth::new()
            .with_buy(dec!(5005.5), 3)
            .with_sell(dec!(5005), -2);
        let mut policy = FairValueTaker::new(1.0, 1.0, Some(5006.0)).unwrap();
        assert_eq!(quote(&mut policy, &depth, RemainingCapacity::new(20, 20)).len(), 2);
    }

    #[test]
    fn test_empty_book_without_seed_is_silent() {
        let mut policy = FairValueTaker::default();
        let orders = quote(&mut policy, &OrderDepth::new(), RemainingCapacity::new(20, 20));
        assert!(orders.is_empty());
        assert_eq!(policy.fair_value(), None);
    }
}
