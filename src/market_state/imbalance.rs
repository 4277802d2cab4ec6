//! Depth imbalance from top-of-book resting volume.

use crate::market_state::level_two::LevelTwoView;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normalized difference between bid-side and ask-side resting volume.
///
/// # Imbalance Interpretation
///
/// - `+1.0`: all visible volume is on the bid, expect upward pressure
/// - `0.0`: balanced (or empty) book
/// - `-1.0`: all visible volume is on the ask, expect downward pressure
///
/// # Example
///
/// ```rust
/// use tick_quoter::market_state::DepthImbalance;
///
/// let imbalance = DepthImbalance::new(15, 5);
/// assert_eq!(imbalance.value, 0.5);
/// assert!(imbalance.is_bid_heavy());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DepthImbalance {
    /// `(bid - ask) / (bid + ask)`, in `[-1, 1]`.
    pub value: f64,
    /// Bid volume considered.
    pub bid_volume: u64,
    /// Ask volume considered, as a magnitude.
    pub ask_volume: u64,
}

impl DepthImbalance {
    /// Builds the imbalance from unsigned side volumes.
    #[must_use]
    pub fn new(bid_volume: u64, ask_volume: u64) -> Self {
        let value = if bid_volume.saturating_add(ask_volume) > 0 {
            let (bid, ask) = (bid_volume as f64, ask_volume as f64);
            (bid - ask) / (bid + ask)
        } else {
            0.0
        };

        Self {
            value,
            bid_volume,
            ask_volume,
        }
    }

    /// Builds the imbalance from the two best levels of each side.
    #[must_use]
    pub fn from_level_two(view: &LevelTwoView) -> Self {
        Self::new(view.bid_volume(), view.ask_volume())
    }

    /// Returns true if bids outweigh asks.
    #[must_use]
    pub fn is_bid_heavy(&self) -> bool {
        self.value > 0.0
    }

    /// Returns true if asks outweigh bids.
    #[must_use]
    pub fn is_ask_heavy(&self) -> bool {
        self.value < 0.0
    }
}

impl Default for DepthImbalance {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dec;
    use crate::market_state::snapshot::OrderDepth;
    use proptest::prelude::*;

    #[test]
    fn test_balanced_book_is_zero() {
        let imbalance = DepthImbalance::new(12, 12);
        assert_eq!(imbalance.value, 0.0);
        assert!(!imbalance.is_bid_heavy());
        assert!(!imbalance.is_ask_heavy());
    }

    #[test]
    fn test_empty_book_is_zero() {
        let imbalance = DepthImbalance::from_level_two(&LevelTwoView::default());
        assert_eq!(imbalance.value, 0.0);
        assert_eq!(imbalance, DepthImbalance::default());
    }

    #[test]
    fn test_one_sided_books_hit_bounds() {
        assert_eq!(DepthImbalance::new(9, 0).value, 1.0);
        assert_eq!(DepthImbalance::new(0, 9).value, -1.0);
    }

    #[test]
    fn test_extreme_volumes_stay_in_range() {
        assert_eq!(DepthImbalance::new(u64::MAX, u64::MAX).value, 0.0);
        assert_eq!(DepthImbalance::new(u64::MAX, 0).value, 1.0);
        let value = DepthImbalance::new(1, u64::MAX).value;
        assert!((-1.0..=0.0).contains(&value));
    }

    #[test]
    fn test_uses_both_levels_and_sell_magnitudes() {
        let depth = OrderDepth::new()
            .with_buy(dec!(5000), 10)
            .with_buy(dec!(4999), 5)
            .with_buy(dec!(4990), 100)
            .with_sell(dec!(5007), -3)
            .with_sell(dec!(5008), -2);
        let imbalance = DepthImbalance::from_level_two(&LevelTwoView::from_depth(&depth));

        // third bid level is ignored: (15 - 5) / 20
        assert_eq!(imbalance.bid_volume, 15);
        assert_eq!(imbalance.ask_volume, 5);
        assert_eq!(imbalance.value, 0.5);
    }

    #[test]
    fn test_single_level_per_side() {
        let depth = OrderDepth::new()
            .with_buy(dec!(100), 2)
            .with_sell(dec!(101), -8);
        let imbalance = DepthImbalance::from_level_two(&LevelTwoView::from_depth(&depth));
        assert_eq!(imbalance.value, -0.6);
        assert!(imbalance.is_ask_heavy());
    }

    proptest! {
        #[test]
        fn imbalance_stays_in_range(bid in 0u64..1_000_000, ask in 0u64..1_000_000) {
            let imbalance = DepthImbalance::new(bid, ask);
            prop_assert!((-1.0..=1.0).contains(&imbalance.value));
        }
    }
}
