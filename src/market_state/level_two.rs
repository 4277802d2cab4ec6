//! Level-two extraction: best two price levels on each side of a book.

use crate::Decimal;
use crate::market_state::snapshot::OrderDepth;
use crate::types::primitives::{Price, Volume};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One price level and the volume resting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceLevel {
    /// Level price.
    pub price: Price,
    /// Resting volume, signed as in the snapshot.
    pub volume: Volume,
}

impl PriceLevel {
    /// Creates a price level.
    #[must_use]
    pub fn new(price: Price, volume: Volume) -> Self {
        Self { price, volume }
    }

    /// Returns the unsigned resting volume.
    #[must_use]
    pub fn magnitude(&self) -> u64 {
        self.volume.unsigned_abs()
    }
}

/// Best two bids (descending) and best two asks (ascending) of one book.
///
/// Missing levels are `None`; no numeric sentinel is ever used.
///
/// # Example
///
/// ```rust
/// use tick_quoter::market_state::{LevelTwoView, OrderDepth};
/// use tick_quoter::dec;
///
/// let depth = OrderDepth::new()
///     .with_buy(dec!(9997), 5)
///     .with_buy(dec!(9998), 7)
///     .with_sell(dec!(10001), -4);
/// let view = LevelTwoView::from_depth(&depth);
///
/// assert_eq!(view.best_bid.map(|l| l.price), Some(dec!(9998)));
/// assert_eq!(view.second_bid.map(|l| l.price), Some(dec!(9997)));
/// assert_eq!(view.best_ask.map(|l| l.price), Some(dec!(10001)));
/// assert!(view.second_ask.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelTwoView {
    /// Highest bid.
    pub best_bid: Option<PriceLevel>,
    /// Second highest bid, strictly below `best_bid`.
    pub second_bid: Option<PriceLevel>,
    /// Lowest ask.
    pub best_ask: Option<PriceLevel>,
    /// Second lowest ask, strictly above `best_ask`.
    pub second_ask: Option<PriceLevel>,
}

impl LevelTwoView {
    /// Reduces a full book to its best two levels per side in one pass per side.
    #[must_use]
    pub fn from_depth(depth: &OrderDepth) -> Self {
        let (best_bid, second_bid) = top_two(
            depth.buy_orders.iter().map(|(p, v)| PriceLevel::new(*p, *v)),
            |candidate, incumbent| candidate > incumbent,
        );
        let (best_ask, second_ask) = top_two(
            depth.sell_orders.iter().map(|(p, v)| PriceLevel::new(*p, *v)),
            |candidate, incumbent| candidate < incumbent,
        );

        Self {
            best_bid,
            second_bid,
            best_ask,
            second_ask,
        }
    }

    /// Midpoint of the touch, when both sides are present.
    #[must_use]
    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_bid, self.best_ask) {
            (Some(bid), Some(ask)) => Some((bid.price + ask.price) / Decimal::TWO),
            _ => None,
        }
    }

    /// Best ask minus best bid, when both sides are present.
    #[must_use]
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid, self.best_ask) {
            (Some(bid), Some(ask)) => Some(ask.price - bid.price),
            _ => None,
        }
    }

    /// Summed bid volume over the (up to) two bid levels.
    #[must_use]
    pub fn bid_volume(&self) -> u64 {
        side_volume(self.best_bid, self.second_bid)
    }

    /// Summed ask magnitude over the (up to) two ask levels.
    #[must_use]
    pub fn ask_volume(&self) -> u64 {
        side_volume(self.best_ask, self.second_ask)
    }
}

fn side_volume(first: Option<PriceLevel>, second: Option<PriceLevel>) -> u64 {
    first
        .map_or(0, |l| l.magnitude())
        .saturating_add(second.map_or(0, |l| l.magnitude()))
}

/// Tracks the two best levels under `better`.
///
/// A new best demotes the current best into the second slot before taking its
/// place; anything else can only compete for the second slot.
fn top_two<I, F>(levels: I, better: F) -> (Option<PriceLevel>, Option<PriceLevel>)
where
    I: IntoIterator<Item = PriceLevel>,
    F: Fn(&Price, &Price) -> bool,
{
    let mut first: Option<PriceLevel> = None;
    let mut second: Option<PriceLevel> = None;

    for level in levels {
        match first {
            None => first = Some(level),
            Some(top) if better(&level.price, &top.price) => {
                second = first;
                first = Some(level);
            }
            Some(top) if level.price == top.price => {}
            Some(_) => match second {
                Some(runner_up) if !better(&level.price, &runner_up.price) => {}
                _ => second = Some(level),
            },
        }
    }

    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dec;
    use proptest::prelude::*;

    fn bids(levels: &[(i64, i64)]) -> OrderDepth {
        levels.iter().fold(OrderDepth::new(), |d, (p, v)| {
            d.with_buy(Decimal::from(*p), *v)
        })
    }

    fn asks(levels: &[(i64, i64)]) -> OrderDepth {
        levels.iter().fold(OrderDepth::new(), |d, (p, v)| {
            d.with_sell(Decimal::from(*p), *v)
        })
    }

    #[test]
    fn test_empty_book_has_no_levels() {
        let view = LevelTwoView::from_depth(&OrderDepth::new());
        assert_eq!(view, LevelTwoView::default());
        assert!(view.mid_price().is_none());
        assert!(view.spread().is_none());
    }

    #[test]
    fn test_singleton_sides() {
        let depth = OrderDepth::new()
            .with_buy(dec!(5000), 10)
            .with_sell(dec!(5007), -5);
        let view = LevelTwoView::from_depth(&depth);
        assert_eq!(view.best_bid, Some(PriceLevel::new(dec!(5000), 10)));
        assert!(view.second_bid.is_none());
        assert_eq!(view.best_ask, Some(PriceLevel::new(dec!(5007), -5)));
        assert!(view.second_ask.is_none());
    }

    #[test]
    fn test_side_volume_saturates() {
        let depth = asks(&[(10, i64::MIN), (11, i64::MIN)]);
        let view = LevelTwoView::from_depth(&depth);
        assert_eq!(view.ask_volume(), u64::MAX);
        assert_eq!(view.bid_volume(), 0);
    }

    #[test]
    fn test_new_maximum_demotes_previous_best() {
        // Direct check of the demotion step, independent of map iteration order
        let (first, second) = top_two(
            [
                PriceLevel::new(dec!(10), 1),
                PriceLevel::new(dec!(12), 2),
                PriceLevel::new(dec!(11), 3),
            ],
            |a, b| a > b,
        );
        assert_eq!(first, Some(PriceLevel::new(dec!(12), 2)));
        assert_eq!(second, Some(PriceLevel::new(dec!(11), 3)));

        let (first, second) = top_two(
            [PriceLevel::new(dec!(10), 1), PriceLevel::new(dec!(12), 2)],
            |a, b| a > b,
        );
        assert_eq!(first.map(|l| l.price), Some(dec!(12)));
        assert_eq!(second.map(|l| l.price), Some(dec!(10)));
    }

    #[test]
    fn test_new_minimum_demotes_previous_best_ask() {
        let (first, second) = top_two(
            [
                PriceLevel::new(dec!(103), -1),
                PriceLevel::new(dec!(101), -2),
                PriceLevel::new(dec!(105), -3),
                PriceLevel::new(dec!(102), -4),
            ],
            |a, b| a < b,
        );
        assert_eq!(first.map(|l| l.price), Some(dec!(101)));
        assert_eq!(second.map(|l| l.price), Some(dec!(102)));
    }

    #[test]
    fn test_worse_level_does_not_displace_second() {
        let (first, second) = top_two(
            [
                PriceLevel::new(dec!(12), 1),
                PriceLevel::new(dec!(11), 1),
                PriceLevel::new(dec!(9), 1),
            ],
            |a, b| a > b,
        );
        assert_eq!(first.map(|l| l.price), Some(dec!(12)));
        assert_eq!(second.map(|l| l.price), Some(dec!(11)));
    }

    #[test]
    fn test_reference_book() {
        let depth = OrderDepth::new()
            .with_buy(dec!(9998), 7)
            .with_buy(dec!(9997), 5)
            .with_sell(dec!(10001), -4)
            .with_sell(dec!(10002), -8);
        let view = LevelTwoView::from_depth(&depth);

        assert_eq!(view.best_bid, Some(PriceLevel::new(dec!(9998), 7)));
        assert_eq!(view.second_bid, Some(PriceLevel::new(dec!(9997), 5)));
        assert_eq!(view.best_ask, Some(PriceLevel::new(dec!(10001), -4)));
        assert_eq!(view.second_ask, Some(PriceLevel::new(dec!(10002), -8)));
        assert_eq!(view.mid_price(), Some(dec!(9999.5)));
        assert_eq!(view.spread(), Some(dec!(3)));
        assert_eq!(view.bid_volume(), 12);
        assert_eq!(view.ask_volume(), 12);
    }

    #[test]
    fn test_many_levels_pick_extremes() {
        let view = LevelTwoView::from_depth(&bids(&[(5, 1), (9, 1), (1, 1), (8, 1), (3, 1)]));
        assert_eq!(view.best_bid.map(|l| l.price), Some(dec!(9)));
        assert_eq!(view.second_bid.map(|l| l.price), Some(dec!(8)));

        let view = LevelTwoView::from_depth(&asks(&[(5, -1), (9, -1), (2, -1), (8, -1), (3, -1)]));
        assert_eq!(view.best_ask.map(|l| l.price), Some(dec!(2)));
        assert_eq!(view.second_ask.map(|l| l.price), Some(dec!(3)));
    }

    proptest! {
        #[test]
        fn bids_strictly_descending(prices in proptest::collection::hash_set(-1000i64..1000, 0..40)) {
            let levels: Vec<(i64, i64)> = prices.iter().map(|p| (*p, 1)).collect();
            let view = LevelTwoView::from_depth(&bids(&levels));
            let mut sorted: Vec<i64> = prices.into_iter().collect();
            sorted.sort_unstable_by(|a, b| b.cmp(a));

            prop_assert_eq!(view.best_bid.map(|l| l.price), sorted.first().map(|p| Decimal::from(*p)));
            prop_assert_eq!(view.second_bid.map(|l| l.price), sorted.get(1).map(|p| Decimal::from(*p)));
            if let (Some(a), Some(b)) = (view.best_bid, view.second_bid) {
                prop_assert!(a.price > b.price);
            }
        }

        #[test]
        fn asks_strictly_ascending(prices in proptest::collection::hash_set(-1000i64..1000, 0..40)) {
            let levels: Vec<(i64, i64)> = prices.iter().map(|p| (*p, -1)).collect();
            let view = LevelTwoView::from_depth(&asks(&levels));
            let mut sorted: Vec<i64> = prices.into_iter().collect();
            sorted.sort_unstable();

            prop_assert_eq!(view.best_ask.map(|l| l.price), sorted.first().map(|p| Decimal::from(*p)));
            prop_assert_eq!(view.second_ask.map(|l| l.price), sorted.get(1).map(|p| Decimal::from(*p)));
            if let (Some(a), Some(b)) = (view.best_ask, view.second_ask) {
                prop_assert!(a.price < b.price);
            }
        }
    }
}
