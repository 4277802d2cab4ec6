//! The quoting-policy extension point.

use crate::market_state::imbalance::DepthImbalance;
use crate::market_state::level_two::LevelTwoView;
use crate::market_state::rolling::RollingStatistics;
use crate::position::capacity::RemainingCapacity;
use crate::strategy::order::{Order, Side};
use crate::types::primitives::Quantity;

/// Everything a policy may look at for one instrument on one tick.
#[derive(Debug, Clone, Copy)]
pub struct PolicyInputs<'a> {
    /// Instrument being quoted.
    pub symbol: &'a str,
    /// Best two levels per side of this tick's book.
    pub level_two: &'a LevelTwoView,
    /// Rolling statistics of the top-of-book price signal.
    pub statistics: &'a RollingStatistics,
    /// This tick's depth imbalance.
    pub imbalance: DepthImbalance,
    /// Room left under the position limit.
    pub capacity: RemainingCapacity,
    /// Decimal places model prices are rounded to.
    pub price_precision: u32,
}

impl PolicyInputs<'_> {
    /// Builds an order at a model price, or `None` if the price is unusable.
    #[must_use]
    pub fn order_at(&self, side: Side, model_price: f64, size: Quantity) -> Option<Order> {
        Order::from_model_price(self.symbol, side, model_price, size, self.price_precision)
    }
}

/// A per-instrument quoting strategy.
///
/// Implementations are owned by the engine, one per instrument, and are only
/// ever called by that instrument's own tick step, so they may keep state
/// across ticks. Returning an empty vector means "no actionable signal".
pub trait QuotingPolicy: Send {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Produces this tick's orders.
    fn quote(&mut self, inputs: &PolicyInputs<'_>) -> Vec<Order>;
}

impl std::fmt::Debug for dyn QuotingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotingPolicy")
            .field("name", &self.name())
            .finish()
    }
}
