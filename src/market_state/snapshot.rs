//! Per-tick market snapshot supplied by the exchange harness.

use std::collections::HashMap;

use crate::types::error::{QuoterError, QuoterResult};
use crate::types::primitives::{Price, Quantity, Symbol, Timestamp, Volume};

#[cfg(feature = "serde")]
use pretty_simple_display::{DebugPretty, DisplaySimple};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Resting buy and sell orders for one instrument at one instant.
///
/// Keys are price levels and carry no ordering. Buy volumes are positive,
/// sell volumes are negative magnitudes available to sell into.
///
/// # Example
///
/// ```rust
/// use tick_quoter::market_state::OrderDepth;
/// use tick_quoter::dec;
///
/// let depth = OrderDepth::new()
///     .with_buy(dec!(9998), 7)
///     .with_sell(dec!(10001), -4);
/// assert!(depth.validate("PEARLS").is_ok());
/// ```
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize, DebugPretty, DisplaySimple)
)]
pub struct OrderDepth {
    /// Price to positive resting volume.
    pub buy_orders: HashMap<Price, Volume>,
    /// Price to negative resting volume.
    pub sell_orders: HashMap<Price, Volume>,
}

impl OrderDepth {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a buy level.
    #[must_use]
    pub fn with_buy(mut self, price: Price, volume: Volume) -> Self {
        self.buy_orders.insert(price, volume);
        self
    }

    /// Adds (or replaces) a sell level. `volume` is expected to be negative.
    #[must_use]
    pub fn with_sell(mut self, price: Price, volume: Volume) -> Self {
        self.sell_orders.insert(price, volume);
        self
    }

    /// Returns true if neither side has any level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buy_orders.is_empty() && self.sell_orders.is_empty()
    }

    /// Checks the sign conventions of both sides.
    ///
    /// # Errors
    ///
    /// Returns `QuoterError::MalformedBook` if a buy level carries a negative
    /// volume or a sell level carries a positive volume.
    pub fn validate(&self, symbol: &str) -> QuoterResult<()> {
        if let Some((price, volume)) = self.buy_orders.iter().find(|(_, v)| **v < 0) {
            return Err(QuoterError::MalformedBook {
                symbol: symbol.to_string(),
                reason: format!("negative buy volume {volume} at {price}"),
            });
        }

        if let Some((price, volume)) = self.sell_orders.iter().find(|(_, v)| **v > 0) {
            return Err(QuoterError::MalformedBook {
                symbol: symbol.to_string(),
                reason: format!("positive sell volume {volume} at {price}"),
            });
        }

        Ok(())
    }
}

/// Static listing metadata. Carried for the harness, unused by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Listing {
    /// Tradable symbol.
    pub symbol: Symbol,
    /// Underlying product.
    pub product: String,
    /// Currency the product is denominated in.
    pub denomination: String,
}

impl Listing {
    /// Creates a listing.
    #[must_use]
    pub fn new(
        symbol: impl Into<Symbol>,
        product: impl Into<String>,
        denomination: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            product: product.into(),
            denomination: denomination.into(),
        }
    }
}

/// An executed trade, either our own fill or a third-party market trade.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trade {
    /// Traded symbol.
    pub symbol: Symbol,
    /// Execution price.
    pub price: Price,
    /// Signed quantity from our point of view (positive = bought).
    pub quantity: Quantity,
    /// Buyer identifier, empty when unknown.
    pub buyer: String,
    /// Seller identifier, empty when unknown.
    pub seller: String,
    /// Execution timestamp.
    pub timestamp: Timestamp,
}

impl Trade {
    /// Creates a trade with anonymous counterparties.
    #[must_use]
    pub fn new(
        symbol: impl Into<Symbol>,
        price: Price,
        quantity: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity,
            buyer: String::new(),
            seller: String::new(),
            timestamp,
        }
    }
}

/// Everything the harness hands to the engine for one tick.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize, DebugPretty, DisplaySimple)
)]
pub struct TradingState {
    /// Tick timestamp, monotonically increasing.
    pub timestamp: Timestamp,
    /// Listing metadata per symbol.
    pub listings: HashMap<Symbol, Listing>,
    /// Order book snapshot per symbol.
    pub order_depths: HashMap<Symbol, OrderDepth>,
    /// Our fills so far in the current evaluation window.
    pub own_trades: HashMap<Symbol, Vec<Trade>>,
    /// Third-party trades, reserved for the harness.
    pub market_trades: HashMap<Symbol, Vec<Trade>>,
    /// Current signed position; absent for never-traded symbols.
    pub position: HashMap<Symbol, Quantity>,
    /// Free-form observations, reserved for the harness.
    pub observations: HashMap<String, i64>,
}

impl TradingState {
    /// Creates an empty state for the given tick.
    #[must_use]
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    /// Sets the order book of a symbol.
    #[must_use]
    pub fn with_order_depth(mut self, symbol: impl Into<Symbol>, depth: OrderDepth) -> Self {
        self.order_depths.insert(symbol.into(), depth);
        self
    }

    /// Sets the current position of a symbol.
    #[must_use]
    pub fn with_position(mut self, symbol: impl Into<Symbol>, quantity: Quantity) -> Self {
        self.position.insert(symbol.into(), quantity);
        self
    }

    /// Appends one of our own fills.
    #[must_use]
    pub fn with_own_trade(mut self, trade: Trade) -> Self {
        self.own_trades
            .entry(trade.symbol.clone())
            .or_default()
            .push(trade);
        self
    }

    /// Returns the current position of a symbol, if it was ever traded.
    #[must_use]
    pub fn position_of(&self, symbol: &str) -> Option<Quantity> {
        self.position.get(symbol).copied()
    }

    /// Returns our fills for a symbol in the current window.
    #[must_use]
    pub fn own_trades_for(&self, symbol: &str) -> &[Trade] {
        self.own_trades.get(symbol).map_or(&[], Vec::as_slice)
    }
}
