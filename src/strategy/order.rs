//! Orders emitted by the quoting policies.

use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use tracing::debug;

use crate::Decimal;
use crate::types::primitives::{Price, Quantity, Symbol};

#[cfg(feature = "serde")]
use pretty_simple_display::DebugPretty;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order side (buy or sell).
///
/// # Example
///
/// ```rust
/// use tick_quoter::strategy::Side;
///
/// let side = Side::Buy;
/// assert!(side.is_buy());
/// assert_eq!(side.opposite(), Side::Sell);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// Buy order (bid).
    Buy,
    /// Sell order (ask).
    Sell,
}

impl Side {
    /// Returns true if this is a buy order.
    #[must_use]
    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }

    /// Returns true if this is a sell order.
    #[must_use]
    pub fn is_sell(&self) -> bool {
        matches!(self, Side::Sell)
    }

    /// Returns the opposite side.
    #[must_use]
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// A limit order for one instrument.
///
/// The sign of `quantity` carries the side: positive buys, negative sells.
///
/// # Example
///
/// ```rust
/// use tick_quoter::strategy::{Order, Side};
/// use tick_quoter::dec;
///
/// let order = Order::new("PEARLS", Side::Sell, dec!(10002), 20);
/// assert_eq!(order.quantity, -20);
/// assert_eq!(order.to_string(), "SELL 20x PEARLS @ 10002");
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(not(feature = "serde"), derive(Debug))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize, DebugPretty))]
pub struct Order {
    /// Instrument to trade.
    pub symbol: Symbol,
    /// Limit price.
    pub price: Price,
    /// Signed quantity.
    pub quantity: Quantity,
}

impl Order {
    /// Creates an order of unsigned `size` on `side`.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, side: Side, price: Price, size: Quantity) -> Self {
        let size = size.saturating_abs();
        Self {
            symbol: symbol.into(),
            price,
            quantity: if side.is_buy() { size } else { -size },
        }
    }

    /// Creates an order from a model price, rounded to `precision` decimal
    /// places.
    ///
    /// Returns `None` when the model price is not finite or does not fit a
    /// `Decimal`; such quotes are suppressed rather than sent.
    #[must_use]
    pub fn from_model_price(
        symbol: &str,
        side: Side,
        model_price: f64,
        size: Quantity,
        precision: u32,
    ) -> Option<Self> {
        let price = model_price
            .is_finite()
            .then(|| Decimal::from_f64(model_price))
            .flatten();

        match price {
            Some(price) => Some(Self::new(symbol, side, price.round_dp(precision), size)),
            None => {
                debug!(
                    symbol = %symbol,
                    side = %side,
                    model_price,
                    "suppressing quote with unusable price"
                );
                None
            }
        }
    }

    /// Side implied by the quantity sign.
    #[must_use]
    pub fn side(&self) -> Side {
        if self.quantity >= 0 { Side::Buy } else { Side::Sell }
    }

    /// Unsigned order size.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.quantity.unsigned_abs()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x {} @ {}",
            self.side(),
            self.size(),
            self.symbol,
            self.price
        )
    }
}
