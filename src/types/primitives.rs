//! Primitive type aliases for market making domain concepts.

use crate::Decimal;

/// Instrument identifier, e.g. `"PEARLS"`.
pub type Symbol = String;

/// Limit price of a book level or an order.
pub type Price = Decimal;

/// Resting volume at a book level.
///
/// Buy-side volumes are positive, sell-side volumes are negative magnitudes.
pub type Volume = i64;

/// Signed order or position quantity.
///
/// Positive values indicate buys / long positions, negative values indicate
/// sells / short positions.
pub type Quantity = i64;

/// Opaque tick timestamp supplied by the exchange harness.
pub type Timestamp = u64;
