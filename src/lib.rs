//! Tick Quoter
//!
//! A per-tick market-making decision engine. Given a snapshot of resting buy
//! and sell orders for a set of instruments, it produces limit orders (price,
//! signed quantity) to be matched against the visible book, subject to a
//! per-instrument position limit.
//!
//! # Pipeline
//!
//! For every instrument on every tick:
//!
//! ```text
//! OrderDepth -> LevelTwoView -> RollingStatistics (+ DepthImbalance)
//!            -> RemainingCapacity -> QuotingPolicy -> Vec<Order>
//! ```
//!
//! - **Level two**: best two bids and asks, missing levels are `None`
//! - **Rolling statistics**: O(1) mean and population variance over a fixed
//!   window of top-of-book prices
//! - **Depth imbalance**: `(bid - ask) / (bid + ask)` over the two best levels
//! - **Capacity**: room left under the position limit after this window's fills
//! - **Policies**: mean reversion for stable instruments, imbalance momentum
//!   for trending ones, a fair-value taker, or any custom [`QuotingPolicy`]
//!
//! # Modules
//!
//! - [`market_state`]: snapshot records and the signals derived from them
//! - [`position`]: position-limit bookkeeping
//! - [`strategy`]: quoting policies and orders
//! - [`engine`]: the per-tick facade and its configuration
//! - [`types`]: common types and error definitions
//!
//! # Example
//!
//! ```rust
//! use tick_quoter::prelude::*;
//!
//! let config = EngineConfig::default()
//!     .with_instrument("PEARLS", InstrumentConfig::new(InstrumentClass::stable()))
//!     .with_instrument("BANANAS", InstrumentConfig::new(InstrumentClass::trending()));
//! let mut engine = QuotingEngine::new(config).unwrap();
//!
//! let state = TradingState::new(1000)
//!     .with_order_depth(
//!         "PEARLS",
//!         OrderDepth::new().with_buy(dec!(9998), 7).with_sell(dec!(10001), -4),
//!     )
//!     .with_position("PEARLS", 18);
//!
//! let orders = engine.run(&state);
//! assert_eq!(orders["PEARLS"].len(), 2);
//! ```
//!
//! [`QuotingPolicy`]: strategy::QuotingPolicy

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Per-tick engine facade.
///
/// This module provides:
/// - `QuotingEngine`, the single per-tick entry point
/// - Engine and per-instrument configuration
/// - Per-tick reports of orders and outcomes
pub mod engine;

/// Market state: snapshots and derived signals.
///
/// This module provides:
/// - Order book snapshots and trades
/// - Level-two extraction
/// - Depth imbalance
/// - Rolling mean/variance
pub mod market_state;

/// Position-limit bookkeeping.
///
/// This module handles:
/// - Remaining buy/sell capacity under a position limit
/// - The accounting rule for existing position and fills
pub mod position;

/// Prelude module for convenient imports.
pub mod prelude;

/// Quoting policies.
///
/// This module provides:
/// - The `QuotingPolicy` trait
/// - Mean-reversion, imbalance-momentum and fair-value policies
/// - Orders and sides
pub mod strategy;

/// Common types and error definitions.
///
/// This module contains:
/// - Shared type aliases
/// - Error types using thiserror
pub mod types;
