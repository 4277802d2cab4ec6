//! Market state: the per-tick snapshot and the signals derived from it.
//!
//! This module provides:
//! - The snapshot records handed over by the exchange harness
//! - Level-two extraction of the best two levels per side
//! - Depth imbalance from top-of-book volume
//! - The rolling mean/variance window of the top-of-book price signal

/// Depth imbalance estimator.
pub mod imbalance;

/// Best-two-levels view of a book.
pub mod level_two;

/// Fixed-window streaming statistics.
pub mod rolling;

/// Snapshot records supplied by the harness.
pub mod snapshot;

pub use imbalance::DepthImbalance;
pub use level_two::{LevelTwoView, PriceLevel};
pub use rolling::RollingStatistics;
pub use snapshot::{Listing, OrderDepth, Trade, TradingState};
