//! Position-limit bookkeeping.
//!
//! The engine never owns position: the harness reports the current position
//! and this window's fills, and this module turns them into how much more may
//! be bought and sold without breaching the limit.

/// Remaining buy/sell capacity under a position limit.
pub mod capacity;

pub use capacity::{CapacityRule, CapacityTracker, RemainingCapacity};
