//! Per-tick results.

use std::collections::HashMap;

use crate::position::capacity::RemainingCapacity;
use crate::strategy::order::Order;
use crate::types::error::QuoterError;
use crate::types::primitives::{Symbol, Timestamp};

/// Why an instrument was or was not quoted on a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentOutcome {
    /// The policy ran and produced `orders` orders (possibly zero).
    Quoted {
        /// Number of orders emitted.
        orders: usize,
    },
    /// No seed for the rolling window is available yet.
    NoSignal,
    /// Unknown instrument passed through without quoting.
    Skipped {
        /// Capacity computed with the default limit.
        capacity: RemainingCapacity,
    },
    /// The instrument's input was rejected for this tick.
    Rejected(QuoterError),
}

impl InstrumentOutcome {
    /// Returns true if the policy was evaluated.
    #[must_use]
    pub fn is_quoted(&self) -> bool {
        matches!(self, Self::Quoted { .. })
    }

    /// Returns true if the instrument was rejected.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Orders and outcomes for every instrument of one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Timestamp of the processed snapshot.
    pub timestamp: Timestamp,
    /// Orders per instrument; every snapshot instrument has an entry.
    pub orders: HashMap<Symbol, Vec<Order>>,
    /// Outcome per instrument.
    pub outcomes: HashMap<Symbol, InstrumentOutcome>,
}

impl TickReport {
    /// Total number of orders across instruments.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }

    /// Orders for one instrument, empty if it was not in the snapshot.
    #[must_use]
    pub fn orders_for(&self, symbol: &str) -> &[Order] {
        self.orders.get(symbol).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn record(&mut self, symbol: &str, orders: Vec<Order>, outcome: InstrumentOutcome) {
        self.orders.insert(symbol.to_string(), orders);
        self.outcomes.insert(symbol.to_string(), outcome);
    }
}
