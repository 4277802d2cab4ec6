//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, traits, and macros
//! of the crate. Users can import everything they need with:
//!
//! ```rust
//! use tick_quoter::prelude::*;
//! ```

pub use crate::{Decimal, dec};

// Re-export types module
pub use crate::types::error::{QuoterError, QuoterResult};
pub use crate::types::primitives::{Price, Quantity, Symbol, Timestamp, Volume};

// Re-export market state types
pub use crate::market_state::{
    DepthImbalance, LevelTwoView, Listing, OrderDepth, PriceLevel, RollingStatistics, Trade,
    TradingState,
};

// Re-export position types
pub use crate::position::{CapacityRule, CapacityTracker, RemainingCapacity};

// Re-export strategy types
pub use crate::strategy::{
    FairValueTaker, ImbalanceMomentum, InstrumentClass, MeanReversion, Order, PolicyInputs,
    QuotingPolicy, Side,
};

// Re-export engine types
pub use crate::engine::{
    EngineConfig, InstrumentConfig, InstrumentOutcome, QuotingEngine, TickReport,
    UnknownInstrumentPolicy,
};
