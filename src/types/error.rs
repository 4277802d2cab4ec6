//! Error types for the quoting engine.

use thiserror::Error;

use crate::types::primitives::Symbol;

/// Errors raised while configuring the engine or processing an instrument.
///
/// Per-instrument errors never abort a tick: the engine converts them into an
/// empty order list and an [`InstrumentOutcome::Rejected`] entry.
///
/// [`InstrumentOutcome::Rejected`]: crate::engine::InstrumentOutcome::Rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoterError {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The order book snapshot for an instrument is not well formed.
    #[error("malformed order book for {symbol}: {reason}")]
    MalformedBook {
        /// Instrument whose snapshot was rejected.
        symbol: Symbol,
        /// Human readable description of the defect.
        reason: String,
    },

    /// The instrument is not part of the configured instrument set.
    #[error("unknown instrument: {0}")]
    UnknownInstrument(Symbol),
}

/// Result alias used throughout the crate.
pub type QuoterResult<T> = Result<T, QuoterError>;
