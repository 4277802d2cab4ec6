//! Engine configuration.

use std::collections::HashMap;

use crate::position::capacity::CapacityRule;
use crate::strategy::config::InstrumentClass;
use crate::types::error::{QuoterError, QuoterResult};
use crate::types::primitives::{Quantity, Symbol};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do with instruments that appear in a snapshot but are not
/// configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnknownInstrumentPolicy {
    /// Compute capacity with the default limit, skip quoting.
    #[default]
    PassThrough,
    /// Report the instrument as rejected.
    Reject,
}

/// Per-instrument settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstrumentConfig {
    /// Selects the quoting policy.
    pub class: InstrumentClass,
    /// Overrides the engine-wide position limit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub position_limit: Option<Quantity>,
    /// Initial value of the rolling window (and fair value, where used).
    ///
    /// Without a seed the window is seeded from the first observed book.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed_price: Option<f64>,
}

impl InstrumentConfig {
    /// Creates a config for `class` with engine-wide defaults.
    #[must_use]
    pub fn new(class: InstrumentClass) -> Self {
        Self {
            class,
            position_limit: None,
            seed_price: None,
        }
    }

    /// Sets a per-instrument position limit.
    #[must_use]
    pub fn with_position_limit(mut self, limit: Quantity) -> Self {
        self.position_limit = Some(limit);
        self
    }

    /// Sets the seed price.
    #[must_use]
    pub fn with_seed_price(mut self, seed: f64) -> Self {
        self.seed_price = Some(seed);
        self
    }
}

/// Engine-wide configuration.
///
/// # Example
///
/// ```rust
/// use tick_quoter::engine::{EngineConfig, InstrumentConfig};
/// use tick_quoter::strategy::InstrumentClass;
///
/// let config = EngineConfig::new(20, 10)
///     .unwrap()
///     .with_instrument("PEARLS", InstrumentConfig::new(InstrumentClass::stable()))
///     .with_instrument("BANANAS", InstrumentConfig::new(InstrumentClass::trending()));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Symmetric position limit applied to every instrument without an
    /// override.
    pub position_limit: Quantity,
    /// Length of each instrument's rolling window.
    pub window_capacity: usize,
    /// Decimal places model prices are rounded to.
    pub price_precision: u32,
    /// How position and fills consume the limit.
    pub capacity_rule: CapacityRule,
    /// Handling of unconfigured instruments.
    pub unknown_instruments: UnknownInstrumentPolicy,
    /// Configured instrument set.
    pub instruments: HashMap<Symbol, InstrumentConfig>,
}

impl EngineConfig {
    /// Default position limit.
    pub const DEFAULT_POSITION_LIMIT: Quantity = 20;
    /// Default rolling window length.
    pub const DEFAULT_WINDOW_CAPACITY: usize = 10;
    /// Default price rounding.
    pub const DEFAULT_PRICE_PRECISION: u32 = 4;
    /// Largest scale a `Decimal` can carry.
    pub const MAX_PRICE_PRECISION: u32 = 28;

    /// Creates a configuration with no instruments.
    ///
    /// # Arguments
    ///
    /// * `position_limit` - Default symmetric position limit, must be positive
    /// * `window_capacity` - Length of each rolling window, must be non-zero
    ///
    /// # Errors
    ///
    /// Returns `QuoterError::InvalidConfiguration` if `position_limit` is not
    /// positive or `window_capacity` is zero.
    pub fn new(position_limit: Quantity, window_capacity: usize) -> QuoterResult<Self> {
        let config = Self {
            position_limit,
            window_capacity,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Adds or replaces an instrument.
    #[must_use]
    pub fn with_instrument(mut self, symbol: impl Into<Symbol>, config: InstrumentConfig) -> Self {
        self.instruments.insert(symbol.into(), config);
        self
    }

    /// Sets the capacity rule.
    #[must_use]
    pub fn with_capacity_rule(mut self, rule: CapacityRule) -> Self {
        self.capacity_rule = rule;
        self
    }

    /// Sets the unknown-instrument handling.
    #[must_use]
    pub fn with_unknown_instruments(mut self, policy: UnknownInstrumentPolicy) -> Self {
        self.unknown_instruments = policy;
        self
    }

    /// Sets the price rounding.
    #[must_use]
    pub fn with_price_precision(mut self, precision: u32) -> Self {
        self.price_precision = precision;
        self
    }

    /// Position limit that applies to `symbol`.
    #[must_use]
    pub fn limit_for(&self, symbol: &str) -> Quantity {
        self.instruments
            .get(symbol)
            .and_then(|i| i.position_limit)
            .unwrap_or(self.position_limit)
    }

    /// Checks every engine-wide and per-instrument parameter.
    ///
    /// Policy parameters are checked when the engine builds the policies.
    ///
    /// # Errors
    ///
    /// Returns `QuoterError::InvalidConfiguration` naming the first offending
    /// parameter.
    pub fn validate(&self) -> QuoterResult<()> {
        if self.position_limit <= 0 {
            return Err(QuoterError::InvalidConfiguration(
                "position_limit must be positive".to_string(),
            ));
        }

        if self.window_capacity == 0 {
            return Err(QuoterError::InvalidConfiguration(
                "window_capacity must be greater than 0".to_string(),
            ));
        }

        if self.price_precision > Self::MAX_PRICE_PRECISION {
            return Err(QuoterError::InvalidConfiguration(format!(
                "price_precision must be at most {}",
                Self::MAX_PRICE_PRECISION
            )));
        }

        for (symbol, instrument) in &self.instruments {
            if instrument.position_limit.is_some_and(|l| l <= 0) {
                return Err(QuoterError::InvalidConfiguration(format!(
                    "position_limit for {symbol} must be positive"
                )));
            }

            if instrument.seed_price.is_some_and(|s| !s.is_finite()) {
                return Err(QuoterError::InvalidConfiguration(format!(
                    "seed_price for {symbol} must be finite"
                )));
            }
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            position_limit: Self::DEFAULT_POSITION_LIMIT,
            window_capacity: Self::DEFAULT_WINDOW_CAPACITY,
            price_precision: Self::DEFAULT_PRICE_PRECISION,
            capacity_rule: CapacityRule::default(),
            unknown_instruments: UnknownInstrumentPolicy::default(),
            instruments: HashMap::new(),
        }
    }
}
