//! The per-tick engine facade.
//!
//! [`QuotingEngine::run`] is the single entry point. For every instrument in
//! the snapshot it runs, in order:
//!
//! 1. book validation and level-two extraction,
//! 2. the rolling-window update with each present top-of-book price,
//! 3. depth imbalance,
//! 4. remaining capacity under the position limit,
//! 5. the instrument's quoting policy.
//!
//! Instruments are independent: a fault in one is reported for that
//! instrument only and never prevents the others from being quoted.

/// Engine configuration.
pub mod config;

/// Per-tick results.
pub mod report;

pub use config::{EngineConfig, InstrumentConfig, UnknownInstrumentPolicy};
pub use report::{InstrumentOutcome, TickReport};

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info, warn};

use crate::market_state::imbalance::DepthImbalance;
use crate::market_state::level_two::LevelTwoView;
use crate::market_state::rolling::RollingStatistics;
use crate::market_state::snapshot::{OrderDepth, TradingState};
use crate::position::capacity::CapacityTracker;
use crate::strategy::order::Order;
use crate::strategy::policy::{PolicyInputs, QuotingPolicy};
use crate::types::error::{QuoterError, QuoterResult};
use crate::types::primitives::{Price, Symbol};

/// State the engine keeps for one instrument across ticks.
#[derive(Debug)]
struct InstrumentState {
    policy: Box<dyn QuotingPolicy>,
    capacity: CapacityTracker,
    seed: Option<f64>,
    statistics: Option<RollingStatistics>,
}

/// Per-tick market-making decision engine.
///
/// # Example
///
/// ```rust
/// use tick_quoter::engine::{EngineConfig, InstrumentConfig, QuotingEngine};
/// use tick_quoter::market_state::{OrderDepth, TradingState};
/// use tick_quoter::strategy::InstrumentClass;
/// use tick_quoter::dec;
///
/// let config = EngineConfig::new(20, 10).unwrap().with_instrument(
///     "PEARLS",
///     InstrumentConfig::new(InstrumentClass::stable()).with_seed_price(10000.0),
/// );
/// let mut engine = QuotingEngine::new(config).unwrap();
///
/// let state = TradingState::new(1000).with_order_depth(
///     "PEARLS",
///     OrderDepth::new().with_buy(dec!(9998), 7).with_sell(dec!(10001), -4),
/// );
/// let orders = engine.run(&state);
///
/// assert_eq!(orders["PEARLS"].len(), 2);
/// assert_eq!(orders["PEARLS"][0].quantity, 20);
/// assert_eq!(orders["PEARLS"][1].quantity, -20);
/// ```
#[derive(Debug)]
pub struct QuotingEngine {
    config: EngineConfig,
    default_capacity: CapacityTracker,
    instruments: HashMap<Symbol, InstrumentState>,
}

impl QuotingEngine {
    /// Validates `config` and builds one policy per configured instrument.
    ///
    /// # Arguments
    ///
    /// * `config` - Engine-wide settings and the configured instruments
    ///
    /// # Errors
    ///
    /// Returns `QuoterError::InvalidConfiguration` if any engine-wide,
    /// per-instrument or policy parameter is invalid.
    pub fn new(config: EngineConfig) -> QuoterResult<Self> {
        config.validate()?;

        let default_capacity = CapacityTracker::new(config.position_limit, config.capacity_rule)?;
        let mut instruments = HashMap::with_capacity(config.instruments.len());
        for (symbol, instrument) in &config.instruments {
            let state = InstrumentState {
                policy: instrument.class.build_policy(instrument.seed_price)?,
                capacity: CapacityTracker::new(config.limit_for(symbol), config.capacity_rule)?,
                seed: instrument.seed_price,
                statistics: None,
            };
            instruments.insert(symbol.clone(), state);
        }

        info!(
            instruments = instruments.len(),
            position_limit = config.position_limit,
            window_capacity = config.window_capacity,
            capacity_rule = ?config.capacity_rule,
            "quoting engine initialized"
        );

        Ok(Self {
            config,
            default_capacity,
            instruments,
        })
    }

    /// Installs a custom policy for `symbol`, replacing any configured one.
    ///
    /// An instrument that was not configured becomes known, with the default
    /// position limit and no seed price. Its rolling window is kept if it
    /// already exists.
    pub fn register_policy(&mut self, symbol: impl Into<Symbol>, policy: Box<dyn QuotingPolicy>) {
        let symbol = symbol.into();
        info!(symbol = %symbol, policy = policy.name(), "registering quoting policy");

        match self.instruments.get_mut(&symbol) {
            Some(state) => state.policy = policy,
            None => {
                self.instruments.insert(
                    symbol,
                    InstrumentState {
                        policy,
                        capacity: self.default_capacity,
                        seed: None,
                        statistics: None,
                    },
                );
            }
        }
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns true if `symbol` has a policy.
    #[must_use]
    pub fn is_known(&self, symbol: &str) -> bool {
        self.instruments.contains_key(symbol)
    }

    /// Rolling window of `symbol`, once it has been seeded.
    #[must_use]
    pub fn statistics(&self, symbol: &str) -> Option<&RollingStatistics> {
        self.instruments.get(symbol)?.statistics.as_ref()
    }

    /// Drops every rolling window; they are re-seeded on the next tick.
    pub fn reset_statistics(&mut self) {
        for state in self.instruments.values_mut() {
            state.statistics = None;
        }
    }

    /// Processes one tick and returns the orders per instrument.
    ///
    /// Every instrument in `state.order_depths` has an entry, empty when
    /// there is nothing to do or its input was rejected.
    pub fn run(&mut self, state: &TradingState) -> HashMap<Symbol, Vec<Order>> {
        self.run_with_report(state).orders
    }

    /// Processes one tick and returns orders together with per-instrument
    /// outcomes.
    pub fn run_with_report(&mut self, state: &TradingState) -> TickReport {
        let mut report = TickReport {
            timestamp: state.timestamp,
            ..TickReport::default()
        };

        for (symbol, depth) in &state.order_depths {
            match self.process_instrument(symbol, depth, state) {
                Ok((orders, outcome)) => report.record(symbol, orders, outcome),
                Err(err) => {
                    warn!(
                        symbol = %symbol,
                        timestamp = state.timestamp,
                        error = %err,
                        "instrument rejected for this tick"
                    );
                    report.record(symbol, Vec::new(), InstrumentOutcome::Rejected(err));
                }
            }
        }

        debug!(
            timestamp = state.timestamp,
            instruments = report.orders.len(),
            orders = report.order_count(),
            "tick processed"
        );

        report
    }

    fn process_instrument(
        &mut self,
        symbol: &str,
        depth: &OrderDepth,
        state: &TradingState,
    ) -> QuoterResult<(Vec<Order>, InstrumentOutcome)> {
        let position = state.position_of(symbol);
        let own_trades = state.own_trades_for(symbol);
        let window_capacity = self.config.window_capacity;
        let price_precision = self.config.price_precision;
        let unknown_instruments = self.config.unknown_instruments;
        let default_capacity = self.default_capacity;

        let Some(instrument) = self.instruments.get_mut(symbol) else {
            return match unknown_instruments {
                UnknownInstrumentPolicy::PassThrough => {
                    let capacity = default_capacity.remaining(position, own_trades);
                    warn!(symbol = %symbol, "unknown instrument passed through without quoting");
                    Ok((Vec::new(), InstrumentOutcome::Skipped { capacity }))
                }
                UnknownInstrumentPolicy::Reject => {
                    Err(QuoterError::UnknownInstrument(symbol.to_string()))
                }
            };
        };

        depth.validate(symbol)?;
        let view = LevelTwoView::from_depth(depth);
        let best_bid = view
            .best_bid
            .map(|l| price_as_f64(symbol, l.price))
            .transpose()?;
        let best_ask = view
            .best_ask
            .map(|l| price_as_f64(symbol, l.price))
            .transpose()?;

        if instrument.statistics.is_none() {
            let seed = instrument.seed.or(match (best_bid, best_ask) {
                (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
                (bid, ask) => bid.or(ask),
            });

            match seed {
                Some(seed) => {
                    debug!(symbol = %symbol, seed, "seeding rolling window");
                    instrument.statistics = Some(RollingStatistics::new(window_capacity, seed)?);
                }
                None => {
                    debug!(symbol = %symbol, "no seed for rolling window yet");
                    return Ok((Vec::new(), InstrumentOutcome::NoSignal));
                }
            }
        }

        let Some(statistics) = instrument.statistics.as_mut() else {
            return Ok((Vec::new(), InstrumentOutcome::NoSignal));
        };
        for price in [best_bid, best_ask].into_iter().flatten() {
            statistics.push(price);
        }

        let imbalance = DepthImbalance::from_level_two(&view);
        let capacity = instrument.capacity.remaining(position, own_trades);

        let inputs = PolicyInputs {
            symbol,
            level_two: &view,
            statistics,
            imbalance,
            capacity,
            price_precision,
        };
        let orders = instrument.policy.quote(&inputs);

        debug!(
            symbol = %symbol,
            policy = instrument.policy.name(),
            mean = inputs.statistics.mean(),
            variance = inputs.statistics.variance(),
            imbalance = imbalance.value,
            buy_capacity = capacity.buy,
            sell_capacity = capacity.sell,
            orders = orders.len(),
            "instrument quoted"
        );

        let outcome = InstrumentOutcome::Quoted {
            orders: orders.len(),
        };
        Ok((orders, outcome))
    }
}

fn price_as_f64(symbol: &str, price: Price) -> QuoterResult<f64> {
    price.to_f64().ok_or_else(|| QuoterError::MalformedBook {
        symbol: symbol.to_string(),
        reason: format!("price {price} is not representable as f64"),
    })
}
