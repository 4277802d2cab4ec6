//! Quoting policies.
//!
//! Each instrument is assigned an [`InstrumentClass`] which resolves to a
//! [`QuotingPolicy`] implementation:
//!
//! | Class        | Policy                | Orders per tick |
//! |--------------|-----------------------|-----------------|
//! | `Stable`     | [`MeanReversion`]     | 0 - 2           |
//! | `Trending`   | [`ImbalanceMomentum`] | 0 - 1           |
//! | `FairValue`  | [`FairValueTaker`]    | 0 - 2           |
//!
//! Custom policies implement [`QuotingPolicy`] and are installed with
//! [`QuotingEngine::register_policy`](crate::engine::QuotingEngine::register_policy).

/// Instrument classification and policy parameters.
pub mod config;

/// Spread-crossing against a smoothed fair value.
pub mod fair_value;

/// Imbalance-triggered momentum quoting.
pub mod imbalance_momentum;

/// Two-sided quoting around the rolling mean.
pub mod mean_reversion;

/// Orders and sides.
pub mod order;

/// The policy trait and its per-tick inputs.
pub mod policy;

pub use config::InstrumentClass;
pub use fair_value::FairValueTaker;
pub use imbalance_momentum::ImbalanceMomentum;
pub use mean_reversion::MeanReversion;
pub use order::{Order, Side};
pub use policy::{PolicyInputs, QuotingPolicy};
