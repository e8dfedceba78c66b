//! Creature market data and trading tip rules.

mod snapshot;
mod tips;

pub use snapshot::{
    Demand, MarketSnapshot, MarketSnapshotBuilder, NOT_AVAILABLE, Stability, UNKNOWN,
    format_timestamp,
};
pub use tips::{
    CombinedScorePolicy, IndependentAxisPolicy, NO_TIPS, TipPolicy, TipPolicyKind,
    generate_trading_tips,
};
