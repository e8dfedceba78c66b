//! Creature value page fetching.
//!
//! One GET per lookup against `<base>/<slug>-value-creatures-of-<series>`,
//! parsed into a [`MarketSnapshot`](crate::market::MarketSnapshot).

mod client;
mod page;

pub use client::{
    SnapshotFetcher, SnapshotFetcherBuilder, SnapshotSource, creature_slug, snapshot_url,
};
pub use page::parse_snapshot;

#[cfg(test)]
pub use client::MockSnapshotSource;
