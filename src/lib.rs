//! # cosvalue - Creatures of Sonaria value lookup
//!
//! Scrapes a creature's trade value, demand and stability from its value
//! page and turns demand and stability into trading tips.
//!
//! ## Architecture
//!
//! - **Market**: snapshot type and tip rule policies
//! - **Fetch**: HTTP fetcher and value page parser
//! - **History**: plain-text history of looked-up names
//! - **State**: centralized store updated only through actions
//! - **Controller**: runs lookups in the background and applies results
//! - **Events**: input handling and event processing
//! - **UI**: layout and rendering logic
//! - **Config**: configuration management

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod fetch;
pub mod history;
pub mod market;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use controller::{Controller, LookupTask};
pub use error::{Error, FetchError, FetchErrorKind, Result};
pub use fetch::{SnapshotFetcher, SnapshotSource};
pub use history::HistoryStore;
pub use market::{MarketSnapshot, TipPolicy, TipPolicyKind, generate_trading_tips};
