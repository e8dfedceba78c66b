//! Persistent history of successfully looked-up creature names.

mod store;

pub use store::{HistoryStore, suggest};
