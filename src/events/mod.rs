//! Event handling for cosvalue.
//!
//! Terminal input is turned into [`crate::state::Action`]s; a poll timeout
//! becomes a tick that drives the backdrop and notification expiry.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
