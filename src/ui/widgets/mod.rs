//! TUI widgets.

mod backdrop;
mod help;
mod notifications;
mod search_bar;
mod snapshot_panel;
mod status_bar;
mod suggestions;
mod tips_panel;

pub use backdrop::Backdrop;
pub use help::HelpPanel;
pub use notifications::render_notification;
pub use search_bar::SearchBar;
pub use snapshot_panel::SnapshotPanel;
pub use status_bar::StatusBar;
pub use suggestions::SuggestionList;
pub use tips_panel::TipsPanel;
