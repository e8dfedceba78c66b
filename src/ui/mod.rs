//! UI rendering using ratatui.
//!
//! Rendering reads the [`Store`] and never changes it.

mod layout;
mod widgets;

pub use layout::{Layout, centered_rect};
pub use widgets::{
    Backdrop, HelpPanel, SearchBar, SnapshotPanel, StatusBar, SuggestionList, TipsPanel,
};

use crate::state::Store;
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area());

        Backdrop::render(frame, layout.backdrop_area, store);

        if store.ui.show_status_bar {
            StatusBar::render(frame, layout.status_area, store);
        }
        SearchBar::render(frame, layout.search_area, store);
        SnapshotPanel::render(frame, layout.snapshot_area, store);
        TipsPanel::render(frame, layout.tips_area, store);

        // Dropdown overlays the panels
        SuggestionList::render(frame, layout.search_area, store);

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), &store.keys);
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}
