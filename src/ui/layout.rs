//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Search input area.
    pub search_area: Rect,
    /// Snapshot fields area.
    pub snapshot_area: Rect,
    /// Trading tips area.
    pub tips_area: Rect,
    /// Everything below the status bar, behind the panels.
    pub backdrop_area: Rect,
    /// Notification area (overlaid).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Length(3), // Search input
                Constraint::Min(0),    // Panels
            ])
            .split(area);

        let panels = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[2]);

        let backdrop_area = Rect {
            y: chunks[1].y,
            height: area.height.saturating_sub(chunks[0].height),
            ..area
        };

        Self {
            status_area: chunks[0],
            search_area: chunks[1],
            snapshot_area: panels[0],
            tips_area: panels[1],
            backdrop_area,
            notification_area: notification_rect(area),
        }
    }
}

/// Area for a notification popup: half the width, four rows, centered.
fn notification_rect(area: Rect) -> Rect {
    let height = 4.min(area.height);
    Rect {
        x: area.x + area.width / 4,
        y: area.y + (area.height / 2).saturating_sub(2),
        width: area.width / 2,
        height,
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Area directly below `anchor` for a dropdown of `rows` entries.
pub fn dropdown_rect(anchor: Rect, rows: u16, bounds: Rect) -> Rect {
    let y = anchor.y + anchor.height;
    let available = (bounds.y + bounds.height).saturating_sub(y);
    Rect {
        x: anchor.x + 1,
        y,
        width: anchor.width.saturating_sub(2).min(40),
        height: (rows + 2).min(available),
    }
}
