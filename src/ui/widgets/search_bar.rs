//! Creature name input.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::Store;

/// Search input widget.
pub struct SearchBar;

impl SearchBar {
    /// Render the search input and place the cursor while editing.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let editing = store.app.is_editing();
        let border_color = if editing { Color::Yellow } else { Color::Gray };

        let content = if store.app.input_buffer.is_empty() && !editing {
            Line::from(Span::styled(
                "Press / to search for a creature",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(store.app.input_buffer.as_str())
        };

        let inner_width = area.width.saturating_sub(2);
        let (scroll, column) = visible_window(store.app.cursor_position, inner_width);

        let paragraph = Paragraph::new(content)
            .scroll((0, scroll))
            .block(
                Block::default()
                    .title(" Creature Name ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );
        frame.render_widget(paragraph, area);

        if editing && area.width > 2 && area.height > 2 {
            frame.set_cursor_position(Position::new(area.x + 1 + column, area.y + 1));
        }
    }
}

/// Horizontal scroll and cursor column that keep `cursor` inside a box
/// `width` cells wide.
fn visible_window(cursor: usize, width: u16) -> (u16, u16) {
    let width = usize::from(width.max(1));
    let scroll = cursor.saturating_sub(width - 1);
    let clamp = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    (clamp(scroll), clamp(cursor - scroll))
}
