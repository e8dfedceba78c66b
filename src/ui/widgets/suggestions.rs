//! Autocomplete dropdown.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use crate::state::Store;
use crate::ui::layout::dropdown_rect;

/// Suggestions from the lookup history.
pub struct SuggestionList;

impl SuggestionList {
    /// Render below the search input when there is anything to suggest.
    pub fn render(frame: &mut Frame, anchor: Rect, store: &Store) {
        let suggestions = &store.history.suggestions;
        if suggestions.is_empty() || !store.app.is_editing() {
            return;
        }

        let area = dropdown_rect(anchor, suggestions.len() as u16, frame.area());
        if area.height < 3 {
            return;
        }
        frame.render_widget(Clear, area);

        let items: Vec<ListItem> = suggestions
            .iter()
            .map(|name| ListItem::new(name.as_str()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" History (Tab) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = ListState::default().with_selected(store.history.selected);
        frame.render_stateful_widget(list, area, &mut state);
    }
}
