//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{InputMode, Store};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let mode = match store.app.input_mode {
            InputMode::Search => Span::styled(" SEARCH ", Style::default().fg(Color::Yellow)),
            InputMode::Normal => Span::styled(" NORMAL ", Style::default().fg(Color::Cyan)),
        };

        let loading = if store.lookup.is_loading() {
            Span::styled(
                " Loading... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else if let Some(at) = store.lookup.finished_at_text() {
            Span::raw(format!(" | fetched {} UTC", at))
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::Gray));

        // Create the status line
        let left_content = vec![
            Span::styled(
                " CoS Value ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            mode,
            Span::raw(" | "),
            Span::raw(format!("tips: {}", store.lookup.policy_name)),
            Span::raw(" | "),
            Span::raw(format!("history: {}", store.history.entries.len())),
            loading,
        ];

        let status_line = Line::from(left_content);

        // Calculate padding for right-aligned help hint
        let left_len: usize = status_line.spans.iter().map(|s| s.content.len()).sum();
        let right_len = help_hint.content.len();
        let padding = area
            .width
            .saturating_sub(left_len as u16 + right_len as u16);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding as usize)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
