//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let search_keys = format!("{}/{}", keys.search, keys.insert);
        let help_text = vec![
            section("Searching"),
            Line::from(""),
            entry("Enter", "Look up the typed creature"),
            entry("Tab", "Accept highlighted suggestion"),
            entry("↑/↓", "Cycle suggestions"),
            entry("Ctrl+u", "Clear input"),
            entry("Esc", "Leave the search box"),
            Line::from(""),
            section("Commands"),
            Line::from(""),
            entry(&search_keys, "Search"),
            entry(&keys.refresh, "Repeat last lookup"),
            entry(&keys.help, "Toggle help"),
            entry(&keys.quit, "Quit"),
            entry("Ctrl+c", "Quit from anywhere"),
        ];

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )])
}

fn entry<'a>(key: &str, description: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<8}", key), Style::default().fg(Color::Cyan)),
        Span::raw(description),
    ])
}
