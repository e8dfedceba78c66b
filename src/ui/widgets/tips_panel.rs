//! Trading tips panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::Store;

/// Tips for the last lookup, one per line.
pub struct TipsPanel;

impl TipsPanel {
    /// Render the tips panel.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let lines: Vec<Line> = store
            .lookup
            .tips
            .iter()
            .map(|tip| {
                Line::from(vec![
                    Span::styled("• ", Style::default().fg(Color::Green)),
                    Span::raw(tip.as_str()),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Trading Tips ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}
