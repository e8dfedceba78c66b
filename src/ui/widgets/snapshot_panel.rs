//! Snapshot fields panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::market::Stability;
use crate::state::{LookupStatus, Store};

/// Value, demand, stability and page date of the last lookup.
pub struct SnapshotPanel;

impl SnapshotPanel {
    /// Render the snapshot panel.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let lookup = &store.lookup;
        let label = Style::default().fg(Color::Yellow);

        let mut lines = Vec::new();
        match &lookup.status {
            LookupStatus::Loading { name, .. } => lines.push(Line::from(Span::styled(
                format!("Fetching {}...", name),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))),
            LookupStatus::Failed(err) => {
                lines.push(Line::from(Span::styled(
                    err.kind.label(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )));
                if lookup.can_retry() {
                    lines.push(Line::from(Span::styled(
                        format!("Press {} in normal mode to retry", store.keys.refresh),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            LookupStatus::Idle | LookupStatus::Loaded => {}
        }
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("Value: ", label),
            Span::raw(format!("{} {}", lookup.value_text(), store.ui.value_unit)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Demand: ", label),
            Span::raw(format!("{} {}", lookup.demand_text(), store.ui.demand_unit)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Stability: ", label),
            Span::styled(
                lookup.stability_text().to_string(),
                Style::default().fg(stability_color(lookup.stability_text())),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Last updated: {}", lookup.last_updated_text()),
            Style::default().fg(Color::DarkGray),
        )));

        let title = match &lookup.snapshot {
            Some(snapshot) => format!(" {} ", snapshot.creature_name()),
            None => " Snapshot ".to_string(),
        };

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}

fn stability_color(label: &str) -> Color {
    match Stability::parse(label) {
        Some(Stability::Rising) => Color::Green,
        Some(Stability::Stable) => Color::Cyan,
        Some(Stability::Fluctuating) => Color::Yellow,
        Some(Stability::Declining) => Color::LightRed,
        Some(Stability::VeryUnstable) => Color::Red,
        None => Color::White,
    }
}
