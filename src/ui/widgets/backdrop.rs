//! Animated line backdrop.

use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Line},
};

use crate::state::{BACKDROP_HEIGHT, BACKDROP_WIDTH, Store};

/// Random dim strokes drawn behind the panels.
pub struct Backdrop;

impl Backdrop {
    /// Render the current backdrop frame.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        if !store.backdrop.enabled || store.backdrop.strokes.is_empty() {
            return;
        }

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, BACKDROP_WIDTH])
            .y_bounds([0.0, BACKDROP_HEIGHT])
            .paint(|ctx| {
                for stroke in &store.backdrop.strokes {
                    let (r, g, b) = stroke.color;
                    ctx.draw(&Line::new(
                        stroke.x1,
                        stroke.y1,
                        stroke.x2,
                        stroke.y2,
                        Color::Rgb(r, g, b),
                    ));
                }
            });

        frame.render_widget(canvas, area);
    }
}
