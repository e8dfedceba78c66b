//! Animated line backdrop.

use rand::Rng;

/// Logical width of the backdrop canvas.
pub const BACKDROP_WIDTH: f64 = 100.0;
/// Logical height of the backdrop canvas.
pub const BACKDROP_HEIGHT: f64 = 100.0;
/// Maximum offset of a stroke end from its start, per axis.
const STROKE_REACH: f64 = 12.0;

/// One short line in the backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Dim grey-ish RGB colour, each channel in 50..=100.
    pub color: (u8, u8, u8),
}

/// Backdrop state, regenerated every tick.
#[derive(Debug, Default)]
pub struct BackdropState {
    /// Whether the backdrop is drawn at all.
    pub enabled: bool,
    /// Strokes per frame.
    pub stroke_count: usize,
    /// Current frame.
    pub strokes: Vec<Stroke>,
}

impl BackdropState {
    /// Create a backdrop.
    pub fn new(enabled: bool, stroke_count: usize) -> Self {
        Self {
            enabled,
            stroke_count,
            strokes: Vec::new(),
        }
    }

    /// Replace the frame with fresh random strokes.
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R) {
        if !self.enabled {
            self.strokes.clear();
            return;
        }

        self.strokes = (0..self.stroke_count)
            .map(|_| {
                let x1 = rng.gen_range(0.0..=BACKDROP_WIDTH);
                let y1 = rng.gen_range(0.0..=BACKDROP_HEIGHT);
                Stroke {
                    x1,
                    y1,
                    x2: x1 + rng.gen_range(-STROKE_REACH..=STROKE_REACH),
                    y2: y1 + rng.gen_range(-STROKE_REACH..=STROKE_REACH),
                    color: (
                        rng.gen_range(50..=100),
                        rng.gen_range(50..=100),
                        rng.gen_range(50..=100),
                    ),
                }
            })
            .collect();
    }
}
