//! Paint surface abstraction and per-widget drawing resources.

use ratatui::layout::{Position, Rect};
use ratatui::style::Color;

/// Fixed font description used for the digit text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: &'static str,
    /// Nominal glyph height in pixels
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub const fn new(family: &'static str, size: f32, bold: bool) -> Self {
        Self { family, size, bold }
    }

    /// Same font at `factor` times the size
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            size: self.size * factor,
            ..self
        }
    }
}

/// Solid fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub color: Color,
}

impl Brush {
    pub const fn solid(color: Color) -> Self {
        Self { color }
    }
}

/// Drawing primitives a host must provide to paint a widget.
///
/// Coordinates are widget-local pixels.
pub trait PaintSurface {
    /// Fill a rectangle, covering anything painted there before
    fn fill_rect(&mut self, rect: Rect, brush: &Brush);

    /// Fill a convex polygon
    fn fill_polygon(&mut self, points: &[Position], brush: &Brush);

    /// Fill `text` centered inside `bounds`
    fn fill_text(&mut self, text: &str, font: &Font, bounds: Rect, brush: &Brush);
}

/// Font and brushes owned by one widget for its whole lifetime
#[derive(Debug)]
pub struct PaintResources {
    pub font: Font,
    pub background: Brush,
    pub arrow: Brush,
    pub text: Brush,
}

impl PaintResources {
    /// Acquire the single visual variant's resources
    pub fn acquire() -> Self {
        tracing::trace!("Acquiring digit paint resources");
        Self {
            font: Font::new("seven-segment", 12.0, true),
            background: Brush::solid(Color::Reset),
            arrow: Brush::solid(Color::Cyan),
            text: Brush::solid(Color::White),
        }
    }

    /// Release the resources. Consumes `self` so it can only happen once.
    pub fn release(self) {
        tracing::trace!(font = self.font.family, "Releasing digit paint resources");
        #[cfg(test)]
        recording::note_release();
    }
}
