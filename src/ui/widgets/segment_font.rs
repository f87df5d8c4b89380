//! Seven-segment font that turns digit text into filled polygons.

use ratatui::layout::Position;

/// Glyphs shorter than this are unreadable as segments
pub const MIN_GLYPH_HEIGHT: u16 = 5;

/// Segment masks for 0-9, bit 0 = a (top) through bit 6 = g (middle)
const DIGIT_SEGMENTS: [u8; 10] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

/// Size of one glyph cell and the stroke thickness, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub width: u16,
    pub height: u16,
    pub stroke: u16,
}

impl GlyphMetrics {
    pub fn for_height(height: u16, bold: bool) -> Self {
        let divisor = if bold { 6 } else { 8 };
        Self {
            width: (height / 2).max(3),
            height,
            stroke: (height / divisor).max(1),
        }
    }

    /// Width of `count` glyphs separated by one stroke of spacing
    pub fn run_width(&self, count: u16) -> u16 {
        if count == 0 {
            return 0;
        }
        count * self.width + (count - 1) * self.stroke
    }
}

/// Segment quads for `ch` with its top-left corner at `origin`.
///
/// Returns `None` for characters the font has no glyph for.
pub fn glyph_polygons(ch: char, origin: Position, metrics: GlyphMetrics) -> Option<Vec<[Position; 4]>> {
    let digit = ch.to_digit(10)? as usize;
    let mask = DIGIT_SEGMENTS[digit];

    let GlyphMetrics {
        width: w,
        height: h,
        stroke: t,
    } = metrics;
    let mid = h / 2;

    // (x, y, width, height) per segment a..g
    let segments = [
        (0, 0, w, t),
        (w - t, 0, t, mid),
        (w - t, mid, t, h - mid),
        (0, h - t, w, t),
        (0, mid, t, h - mid),
        (0, 0, t, mid),
        (0, mid - t / 2, w, t),
    ];

    Some(
        segments
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, &(x, y, sw, sh))| {
                let left = origin.x + x;
                let top = origin.y + y;
                [
                    Position::new(left, top),
                    Position::new(left + sw, top),
                    Position::new(left + sw, top + sh),
                    Position::new(left, top + sh),
                ]
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_counts() {
        let metrics = GlyphMetrics::for_height(12, true);
        let counts: Vec<usize> = ('0'..='9')
            .map(|c| glyph_polygons(c, Position::ORIGIN, metrics).unwrap().len())
            .collect();
        assert_eq!(counts, vec![6, 2, 5, 5, 4, 5, 6, 3, 7, 6]);
    }

    #[test]
    fn test_non_digit_has_no_glyph() {
        let metrics = GlyphMetrics::for_height(12, true);
        assert!(glyph_polygons('x', Position::ORIGIN, metrics).is_none());
        assert!(glyph_polygons(' ', Position::ORIGIN, metrics).is_none());
    }

    #[test]
    fn test_glyph_stays_in_box() {
        let metrics = GlyphMetrics::for_height(12, true);
        let origin = Position::new(4, 8);
        let quads = glyph_polygons('8', origin, metrics).unwrap();
        for quad in quads {
            for p in quad {
                assert!(p.x >= origin.x && p.x <= origin.x + metrics.width);
                assert!(p.y >= origin.y && p.y <= origin.y + metrics.height);
            }
        }
    }

    #[test]
    fn test_metrics() {
        let bold = GlyphMetrics::for_height(12, true);
        assert_eq!(bold, GlyphMetrics { width: 6, height: 12, stroke: 2 });
        assert_eq!(bold.run_width(1), 6);
        assert_eq!(bold.run_width(2), 14);
        assert_eq!(bold.run_width(0), 0);

        let small = GlyphMetrics::for_height(5, false);
        assert_eq!(small.width, 3);
        assert_eq!(small.stroke, 1);
    }
}
