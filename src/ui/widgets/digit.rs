//! Terminal rendering of a digit widget on a braille dot grid.

use super::segment_font::{self, GlyphMetrics, MIN_GLYPH_HEIGHT};
use crate::domain::geometry::{bounding_rect, polygon_area2, polygon_contains};
use crate::domain::{Brush, DigitWidget, Font, PaintSurface};
use ratatui::prelude::*;

/// Braille dots per terminal cell, horizontally
pub const DOTS_X: u16 = 2;
/// Braille dots per terminal cell, vertically
pub const DOTS_Y: u16 = 4;

// Bit for dot (column, row) within a braille cell, U+2800 based
const DOT_BITS: [[u8; 4]; 2] = [[0, 1, 2, 6], [3, 4, 5, 7]];

/// Pixel size of a widget occupying `width` x `height` cells
pub fn cells_to_dots(width: u16, height: u16) -> (u16, u16) {
    (width.saturating_mul(DOTS_X), height.saturating_mul(DOTS_Y))
}

/// Pixel at the center of the cell `(column, row)` cells from the widget's corner
pub fn cell_center_dot(column: u16, row: u16) -> Position {
    Position::new(
        column.saturating_mul(DOTS_X) + DOTS_X / 2,
        row.saturating_mul(DOTS_Y) + DOTS_Y / 2,
    )
}

/// Cells (relative to the widget) covering a pixel rect
fn dots_to_cells(rect: Rect) -> Rect {
    let x = rect.x / DOTS_X;
    let y = rect.y / DOTS_Y;
    let right = rect.right().div_ceil(DOTS_X);
    let bottom = rect.bottom().div_ceil(DOTS_Y);
    Rect {
        x,
        y,
        width: right - x,
        height: bottom - y,
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct DotCell {
    bits: u8,
    color: Option<Color>,
    /// Holds plain text written by the fallback text path
    text: bool,
}

/// `PaintSurface` over a ratatui buffer region, one braille cell per 2x4 pixels.
///
/// Dots are accumulated and written to the buffer by [`BrailleSurface::flush`].
pub struct BrailleSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    cells: Vec<DotCell>,
}

impl<'a> BrailleSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        let cells = vec![DotCell::default(); usize::from(area.width) * usize::from(area.height)];
        Self { buf, area, cells }
    }

    fn dot_width(&self) -> u16 {
        self.area.width.saturating_mul(DOTS_X)
    }

    fn dot_height(&self) -> u16 {
        self.area.height.saturating_mul(DOTS_Y)
    }

    fn dot_area(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.dot_width(),
            height: self.dot_height(),
        }
    }

    fn cell_mut(&mut self, column: u16, row: u16) -> Option<&mut DotCell> {
        if column >= self.area.width || row >= self.area.height {
            return None;
        }
        let index = usize::from(row) * usize::from(self.area.width) + usize::from(column);
        self.cells.get_mut(index)
    }

    fn set_dot(&mut self, x: u16, y: u16, color: Color) {
        let bit = DOT_BITS[usize::from(x % DOTS_X)][usize::from(y % DOTS_Y)];
        if let Some(cell) = self.cell_mut(x / DOTS_X, y / DOTS_Y) {
            cell.bits |= 1 << bit;
            cell.color.get_or_insert(color);
        }
    }

    fn clear_dot(&mut self, x: u16, y: u16) {
        let bit = DOT_BITS[usize::from(x % DOTS_X)][usize::from(y % DOTS_Y)];
        if let Some(cell) = self.cell_mut(x / DOTS_X, y / DOTS_Y) {
            cell.bits &= !(1 << bit);
            if cell.bits == 0 {
                cell.color = None;
            }
        }
    }

    /// Write text as plain cells, centered on the pixel rect
    fn put_text_cells(&mut self, text: &str, bounds: Rect, brush: &Brush, bold: bool) {
        let cells = dots_to_cells(bounds).intersection(Rect::new(0, 0, self.area.width, self.area.height));
        if cells.is_empty() {
            return;
        }

        let count = text.chars().count() as u16;
        let shown = count.min(cells.width);
        let column = cells.x + (cells.width - shown) / 2;
        let row = cells.y + cells.height / 2;

        for offset in 0..shown {
            if let Some(cell) = self.cell_mut(column + offset, row) {
                *cell = DotCell {
                    text: true,
                    ..DotCell::default()
                };
            }
        }

        let mut style = Style::default().fg(brush.color);
        if bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        let visible: String = text.chars().take(usize::from(shown)).collect();
        self.buf
            .set_string(self.area.x + column, self.area.y + row, visible, style);
    }

    /// Write accumulated dots into the buffer
    pub fn flush(mut self) {
        for row in 0..self.area.height {
            for column in 0..self.area.width {
                let index = usize::from(row) * usize::from(self.area.width) + usize::from(column);
                let dots = self.cells[index];
                if dots.text || dots.bits == 0 {
                    continue;
                }
                let symbol = char::from_u32(0x2800 + u32::from(dots.bits)).unwrap_or(' ');
                if let Some(cell) = self
                    .buf
                    .cell_mut((self.area.x + column, self.area.y + row))
                {
                    cell.set_char(symbol);
                    if let Some(color) = dots.color {
                        cell.set_fg(color);
                    }
                }
            }
        }
    }
}

impl PaintSurface for BrailleSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        let rect = rect.intersection(self.dot_area());
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                self.clear_dot(x, y);
            }
        }

        let cells = dots_to_cells(rect);
        for row in cells.top()..cells.bottom() {
            for column in cells.left()..cells.right() {
                if let Some(dots) = self.cell_mut(column, row) {
                    dots.text = false;
                }
                if let Some(cell) = self
                    .buf
                    .cell_mut((self.area.x + column, self.area.y + row))
                {
                    cell.set_char(' ');
                    cell.set_bg(brush.color);
                }
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Position], brush: &Brush) {
        if polygon_area2(points) == 0 {
            return;
        }
        let bbox = bounding_rect(points).intersection(self.dot_area());
        for y in bbox.top()..bbox.bottom() {
            for x in bbox.left()..bbox.right() {
                if polygon_contains(points, f32::from(x) + 0.5, f32::from(y) + 0.5) {
                    self.set_dot(x, y, brush.color);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, font: &Font, bounds: Rect, brush: &Brush) {
        if text.is_empty() || bounds.is_empty() {
            return;
        }

        let height = (font.size.round() as u16).min(bounds.height);
        let metrics = GlyphMetrics::for_height(height, font.bold);
        let count = text.chars().count() as u16;
        let total = metrics.run_width(count);

        if height < MIN_GLYPH_HEIGHT
            || total > bounds.width
            || !text.chars().all(|c| c.is_ascii_digit())
        {
            self.put_text_cells(text, bounds, brush, font.bold);
            return;
        }

        let mut x = bounds.x + (bounds.width - total) / 2;
        let y = bounds.y + (bounds.height - height) / 2;
        for ch in text.chars() {
            if let Some(quads) = segment_font::glyph_polygons(ch, Position::new(x, y), metrics) {
                for quad in &quads {
                    self.fill_polygon(quad, brush);
                }
            }
            x += metrics.width + metrics.stroke;
        }
    }
}

/// Renders one digit widget into its cell rect
pub struct DigitView<'a> {
    digit: &'a DigitWidget,
    focused: bool,
}

impl<'a> DigitView<'a> {
    pub fn new(digit: &'a DigitWidget) -> Self {
        Self {
            digit,
            focused: false,
        }
    }

    /// Set focused state
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for DigitView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let mut surface = BrailleSurface::new(buf, area);
        self.digit.paint(&mut surface);
        surface.flush();

        if self.focused {
            buf.set_style(area, Style::default().bg(Color::DarkGray));
        }
        if self.digit.is_editing() {
            let zone = dots_to_cells(self.digit.bounds().value);
            let zone = Rect {
                x: area.x + zone.x,
                y: area.y + zone.y,
                ..zone
            }
            .intersection(area);
            buf.set_style(zone, Style::default().bg(Color::Blue));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DigitKey;

    fn symbols(buf: &Buffer, area: Rect) -> Vec<String> {
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    fn is_braille(symbol: &str) -> bool {
        symbol
            .chars()
            .next()
            .is_some_and(|c| ('\u{2801}'..='\u{28FF}').contains(&c))
    }

    fn render(widget: &DigitWidget, area: Rect, focused: bool) -> Buffer {
        let mut buf = Buffer::empty(area);
        DigitView::new(widget).focused(focused).render(area, &mut buf);
        buf
    }

    fn sized_digit(width: u16, height: u16, input_enabled: bool) -> DigitWidget {
        let mut digit = DigitWidget::new(input_enabled);
        let (w, h) = cells_to_dots(width, height);
        digit.resize(w, h);
        digit
    }

    #[test]
    fn test_cell_conversions() {
        assert_eq!(cells_to_dots(7, 9), (14, 36));
        assert_eq!(cell_center_dot(0, 0), Position::new(1, 2));
        assert_eq!(cell_center_dot(3, 4), Position::new(7, 18));
        assert_eq!(dots_to_cells(Rect::new(0, 12, 14, 12)), Rect::new(0, 3, 7, 3));
        assert_eq!(dots_to_cells(Rect::new(1, 13, 2, 2)), Rect::new(0, 3, 2, 1));
    }

    #[test]
    fn test_single_dot_bits() {
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        let mut surface = BrailleSurface::new(&mut buf, area);
        surface.set_dot(0, 0, Color::White);
        surface.set_dot(3, 3, Color::White);
        surface.flush();
        assert_eq!(buf[(0, 0)].symbol(), "\u{2801}");
        assert_eq!(buf[(1, 0)].symbol(), "\u{2880}");
    }

    #[test]
    fn test_fill_rect_clears_dots() {
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        let mut surface = BrailleSurface::new(&mut buf, area);
        surface.set_dot(0, 0, Color::White);
        surface.fill_rect(Rect::new(0, 0, 4, 8), &Brush::solid(Color::Black));
        surface.flush();
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(0, 0)].bg, Color::Black);
    }

    #[test]
    fn test_arrows_land_in_outer_thirds() {
        let area = Rect::new(0, 0, 7, 9);
        let digit = sized_digit(7, 9, false);
        let buf = render(&digit, area, false);
        let rows = symbols(&buf, area);

        assert!(rows[0..3].iter().any(|row| row.chars().any(|c| is_braille(&c.to_string()))));
        assert!(rows[6..9].iter().any(|row| row.chars().any(|c| is_braille(&c.to_string()))));
    }

    #[test]
    fn test_value_drawn_as_segments() {
        let area = Rect::new(0, 0, 7, 9);
        let mut digit = sized_digit(7, 9, false);
        digit.increment_value();
        let buf = render(&digit, area, false);

        let middle: Vec<&str> = (3..6)
            .flat_map(|y| (0..7).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol())
            .collect();
        assert!(middle.iter().any(|s| is_braille(s)));
        assert!(!middle.iter().any(|s| *s == "1"));
    }

    #[test]
    fn test_small_digit_falls_back_to_text() {
        // 3 rows: one cell per zone, four pixels tall, too short for segments
        let area = Rect::new(0, 0, 3, 3);
        let mut digit = sized_digit(3, 3, false);
        for _ in 0..4 {
            digit.increment_value();
        }
        let buf = render(&digit, area, false);
        assert_eq!(buf[(1, 1)].symbol(), "4");
    }

    #[test]
    fn test_editing_highlights_value_zone() {
        let area = Rect::new(0, 0, 7, 9);
        let mut digit = sized_digit(7, 9, true);
        digit.pointer_down(cell_center_dot(3, 4));
        assert!(digit.is_editing());

        let buf = render(&digit, area, true);
        assert_eq!(buf[(3, 4)].bg, Color::Blue);
        assert_eq!(buf[(3, 0)].bg, Color::DarkGray);

        digit.key_press(DigitKey::Escape);
        let buf = render(&digit, area, true);
        assert_eq!(buf[(3, 4)].bg, Color::DarkGray);
    }

    #[test]
    fn test_render_offset_area() {
        let full = Rect::new(0, 0, 20, 12);
        let area = Rect::new(5, 2, 7, 9);
        let digit = sized_digit(7, 9, false);
        let mut buf = Buffer::empty(full);
        DigitView::new(&digit).render(area, &mut buf);

        // Nothing outside the widget's rect is touched
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(19, 11)].symbol(), " ");
        let inside = symbols(&buf, area).concat();
        assert!(inside.chars().any(|c| is_braille(&c.to_string())));
    }

    #[test]
    fn test_zero_area_is_safe() {
        let digit = DigitWidget::new(false);
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        DigitView::new(&digit).render(Rect::new(0, 0, 0, 0), &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
