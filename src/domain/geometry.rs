//! Zone geometry for a single digit widget.
//!
//! All coordinates are widget-local "pixels" with the origin at the top-left
//! corner. Rects are built with struct literals so large pixel sizes are
//! never clipped.

use ratatui::layout::{Position, Rect};

/// One of the three stacked interactive bands of a digit widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Increment,
    Value,
    Decrement,
}

/// The three hit/paint zones of a digit widget, top to bottom
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneBounds {
    pub increment: Rect,
    pub value: Rect,
    pub decrement: Rect,
}

impl ZoneBounds {
    /// Resolve which zone a widget-local position falls in
    pub fn zone_at(&self, position: Position) -> Option<Zone> {
        if self.increment.contains(position) {
            Some(Zone::Increment)
        } else if self.decrement.contains(position) {
            Some(Zone::Decrement)
        } else if self.value.contains(position) {
            Some(Zone::Value)
        } else {
            None
        }
    }

    /// Get the rect of a zone
    pub fn rect(&self, zone: Zone) -> Rect {
        match zone {
            Zone::Increment => self.increment,
            Zone::Value => self.value,
            Zone::Decrement => self.decrement,
        }
    }
}

/// Partition a `width` x `height` widget into three full-width bands.
///
/// The decrement band absorbs the rounding remainder so the bands tile
/// `[0, height)` exactly.
pub fn compute_bounds(width: u16, height: u16) -> ZoneBounds {
    let band = height / 3;
    ZoneBounds {
        increment: Rect {
            x: 0,
            y: 0,
            width,
            height: band,
        },
        value: Rect {
            x: 0,
            y: band,
            width,
            height: band,
        },
        decrement: Rect {
            x: 0,
            y: band * 2,
            width,
            height: height - band * 2,
        },
    }
}

/// Direction an arrow triangle points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Up,
    Down,
}

/// Triangle centered in `zone`, sized to half of the zone's smaller side.
///
/// Returns `None` when the zone is too small for the triangle to have any
/// area.
pub fn arrow(zone: Rect, direction: ArrowDirection) -> Option<[Position; 3]> {
    let size = zone.width.min(zone.height) / 2;
    let half = size / 2;
    if half == 0 {
        return None;
    }

    let cx = zone.x + zone.width / 2;
    let cy = zone.y + zone.height / 2;

    Some(match direction {
        ArrowDirection::Up => [
            Position::new(cx, cy - half),
            Position::new(cx - half, cy + half),
            Position::new(cx + half, cy + half),
        ],
        ArrowDirection::Down => [
            Position::new(cx, cy + half),
            Position::new(cx - half, cy - half),
            Position::new(cx + half, cy - half),
        ],
    })
}

/// Twice the signed area of a polygon (shoelace formula)
pub fn polygon_area2(points: &[Position]) -> i64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y)
        })
        .sum()
}

/// Point-in-polygon test for convex polygons of either winding.
///
/// Points on an edge count as inside.
pub fn polygon_contains(points: &[Position], x: f32, y: f32) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut sign = 0.0_f32;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let cross = (f32::from(b.x) - f32::from(a.x)) * (y - f32::from(a.y))
            - (f32::from(b.y) - f32::from(a.y)) * (x - f32::from(a.x));
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

/// Smallest rect covering all points (exclusive of the far edges)
pub fn bounding_rect(points: &[Position]) -> Rect {
    let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
    let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
    let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
    let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);
    Rect {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}
