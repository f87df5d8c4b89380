//! Core digit-display logic, independent of any UI toolkit.
//!
//! This module contains:
//! - DigitWidget: one 0-9 spinner with its Idle/Editing state machine
//! - DigitSequence: the ordered row of widgets and the shared input flag
//! - geometry: zone partitioning and arrow shapes
//! - paint: the drawing primitives a host provides

mod digit;
pub mod geometry;
pub mod paint;
mod sequence;

pub use digit::{DigitKey, DigitWidget, EditState, KeyOutcome, PointerOutcome, TEXT_SCALE};
pub use geometry::{Zone, ZoneBounds};
pub use paint::{Brush, Font, PaintResources, PaintSurface};
pub use sequence::DigitSequence;
