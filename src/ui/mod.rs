//! UI components for rotary.
//!
//! This module contains:
//! - layout: Screen layout, hit testing and rendering
//! - input: Keyboard input handling
//! - widgets: Terminal widgets, including the braille digit surface

pub mod input;
pub mod layout;
pub mod widgets;
