//! Reusable UI widgets for rotary.

pub mod command_bar;
pub mod digit;
pub mod help;
pub mod segment_font;
