//! rotary: a terminal odometer
//!
//! This crate provides a row of single-digit spinners that can be clicked
//! up and down, optionally typed into, and grown or shrunk one digit at a
//! time.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod ui;

pub use app::App;
pub use config::RotaryConfig;
pub use error::{AppError, Result};
