//! Single-digit spinner widget and its Idle/Editing state machine.

use super::geometry::{self, ArrowDirection, Zone, ZoneBounds};
use super::paint::{PaintResources, PaintSurface};
use ratatui::layout::{Position, Rect};
use std::borrow::Cow;

/// Text is drawn this much larger than the font's nominal size
pub const TEXT_SCALE: f32 = 1.3;

/// Edit state of a digit widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing,
}

/// Keys a digit widget reacts to while editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitKey {
    Char(char),
    Enter,
    Escape,
}

/// What a pointer-down did to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Incremented,
    Decremented,
    EditStarted,
    Ignored,
}

/// What a key press did to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not editing, or input disabled
    Ignored,
    /// A digit was typed; editing ended with the new value
    Committed(u8),
    /// Enter/Escape ended editing without a change
    Cancelled,
    /// Still editing
    Unchanged,
}

/// A single interactive 0-9 digit
#[derive(Debug)]
pub struct DigitWidget {
    value: u8,
    state: EditState,
    edit_buffer: String,
    input_enabled: bool,
    width: u16,
    height: u16,
    bounds: ZoneBounds,
    resources: Option<PaintResources>,
    repaint_requested: bool,
}

impl DigitWidget {
    /// Create an idle widget showing 0
    pub fn new(input_enabled: bool) -> Self {
        Self {
            value: 0,
            state: EditState::Idle,
            edit_buffer: String::new(),
            input_enabled,
            width: 0,
            height: 0,
            bounds: ZoneBounds::default(),
            resources: Some(PaintResources::acquire()),
            repaint_requested: true,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == EditState::Editing
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    pub fn bounds(&self) -> &ZoneBounds {
        &self.bounds
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Text currently shown in the value zone
    pub fn display_text(&self) -> Cow<'_, str> {
        match self.state {
            EditState::Editing => Cow::Borrowed(&self.edit_buffer),
            EditState::Idle => Cow::Owned(self.value.to_string()),
        }
    }

    /// Resize the widget, recomputing its zones when the size changed
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.bounds = geometry::compute_bounds(width, height);
        self.invalidate();
    }

    pub fn increment_value(&mut self) {
        self.value = (self.value + 1) % 10;
        self.invalidate();
    }

    pub fn decrement_value(&mut self) {
        self.value = (self.value + 9) % 10;
        self.invalidate();
    }

    /// Handle a pointer-down at a widget-local position.
    ///
    /// Focus acquisition is the host's job; it happens for every
    /// pointer-down regardless of the outcome.
    pub fn pointer_down(&mut self, position: Position) -> PointerOutcome {
        match self.bounds.zone_at(position) {
            Some(Zone::Increment) => {
                self.increment_value();
                PointerOutcome::Incremented
            }
            Some(Zone::Decrement) => {
                self.decrement_value();
                PointerOutcome::Decremented
            }
            Some(Zone::Value) => self.activate_value_zone(),
            None => PointerOutcome::Ignored,
        }
    }

    /// Enter editing as a value-zone pointer-down would, if input is enabled
    pub fn activate_value_zone(&mut self) -> PointerOutcome {
        if !self.input_enabled {
            return PointerOutcome::Ignored;
        }
        self.edit_buffer.clear();
        self.state = EditState::Editing;
        self.invalidate();
        PointerOutcome::EditStarted
    }

    /// Handle a key press. Only meaningful while editing with input enabled.
    pub fn key_press(&mut self, key: DigitKey) -> KeyOutcome {
        if !self.is_editing() || !self.input_enabled {
            return KeyOutcome::Ignored;
        }

        match key {
            DigitKey::Char(c) => match c.to_digit(10) {
                Some(digit) => {
                    self.edit_buffer.clear();
                    self.edit_buffer.push(c);
                    self.value = digit as u8;
                    self.stop_editing();
                    tracing::debug!(value = self.value, "Digit edit committed");
                    KeyOutcome::Committed(self.value)
                }
                None => KeyOutcome::Unchanged,
            },
            DigitKey::Enter | DigitKey::Escape => {
                self.stop_editing();
                KeyOutcome::Cancelled
            }
        }
    }

    /// Apply a new input-enabled flag; any actual change cancels editing
    pub fn on_input_enabled_changed(&mut self, enabled: bool) {
        if self.input_enabled == enabled {
            return;
        }
        self.input_enabled = enabled;
        self.stop_editing();
    }

    pub fn on_focus_lost(&mut self) {
        self.stop_editing();
    }

    fn stop_editing(&mut self) {
        self.state = EditState::Idle;
        self.edit_buffer.clear();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.repaint_requested = true;
    }

    /// Returns whether a repaint was requested since the last call
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    /// Full redraw: background first, then arrows, then text
    pub fn paint(&self, surface: &mut dyn PaintSurface) {
        let Some(resources) = &self.resources else {
            return;
        };

        let full = Rect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        };
        surface.fill_rect(full, &resources.background);

        if let Some(points) = geometry::arrow(self.bounds.increment, ArrowDirection::Up) {
            surface.fill_polygon(&points, &resources.arrow);
        }
        if let Some(points) = geometry::arrow(self.bounds.decrement, ArrowDirection::Down) {
            surface.fill_polygon(&points, &resources.arrow);
        }

        let font = resources.font.scaled(TEXT_SCALE);
        surface.fill_text(&self.display_text(), &font, self.bounds.value, &resources.text);
    }

    /// Release drawing resources. Returns false if already released.
    pub(super) fn dispose(&mut self) -> bool {
        match self.resources.take() {
            Some(resources) => {
                resources.release();
                true
            }
            None => false,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.resources.is_none()
    }
}
