//! Application state and main event loop.

use crate::config::RotaryConfig;
use crate::domain::{DigitKey, DigitSequence, DigitWidget, KeyOutcome, PointerOutcome};
use crate::error::{AppError, Result};
use crate::ui::input::{Action, InputHandler, InputMode};
use crate::ui::layout::ScreenLayout;
use crate::ui::widgets::digit::{cell_center_dot, cells_to_dots};
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::prelude::*;
use std::time::Duration;

/// Application view state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    /// The digit row
    #[default]
    Main,
    /// Help overlay on top of the digit row
    Help,
}

/// Main application state
pub struct App {
    pub config: RotaryConfig,
    /// The digits on display
    pub sequence: DigitSequence,
    /// Index of the digit holding keyboard focus
    pub focused: Option<usize>,
    /// Current view
    pub view: AppView,
    /// Layout of the last synced frame
    pub layout: ScreenLayout,
    /// Input handler
    input_handler: InputHandler,
    /// Something outside the digits changed since the last draw
    needs_redraw: bool,
    /// Should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(config: RotaryConfig) -> Result<Self> {
        config.validate()?;

        let sequence =
            DigitSequence::with_digits(config.digits.initial_count, config.digits.input_enabled);
        let input_handler = InputHandler::new(config.ui.vim_navigation);

        Ok(Self {
            config,
            sequence,
            focused: None,
            view: AppView::Main,
            layout: ScreenLayout::default(),
            input_handler,
            needs_redraw: true,
            should_quit: false,
        })
    }

    /// Current input mode, derived from view and focus
    pub fn input_mode(&self) -> InputMode {
        if self.view == AppView::Help {
            InputMode::Help
        } else if self.focused_widget().is_some_and(DigitWidget::is_editing) {
            InputMode::Edit
        } else {
            InputMode::Normal
        }
    }

    /// Get the focused digit
    pub fn focused_widget(&self) -> Option<&DigitWidget> {
        self.focused.and_then(|i| self.sequence.widget(i))
    }

    fn focused_widget_mut(&mut self) -> Option<&mut DigitWidget> {
        self.focused.and_then(|i| self.sequence.widget_mut(i))
    }

    /// Move keyboard focus, notifying the digit that loses it
    pub fn focus_digit(&mut self, index: Option<usize>) {
        if self.focused == index {
            return;
        }
        if let Some(previous) = self.focused_widget_mut() {
            previous.on_focus_lost();
        }
        self.focused = index;
        self.needs_redraw = true;
    }

    /// Recompute the layout for `area` and resize every digit to its slot
    pub fn sync_layout(&mut self, area: Rect) {
        let layout = ScreenLayout::compute(area, self.sequence.len(), &self.config.digits);
        for (widget, rect) in self.sequence.iter_mut().zip(layout.digits.iter()) {
            let (width, height) = cells_to_dots(rect.width, rect.height);
            widget.resize(width, height);
        }
        if layout != self.layout {
            self.layout = layout;
            self.needs_redraw = true;
        }
    }

    /// Whether a redraw is due; clears all pending requests
    pub fn take_redraw(&mut self) -> bool {
        let digits = self.sequence.take_repaint_requests();
        std::mem::take(&mut self.needs_redraw) || digits
    }

    /// Apply an action
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::AddDigit => {
                self.sequence.add_digit();
            }
            Action::RemoveDigit => {
                if self.sequence.remove_digit()
                    && self.focused.is_some_and(|i| i >= self.sequence.len())
                {
                    self.focused = None;
                }
            }
            Action::ToggleInput => {
                self.sequence.toggle_input();
            }
            Action::FocusNext => {
                let len = self.sequence.len();
                let next = self.focused.map_or(0, |i| (i + 1) % len);
                self.focus_digit(Some(next));
            }
            Action::FocusPrevious => {
                let len = self.sequence.len();
                let previous = self.focused.map_or(len - 1, |i| (i + len - 1) % len);
                self.focus_digit(Some(previous));
            }
            Action::Increment => {
                if let Some(widget) = self.focused_widget_mut() {
                    widget.increment_value();
                }
            }
            Action::Decrement => {
                if let Some(widget) = self.focused_widget_mut() {
                    widget.decrement_value();
                }
            }
            Action::ActivateValue => {
                if let Some(widget) = self.focused_widget_mut() {
                    widget.activate_value_zone();
                }
            }
            Action::Type(key) => self.type_key(key),
            Action::Help => self.view = AppView::Help,
            Action::Back => {
                if self.view == AppView::Help {
                    self.view = AppView::Main;
                } else {
                    self.focus_digit(None);
                }
            }
            Action::Quit => self.should_quit = true,
        }
        self.needs_redraw = true;
    }

    fn type_key(&mut self, key: DigitKey) {
        let index = self.focused;
        if let Some(widget) = self.focused_widget_mut() {
            if let KeyOutcome::Committed(value) = widget.key_press(key) {
                tracing::debug!(index, value, "Typed digit");
            }
        }
    }

    /// Handle a terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::FocusLost => {
                if let Some(widget) = self.focused_widget_mut() {
                    widget.on_focus_lost();
                }
            }
            Event::Resize(width, height) => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
                self.needs_redraw = true;
            }
            Event::FocusGained | Event::Paste(_) => {}
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(action) = self.input_handler.handle_key(key, self.input_mode()) {
            self.apply(action);
        }
    }

    /// Handle a mouse event; only left-button presses do anything
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (column, row) = (mouse.column, mouse.row);

        if self.view == AppView::Help {
            self.view = AppView::Main;
            self.needs_redraw = true;
            return;
        }

        if let Some(index) = self.layout.digit_at(column, row) {
            self.focus_digit(Some(index));
            let rect = self.layout.digits[index];
            let position = cell_center_dot(column - rect.x, row - rect.y);
            if let Some(widget) = self.sequence.widget_mut(index) {
                let outcome = widget.pointer_down(position);
                if outcome != PointerOutcome::Ignored {
                    tracing::trace!(index, ?outcome, "Digit clicked");
                }
            }
        } else if let Some(action) = self.layout.command_at(column, row) {
            self.focus_digit(None);
            if action == Action::RemoveDigit && !self.sequence.can_remove() {
                return;
            }
            self.apply(action);
        }
    }

    /// Run the main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);

        tracing::info!(digits = self.sequence.len(), "Starting event loop");

        loop {
            let size = terminal.size()?;
            self.sync_layout(Rect::new(0, 0, size.width, size.height));

            // Draw UI
            if self.take_redraw() {
                terminal.draw(|f| crate::ui::layout::draw(f, self))?;
            }

            // Wait for event with timeout
            if event::poll(tick_rate).map_err(AppError::terminal)? {
                let event = event::read().map_err(AppError::terminal)?;
                self.handle_event(event);
            }

            if self.should_quit {
                break;
            }
        }

        tracing::info!(value = %self.sequence.display_value(), "Event loop finished");
        Ok(())
    }
}
