//! Keyboard input handling with vim-style navigation support.

use crate::domain::DigitKey;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Commands and focus navigation
    #[default]
    Normal,
    /// The focused digit is being edited
    Edit,
    /// Help overlay is open
    Help,
}

/// Actions that can be triggered by keyboard or mouse input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Row commands
    AddDigit,
    RemoveDigit,
    ToggleInput,

    // Focus
    FocusNext,
    FocusPrevious,

    // Focused digit
    Increment,
    Decrement,
    ActivateValue,
    Type(DigitKey),

    // Misc
    Help,
    Back,
    Quit,
}

/// Keyboard bindings configuration
pub struct KeyBindings {
    pub vim_navigation: bool,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            vim_navigation: true,
        }
    }
}

/// Input handler for processing keyboard events
pub struct InputHandler {
    bindings: KeyBindings,
}

impl InputHandler {
    /// Create a new input handler
    pub fn new(vim_navigation: bool) -> Self {
        Self {
            bindings: KeyBindings { vim_navigation },
        }
    }

    /// Handle a key event and return the corresponding action
    pub fn handle_key(&self, key: KeyEvent, mode: InputMode) -> Option<Action> {
        // Ctrl+C quits from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Edit => self.handle_edit_key(key),
            InputMode::Help => self.handle_help_key(key),
        }
    }

    /// Handle key in normal mode
    fn handle_normal_key(&self, key: KeyEvent) -> Option<Action> {
        // Chorded keys are never commands; Shift alone still is ('?', '+', BackTab)
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        match key.code {
            // Focus - arrow keys always work
            KeyCode::Tab | KeyCode::Right => Some(Action::FocusNext),
            KeyCode::BackTab | KeyCode::Left => Some(Action::FocusPrevious),
            KeyCode::Up => Some(Action::Increment),
            KeyCode::Down => Some(Action::Decrement),

            // Vim-style navigation (h/j/k/l)
            KeyCode::Char('l') if self.bindings.vim_navigation => Some(Action::FocusNext),
            KeyCode::Char('h') if self.bindings.vim_navigation => Some(Action::FocusPrevious),
            KeyCode::Char('k') if self.bindings.vim_navigation => Some(Action::Increment),
            KeyCode::Char('j') if self.bindings.vim_navigation => Some(Action::Decrement),

            KeyCode::Enter | KeyCode::Char('e') => Some(Action::ActivateValue),

            // Row commands
            KeyCode::Char('a') | KeyCode::Char('+') => Some(Action::AddDigit),
            KeyCode::Char('x') | KeyCode::Char('-') => Some(Action::RemoveDigit),
            KeyCode::Char('i') => Some(Action::ToggleInput),

            // Misc
            KeyCode::Char('?') => Some(Action::Help),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Char('q') => Some(Action::Quit),

            _ => None,
        }
    }

    /// Handle key in edit mode: characters go to the digit
    fn handle_edit_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Type(DigitKey::Char(c)))
            }
            KeyCode::Enter => Some(Action::Type(DigitKey::Enter)),
            KeyCode::Esc => Some(Action::Type(DigitKey::Escape)),
            KeyCode::Tab => Some(Action::FocusNext),
            KeyCode::BackTab => Some(Action::FocusPrevious),
            _ => None,
        }
    }

    /// Handle key while help is open
    fn handle_help_key(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter => {
                Some(Action::Back)
            }
            _ => None,
        }
    }
}
