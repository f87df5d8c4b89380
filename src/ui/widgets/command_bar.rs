//! Button row for the digit row commands.

use crate::ui::input::Action;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Commands in left-to-right button order
pub const COMMANDS: [Action; 3] = [Action::AddDigit, Action::RemoveDigit, Action::ToggleInput];

/// Split the bar into three equal button rects
pub fn command_rects(area: Rect) -> [Rect; 3] {
    let chunks = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Label of the input toggle for the current flag
pub fn toggle_label(input_enabled: bool) -> &'static str {
    if input_enabled {
        "Disable Input"
    } else {
        "Enable Input"
    }
}

/// Widget for the Add / Remove / Toggle buttons
pub struct CommandBar {
    can_remove: bool,
    input_enabled: bool,
}

impl CommandBar {
    pub fn new(can_remove: bool, input_enabled: bool) -> Self {
        Self {
            can_remove,
            input_enabled,
        }
    }

    fn button(label: &str, enabled: bool) -> Paragraph<'_> {
        let style = if enabled {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let border_style = if enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
    }
}

impl Widget for CommandBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [add, remove, toggle] = command_rects(area);
        Self::button("Add Digit", true).render(add, buf);
        Self::button("Remove Digit", self.can_remove).render(remove, buf);
        Self::button(toggle_label(self.input_enabled), true).render(toggle, buf);
    }
}
