//! Help overlay showing all keybindings.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Help categories
const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Digits",
        &[
            ("Click ▲ / ▼", "Increment / decrement a digit"),
            ("Click value", "Type a new digit (input enabled)"),
            ("↑/k  ↓/j", "Increment / decrement focused digit"),
            ("Enter/e", "Edit focused digit (input enabled)"),
            ("0-9", "Commit typed digit"),
            ("Enter/Esc", "Cancel edit"),
        ],
    ),
    (
        "Focus",
        &[
            ("Tab/→/l", "Next digit"),
            ("Shift+Tab/←/h", "Previous digit"),
        ],
    ),
    (
        "Commands",
        &[
            ("a/+", "Add digit"),
            ("x/-", "Remove rightmost digit"),
            ("i", "Enable / disable input"),
        ],
    ),
    (
        "Misc",
        &[("?", "Toggle help"), ("Esc", "Close help"), ("q", "Quit")],
    ),
];

/// Help view widget
pub struct HelpWidget;

impl HelpWidget {
    fn lines() -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, (section, bindings)) in HELP_SECTIONS.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::styled(
                *section,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            for (key, description) in bindings.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:<16}", key), Style::default().fg(Color::Cyan)),
                    Span::raw(*description),
                ]));
            }
        }
        lines
    }
}

impl Widget for HelpWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help ");

        Paragraph::new(Self::lines()).block(block).render(area, buf);
    }
}
