//! Screen layout, hit testing and frame rendering.

use crate::app::{App, AppView};
use crate::config::DigitConfig;
use crate::ui::input::Action;
use crate::ui::widgets::command_bar::{command_rects, CommandBar, COMMANDS};
use crate::ui::widgets::digit::DigitView;
use crate::ui::widgets::help::HelpWidget;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Where everything sits on screen for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub area: Rect,
    pub header: Rect,
    pub body: Rect,
    /// One rect per digit, left to right; clipped to the body (possibly empty)
    pub digits: Vec<Rect>,
    pub command_bar: Rect,
    /// Button rects in [`COMMANDS`] order
    pub commands: [Rect; 3],
    pub footer: Rect,
}

impl ScreenLayout {
    /// Lay out `digit_count` digits inside `area`
    pub fn compute(area: Rect, digit_count: usize, digits: &DigitConfig) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Digit row
                Constraint::Length(3), // Command bar
                Constraint::Length(2), // Footer
            ])
            .split(area);

        let body = chunks[1];
        let inner = Block::default().borders(Borders::ALL).inner(body);

        Self {
            area,
            header: chunks[0],
            body,
            digits: flow_digits(inner, digit_count, digits),
            command_bar: chunks[2],
            commands: command_rects(chunks[2]),
            footer: chunks[3],
        }
    }

    /// Index of the digit under a screen cell
    pub fn digit_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.digits.iter().position(|r| r.contains(position))
    }

    /// Command button under a screen cell
    pub fn command_at(&self, column: u16, row: u16) -> Option<Action> {
        let position = Position::new(column, row);
        self.commands
            .iter()
            .position(|r| r.contains(position))
            .map(|i| COMMANDS[i])
    }
}

/// Place digits left to right, wrapping to a new line when a row is full
fn flow_digits(inner: Rect, count: usize, digits: &DigitConfig) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(count);
    let mut x = inner.x;
    let mut y = inner.y;

    for _ in 0..count {
        if x != inner.x && x.saturating_add(digits.width) > inner.right() {
            x = inner.x;
            y = y.saturating_add(digits.height.saturating_add(digits.spacing));
        }
        let slot = Rect {
            x,
            y,
            width: digits.width,
            height: digits.height,
        };
        rects.push(slot.intersection(inner));
        x = x.saturating_add(digits.width.saturating_add(digits.spacing));
    }
    rects
}

/// Draw the main application UI
pub fn draw(frame: &mut Frame, app: &App) {
    let layout = &app.layout;

    draw_header(frame, app, layout.header);

    let body = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Digits ({}) ", app.sequence.len()));
    frame.render_widget(body, layout.body);

    for (index, (widget, rect)) in app
        .sequence
        .widgets()
        .iter()
        .zip(layout.digits.iter())
        .enumerate()
    {
        if rect.is_empty() {
            continue;
        }
        let view = DigitView::new(widget).focused(app.focused == Some(index));
        frame.render_widget(view, *rect);
    }

    let bar = CommandBar::new(app.sequence.can_remove(), app.sequence.input_enabled());
    frame.render_widget(bar, layout.command_bar);

    draw_footer(frame, layout.footer);

    if app.view == AppView::Help {
        let popup_area = centered_rect(60, 70, layout.area);
        frame.render_widget(HelpWidget, popup_area);
    }
}

/// Draw the title with the full number and input state
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let (input_label, input_color) = if app.sequence.input_enabled() {
        ("input enabled", Color::Green)
    } else {
        ("input disabled", Color::DarkGray)
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Rotary",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            app.sequence.display_value(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(input_label, Style::default().fg(input_color)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

/// Footer with keybindings
fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer_text = " click ▲/▼: Spin | a: Add | x: Remove | i: Input | Tab: Focus | ?: Help | q: Quit ";
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
