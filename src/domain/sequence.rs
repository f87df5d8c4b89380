//! Ordered, resizable row of digit widgets sharing one input-enabled flag.

use super::digit::DigitWidget;

/// The full numeric display. Never empty.
#[derive(Debug)]
pub struct DigitSequence {
    widgets: Vec<DigitWidget>,
    input_enabled: bool,
}

impl DigitSequence {
    /// Create a sequence holding a single digit
    pub fn new(input_enabled: bool) -> Self {
        Self {
            widgets: vec![DigitWidget::new(input_enabled)],
            input_enabled,
        }
    }

    /// Create a sequence with `count` digits (at least one)
    pub fn with_digits(count: usize, input_enabled: bool) -> Self {
        let mut sequence = Self::new(input_enabled);
        for _ in 1..count {
            sequence.add_digit();
        }
        sequence
    }

    /// Append a new digit at the right end. Returns its index.
    pub fn add_digit(&mut self) -> usize {
        self.widgets.push(DigitWidget::new(self.input_enabled));
        let index = self.widgets.len() - 1;
        tracing::debug!(index, count = self.widgets.len(), "Digit added");
        index
    }

    /// Remove the rightmost digit. Refuses to remove the last one.
    pub fn remove_digit(&mut self) -> bool {
        if !self.can_remove() {
            return false;
        }
        if let Some(mut widget) = self.widgets.pop() {
            widget.dispose();
        }
        tracing::debug!(count = self.widgets.len(), "Digit removed");
        true
    }

    /// Flip the input-enabled flag and push it to every digit
    pub fn toggle_input(&mut self) -> bool {
        self.input_enabled = !self.input_enabled;
        for widget in &mut self.widgets {
            widget.on_input_enabled_changed(self.input_enabled);
        }
        tracing::debug!(enabled = self.input_enabled, "Input toggled");
        self.input_enabled
    }

    pub fn can_remove(&self) -> bool {
        self.widgets.len() > 1
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn widgets(&self) -> &[DigitWidget] {
        &self.widgets
    }

    pub fn widget(&self, index: usize) -> Option<&DigitWidget> {
        self.widgets.get(index)
    }

    pub fn widget_mut(&mut self, index: usize) -> Option<&mut DigitWidget> {
        self.widgets.get_mut(index)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DigitWidget> {
        self.widgets.iter_mut()
    }

    /// The displayed number, left to right
    pub fn display_value(&self) -> String {
        self.widgets
            .iter()
            .map(|w| char::from(b'0' + w.value()))
            .collect()
    }

    /// Drain repaint requests from every digit; true if any was pending
    pub fn take_repaint_requests(&mut self) -> bool {
        self.widgets
            .iter_mut()
            .fold(false, |any, w| w.take_repaint_request() || any)
    }
}

impl Drop for DigitSequence {
    fn drop(&mut self) {
        for widget in &mut self.widgets {
            widget.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paint::recording;
    use crate::domain::{DigitKey, EditState};
    use ratatui::layout::Position;

    #[test]
    fn test_new_sequence() {
        let sequence = DigitSequence::new(false);
        assert_eq!(sequence.len(), 1);
        assert!(!sequence.is_empty());
        assert!(!sequence.can_remove());
        assert!(!sequence.input_enabled());
        assert_eq!(sequence.display_value(), "0");
    }

    #[test]
    fn test_with_digits() {
        let sequence = DigitSequence::with_digits(4, true);
        assert_eq!(sequence.len(), 4);
        assert!(sequence.widgets().iter().all(|w| w.input_enabled()));

        let sequence = DigitSequence::with_digits(0, false);
        assert_eq!(sequence.len(), 1);
    }

    #[test]
    fn test_add_digit_inherits_input_flag() {
        let mut sequence = DigitSequence::new(false);
        sequence.toggle_input();

        let index = sequence.add_digit();
        assert_eq!(index, 1);
        let widget = sequence.widget(1).unwrap();
        assert!(widget.input_enabled());
        assert_eq!(widget.value(), 0);
        assert_eq!(widget.state(), EditState::Idle);
    }

    #[test]
    fn test_remove_last_digit_is_noop() {
        let mut sequence = DigitSequence::new(false);
        sequence.widget_mut(0).unwrap().increment_value();

        assert!(!sequence.remove_digit());
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence.widget(0).unwrap().value(), 1);
        assert!(!sequence.widget(0).unwrap().is_disposed());
    }

    #[test]
    fn test_remove_takes_rightmost() {
        let mut sequence = DigitSequence::with_digits(3, false);
        sequence.widget_mut(0).unwrap().increment_value();
        sequence.widget_mut(2).unwrap().decrement_value();
        assert_eq!(sequence.display_value(), "109");

        assert!(sequence.remove_digit());
        assert_eq!(sequence.display_value(), "10");
    }

    #[test]
    fn test_remove_disposes_rightmost() {
        let mut sequence = DigitSequence::with_digits(3, false);
        let before = recording::releases();

        assert!(sequence.remove_digit());
        assert_eq!(recording::releases(), before + 1);
        assert!(sequence.widgets().iter().all(|w| !w.is_disposed()));
    }

    #[test]
    fn test_remove_below_one_disposes_nothing() {
        let mut sequence = DigitSequence::new(false);
        let before = recording::releases();

        assert!(!sequence.remove_digit());
        assert_eq!(recording::releases(), before);
        assert!(!sequence.widget(0).unwrap().is_disposed());
    }

    #[test]
    fn test_drop_disposes_every_digit() {
        let mut sequence = DigitSequence::with_digits(4, true);
        let before = recording::releases();
        sequence.remove_digit();
        assert_eq!(recording::releases(), before + 1);

        drop(sequence);
        // Three remaining digits, and the removed one is not released twice
        assert_eq!(recording::releases(), before + 4);
    }

    #[test]
    fn test_can_remove_transitions() {
        let mut sequence = DigitSequence::new(false);
        assert!(!sequence.can_remove());

        sequence.add_digit();
        assert!(sequence.can_remove());
        sequence.add_digit();
        assert!(sequence.can_remove());

        sequence.remove_digit();
        assert!(sequence.can_remove());
        sequence.remove_digit();
        assert!(!sequence.can_remove());
    }

    #[test]
    fn test_toggle_cancels_every_edit() {
        let mut sequence = DigitSequence::with_digits(3, true);
        for widget in sequence.iter_mut() {
            widget.resize(40, 60);
            widget.pointer_down(Position::new(20, 30));
            assert!(widget.is_editing());
        }

        assert!(!sequence.toggle_input());
        for widget in sequence.widgets() {
            assert!(!widget.input_enabled());
            assert_eq!(widget.state(), EditState::Idle);
        }

        assert!(sequence.toggle_input());
        assert!(sequence.widgets().iter().all(|w| w.input_enabled()));
    }

    #[test]
    fn test_digits_are_independent() {
        let mut sequence = DigitSequence::with_digits(2, true);
        for widget in sequence.iter_mut() {
            widget.resize(40, 60);
        }
        sequence.widget_mut(0).unwrap().pointer_down(Position::new(20, 30));

        let second = sequence.widget(1).unwrap();
        assert_eq!(second.state(), EditState::Idle);
        assert_eq!(second.value(), 0);
    }

    #[test]
    fn test_take_repaint_requests_drains_all() {
        let mut sequence = DigitSequence::with_digits(3, false);
        assert!(sequence.take_repaint_requests());
        assert!(!sequence.take_repaint_requests());

        sequence.widget_mut(2).unwrap().increment_value();
        assert!(sequence.take_repaint_requests());
        assert!(!sequence.take_repaint_requests());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut sequence = DigitSequence::new(false);
        sequence.widget_mut(0).unwrap().resize(40, 60);
        let increment = Position::new(20, 5);
        let value = Position::new(20, 30);

        for _ in 0..3 {
            sequence.widget_mut(0).unwrap().pointer_down(increment);
        }
        assert_eq!(sequence.widget(0).unwrap().value(), 3);

        assert!(sequence.toggle_input());
        let widget = sequence.widget(0).unwrap();
        assert_eq!(widget.state(), EditState::Idle);
        assert_eq!(widget.value(), 3);

        let widget = sequence.widget_mut(0).unwrap();
        widget.pointer_down(value);
        assert_eq!(widget.state(), EditState::Editing);
        widget.key_press(DigitKey::Char('7'));
        assert_eq!(widget.value(), 7);
        assert_eq!(widget.state(), EditState::Idle);

        sequence.add_digit();
        assert_eq!(sequence.len(), 2);
        let second = sequence.widget(1).unwrap();
        assert_eq!(second.value(), 0);
        assert!(second.input_enabled());

        assert!(sequence.remove_digit());
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence.widget(0).unwrap().value(), 7);
    }
}
