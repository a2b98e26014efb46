//! On/off toggle.

use almanac_core::command::Command;
use almanac_core::component::Component;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::cell::Cell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeyPress(KeyEvent),
    Pressed,
    /// Emitted with the requested new state.
    Toggled(bool),
}

/// A labelled switch drawn as `(●  ) label`.
///
/// By default the switch keeps its own state. A controlled switch only
/// reports `Toggled` and shows whatever the owner passes to
/// [`set_checked`](Switch::set_checked).
pub struct Switch {
    checked: bool,
    controlled: bool,
    label: String,
    focus: bool,
    disabled: bool,
    area: Cell<Rect>,
}

impl Switch {
    pub fn new(checked: bool) -> Self {
        Self {
            checked,
            controlled: false,
            label: String::new(),
            focus: false,
            disabled: false,
            area: Cell::new(Rect::default()),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_controlled(mut self, controlled: bool) -> Self {
        self.controlled = controlled;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn press(&self, pos: Position) -> Option<Message> {
        self.area.get().contains(pos).then_some(Message::Pressed)
    }

    fn toggle(&mut self) -> Command<Message> {
        if self.disabled {
            return Command::none();
        }
        let next = !self.checked;
        if !self.controlled {
            self.checked = next;
        }
        tracing::trace!(checked = next, "switch toggled");
        Command::message(Message::Toggled(next))
    }
}

impl Component for Switch {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => self.toggle(),
                _ => Command::none(),
            },
            Message::Pressed => self.toggle(),
            Message::KeyPress(_) | Message::Toggled(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        self.area.set(area);
        let (knob, color) = if self.checked {
            ("(  ●)", Color::Green)
        } else {
            ("(●  )", Color::DarkGray)
        };
        let mut knob_style = Style::default().fg(color);
        let mut label_style = Style::default();
        if self.disabled {
            knob_style = knob_style.add_modifier(Modifier::DIM);
            label_style = label_style.fg(Color::DarkGray);
        } else if self.focus {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }
        let line = Line::from(vec![
            Span::styled(knob, knob_style),
            Span::raw(" "),
            Span::styled(self.label.as_str(), label_style),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn space_toggles_when_focused() {
        let mut switch = Switch::new(false);
        assert!(switch.update(Message::KeyPress(key(KeyCode::Char(' ')))).is_none());
        switch.focus();
        let cmd = switch.update(Message::KeyPress(key(KeyCode::Char(' '))));
        assert_eq!(cmd.into_message(), Some(Message::Toggled(true)));
        assert!(switch.is_checked());
        switch.update(Message::KeyPress(key(KeyCode::Enter)));
        assert!(!switch.is_checked());
    }

    #[test]
    fn controlled_waits_for_owner() {
        let mut switch = Switch::new(false).with_controlled(true);
        let cmd = switch.update(Message::Pressed);
        assert_eq!(cmd.into_message(), Some(Message::Toggled(true)));
        assert!(!switch.is_checked());
        switch.set_checked(true);
        assert!(switch.is_checked());
    }

    #[test]
    fn disabled_ignores_presses() {
        let mut switch = Switch::new(true).with_disabled(true);
        assert!(switch.update(Message::Pressed).is_none());
        assert!(switch.is_checked());
    }
}
