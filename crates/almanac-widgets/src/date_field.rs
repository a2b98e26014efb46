//! Read-only field that shows a formatted selection and opens a picker.

use crate::chrome::{field_block, fit_width, FieldState};
use crate::date_value::{DateValue, SelectionMode};
use crate::format::{format_value, DateFormat};
use almanac_core::command::Command;
use almanac_core::component::Component;
use chrono::Locale;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::cell::Cell;

/// Messages for [`DateField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeyPress(KeyEvent),
    /// The field was clicked.
    Pressed,
    /// Emitted when the user asks to open the picker.
    Activated,
}

/// A bordered, non-editable line showing the chosen date(s).
pub struct DateField {
    label: String,
    placeholder: String,
    value: DateValue,
    mode: SelectionMode,
    format: DateFormat,
    locale: Locale,
    focus: bool,
    disabled: bool,
    error: bool,
    area: Cell<Rect>,
}

impl Default for DateField {
    fn default() -> Self {
        Self::new()
    }
}

impl DateField {
    pub fn new() -> Self {
        Self {
            label: String::new(),
            placeholder: "Pick a date".to_string(),
            value: DateValue::Empty,
            mode: SelectionMode::default(),
            format: DateFormat::default(),
            locale: Locale::en_US,
            focus: false,
            disabled: false,
            error: false,
            area: Cell::new(Rect::default()),
        }
    }

    /// Title drawn in the border.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// How the value is read; a range-mode field shows nothing for a single date.
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_format(mut self, format: DateFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn set_value(&mut self, value: DateValue) {
        self.value = value;
    }

    pub fn value(&self) -> &DateValue {
        &self.value
    }

    /// The text currently shown, empty when nothing is selected.
    pub fn text(&self) -> String {
        format_value(&self.value, self.mode, &self.format, self.locale)
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Draw the border red. Validation is up to the owner.
    pub fn set_error(&mut self, error: bool) {
        self.error = error;
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// The area drawn by the last render.
    pub fn area(&self) -> Rect {
        self.area.get()
    }

    /// Whether a press at `pos` lands on the field.
    pub fn press(&self, pos: Position) -> Option<Message> {
        self.area.get().contains(pos).then_some(Message::Pressed)
    }

    fn activate(&self) -> Command<Message> {
        if self.disabled {
            Command::none()
        } else {
            Command::message(Message::Activated)
        }
    }
}

impl Component for DateField {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => self.activate(),
                _ => Command::none(),
            },
            Message::Pressed => self.activate(),
            Message::KeyPress(_) | Message::Activated => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        self.area.set(area);
        let state = FieldState {
            focused: self.focus,
            error: self.error,
            disabled: self.disabled,
        };
        let block = field_block(&self.label, state);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = usize::from(inner.width);
        let text = self.text();
        let span = if text.is_empty() {
            Span::styled(fit_width(&self.placeholder, width), Style::default().fg(Color::DarkGray))
        } else if self.disabled {
            Span::styled(fit_width(&text, width), Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(fit_width(&text, width))
        };
        frame.render_widget(Paragraph::new(Line::from(span)), inner);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn render(field: &DateField) -> String {
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|frame| field.view(frame, frame.area()))
            .unwrap();
        almanac_core::testing::buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn shows_placeholder_then_value() {
        let mut field = DateField::new().with_label("Start");
        assert!(render(&field).contains("Pick a date"));
        field.set_value(DateValue::Single(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
        let text = render(&field);
        assert!(text.contains("Mar 05, 2024"));
        assert!(text.contains("Start"));
    }

    #[test]
    fn range_field_hides_single_date() {
        let mut field = DateField::new().with_mode(SelectionMode::Range);
        field.set_value(DateValue::Single(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
        assert_eq!(field.text(), "");
        assert!(render(&field).contains("Pick a date"));
    }

    #[test]
    fn enter_activates_when_focused() {
        let mut field = DateField::new();
        assert!(field.update(Message::KeyPress(key(KeyCode::Enter))).is_none());
        field.focus();
        let cmd = field.update(Message::KeyPress(key(KeyCode::Enter)));
        assert_eq!(cmd.into_message(), Some(Message::Activated));
    }

    #[test]
    fn disabled_never_activates() {
        let mut field = DateField::new().with_disabled(true);
        field.focus();
        assert!(field.update(Message::Pressed).is_none());
        assert!(field.update(Message::KeyPress(key(KeyCode::Enter))).is_none());
    }

    #[test]
    fn press_hits_last_render_area() {
        let field = DateField::new();
        render(&field);
        assert_eq!(field.press(Position::new(5, 1)), Some(Message::Pressed));
        assert_eq!(field.press(Position::new(5, 3)), None);
    }

    #[test]
    fn error_flag_turns_border_red() {
        let mut field = DateField::new();
        field.set_error(true);
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| field.view(frame, frame.area()))
            .unwrap();
        assert_eq!(terminal.backend().buffer()[(0, 0)].fg, Color::Red);
    }
}
