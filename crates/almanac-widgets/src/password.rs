//! Password input with a reveal toggle, strength meter and criteria list.

use crate::chrome::{field_block, FieldState};
use almanac_core::command::Command;
use almanac_core::component::Component;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Minimum length counted by [`check_password_criteria`].
pub const MIN_LENGTH: usize = 8;

/// Coarse password strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    VeryWeak,
    Weak,
    Good,
    Great,
}

impl PasswordStrength {
    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::VeryWeak => "Very weak",
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Good => "Good",
            PasswordStrength::Great => "Great",
        }
    }

    pub fn color(self) -> Color {
        match self {
            PasswordStrength::VeryWeak => Color::Red,
            PasswordStrength::Weak => Color::LightRed,
            PasswordStrength::Good => Color::Yellow,
            PasswordStrength::Great => Color::Green,
        }
    }

    /// Filled segments out of four.
    pub fn segments(self) -> usize {
        self as usize + 1
    }
}

/// Which rules a password satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordCriteria {
    /// At least [`MIN_LENGTH`] characters.
    pub min_length: bool,
    /// An ASCII lowercase letter.
    pub lowercase: bool,
    /// An ASCII uppercase letter.
    pub uppercase: bool,
    /// An ASCII digit.
    pub number: bool,
    /// Anything that is not an ASCII letter or digit, underscore included.
    pub special_char: bool,
}

impl PasswordCriteria {
    /// Number of rules met, 0 to 5.
    pub fn score(&self) -> usize {
        [
            self.min_length,
            self.lowercase,
            self.uppercase,
            self.number,
            self.special_char,
        ]
        .iter()
        .filter(|met| **met)
        .count()
    }

    /// Each rule with a short description, in display order.
    pub fn checklist(&self) -> [(&'static str, bool); 5] {
        [
            ("At least 8 characters", self.min_length),
            ("One lowercase letter", self.lowercase),
            ("One uppercase letter", self.uppercase),
            ("One number", self.number),
            ("One special character", self.special_char),
        ]
    }
}

pub fn check_password_criteria(password: &str) -> PasswordCriteria {
    PasswordCriteria {
        min_length: password.chars().count() >= MIN_LENGTH,
        lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
        uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        number: password.chars().any(|c| c.is_ascii_digit()),
        special_char: password.chars().any(|c| !c.is_ascii_alphanumeric()),
    }
}

/// One point per satisfied rule: at most one is very weak, two weak, three
/// or four good, all five great.
pub fn password_strength(password: &str) -> PasswordStrength {
    match check_password_criteria(password).score() {
        0 | 1 => PasswordStrength::VeryWeak,
        2 => PasswordStrength::Weak,
        3 | 4 => PasswordStrength::Good,
        _ => PasswordStrength::Great,
    }
}

/// Messages for [`PasswordField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeyPress(KeyEvent),
    Paste(String),
    ToggleReveal,
    /// Emitted when the value changes.
    Changed(String),
    /// Emitted when Enter is pressed.
    Submit(String),
}

/// A masked single-line input.
///
/// `Ctrl+R` toggles between masked and plain text.
pub struct PasswordField {
    value: Vec<char>,
    cursor: usize,
    focus: bool,
    revealed: bool,
    mask: char,
    label: String,
    placeholder: String,
    show_strength: bool,
    show_criteria: bool,
    disabled: bool,
    error: Option<String>,
}

impl Default for PasswordField {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordField {
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            focus: false,
            revealed: false,
            mask: '•',
            label: String::new(),
            placeholder: "Enter your password".to_string(),
            show_strength: false,
            show_criteria: false,
            disabled: false,
            error: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_strength(mut self, show: bool) -> Self {
        self.show_strength = show;
        self
    }

    pub fn with_criteria(mut self, show: bool) -> Self {
        self.show_criteria = show;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
    }

    /// Show an error under the field and draw the border red.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn strength(&self) -> PasswordStrength {
        password_strength(&self.value())
    }

    pub fn criteria(&self) -> PasswordCriteria {
        check_password_criteria(&self.value())
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Rows needed to draw the field with its extras.
    pub fn height(&self) -> u16 {
        let mut rows = 3;
        if self.show_strength {
            rows += 1;
        }
        if self.show_criteria {
            rows += 5;
        }
        if self.error.is_some() {
            rows += 1;
        }
        rows
    }

    fn changed(&self) -> Command<Message> {
        Command::message(Message::Changed(self.value()))
    }

    fn insert(&mut self, text: &str) -> Command<Message> {
        let chars: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        if chars.is_empty() {
            return Command::none();
        }
        for c in chars {
            self.value.insert(self.cursor, c);
            self.cursor += 1;
        }
        self.changed()
    }

    fn delete_word_backward(&mut self) -> Command<Message> {
        if self.cursor == 0 {
            return Command::none();
        }
        let mut start = self.cursor;
        while start > 0 && self.value[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && self.value[start - 1] != ' ' {
            start -= 1;
        }
        self.value.drain(start..self.cursor);
        self.cursor = start;
        self.changed()
    }

    fn display_value(&self) -> String {
        if self.revealed {
            self.value()
        } else {
            self.mask.to_string().repeat(self.value.len())
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('r'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.update(Message::ToggleReveal)
            }
            (KeyCode::Char('w'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.delete_word_backward()
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert(c.encode_utf8(&mut [0; 4]))
            }
            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                self.value.remove(self.cursor);
                self.changed()
            }
            (KeyCode::Delete, _) if self.cursor < self.value.len() => {
                self.value.remove(self.cursor);
                self.changed()
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                Command::none()
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(self.value.len());
                Command::none()
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                Command::none()
            }
            (KeyCode::End, _) => {
                self.cursor = self.value.len();
                Command::none()
            }
            (KeyCode::Enter, _) => Command::message(Message::Submit(self.value())),
            _ => Command::none(),
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let state = FieldState {
            focused: self.focus,
            error: self.error.is_some(),
            disabled: self.disabled,
        };
        let toggle = if self.revealed { " hide " } else { " show " };
        let block = field_block(&self.label, state)
            .title_bottom(Line::from(toggle).right_aligned());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = if self.value.is_empty() && !self.focus {
            Line::from(Span::styled(
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            let shown: Vec<char> = self.display_value().chars().collect();
            let before: String = shown[..self.cursor.min(shown.len())].iter().collect();
            let at: String = shown.get(self.cursor).map_or(" ".to_string(), |c| c.to_string());
            let after: String = shown.iter().skip(self.cursor + 1).collect();
            let cursor_style = if self.focus {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(before),
                Span::styled(at, cursor_style),
                Span::raw(after),
            ])
        };
        frame.render_widget(Paragraph::new(line), inner);
    }
}

impl Component for PasswordField {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus && !self.disabled => self.handle_key(key),
            Message::Paste(text) if self.focus && !self.disabled => self.insert(&text),
            Message::ToggleReveal => {
                self.revealed = !self.revealed;
                Command::none()
            }
            Message::KeyPress(_) | Message::Paste(_) => Command::none(),
            Message::Changed(_) | Message::Submit(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let mut constraints = vec![Constraint::Length(3)];
        if self.show_strength {
            constraints.push(Constraint::Length(1));
        }
        if self.show_criteria {
            constraints.push(Constraint::Length(5));
        }
        if self.error.is_some() {
            constraints.push(Constraint::Length(1));
        }
        let rows = Layout::vertical(constraints).split(area);
        let mut rows = rows.iter().copied();

        if let Some(input) = rows.next() {
            self.render_input(frame, input);
        }

        if self.show_strength {
            if let Some(row) = rows.next() {
                let strength = self.strength();
                let filled = if self.value.is_empty() { 0 } else { strength.segments() };
                let bar: String = (0..4).map(|i| if i < filled { "██" } else { "░░" }).collect();
                let label = if self.value.is_empty() { "" } else { strength.label() };
                let line = Line::from(vec![
                    Span::styled(bar, Style::default().fg(strength.color())),
                    Span::raw(" "),
                    Span::styled(label, Style::default().fg(strength.color())),
                ]);
                frame.render_widget(Paragraph::new(line), row);
            }
        }

        if self.show_criteria {
            if let Some(row) = rows.next() {
                let lines: Vec<Line> = self
                    .criteria()
                    .checklist()
                    .iter()
                    .map(|(text, met)| {
                        let (mark, color) = if *met {
                            ("✓", Color::Green)
                        } else {
                            ("✗", Color::DarkGray)
                        };
                        Line::from(vec![
                            Span::styled(mark, Style::default().fg(color)),
                            Span::raw(" "),
                            Span::styled(*text, Style::default().fg(color)),
                        ])
                    })
                    .collect();
                frame.render_widget(Paragraph::new(lines), row);
            }
        }

        if let Some(error) = self.error.as_deref() {
            if let Some(row) = rows.next() {
                frame.render_widget(
                    Paragraph::new(error).style(Style::default().fg(Color::Red)),
                    row,
                );
            }
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
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

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    #[test]
    fn strength_buckets() {
        assert_eq!(password_strength(""), PasswordStrength::VeryWeak);
        assert_eq!(password_strength("abc"), PasswordStrength::VeryWeak);
        assert_eq!(password_strength("abcdefgh"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcDEF"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdefG1"), PasswordStrength::Good);
        assert_eq!(password_strength("abcD1"), PasswordStrength::Good);
        assert_eq!(password_strength("abcdefG1!"), PasswordStrength::Great);
        assert_eq!(password_strength("abcdefG1_"), PasswordStrength::Great);
    }

    #[test]
    fn criteria_detail() {
        let c = check_password_criteria("Pässwort");
        assert!(c.min_length);
        assert!(c.lowercase && c.uppercase);
        assert!(!c.number);
        // Non-ASCII letters count as special characters.
        assert!(c.special_char);
        assert_eq!(c.score(), 4);

        let c = check_password_criteria("short");
        assert_eq!(c, PasswordCriteria {
            lowercase: true,
            ..PasswordCriteria::default()
        });
    }

    #[test]
    fn length_counts_characters() {
        assert!(check_password_criteria("ääääääää").min_length);
        assert!(!check_password_criteria("äääää").min_length);
    }

    #[test]
    fn typing_emits_changes() {
        let mut field = PasswordField::new();
        field.focus();
        let cmd = field.update(Message::KeyPress(key(KeyCode::Char('a'))));
        assert_eq!(cmd.into_message(), Some(Message::Changed("a".into())));
        field.update(Message::Paste("bc\n".into()));
        assert_eq!(field.value(), "abc");
        field.update(Message::KeyPress(key(KeyCode::Left)));
        field.update(Message::KeyPress(key(KeyCode::Backspace)));
        assert_eq!(field.value(), "ac");
        let submit = field.update(Message::KeyPress(key(KeyCode::Enter)));
        assert_eq!(submit.into_message(), Some(Message::Submit("ac".into())));
    }

    #[test]
    fn ctrl_w_deletes_word() {
        let mut field = PasswordField::new();
        field.focus();
        field.set_value("correct horse");
        field.update(Message::KeyPress(ctrl('w')));
        assert_eq!(field.value(), "correct ");
    }

    #[test]
    fn ignores_input_when_blurred_or_disabled() {
        let mut field = PasswordField::new();
        assert!(field.update(Message::KeyPress(key(KeyCode::Char('x')))).is_none());
        let mut field = PasswordField::new().with_disabled(true);
        field.focus();
        assert!(field.update(Message::Paste("x".into())).is_none());
        assert_eq!(field.value(), "");
    }

    #[test]
    fn masks_until_revealed() {
        let mut field = PasswordField::new().with_strength(true).with_criteria(true);
        field.set_value("Secret1!");
        let render = |field: &PasswordField| {
            let mut terminal = Terminal::new(TestBackend::new(30, field.height())).unwrap();
            terminal.draw(|f| field.view(f, f.area())).unwrap();
            almanac_core::testing::buffer_to_string(terminal.backend().buffer())
        };
        let masked = render(&field);
        assert!(masked.contains("••••••••"));
        assert!(!masked.contains("Secret1!"));
        assert!(masked.contains("Great"));
        assert!(masked.contains("✓ One number"));

        field.focus();
        field.update(Message::KeyPress(ctrl('r')));
        assert!(field.is_revealed());
        assert!(render(&field).contains("Secret1!"));
    }

    #[test]
    fn height_tracks_extras() {
        let mut field = PasswordField::new();
        assert_eq!(field.height(), 3);
        field = field.with_strength(true).with_criteria(true);
        field.set_error(Some("required".into()));
        assert_eq!(field.height(), 10);
    }
}
