//! Push button with variants, sizes and a loading state.

use almanac_core::command::Command;
use almanac_core::component::Component;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Destructive,
    Outlined,
    Text,
}

impl ButtonVariant {
    pub fn style(self) -> Style {
        match self {
            ButtonVariant::Primary => Style::default().fg(Color::White).bg(Color::Black),
            ButtonVariant::Secondary => Style::default().fg(Color::Black).bg(Color::Gray),
            ButtonVariant::Destructive => Style::default().fg(Color::White).bg(Color::Red),
            ButtonVariant::Outlined | ButtonVariant::Text => Style::default(),
        }
    }
}

/// Horizontal padding around the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonSize {
    fn padding(self) -> usize {
        match self {
            ButtonSize::Small => 1,
            ButtonSize::Medium => 2,
            ButtonSize::Large => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeyPress(KeyEvent),
    /// The button area was clicked.
    Clicked,
    /// Emitted when the button fires.
    Pressed,
    /// The owner finished handling a press; clears the busy state.
    Done,
}

/// A one-line button, or three lines for [`ButtonVariant::Outlined`].
///
/// Presses are ignored while the button is disabled or loading. With
/// [`with_hold`](Button::with_hold) the button also stays busy from the
/// moment it fires until the owner sends [`Message::Done`].
pub struct Button {
    label: String,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    loading: bool,
    hold: bool,
    busy: bool,
    focus: bool,
    area: Cell<Rect>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::default(),
            size: ButtonSize::default(),
            disabled: false,
            loading: false,
            hold: false,
            busy: false,
            focus: false,
            area: Cell::new(Rect::default()),
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Loading, either set by the owner or held since the last press.
    pub fn is_loading(&self) -> bool {
        self.loading || self.busy
    }

    pub fn variant(&self) -> ButtonVariant {
        self.variant
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn press(&self, pos: Position) -> Option<Message> {
        self.area.get().contains(pos).then_some(Message::Clicked)
    }

    /// Columns needed for the label and padding.
    pub fn width(&self) -> u16 {
        let border = if self.variant == ButtonVariant::Outlined { 2 } else { 0 };
        let text = self.text();
        u16::try_from(text.width() + border).unwrap_or(u16::MAX)
    }

    pub fn height(&self) -> u16 {
        if self.variant == ButtonVariant::Outlined {
            3
        } else {
            1
        }
    }

    fn text(&self) -> String {
        let pad = " ".repeat(self.size.padding());
        let marker = if self.is_loading() { "⋯ " } else { "" };
        format!("{pad}{marker}{}{pad}", self.label)
    }

    fn fire(&mut self) -> Command<Message> {
        if self.disabled || self.is_loading() {
            tracing::trace!(label = %self.label, "button press ignored");
            return Command::none();
        }
        if self.hold {
            self.busy = true;
        }
        Command::message(Message::Pressed)
    }

    fn style(&self) -> Style {
        if self.disabled {
            return Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM);
        }
        let mut style = self.variant.style();
        if self.is_loading() {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.focus {
            style = style.add_modifier(Modifier::BOLD);
            if self.variant == ButtonVariant::Text {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
        }
        style
    }
}

impl Component for Button {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.fire(),
                _ => Command::none(),
            },
            Message::Clicked => self.fire(),
            Message::Done => {
                self.busy = false;
                Command::none()
            }
            Message::KeyPress(_) | Message::Pressed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let area = Rect {
            width: area.width.min(self.width()),
            height: area.height.min(self.height()),
            ..area
        };
        self.area.set(area);
        let mut paragraph = Paragraph::new(self.text())
            .alignment(Alignment::Center)
            .style(self.style());
        if self.variant == ButtonVariant::Outlined {
            let border = if self.focus { Color::Cyan } else { Color::Gray };
            paragraph = paragraph.block(
                Block::new()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        }
        frame.render_widget(paragraph, area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
