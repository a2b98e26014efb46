//! A date field that opens a [`Calendar`] popup.
//!
//! The picker owns the open flag and, while open, the calendar. It keeps
//! its own copy of the selection in sync with what the calendar asks for
//! and re-emits every change to its parent as [`Message::Changed`].
//!
//! While the popup is open the picker declares a pointer listener (see
//! [`Component::subscriptions`]); a press outside the field and the popup
//! closes it. The listener disappears with the popup, so opening and
//! closing any number of times leaves nothing registered.
//!
//! Parents forward key events and, *only while the picker is closed*,
//! pointer presses:
//!
//! ```ignore
//! fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!     let forward_presses = !self.picker.is_open();
//!     let mut subs = vec![terminal_events(move |event| match event {
//!         TerminalEvent::Key(key) => Some(Msg::Picker(date_picker::Message::KeyPress(key))),
//!         TerminalEvent::Mouse(_) if forward_presses => event
//!             .pointer_press()
//!             .map(|pos| Msg::Picker(date_picker::Message::Pointer(pos))),
//!         _ => None,
//!     })];
//!     subs.extend(self.picker.subscriptions().into_iter().map(|s| s.map(Msg::Picker)));
//!     subs
//! }
//! ```

use crate::calendar::{self, Calendar};
use crate::date_field::{self, DateField};
use crate::date_value::{DateValue, SelectionMode};
use crate::format::DateFormat;
use crate::locale::LocaleConfig;
use crate::overlay::{anchored_popup, render_overlay};
use almanac_core::command::Command;
use almanac_core::component::Component;
use almanac_core::subscription::{pointer_presses, Subscription, SubscriptionId};
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use ratatui::layout::{Position, Rect};
use ratatui::Frame;

/// Messages for [`DatePicker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeyPress(KeyEvent),
    /// A pointer press in screen coordinates.
    Pointer(Position),
    Field(date_field::Message),
    Calendar(calendar::Message),
    Open,
    Close,
    /// Emitted whenever the selection changes.
    Changed(DateValue),
}

/// Date field plus calendar popup.
///
/// # Example
///
/// ```ignore
/// use almanac_widgets::date_picker::DatePicker;
/// use almanac_widgets::date_value::SelectionMode;
///
/// let picker = DatePicker::new(1)
///     .with_mode(SelectionMode::Range)
///     .with_label("Stay")
///     .with_placeholder("Check-in - check-out");
/// ```
pub struct DatePicker {
    id: u64,
    mode: SelectionMode,
    value: DateValue,
    config: LocaleConfig,
    today: Option<NaiveDate>,
    field: DateField,
    calendar: Option<Calendar>,
    focus: bool,
}

impl DatePicker {
    /// Create a closed picker. `id` tells pickers on the same screen apart.
    pub fn new(id: u64) -> Self {
        let config = LocaleConfig::default();
        Self {
            id,
            mode: SelectionMode::Single,
            value: DateValue::Empty,
            config,
            today: None,
            field: DateField::new().with_locale(config.locale()),
            calendar: None,
            focus: false,
        }
    }

    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self.field = self.field.with_mode(mode);
        self
    }

    pub fn with_value(mut self, value: DateValue) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.field = self.field.with_label(label);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.field = self.field.with_placeholder(placeholder);
        self
    }

    pub fn with_format(mut self, format: DateFormat) -> Self {
        self.field = self.field.with_format(format);
        self
    }

    /// Locale for labels and the field text, timezone for "today".
    pub fn with_locale(mut self, config: LocaleConfig) -> Self {
        self.config = config;
        self.field = self.field.with_locale(config.locale());
        self
    }

    /// Pin "today" instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Replace the selection from outside.
    pub fn set_value(&mut self, value: DateValue) {
        self.value = value.normalized();
        self.field.set_value(self.value);
        if let Some(calendar) = self.calendar.as_mut() {
            calendar.set_value(self.value);
        }
    }

    pub fn value(&self) -> &DateValue {
        &self.value
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Disabling also closes an open popup.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.field.set_disabled(disabled);
        if disabled {
            self.close();
        }
    }

    pub fn set_error(&mut self, error: bool) {
        self.field.set_error(error);
    }

    pub fn is_open(&self) -> bool {
        self.calendar.is_some()
    }

    pub fn calendar(&self) -> Option<&Calendar> {
        self.calendar.as_ref()
    }

    /// The id under which the outside-press listener is registered.
    pub fn listener_id(&self) -> SubscriptionId {
        SubscriptionId::new::<DatePicker>(self.id)
    }

    pub fn focus(&mut self) {
        self.focus = true;
        self.field.focus();
    }

    pub fn blur(&mut self) {
        self.focus = false;
        self.field.blur();
        self.close();
    }

    fn open(&mut self) {
        if self.calendar.is_some() || self.field.is_disabled() {
            return;
        }
        let mut calendar = Calendar::new(self.mode, self.value, &self.config);
        if let Some(today) = self.today {
            calendar = calendar.with_today(today);
        }
        calendar.focus();
        tracing::debug!(id = self.id, mode = ?self.mode, "picker opened");
        self.calendar = Some(calendar);
    }

    fn close(&mut self) {
        if self.calendar.take().is_some() {
            tracing::debug!(id = self.id, "picker closed");
        }
    }

    fn handle_press(&mut self, pos: Position) -> Command<Message> {
        match self.calendar.as_ref() {
            None => self.update(Message::Field(date_field::Message::Pressed)),
            Some(calendar) if calendar.contains(pos) => {
                self.update(Message::Calendar(calendar::Message::Pointer(pos)))
            }
            Some(_) if self.field.area().contains(pos) => Command::none(),
            Some(_) => {
                tracing::debug!(id = self.id, x = pos.x, y = pos.y, "press outside picker");
                self.close();
                Command::none()
            }
        }
    }
}

impl Component for DatePicker {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.is_open() => {
                self.update(Message::Calendar(calendar::Message::KeyPress(key)))
            }
            Message::KeyPress(key) => self.update(Message::Field(date_field::Message::KeyPress(key))),
            Message::Pointer(pos) if self.is_open() => self.handle_press(pos),
            Message::Pointer(pos) => match self.field.press(pos) {
                Some(press) => self.update(Message::Field(press)),
                None => Command::none(),
            },
            Message::Open | Message::Field(date_field::Message::Activated) => {
                self.open();
                Command::none()
            }
            Message::Close | Message::Calendar(calendar::Message::CloseRequested) => {
                self.close();
                Command::none()
            }
            Message::Calendar(calendar::Message::Changed(value)) => {
                self.set_value(value);
                tracing::debug!(id = self.id, value = ?self.value, "picker value changed");
                Command::message(Message::Changed(self.value))
            }
            Message::Calendar(msg) => match self.calendar.as_mut() {
                Some(calendar) => calendar.update(msg).map(Message::Calendar),
                None => Command::none(),
            },
            Message::Field(msg) => self.field.update(msg).map(Message::Field),
            Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        self.field.view(frame, area);
        if let Some(calendar) = self.calendar.as_ref() {
            let popup = anchored_popup(area, calendar::WIDTH, calendar::HEIGHT, frame.area());
            render_overlay(frame, popup, None);
            calendar.view(frame, popup);
        }
    }

    /// Outside presses are only interesting while the popup is open.
    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.is_open() {
            vec![pointer_presses(self.listener_id(), |pos| {
                Some(Message::Pointer(pos))
            })]
        } else {
            vec![]
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
