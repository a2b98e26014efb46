//! Month calendar with single-date or range selection.
//!
//! The calendar does not own the selection. It is given a [`DateValue`],
//! draws it, and on a click emits [`Message::Changed`] with the value its
//! owner should store (then push back through [`Calendar::set_value`]).
//! [`Message::CloseRequested`] follows whenever the selection is complete:
//! after every click in single mode and after the second endpoint in range
//! mode.
//!
//! What is *shown* is the calendar's own business: a [`DisplayMonth`]
//! moved by the arrow buttons, the month and year dropdowns, and the
//! keyboard cursor.
//!
//! | Key | Action |
//! |-----|--------|
//! | Arrows | Move the cursor a day or a week |
//! | `PgUp` / `PgDn` | Previous / next month |
//! | `Home` / `End` | First / last day of the month |
//! | `Enter` / `Space` | Select the day under the cursor |
//! | `Tab` / `Shift+Tab` | Cycle focus between days, month and year |
//! | `Esc` | Close an open dropdown, otherwise request close |

use crate::date_value::{select_date, DateValue, SelectionMode};
use crate::display_month::DisplayMonth;
use crate::labels::{month_options, weekday_labels, year_options};
use crate::locale::LocaleConfig;
use crate::month_grid::MonthGrid;
use crate::select::{self, OptionSelect};
use almanac_core::command::Command;
use almanac_core::component::Component;
use chrono::{Datelike, NaiveDate, TimeDelta};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::cell::Cell;

/// Terminal cells per day column.
pub const CELL_WIDTH: u16 = 4;
/// Width of a bordered calendar.
pub const WIDTH: u16 = CELL_WIDTH * 7 + 2;
/// Height of a bordered calendar with room for six weeks.
pub const HEIGHT: u16 = 6 + 4;

/// Messages for [`Calendar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeyPress(KeyEvent),
    /// A pointer press, in screen coordinates.
    Pointer(Position),
    DayClicked(NaiveDate),
    PreviousMonth,
    NextMonth,
    MonthSelect(select::Message),
    YearSelect(select::Message),
    /// Emitted with the value the owner should store.
    Changed(DateValue),
    /// Emitted when the selection is complete and the popup should close.
    CloseRequested,
}

/// Which part of the calendar receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Part {
    #[default]
    Days,
    Month,
    Year,
}

/// Colors for the day grid.
#[derive(Debug, Clone)]
pub struct CalendarStyle {
    pub day: Style,
    pub outside_month: Style,
    pub weekday: Style,
    pub today: Style,
    pub selected: Style,
    pub in_range: Style,
    pub cursor: Style,
    pub border: Style,
}

impl Default for CalendarStyle {
    fn default() -> Self {
        Self {
            day: Style::default(),
            outside_month: Style::default().fg(Color::DarkGray),
            weekday: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            today: Style::default().add_modifier(Modifier::UNDERLINED),
            selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            in_range: Style::default().bg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            border: Style::default().fg(Color::Cyan),
        }
    }
}

/// Screen areas from the last render, for pointer hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Layout {
    outer: Rect,
    previous: Rect,
    next: Rect,
    month: Rect,
    year: Rect,
    weekdays: Rect,
    days: Rect,
}

impl Layout {
    fn compute(area: Rect, month_width: u16, year_width: u16) -> Self {
        let inner = Block::new().borders(Borders::ALL).inner(area);
        let header_y = inner.y;
        let previous = Rect::new(inner.x, header_y, 2.min(inner.width), inner.height.min(1));
        let next_x = inner.right().saturating_sub(2).max(inner.x);
        let next = Rect::new(next_x, header_y, inner.right() - next_x, inner.height.min(1));

        let middle_x = previous.right() + 1;
        let middle_width = next.x.saturating_sub(middle_x + 1);
        let year_width = year_width.min(middle_width);
        let month_width = month_width.min(middle_width.saturating_sub(year_width + 1));
        let month = Rect::new(middle_x, header_y, month_width, inner.height.min(1));
        let year = Rect::new(month.right() + 1, header_y, year_width, inner.height.min(1));

        let weekdays = Rect::new(inner.x, header_y + 1, inner.width, 1).intersection(inner);
        let days = Rect::new(inner.x, header_y + 2, CELL_WIDTH * 7, 6).intersection(inner);
        Self {
            outer: area,
            previous,
            next,
            month,
            year,
            weekdays,
            days,
        }
    }

    /// Grid index of the day cell under `pos`.
    fn day_index(&self, pos: Position) -> Option<usize> {
        if !self.days.contains(pos) {
            return None;
        }
        let col = usize::from((pos.x - self.days.x) / CELL_WIDTH);
        let row = usize::from(pos.y - self.days.y);
        (col < 7).then_some(row * 7 + col)
    }
}

/// The calendar component.
///
/// # Example
///
/// ```ignore
/// use almanac_widgets::calendar::Calendar;
/// use almanac_widgets::date_value::{DateValue, SelectionMode};
/// use almanac_widgets::locale::LocaleConfig;
///
/// let calendar = Calendar::new(SelectionMode::Range, DateValue::Empty, &LocaleConfig::from_env());
/// ```
pub struct Calendar {
    mode: SelectionMode,
    value: DateValue,
    display: DisplayMonth,
    today: NaiveDate,
    weekdays: [String; 7],
    month_select: OptionSelect,
    year_select: OptionSelect,
    part: Part,
    focus: bool,
    style: CalendarStyle,
    layout: Cell<Layout>,
}

impl Calendar {
    /// Open on the month of the value's first date, or on today.
    pub fn new(mode: SelectionMode, value: DateValue, config: &LocaleConfig) -> Self {
        let value = value.normalized();
        let today = config.today();
        let display = DisplayMonth::initial(&value, today);
        let mut calendar = Self {
            mode,
            value,
            display,
            today,
            weekdays: weekday_labels(config.locale()),
            month_select: OptionSelect::new(month_options(config.locale())).with_placeholder(""),
            year_select: OptionSelect::new(year_options()).with_placeholder(""),
            part: Part::Days,
            focus: false,
            style: CalendarStyle::default(),
            layout: Cell::new(Layout::default()),
        };
        calendar.show(display);
        calendar
    }

    /// Override today's date. Without a selection, the display moves to it.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        if self.value.first_date().is_none() {
            self.show(DisplayMonth::from_date(today));
        }
        self
    }

    pub fn with_style(mut self, style: CalendarStyle) -> Self {
        self.style = style;
        self
    }

    /// Store the value the owner settled on.
    pub fn set_value(&mut self, value: DateValue) {
        self.value = value.normalized();
    }

    pub fn value(&self) -> &DateValue {
        &self.value
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn display(&self) -> DisplayMonth {
        self.display
    }

    /// The day under the keyboard cursor.
    pub fn cursor(&self) -> NaiveDate {
        self.display.anchor()
    }

    pub fn grid(&self) -> Option<MonthGrid> {
        self.display.grid().ok()
    }

    pub fn part(&self) -> Part {
        self.part
    }

    pub fn focus(&mut self) {
        self.focus = true;
        self.set_part(self.part);
    }

    pub fn blur(&mut self) {
        self.focus = false;
        self.month_select.blur();
        self.year_select.blur();
    }

    /// Whether `pos` lands on the calendar or one of its open dropdowns.
    pub fn contains(&self, pos: Position) -> bool {
        self.layout.get().outer.contains(pos)
            || self.month_select.covers(pos)
            || self.year_select.covers(pos)
    }

    fn show(&mut self, display: DisplayMonth) {
        self.display = display;
        self.month_select.set_selected(Some(display.month() as i32));
        self.year_select.set_selected(Some(display.year()));
    }

    fn set_part(&mut self, part: Part) {
        self.part = part;
        self.month_select.blur();
        self.year_select.blur();
        match part {
            Part::Month if self.focus => self.month_select.focus(),
            Part::Year if self.focus => self.year_select.focus(),
            _ => {}
        }
    }

    fn move_cursor(&mut self, days: i64) {
        if let Some(date) = self.cursor().checked_add_signed(TimeDelta::days(days)) {
            self.show(DisplayMonth::from_date(date));
        }
    }

    fn click(&mut self, date: NaiveDate) -> Command<Message> {
        let outcome = select_date(self.mode, &self.value, date);
        tracing::debug!(%date, mode = ?self.mode, value = ?outcome.value, close = outcome.close, "day selected");
        if self.display.grid().is_ok_and(|g| g.is_in_month(date)) {
            self.show(DisplayMonth::from_date(date));
        }
        let changed = Command::message(Message::Changed(outcome.value));
        if outcome.close {
            Command::batch([changed, Command::message(Message::CloseRequested)])
        } else {
            changed
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if self.month_select.is_open() {
            return self.update(Message::MonthSelect(select::Message::KeyPress(key)));
        }
        if self.year_select.is_open() {
            return self.update(Message::YearSelect(select::Message::KeyPress(key)));
        }
        match key.code {
            KeyCode::Tab => {
                self.set_part(match self.part {
                    Part::Days => Part::Month,
                    Part::Month => Part::Year,
                    Part::Year => Part::Days,
                });
                return Command::none();
            }
            KeyCode::BackTab => {
                self.set_part(match self.part {
                    Part::Days => Part::Year,
                    Part::Month => Part::Days,
                    Part::Year => Part::Month,
                });
                return Command::none();
            }
            KeyCode::Esc => return Command::message(Message::CloseRequested),
            _ => {}
        }
        match self.part {
            Part::Month => self.update(Message::MonthSelect(select::Message::KeyPress(key))),
            Part::Year => self.update(Message::YearSelect(select::Message::KeyPress(key))),
            Part::Days => self.handle_day_key(key),
        }
    }

    fn handle_day_key(&mut self, key: KeyEvent) -> Command<Message> {
        match key.code {
            KeyCode::Left => self.move_cursor(-1),
            KeyCode::Right => self.move_cursor(1),
            KeyCode::Up => self.move_cursor(-7),
            KeyCode::Down => self.move_cursor(7),
            KeyCode::PageUp => self.show(self.display.previous_month()),
            KeyCode::PageDown => self.show(self.display.next_month()),
            KeyCode::Home => {
                if let Ok(first) = self.display.with_month(self.display.month()) {
                    self.show(first);
                }
            }
            KeyCode::End => {
                if let Some(last) = self.grid().and_then(|g| {
                    g.days().iter().rev().find(|d| g.is_in_month(**d)).copied()
                }) {
                    self.show(DisplayMonth::from_date(last));
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => return self.click(self.cursor()),
            _ => {}
        }
        Command::none()
    }

    fn handle_press(&mut self, pos: Position) -> Command<Message> {
        if let Some(msg) = self.month_select.press(pos) {
            if self.part != Part::Month {
                self.set_part(Part::Month);
            }
            return self.update(Message::MonthSelect(msg));
        }
        if let Some(msg) = self.year_select.press(pos) {
            if self.part != Part::Year {
                self.set_part(Part::Year);
            }
            return self.update(Message::YearSelect(msg));
        }
        if self.part != Part::Days {
            self.set_part(Part::Days);
        }

        let layout = self.layout.get();
        if layout.previous.contains(pos) {
            return self.update(Message::PreviousMonth);
        }
        if layout.next.contains(pos) {
            return self.update(Message::NextMonth);
        }
        let day = layout
            .day_index(pos)
            .and_then(|i| self.grid().and_then(|g| g.days().get(i).copied()));
        match day {
            Some(date) => self.update(Message::DayClicked(date)),
            None => Command::none(),
        }
    }

    fn render_header(&self, frame: &mut Frame, layout: &Layout) {
        let arrow = Style::default().fg(Color::Gray);
        frame.render_widget(Paragraph::new("◀").style(arrow), layout.previous);
        frame.render_widget(
            Paragraph::new("▶").style(arrow).alignment(Alignment::Right),
            layout.next,
        );
        for (col, label) in self.weekdays.iter().enumerate() {
            let cell = Rect::new(
                layout.weekdays.x + col as u16 * CELL_WIDTH,
                layout.weekdays.y,
                CELL_WIDTH,
                1,
            )
            .intersection(layout.weekdays);
            if !cell.is_empty() {
                frame.render_widget(
                    Paragraph::new(label.as_str())
                        .style(self.style.weekday)
                        .alignment(Alignment::Center),
                    cell,
                );
            }
        }
    }

    fn render_days(&self, frame: &mut Frame, layout: &Layout) {
        let Some(grid) = self.grid() else {
            return;
        };
        let cursor = self.cursor();
        for (i, day) in grid.days().iter().copied().enumerate() {
            let cell = Rect::new(
                layout.days.x + (i % 7) as u16 * CELL_WIDTH,
                layout.days.y + (i / 7) as u16,
                CELL_WIDTH,
                1,
            )
            .intersection(layout.days);
            if cell.is_empty() {
                continue;
            }

            let mark = self.value.mark(self.mode, day);
            let mut style = if grid.is_in_month(day) {
                self.style.day
            } else {
                self.style.outside_month
            };
            if mark.in_range {
                style = style.patch(self.style.in_range);
            }
            if mark.selected {
                style = style.patch(self.style.selected);
            }
            if day == self.today {
                style = style.patch(self.style.today);
            }
            if self.focus && self.part == Part::Days && day == cursor {
                style = style.patch(self.style.cursor);
            }
            frame.render_widget(
                Paragraph::new(format!(" {:>2} ", day.day())).style(style),
                cell,
            );
        }
    }
}

impl Component for Calendar {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::KeyPress(_) => Command::none(),
            Message::Pointer(pos) => self.handle_press(pos),
            Message::DayClicked(date) => self.click(date),
            Message::PreviousMonth => {
                self.show(self.display.previous_month());
                Command::none()
            }
            Message::NextMonth => {
                self.show(self.display.next_month());
                Command::none()
            }
            Message::MonthSelect(select::Message::Selected(month)) => {
                match u32::try_from(month).ok().and_then(|m| self.display.with_month(m).ok()) {
                    Some(display) => self.show(display),
                    None => tracing::warn!(month, "ignoring invalid month"),
                }
                Command::none()
            }
            Message::YearSelect(select::Message::Selected(year)) => {
                match self.display.with_year(year) {
                    Ok(display) => self.show(display),
                    Err(error) => tracing::warn!(%error, "ignoring invalid year"),
                }
                Command::none()
            }
            Message::MonthSelect(msg) => self.month_select.update(msg).map(Message::MonthSelect),
            Message::YearSelect(msg) => self.year_select.update(msg).map(Message::YearSelect),
            Message::Changed(_) | Message::CloseRequested => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let year_width = 6;
        let layout = Layout::compute(area, self.month_select.preferred_width(), year_width);
        self.layout.set(layout);

        let block = Block::new()
            .borders(Borders::ALL)
            .border_style(self.style.border);
        frame.render_widget(block, area);

        self.render_header(frame, &layout);
        self.render_days(frame, &layout);

        // Dropdown lists overlay the grid, so they go last.
        self.month_select.view(frame, layout.month);
        self.year_select.view(frame, layout.year);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn calendar(mode: SelectionMode, value: DateValue) -> Calendar {
        let mut cal = Calendar::new(mode, value, &LocaleConfig::default()).with_today(d(2024, 3, 15));
        cal.focus();
        cal
    }

    fn render(cal: &Calendar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 26)).unwrap();
        terminal
            .draw(|frame| cal.view(frame, Rect::new(0, 0, WIDTH, HEIGHT)))
            .unwrap();
        almanac_core::testing::buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn opens_on_selection_or_today() {
        let cal = calendar(SelectionMode::Single, DateValue::Single(d(2023, 7, 4)));
        assert_eq!((cal.display().year(), cal.display().month()), (2023, 7));
        assert_eq!(cal.cursor(), d(2023, 7, 4));

        let cal = calendar(SelectionMode::Range, DateValue::Empty);
        assert_eq!(cal.cursor(), d(2024, 3, 15));
    }

    #[test]
    fn single_click_changes_once_and_closes_once() {
        let mut cal = calendar(SelectionMode::Single, DateValue::Empty);
        let msgs = cal.update(Message::DayClicked(d(2024, 3, 5))).into_messages();
        assert_eq!(
            msgs,
            vec![
                Message::Changed(DateValue::Single(d(2024, 3, 5))),
                Message::CloseRequested
            ]
        );
        // Controlled: nothing changes until the owner pushes the value back.
        assert_eq!(cal.value(), &DateValue::Empty);
    }

    #[test]
    fn range_needs_two_clicks_to_close() {
        let mut cal = calendar(SelectionMode::Range, DateValue::Empty);
        let first = cal.update(Message::DayClicked(d(2024, 3, 20))).into_messages();
        assert_eq!(first, vec![Message::Changed(DateValue::range_start(d(2024, 3, 20)))]);
        cal.set_value(DateValue::range_start(d(2024, 3, 20)));

        let second = cal.update(Message::DayClicked(d(2024, 3, 5))).into_messages();
        assert_eq!(
            second,
            vec![
                Message::Changed(DateValue::range(d(2024, 3, 5), d(2024, 3, 20))),
                Message::CloseRequested
            ]
        );
    }

    #[test]
    fn arrow_buttons_step_months() {
        let mut cal = calendar(SelectionMode::Single, DateValue::Empty);
        cal.update(Message::PreviousMonth);
        assert_eq!((cal.display().year(), cal.display().month()), (2024, 2));
        let grid = cal.grid().unwrap();
        assert!(grid.days().contains(&d(2024, 2, 29)));
        cal.update(Message::NextMonth);
        cal.update(Message::NextMonth);
        assert_eq!(cal.display().month(), 4);
    }

    #[test]
    fn dropdowns_jump_to_month_and_year() {
        let mut cal = calendar(SelectionMode::Single, DateValue::Empty);
        cal.update(Message::MonthSelect(select::Message::Selected(6)));
        assert_eq!(cal.cursor(), d(2024, 6, 1));
        cal.update(Message::YearSelect(select::Message::Selected(1999)));
        assert_eq!(cal.cursor(), d(1999, 6, 1));
    }

    #[test]
    fn choosing_from_month_dropdown_round_trips() {
        let mut cal = calendar(SelectionMode::Single, DateValue::Empty);
        let out = cal.update(Message::MonthSelect(select::Message::Choose(0)));
        let msg = out.into_message().unwrap();
        assert_eq!(msg, Message::MonthSelect(select::Message::Selected(1)));
        cal.update(msg);
        assert_eq!(cal.display().month(), 1);
    }

    #[test]
    fn keyboard_moves_cursor_across_months() {
        let mut cal = calendar(SelectionMode::Single, DateValue::Single(d(2024, 1, 30)));
        cal.update(Message::KeyPress(key(KeyCode::Down)));
        assert_eq!(cal.cursor(), d(2024, 2, 6));
        assert_eq!(cal.display().month(), 2);
        cal.update(Message::KeyPress(key(KeyCode::Left)));
        assert_eq!(cal.cursor(), d(2024, 2, 5));
        cal.update(Message::KeyPress(key(KeyCode::End)));
        assert_eq!(cal.cursor(), d(2024, 2, 29));
        cal.update(Message::KeyPress(key(KeyCode::Home)));
        assert_eq!(cal.cursor(), d(2024, 2, 1));
        cal.update(Message::KeyPress(key(KeyCode::PageUp)));
        assert_eq!(cal.cursor(), d(2024, 1, 1));
    }

    #[test]
    fn enter_selects_cursor_and_esc_requests_close() {
        let mut cal = calendar(SelectionMode::Single, DateValue::Empty);
        let msgs = cal.update(Message::KeyPress(key(KeyCode::Enter))).into_messages();
        assert_eq!(msgs[0], Message::Changed(DateValue::Single(d(2024, 3, 15))));
        let esc = cal.update(Message::KeyPress(key(KeyCode::Esc)));
        assert_eq!(esc.into_message(), Some(Message::CloseRequested));
    }

    #[test]
    fn keys_ignored_without_focus() {
        let mut cal = Calendar::new(SelectionMode::Single, DateValue::Empty, &LocaleConfig::default());
        assert!(cal.update(Message::KeyPress(key(KeyCode::Enter))).is_none());
    }

    #[test]
    fn tab_reaches_month_dropdown_and_esc_only_closes_it() {
        let mut cal = calendar(SelectionMode::Single, DateValue::Empty);
        cal.update(Message::KeyPress(key(KeyCode::Tab)));
        assert_eq!(cal.part(), Part::Month);
        cal.update(Message::KeyPress(key(KeyCode::Enter)));
        let esc = cal.update(Message::KeyPress(key(KeyCode::Esc)));
        assert_eq!(
            esc.into_message(),
            Some(Message::MonthSelect(select::Message::Dismissed))
        );
        cal.update(Message::KeyPress(key(KeyCode::BackTab)));
        assert_eq!(cal.part(), Part::Days);
    }

    #[test]
    fn pointer_presses_hit_days_and_arrows() {
        let mut cal = calendar(SelectionMode::Single, DateValue::Empty);
        render(&cal);

        // March 2024 starts on a Friday: column 5 of the first week row.
        let msgs = cal
            .update(Message::Pointer(Position::new(1 + 5 * CELL_WIDTH + 1, 3)))
            .into_messages();
        assert_eq!(msgs[0], Message::Changed(DateValue::Single(d(2024, 3, 1))));

        cal.update(Message::Pointer(Position::new(1, 1)));
        assert_eq!(cal.display().month(), 2);
        render(&cal);
        cal.update(Message::Pointer(Position::new(28, 1)));
        assert_eq!(cal.display().month(), 3);
    }

    #[test]
    fn pointer_opens_month_dropdown() {
        let mut cal = calendar(SelectionMode::Single, DateValue::Empty);
        render(&cal);
        cal.update(Message::Pointer(Position::new(5, 1)));
        assert_eq!(cal.part(), Part::Month);
        render(&cal);
        // The open list extends below the calendar but still counts as inside.
        assert!(cal.contains(Position::new(5, 12)));
        assert!(!cal.contains(Position::new(39, 25)));

        // A press on the grid closes the list again.
        cal.update(Message::Pointer(Position::new(2, 8)));
        assert_eq!(cal.part(), Part::Days);
        render(&cal);
        assert!(!cal.contains(Position::new(5, 12)));
    }

    #[test]
    fn renders_month_and_range() {
        let cal = calendar(
            SelectionMode::Range,
            DateValue::range(d(2024, 3, 5), d(2024, 3, 8)),
        );
        let text = render(&cal);
        assert!(text.contains("March"));
        assert!(text.contains("2024"));
        assert!(text.contains("Su  Mo"));
        assert!(text.contains("31"));
    }
}
