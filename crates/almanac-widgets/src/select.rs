//! Dropdown for choosing one value from an [`OptionList`].
//!
//! The closed select is a single trigger line. Opening it shows one page
//! of options below the trigger, starting on the page that holds the
//! current value. The list scrolls a whole page at a time.

use crate::chrome::fit_width;
use crate::options::OptionList;
use crate::overlay::{anchored_popup, render_overlay};
use crate::selection::PagedSelection;
use almanac_core::command::Command;
use almanac_core::component::Component;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use unicode_width::UnicodeWidthStr;

/// Options shown per page.
pub const PAGE_SIZE: usize = 12;

/// Messages for [`OptionSelect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press forwarded while the select has focus.
    KeyPress(KeyEvent),
    Open,
    Close,
    Toggle,
    /// Show the previous page.
    ScrollUp,
    /// Show the next page.
    ScrollDown,
    /// Pick the option at this list index.
    Choose(usize),
    /// Emitted when an option is chosen, carrying its value.
    Selected(i32),
    /// Emitted when the list closes without a choice.
    Dismissed,
}

/// Visual style for [`OptionSelect`].
#[derive(Debug, Clone)]
pub struct OptionSelectStyle {
    pub trigger: Style,
    pub placeholder: Style,
    pub item: Style,
    pub cursor: Style,
    pub chosen: Style,
}

impl Default for OptionSelectStyle {
    fn default() -> Self {
        Self {
            trigger: Style::default().add_modifier(Modifier::BOLD),
            placeholder: Style::default().fg(Color::DarkGray),
            item: Style::default(),
            cursor: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            chosen: Style::default().fg(Color::Cyan),
        }
    }
}

/// A labeled-option dropdown.
///
/// # Example
///
/// ```ignore
/// use almanac_widgets::labels::year_options;
/// use almanac_widgets::select::OptionSelect;
///
/// let years = OptionSelect::new(year_options()).with_selected(Some(2024));
/// ```
pub struct OptionSelect {
    options: OptionList,
    selected: Option<i32>,
    selection: PagedSelection,
    open: bool,
    focus: bool,
    placeholder: String,
    style: OptionSelectStyle,
    trigger_area: Cell<Rect>,
    list_area: Cell<Rect>,
}

impl OptionSelect {
    pub fn new(options: OptionList) -> Self {
        let count = options.len();
        Self {
            options,
            selected: None,
            selection: PagedSelection::new(count, PAGE_SIZE),
            open: false,
            focus: false,
            placeholder: "Select...".to_string(),
            style: OptionSelectStyle::default(),
            trigger_area: Cell::new(Rect::default()),
            list_area: Cell::new(Rect::default()),
        }
    }

    pub fn with_selected(mut self, value: Option<i32>) -> Self {
        self.set_selected(value);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_style(mut self, style: OptionSelectStyle) -> Self {
        self.style = style;
        self
    }

    /// Options per page (default [`PAGE_SIZE`]).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.selection = PagedSelection::new(self.options.len(), page_size);
        self
    }

    /// Replace the options, keeping the selected value if it still exists.
    pub fn set_options(&mut self, options: OptionList) {
        self.selection.set_count(options.len());
        self.options = options;
        if let Some(value) = self.selected {
            if self.options.position(value).is_none() {
                self.selected = None;
            }
        }
    }

    /// Set the value from outside. Values not in the list clear the selection.
    pub fn set_selected(&mut self, value: Option<i32>) {
        self.selected = value.filter(|v| self.options.position(*v).is_some());
    }

    pub fn selected_value(&self) -> Option<i32> {
        self.selected
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected.and_then(|v| self.options.label_of(v))
    }

    pub fn options(&self) -> &OptionList {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index under the list cursor.
    pub fn cursor(&self) -> usize {
        self.selection.cursor()
    }

    /// Indices on the visible page.
    pub fn page(&self) -> std::ops::Range<usize> {
        self.selection.page()
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
        self.open = false;
    }

    /// Translate a pointer press into a message, using the areas from the
    /// last render. Presses elsewhere give `None`.
    pub fn press(&self, pos: Position) -> Option<Message> {
        if self.trigger_area.get().contains(pos) {
            return Some(Message::Toggle);
        }
        if !self.open {
            return None;
        }
        let list = self.list_area.get();
        if !list.contains(pos) {
            return None;
        }
        if pos.y == list.y {
            return Some(Message::ScrollUp);
        }
        if pos.y + 1 == list.bottom() {
            return Some(Message::ScrollDown);
        }
        let index = self.selection.page_start() + usize::from(pos.y - list.y - 1);
        (index < self.selection.page().end).then_some(Message::Choose(index))
    }

    /// Whether `pos` lands on the trigger or the open list.
    pub fn covers(&self, pos: Position) -> bool {
        self.trigger_area.get().contains(pos) || (self.open && self.list_area.get().contains(pos))
    }

    /// Width the trigger needs to show the longest label.
    pub fn preferred_width(&self) -> u16 {
        let longest = self
            .options
            .iter()
            .map(|o| o.label.width())
            .max()
            .unwrap_or(0)
            .max(self.placeholder.width());
        u16::try_from(longest + 2).unwrap_or(u16::MAX)
    }

    fn open_list(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.open = true;
        let index = self
            .selected
            .and_then(|v| self.options.position(v))
            .unwrap_or(0);
        self.selection.select(index);
    }

    fn choose(&mut self, index: usize) -> Command<Message> {
        match self.options.get(index) {
            Some(option) => {
                let value = option.value;
                tracing::debug!(value, label = %option.label, "option chosen");
                self.selected = Some(value);
                self.open = false;
                Command::message(Message::Selected(value))
            }
            None => Command::none(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if !self.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    self.open_list();
                    Command::none()
                }
                _ => Command::none(),
            };
        }
        match key.code {
            KeyCode::Up => self.selection.move_up(),
            KeyCode::Down => self.selection.move_down(),
            KeyCode::PageUp => self.selection.page_up(),
            KeyCode::PageDown => self.selection.page_down(),
            KeyCode::Home => self.selection.home(),
            KeyCode::End => self.selection.end(),
            KeyCode::Enter => return self.choose(self.selection.cursor()),
            KeyCode::Esc => {
                self.open = false;
                return Command::message(Message::Dismissed);
            }
            _ => {}
        }
        Command::none()
    }

    fn view_list(&self, frame: &mut Frame, trigger: Rect) {
        let rows = self.selection.page().len();
        let width = self.preferred_width().saturating_add(4).max(trigger.width);
        let height = u16::try_from(rows).unwrap_or(0) + 2;
        let area = anchored_popup(trigger, width, height, frame.area());
        self.list_area.set(area);

        let mut block = Block::new()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        if self.selection.has_previous_page() {
            block = block.title(Line::from(" ▲ ").centered());
        }
        if self.selection.has_next_page() {
            block = block.title_bottom(Line::from(" ▼ ").centered());
        }
        let inner = render_overlay(frame, area, Some(&block));

        let text_width = usize::from(inner.width.saturating_sub(2));
        for (row, index) in self.selection.page().enumerate() {
            let Some(option) = self.options.get(index) else {
                break;
            };
            let y = inner.y + row as u16;
            if y >= inner.bottom() {
                break;
            }
            let is_cursor = index == self.selection.cursor();
            let style = if is_cursor {
                self.style.cursor
            } else if Some(option.value) == self.selected {
                self.style.chosen
            } else {
                self.style.item
            };
            let prefix = if is_cursor { "▸ " } else { "  " };
            let line = Line::from(vec![
                Span::raw(prefix),
                Span::styled(fit_width(&option.label, text_width), style),
            ]);
            frame.render_widget(Paragraph::new(line), Rect::new(inner.x, y, inner.width, 1));
        }
    }
}

impl Component for OptionSelect {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::KeyPress(_) => Command::none(),
            Message::Open => {
                self.open_list();
                Command::none()
            }
            Message::Close => {
                self.open = false;
                Command::none()
            }
            Message::Toggle => {
                if self.open {
                    self.open = false;
                } else {
                    self.open_list();
                }
                Command::none()
            }
            Message::ScrollUp => {
                self.selection.page_up();
                Command::none()
            }
            Message::ScrollDown => {
                self.selection.page_down();
                Command::none()
            }
            Message::Choose(index) => self.choose(index),
            Message::Selected(_) | Message::Dismissed => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let trigger = Rect { height: area.height.min(1), ..area };
        self.trigger_area.set(trigger);

        let text = match self.selected_label() {
            Some(label) => Span::styled(label.to_string(), self.style.trigger),
            None => Span::styled(self.placeholder.clone(), self.style.placeholder),
        };
        let arrow = if self.open { " ▾" } else { " ▸" };
        let line = Line::from(vec![
            text,
            Span::styled(arrow, Style::default().fg(Color::DarkGray)),
        ]);
        let style = if self.focus {
            Style::default().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(line).style(style), trigger);

        if self.open {
            self.view_list(frame, trigger);
        } else {
            self.list_area.set(Rect::default());
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{month_options, year_options};
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

    fn years() -> OptionSelect {
        let mut select = OptionSelect::new(year_options()).with_selected(Some(2024));
        select.focus();
        select
    }

    #[test]
    fn opens_on_page_of_selected_value() {
        let mut select = years();
        select.update(Message::Open);
        assert!(select.is_open());
        assert_eq!(select.cursor(), 976);
        assert_eq!(select.page(), 972..984);
    }

    #[test]
    fn opens_on_first_page_without_value() {
        let mut select = OptionSelect::new(year_options());
        select.update(Message::Toggle);
        assert_eq!(select.page(), 0..PAGE_SIZE);
    }

    #[test]
    fn scrolls_by_page() {
        let mut select = years();
        select.update(Message::Open);
        select.update(Message::ScrollDown);
        assert_eq!(select.page(), 984..996);
        select.update(Message::ScrollUp);
        select.update(Message::ScrollUp);
        assert_eq!(select.page(), 960..972);
    }

    #[test]
    fn enter_chooses_and_closes() {
        let mut select = years();
        select.update(Message::KeyPress(key(KeyCode::Enter)));
        assert!(select.is_open());
        select.update(Message::KeyPress(key(KeyCode::Down)));
        let cmd = select.update(Message::KeyPress(key(KeyCode::Enter)));
        assert_eq!(cmd.into_message(), Some(Message::Selected(2023)));
        assert!(!select.is_open());
        assert_eq!(select.selected_value(), Some(2023));
    }

    #[test]
    fn esc_dismisses() {
        let mut select = years();
        select.update(Message::Open);
        let cmd = select.update(Message::KeyPress(key(KeyCode::Esc)));
        assert_eq!(cmd.into_message(), Some(Message::Dismissed));
        assert!(!select.is_open());
        assert_eq!(select.selected_value(), Some(2024));
    }

    #[test]
    fn keys_ignored_without_focus() {
        let mut select = OptionSelect::new(year_options());
        select.update(Message::KeyPress(key(KeyCode::Enter)));
        assert!(!select.is_open());
    }

    #[test]
    fn choose_out_of_range_is_ignored() {
        let mut select = OptionSelect::new(month_options(chrono::Locale::en_US));
        assert!(select.update(Message::Choose(40)).is_none());
        let cmd = select.update(Message::Choose(2));
        assert_eq!(cmd.into_message(), Some(Message::Selected(3)));
        assert_eq!(select.selected_label(), Some("March"));
    }

    #[test]
    fn unknown_value_clears_selection() {
        let select = OptionSelect::new(month_options(chrono::Locale::en_US)).with_selected(Some(13));
        assert_eq!(select.selected_value(), None);
    }

    #[test]
    fn pointer_presses_map_to_rows() {
        let mut select = years();
        select.update(Message::Open);

        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal
            .draw(|frame| select.view(frame, Rect::new(2, 1, 10, 1)))
            .unwrap();

        assert_eq!(select.press(Position::new(3, 1)), Some(Message::Toggle));
        // Border rows scroll; the first option sits just under the top border.
        assert_eq!(select.press(Position::new(3, 2)), Some(Message::ScrollUp));
        assert_eq!(select.press(Position::new(3, 3)), Some(Message::Choose(972)));
        assert_eq!(select.press(Position::new(3, 15)), Some(Message::ScrollDown));
        assert_eq!(select.press(Position::new(39, 19)), None);
    }

    #[test]
    fn renders_trigger_and_list() {
        let mut select = years();
        select.update(Message::Open);
        let mut terminal = Terminal::new(TestBackend::new(30, 16)).unwrap();
        terminal
            .draw(|frame| select.view(frame, Rect::new(0, 0, 10, 1)))
            .unwrap();
        let text = almanac_core::testing::buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("2024 ▾"));
        assert!(text.contains("▸ 2024"));
        assert!(text.contains("2019"));
    }
}
