//! # Date Picker Example
//!
//! Two pickers side by side:
//! - a single date that closes the popup as soon as a day is chosen
//! - a range that stays open until both ends are set
//!
//! The locale and timezone come from `LC_ALL`/`LC_TIME`/`LANG` and `TZ`.
//! Logs go to `date_picker.log`; set `ALMANAC_LOG=debug` to watch the
//! listener register and release as the popups open and close.
//!
//! Run with: `cargo run --example date_picker`

use almanac::crossterm::event::KeyCode;
use almanac::ratatui::layout::{Constraint, Layout};
use almanac::ratatui::style::{Color, Style};
use almanac::ratatui::text::{Line, Span};
use almanac::ratatui::widgets::Paragraph;
use almanac::ratatui::Frame;
use almanac::widgets::date_picker::{self, DatePicker};
use almanac::widgets::format::{format_value, DateFormat};
use almanac::widgets::{LocaleConfig, SelectionMode};
use almanac::ratatui::layout::Position;
use almanac::{terminal_events, Command, Component, Model, ProgramOptions, Subscription};

struct App {
    due: DatePicker,
    trip: DatePicker,
    focused: usize,
    config: LocaleConfig,
}

#[derive(Debug)]
enum Msg {
    Due(date_picker::Message),
    Trip(date_picker::Message),
    Pressed(Position),
    FocusNext,
    Quit,
}

impl App {
    fn describe(&self, picker: &DatePicker) -> String {
        let text = format_value(
            picker.value(),
            picker.mode(),
            &DateFormat::Long,
            self.config.locale(),
        );
        if text.is_empty() {
            "nothing yet".to_string()
        } else {
            text
        }
    }
}

impl Model for App {
    type Message = Msg;
    type Flags = LocaleConfig;

    fn init(config: LocaleConfig) -> (Self, Command<Msg>) {
        let mut due = DatePicker::new(1)
            .with_label("Due date")
            .with_locale(config);
        due.focus();
        let trip = DatePicker::new(2)
            .with_mode(SelectionMode::Range)
            .with_label("Trip")
            .with_placeholder("Departure - return")
            .with_format(DateFormat::Short)
            .with_locale(config);
        (
            App {
                due,
                trip,
                focused: 0,
                config,
            },
            Command::none(),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            // The pickers keep their own copy; the app only reads it back.
            Msg::Due(date_picker::Message::Changed(_)) | Msg::Trip(date_picker::Message::Changed(_)) => {
                Command::none()
            }
            Msg::Due(m) => self.due.update(m).map(Msg::Due),
            Msg::Trip(m) => self.trip.update(m).map(Msg::Trip),
            // A closed picker opens when its own field is pressed.
            Msg::Pressed(pos) => Command::batch([
                self.due
                    .update(date_picker::Message::Pointer(pos))
                    .map(Msg::Due),
                self.trip
                    .update(date_picker::Message::Pointer(pos))
                    .map(Msg::Trip),
            ]),
            Msg::FocusNext => {
                self.focused = (self.focused + 1) % 2;
                if self.focused == 0 {
                    self.due.focus();
                    self.trip.blur();
                } else {
                    self.due.blur();
                    self.trip.focus();
                }
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [fields, status, help] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [due_area, trip_area] =
            Layout::horizontal([Constraint::Length(32), Constraint::Length(32)]).areas(fields);

        let lines = vec![
            Line::from(format!("Due:  {}", self.describe(&self.due))),
            Line::from(format!("Trip: {}", self.describe(&self.trip))),
        ];
        frame.render_widget(Paragraph::new(lines), status);

        let help_line = Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" next field  "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" open  "),
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" in calendar: days/month/year  "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]);
        frame.render_widget(Paragraph::new(help_line), help);

        // Draw the open picker last so its popup sits on top.
        if self.trip.is_open() {
            self.due.view(frame, due_area);
            self.trip.view(frame, trip_area);
        } else {
            self.trip.view(frame, trip_area);
            self.due.view(frame, due_area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let focused = self.focused;
        let any_open = self.due.is_open() || self.trip.is_open();

        let mut subs = vec![terminal_events(move |event| {
            if let Some(key) = event.key_press() {
                if !any_open {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Some(Msg::Quit),
                        KeyCode::Tab => return Some(Msg::FocusNext),
                        _ => {}
                    }
                }
                let m = date_picker::Message::KeyPress(key);
                return Some(if focused == 0 { Msg::Due(m) } else { Msg::Trip(m) });
            }
            // An open picker receives presses through its own listener.
            if any_open {
                return None;
            }
            event.pointer_press().map(Msg::Pressed)
        })];
        subs.extend(self.due.subscriptions().into_iter().map(|s| s.map(Msg::Due)));
        subs.extend(self.trip.subscriptions().into_iter().map(|s| s.map(Msg::Trip)));
        subs
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = LocaleConfig::from_env();
    let options = ProgramOptions {
        title: Some("almanac date picker".into()),
        log_file: Some("date_picker.log".into()),
        ..ProgramOptions::default()
    };
    let app = almanac::run_with::<App>(config, options)?;
    println!("Due:  {}", app.describe(&app.due));
    println!("Trip: {}", app.describe(&app.trip));
    Ok(())
}
