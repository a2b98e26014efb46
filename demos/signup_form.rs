//! # Signup Form Example
//!
//! One of each form widget:
//! - a password with strength meter and criteria checklist (`Ctrl+R` reveals)
//! - a birth date picker
//! - an attachment list that accepts pasted or dropped file paths
//! - a terms switch
//! - a submit button
//!
//! `Ctrl+S` or the Submit button validates and submits. Errors show as red borders.
//!
//! Run with: `cargo run --example signup_form`

use almanac::crossterm::event::{KeyCode, KeyModifiers};
use almanac::ratatui::layout::{Constraint, Layout, Position};
use almanac::ratatui::style::{Color, Style};
use almanac::ratatui::widgets::Paragraph;
use almanac::ratatui::Frame;
use almanac::widgets::button::{self, Button, ButtonVariant};
use almanac::widgets::date_picker::{self, DatePicker};
use almanac::widgets::password::{self, PasswordField, PasswordStrength};
use almanac::widgets::switch::{self, Switch};
use almanac::widgets::upload::{self, FileUpload, UploadLimits};
use almanac::widgets::LocaleConfig;
use almanac::{terminal_events, Command, Component, Model, ProgramOptions, Subscription, TerminalEvent};

const FIELDS: usize = 5;

struct Signup {
    password: PasswordField,
    birthday: DatePicker,
    attachments: FileUpload,
    terms: Switch,
    submit: Button,
    focused: usize,
    status: Option<(String, Color)>,
}

#[derive(Debug)]
enum Msg {
    Password(password::Message),
    Birthday(date_picker::Message),
    Attachments(upload::Message),
    Terms(switch::Message),
    SubmitButton(button::Message),
    Key(almanac::crossterm::event::KeyEvent),
    Paste(String),
    Pressed(Position),
    FocusNext,
    FocusPrev,
    Submit,
    Quit,
}

impl Signup {
    fn apply_focus(&mut self) {
        self.password.blur();
        self.birthday.blur();
        self.attachments.blur();
        self.terms.blur();
        self.submit.blur();
        match self.focused {
            0 => self.password.focus(),
            1 => self.birthday.focus(),
            2 => self.attachments.focus(),
            3 => self.terms.focus(),
            _ => self.submit.focus(),
        }
    }

    fn submit(&mut self) {
        let weak = self.password.strength() < PasswordStrength::Good;
        self.password
            .set_error(weak.then(|| "Choose a stronger password".to_string()));
        let no_birthday = self.birthday.value().is_empty();
        self.birthday.set_error(no_birthday);

        self.status = if weak || no_birthday {
            Some(("Fix the highlighted fields".into(), Color::Red))
        } else if !self.terms.is_checked() {
            Some(("Accept the terms to continue".into(), Color::Red))
        } else if self.attachments.list().has_oversized() {
            Some(("Remove files over the size limit".into(), Color::Red))
        } else {
            Some((
                format!(
                    "Signed up with {} attachment(s)",
                    self.attachments.list().len()
                ),
                Color::Green,
            ))
        };
    }
}

impl Model for Signup {
    type Message = Msg;
    type Flags = LocaleConfig;

    fn init(config: LocaleConfig) -> (Self, Command<Msg>) {
        let mut signup = Signup {
            password: PasswordField::new()
                .with_label("Password")
                .with_strength(true)
                .with_criteria(true),
            birthday: DatePicker::new(1)
                .with_label("Birthday")
                .with_placeholder("Pick your birthday")
                .with_locale(config),
            attachments: FileUpload::new(UploadLimits::multiple().with_max_files(3))
                .with_label("Attachments"),
            terms: Switch::new(false).with_label("I accept the terms"),
            submit: Button::new("Submit").with_variant(ButtonVariant::Outlined),
            focused: 0,
            status: None,
        };
        signup.apply_focus();
        (signup, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Password(password::Message::Submit(_)) => {
                self.update(Msg::FocusNext)
            }
            Msg::Password(m) => self.password.update(m).map(Msg::Password),
            Msg::Birthday(m) => self.birthday.update(m).map(Msg::Birthday),
            Msg::Attachments(upload::Message::Browse) => {
                self.status = Some((
                    "Paste a file path or drop a file onto the terminal".into(),
                    Color::DarkGray,
                ));
                Command::none()
            }
            Msg::Attachments(m) => self.attachments.update(m).map(Msg::Attachments),
            Msg::Terms(m) => self.terms.update(m).map(Msg::Terms),
            Msg::SubmitButton(button::Message::Pressed) => self.update(Msg::Submit),
            Msg::SubmitButton(m) => self.submit.update(m).map(Msg::SubmitButton),
            Msg::Key(key) => match self.focused {
                0 => self.update(Msg::Password(password::Message::KeyPress(key))),
                1 => self.update(Msg::Birthday(date_picker::Message::KeyPress(key))),
                2 => self.update(Msg::Attachments(upload::Message::KeyPress(key))),
                3 => self.update(Msg::Terms(switch::Message::KeyPress(key))),
                _ => self.update(Msg::SubmitButton(button::Message::KeyPress(key))),
            },
            Msg::Paste(text) => match self.focused {
                0 => self.update(Msg::Password(password::Message::Paste(text))),
                2 => self.update(Msg::Attachments(upload::Message::Paste(text))),
                _ => Command::none(),
            },
            Msg::Pressed(pos) => {
                let picker = self
                    .birthday
                    .update(date_picker::Message::Pointer(pos))
                    .map(Msg::Birthday);
                let terms = match self.terms.press(pos) {
                    Some(press) => self.terms.update(press).map(Msg::Terms),
                    None => Command::none(),
                };
                let submit = match self.submit.press(pos) {
                    Some(press) => self.submit.update(press).map(Msg::SubmitButton),
                    None => Command::none(),
                };
                Command::batch([picker, terms, submit])
            }
            Msg::FocusNext => {
                self.focused = (self.focused + 1) % FIELDS;
                self.apply_focus();
                Command::none()
            }
            Msg::FocusPrev => {
                self.focused = (self.focused + FIELDS - 1) % FIELDS;
                self.apply_focus();
                Command::none()
            }
            Msg::Submit => {
                self.submit();
                Command::none()
            }
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [password_area, birthday_area, attachments_area, terms_area, submit_area, status_area, help_area] =
            Layout::vertical([
                Constraint::Length(self.password.height()),
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Length(1),
                Constraint::Length(self.submit.height()),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(frame.area());

        self.password.view(frame, password_area);
        self.attachments.view(frame, attachments_area);
        self.terms.view(frame, terms_area);
        self.submit.view(frame, submit_area);
        if let Some((text, color)) = self.status.as_ref() {
            frame.render_widget(
                Paragraph::new(text.as_str()).style(Style::default().fg(*color)),
                status_area,
            );
        }
        frame.render_widget(
            Paragraph::new("Tab/Shift+Tab move  Ctrl+S submit  Esc quit")
                .style(Style::default().fg(Color::DarkGray)),
            help_area,
        );
        // Last, so the calendar popup covers the fields below it.
        self.birthday.view(frame, birthday_area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let picker_open = self.birthday.is_open();
        let mut subs = vec![terminal_events(move |event| match event {
            TerminalEvent::Paste(text) => Some(Msg::Paste(text)),
            TerminalEvent::Mouse(_) if !picker_open => event.pointer_press().map(Msg::Pressed),
            _ => {
                let key = event.key_press()?;
                if picker_open {
                    return Some(Msg::Key(key));
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => Some(Msg::Submit),
                    (KeyCode::Esc, _) => Some(Msg::Quit),
                    (KeyCode::Tab, _) => Some(Msg::FocusNext),
                    (KeyCode::BackTab, _) => Some(Msg::FocusPrev),
                    _ => Some(Msg::Key(key)),
                }
            }
        })];
        subs.extend(
            self.birthday
                .subscriptions()
                .into_iter()
                .map(|s| s.map(Msg::Birthday)),
        );
        subs
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ProgramOptions {
        title: Some("almanac signup".into()),
        log_file: Some("signup_form.log".into()),
        ..ProgramOptions::default()
    };
    let signup = almanac::run_with::<Signup>(LocaleConfig::from_env(), options)?;
    if let Some((text, _)) = signup.status {
        println!("{text}");
    }
    Ok(())
}
