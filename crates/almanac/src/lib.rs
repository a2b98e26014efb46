//! **almanac** -- calendar and date-range picker components for [`ratatui`].
//!
//! This is the umbrella crate that re-exports everything you need to build an
//! almanac application from a single dependency:
//!
//! ```toml
//! [dependencies]
//! almanac = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`almanac_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports everything from [`almanac_widgets`]
//!   (calendar, date picker, password, upload and switch).
//! * [`ratatui`], [`crossterm`], and [`chrono`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use almanac::widgets::date_picker::{self, DatePicker};
//! use almanac::{Command, Component, Model, Subscription};
//! use ratatui::Frame;
//!
//! struct App { picker: DatePicker }
//!
//! #[derive(Debug)]
//! enum Msg { Picker(date_picker::Message) }
//!
//! impl Model for App {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<Msg>) {
//!         (App { picker: DatePicker::new(1) }, Command::none())
//!     }
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         let Msg::Picker(m) = msg;
//!         self.picker.update(m).map(Msg::Picker)
//!     }
//!     fn view(&self, frame: &mut Frame) {
//!         self.picker.view(frame, frame.area());
//!     }
//!     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!         self.picker
//!             .subscriptions()
//!             .into_iter()
//!             .map(|s| s.map(Msg::Picker))
//!             .collect()
//!     }
//! }
//!
//! fn main() {
//!     almanac::run::<App>(()).unwrap();
//! }
//! ```

pub use almanac_core::*;
pub mod widgets {
    pub use almanac_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use chrono;
pub use crossterm;
pub use ratatui;
