//! Core runtime for **almanac**.
//!
//! `almanac-core` provides the traits, types, and runtime that every almanac
//! component builds on. The design follows the [Elm Architecture]: state
//! changes happen in a pure **init -> update -> view** cycle, and components
//! talk to their parents by returning messages instead of calling back.
//!
//! Everything is synchronous and single-threaded. The runtime blocks on the
//! next terminal event, turns it into messages through the active listeners,
//! and processes those messages to completion before drawing again.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Follow-up messages or quit, returned from `update` |
//! | [`Subscription`] | An event listener declared while some state holds |
//! | [`ListenerSet`] | Registers, swaps and releases listeners by id |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit-testing a [`Model`] |
//!
//! # Quick example
//!
//! ```ignore
//! use almanac_core::{Model, Command};
//! use ratatui::Frame;
//! use ratatui::widgets::Paragraph;
//!
//! struct Counter { count: i32 }
//!
//! enum Msg { Increment, Decrement }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_flags: ()) -> (Self, Command<Msg>) {
//!         (Counter { count: 0 }, Command::none())
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Increment => self.count += 1,
//!             Msg::Decrement => self.count -= 1,
//!         }
//!         Command::none()
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         frame.render_widget(
//!             Paragraph::new(format!("Count: {}", self.count)),
//!             frame.area(),
//!         );
//!     }
//! }
//! ```
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{OutputTarget, Program, ProgramError, ProgramOptions};
pub use subscription::{
    pointer_presses, terminal_events, ListenerSet, ListenerStats, Subscription, SubscriptionId,
    TerminalEvents,
};

/// Run an almanac application with default options.
pub fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run()
}

/// Run with custom options.
pub fn run_with<M: Model>(flags: M::Flags, options: ProgramOptions) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run()
}
