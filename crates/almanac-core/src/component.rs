use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` mirrors [`Model`](crate::Model) except that
/// [`view`](Component::view) receives the area to draw into, so a parent
/// decides where each child lives.
///
/// Components never reach up into their parent. When something happens the
/// parent cares about (a date was picked, a popup wants to close) the
/// component returns a [`Command::message`] carrying an *output* variant of
/// its own message type. The parent maps the command into its message space
/// and reacts when that variant comes back through its `update`.
///
/// # Composition pattern
///
/// ```rust,ignore
/// use almanac_core::{Model, Component, Command};
/// use almanac_widgets::calendar::{self, Calendar};
///
/// struct App { calendar: Calendar, picked: Option<String> }
///
/// #[derive(Debug)]
/// enum AppMsg { Calendar(calendar::Message) }
///
/// impl Model for App {
///     // ...
///     fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///         match msg {
///             // Output variants: react, then push state back down.
///             AppMsg::Calendar(calendar::Message::Changed(value)) => {
///                 self.calendar.set_value(value);
///                 Command::none()
///             }
///             // Everything else is routed to the child.
///             AppMsg::Calendar(m) => self.calendar.update(m).map(AppMsg::Calendar),
///         }
///     }
///     // ...
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    ///
    /// Parent models typically wrap this in one of their own message variants
    /// so that events can be routed to the correct child.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`].
    ///
    /// The returned command uses the component's own `Message` type; the
    /// parent calls [`.map()`](Command::map) to lift it.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Implementations should confine all rendering to the given rectangle,
    /// except for popups which may overflow below it.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare the listeners this component needs right now.
    ///
    /// The parent collects child listeners, maps them, and returns them from
    /// [`Model::subscriptions`](crate::Model::subscriptions). Because the set
    /// is re-declared after every update, a listener returned only while some
    /// state holds (a popup being open) is registered when that state begins
    /// and released when it ends.
    ///
    /// The default implementation returns an empty list.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has focus.
    ///
    /// A hint for input routing. The default implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
