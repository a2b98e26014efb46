use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait, following the [Elm Architecture].
///
/// The [`Program`](crate::Program) drives a synchronous cycle:
///
/// 1. [`init`](Model::init) creates the initial state and may return a
///    [`Command`] with startup messages.
/// 2. [`view`](Model::view) renders the current state to a [`ratatui::Frame`].
/// 3. A terminal event is read and passed to every active listener declared
///    by [`subscriptions`](Model::subscriptions); each listener may turn it
///    into a message.
/// 4. [`update`](Model::update) processes each message, draining follow-up
///    messages from the returned [`Command`] before the next event is read.
/// 5. Listeners are reconciled and steps 2-4 repeat until a command quits.
///
/// # Example
///
/// ```rust,ignore
/// use almanac_core::{Model, Command};
/// use ratatui::Frame;
/// use ratatui::widgets::Paragraph;
///
/// struct Counter {
///     count: i32,
/// }
///
/// #[derive(Debug)]
/// enum Msg {
///     Increment,
///     Decrement,
/// }
///
/// impl Model for Counter {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_flags: ()) -> (Self, Command<Msg>) {
///         (Counter { count: 0 }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Increment => self.count += 1,
///             Msg::Decrement => self.count -= 1,
///         }
///         Command::none()
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         frame.render_widget(
///             Paragraph::new(format!("Count: {}", self.count)),
///             frame.area(),
///         );
///     }
/// }
/// ```
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`].
    ///
    /// Use `()` when no startup data is needed.
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command.
    ///
    /// After `update` returns, the runtime delivers any follow-up messages,
    /// reconciles [`subscriptions`](Model::subscriptions) and re-renders.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state to a ratatui [`Frame`].
    ///
    /// This should read state only. Components may record the area they were
    /// given (in a `Cell`) for later pointer hit-testing.
    fn view(&self, frame: &mut Frame);

    /// Declare active listeners. Called after every update.
    ///
    /// The runtime diffs the returned list against the previously active set
    /// by [`SubscriptionId`](crate::SubscriptionId): new listeners are
    /// registered, missing ones are released.
    ///
    /// The default implementation returns an empty list.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
