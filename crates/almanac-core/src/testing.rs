use crate::command::Command;
use crate::event::TerminalEvent;
use crate::model::Model;
use crate::subscription::{ListenerSet, ListenerStats, SubscriptionId};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// `TestProgram` runs the same init/update/reconcile cycle as
/// [`Program`](crate::Program), minus the terminal. Follow-up messages from
/// commands are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages); terminal events are fed
/// through the model's declared listeners with
/// [`dispatch`](TestProgram::dispatch), so listener lifetimes can be
/// asserted directly.
///
/// # Example
///
/// ```rust,ignore
/// use almanac_core::testing::TestProgram;
///
/// let mut prog = TestProgram::<Counter>::new(0);  // calls Counter::init(0)
/// prog.send(CounterMsg::Increment);               // triggers update
/// assert_eq!(prog.model().count, 1);              // inspect state
///
/// let output = prog.render_string(40, 1);         // render to string
/// assert!(output.contains("Count: 1"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    listeners: ListenerSet<M::Message>,
    quit_requested: bool,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    ///
    /// Messages produced by `init` are queued, not processed.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            listeners: ListenerSet::new(),
            quit_requested: false,
        };
        program.collect(init_cmd);
        program.reconcile();
        program
    }

    /// Send a message, triggering a single update cycle.
    ///
    /// Follow-up messages are queued; call
    /// [`drain_messages`](TestProgram::drain_messages) to flush them.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
        self.reconcile();
    }

    /// Process all pending follow-up messages until none are produced.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Feed a terminal event through the active listeners, then process every
    /// resulting message (and its follow-ups), as the runtime would.
    pub fn dispatch(&mut self, event: TerminalEvent) {
        for msg in self.listeners.dispatch(&event) {
            self.send(msg);
        }
        self.drain_messages();
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    ///
    /// Listeners are not reconciled until the next message.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Whether any processed command asked to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Number of currently active listeners.
    pub fn active_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Whether a listener with this id is currently active.
    pub fn has_listener(&self, id: &SubscriptionId) -> bool {
        self.listeners.contains(id)
    }

    /// Registration/release counters for the model's listeners.
    pub fn listener_stats(&self) -> ListenerStats {
        self.listeners.stats()
    }

    /// Tear the harness down, returning the final listener counters.
    pub fn shutdown(mut self) -> ListenerStats {
        self.listeners.shutdown();
        self.listeners.stats()
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                self.model.view(frame);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn reconcile(&mut self) {
        self.listeners.reconcile(self.model.subscriptions());
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        if cmd.is_quit() {
            self.quit_requested = true;
        }
        cmd.collect_into(&mut self.pending_messages);
    }
}

/// Flatten a buffer into text, one line per row.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area: Rect = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}
