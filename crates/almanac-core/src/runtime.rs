use crate::command::{Command, CommandInner};
use crate::event::TerminalEvent;
use crate::model::Model;
use crate::subscription::ListenerSet;
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
        EnableFocusChange, EnableMouseCapture, KeyCode, KeyModifiers,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::collections::VecDeque;
use std::io::{self, stderr, stdout, Stderr, Stdout, Write};

/// Output target for the terminal UI.
///
/// By default the TUI renders to **stdout**. When stdout is piped, switch to
/// [`Stderr`](OutputTarget::Stderr) so the UI still reaches the terminal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout (default).
    #[default]
    Stdout,
    /// Write to stderr (useful when stdout is piped).
    Stderr,
}

/// Writer that wraps either stdout or stderr.
enum Output {
    Stdout(Stdout),
    Stderr(Stderr),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(w) => w.write(buf),
            Output::Stderr(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(w) => w.flush(),
            Output::Stderr(w) => w.flush(),
        }
    }
}

impl Output {
    fn new(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Stdout => Output::Stdout(stdout()),
            OutputTarget::Stderr => Output::Stderr(stderr()),
        }
    }
}

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, event reading, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The log file requested in [`ProgramOptions::log_file`] could not be set up.
    #[error(transparent)]
    Logging(#[from] crate::logging::LoggingError),
}

/// Configuration options for a [`Program`].
///
/// Use struct update syntax to override only the options you need:
///
/// ```rust,ignore
/// use almanac_core::{ProgramOptions, OutputTarget};
///
/// let opts = ProgramOptions {
///     title: Some("Pick a date".into()),
///     log_file: Some("almanac.log".into()),
///     ..ProgramOptions::default()
/// };
/// ```
pub struct ProgramOptions {
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Capture mouse events (default: true; pickers dismiss on outside presses).
    pub mouse_capture: bool,
    /// Enable bracketed paste (default: true).
    pub bracketed_paste: bool,
    /// Enable focus reporting.
    pub focus_reporting: bool,
    /// Set terminal title.
    pub title: Option<String>,
    /// Whether to restore the terminal from a panic hook (default: true).
    pub catch_panics: bool,
    /// Quit on Ctrl+C before the model sees it (default: true).
    pub exit_on_ctrl_c: bool,
    /// Install a `tracing` subscriber writing to this file.
    pub log_file: Option<std::path::PathBuf>,
    /// Output target: stdout (default) or stderr.
    pub output: OutputTarget,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            alt_screen: true,
            mouse_capture: true,
            bracketed_paste: true,
            focus_reporting: false,
            title: None,
            catch_panics: true,
            exit_on_ctrl_c: true,
            log_file: None,
            output: OutputTarget::default(),
        }
    }
}

/// The program runtime. Manages terminal setup, the event loop, and the
/// full [`Model`] lifecycle.
///
/// The loop is synchronous: it blocks on the next terminal event, runs it
/// through the active listeners, and fully processes the resulting messages
/// (including follow-up messages from returned commands) before drawing and
/// reading again. Nothing runs in the background.
///
/// # Example
///
/// ```rust,ignore
/// use almanac_core::{Program, ProgramError};
///
/// fn main() -> Result<(), ProgramError> {
///     let model = Program::<MyApp>::new(())?.run()?;
///     // `model` is the final state after quit
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Output>>,
    listeners: ListenerSet<M::Message>,
    queue: VecDeque<M::Message>,
    options: ProgramOptions,
    needs_redraw: bool,
    should_quit: bool,
    #[allow(clippy::type_complexity)]
    filter: Option<Box<dyn Fn(M::Message) -> Option<M::Message> + Send>>,
}

impl<M: Model> Program<M> {
    /// Create a new program with default options.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a new program with custom options.
    ///
    /// Returns an error if logging or terminal initialization fails.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(ref path) = options.log_file {
            crate::logging::init_file_logging(path)?;
        }

        let (model, init_cmd) = M::init(flags);
        let terminal = init_terminal(&options)?;

        let mut program = Self {
            model,
            terminal,
            listeners: ListenerSet::new(),
            queue: VecDeque::new(),
            options,
            needs_redraw: true,
            should_quit: false,
            filter: None,
        };

        tracing::info!("program initialized");
        program.execute_command(init_cmd);
        program.drain_queue();
        program.listeners.reconcile(program.model.subscriptions());

        Ok(program)
    }

    /// Set a message filter. Messages pass through the filter before reaching `update`.
    /// Return `Some(msg)` to pass (possibly transformed), `None` to drop.
    pub fn with_filter(
        mut self,
        filter: impl Fn(M::Message) -> Option<M::Message> + Send + 'static,
    ) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Run the program. Blocks until a command quits.
    pub fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop();

        tracing::info!("shutting down");
        self.listeners.shutdown();
        restore_terminal(&self.options)?;
        result?;

        Ok(self.model)
    }

    fn event_loop(&mut self) -> Result<(), ProgramError> {
        loop {
            if self.should_quit {
                return Ok(());
            }
            if self.needs_redraw {
                self.render()?;
                self.needs_redraw = false;
            }

            let event = TerminalEvent::from(crossterm::event::read()?);
            self.handle_event(&event);
        }
    }

    fn handle_event(&mut self, event: &TerminalEvent) {
        if self.options.exit_on_ctrl_c {
            if let Some(key) = event.key_press() {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    tracing::info!("ctrl+c received");
                    self.should_quit = true;
                    return;
                }
            }
        }

        if let TerminalEvent::Resize(..) = event {
            self.needs_redraw = true;
        }

        self.queue.extend(self.listeners.dispatch(event));
        self.drain_queue();
    }

    fn drain_queue(&mut self) {
        while let Some(msg) = self.queue.pop_front() {
            let msg = match self.filter {
                Some(ref filter) => match filter(msg) {
                    Some(msg) => msg,
                    None => continue,
                },
                None => msg,
            };

            let cmd = self.model.update(msg);
            self.execute_command(cmd);
            self.listeners.reconcile(self.model.subscriptions());
            self.needs_redraw = true;
        }
    }

    fn execute_command(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => self.queue.push_back(msg),
            CommandInner::Quit => self.should_quit = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute_command(cmd);
                }
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| {
            self.model.view(frame);
        })?;
        Ok(())
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Output>>, ProgramError> {
    // Install panic hook that restores terminal (only once to avoid stacking)
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        let output_target = options.output;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal_minimal(alt_screen, output_target);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = Output::new(options.output);

    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(writer, EnableBracketedPaste)?;
    }
    if options.mouse_capture {
        execute!(writer, EnableMouseCapture)?;
    }
    if options.focus_reporting {
        execute!(writer, EnableFocusChange)?;
    }
    if let Some(ref title) = options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    let backend = CrosstermBackend::new(writer);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(options: &ProgramOptions) -> Result<(), ProgramError> {
    restore_terminal_minimal(options.alt_screen, options.output)?;
    Ok(())
}

fn restore_terminal_minimal(alt_screen: bool, output_target: OutputTarget) -> Result<(), std::io::Error> {
    // Best effort: keep going after individual failures and report raw mode.
    let raw = disable_raw_mode();
    let mut writer = Output::new(output_target);
    execute!(writer, DisableBracketedPaste).ok();
    execute!(writer, DisableMouseCapture).ok();
    execute!(writer, DisableFocusChange).ok();
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}
