//! File upload list with count and size limits.
//!
//! The terminal has no native file dialog. Files reach the list either from
//! the owner (after its own file browser) or from a bracketed paste, which is
//! what most terminals send when a file is dropped onto the window.

use crate::chrome::{field_block, fit_width, FieldState};
use crate::selection::PagedSelection;
use almanac_core::command::Command;
use almanac_core::component::Component;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::path::Path;

/// Default per-file size limit, 10 MiB.
pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;

/// Default file count when several files are allowed.
pub const DEFAULT_MAX_FILES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub id: u64,
    pub name: String,
    pub size: u64,
}

/// A file offered for upload, before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub size: u64,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Read the size of a file on disk.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, meta.len()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub multiple: bool,
    pub max_files: usize,
    pub max_size: u64,
}

impl UploadLimits {
    pub fn single() -> Self {
        Self {
            multiple: false,
            max_files: 1,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    pub fn multiple() -> Self {
        Self {
            multiple: true,
            max_files: DEFAULT_MAX_FILES,
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    fn file_limit(&self) -> usize {
        if self.multiple {
            self.max_files
        } else {
            1
        }
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self::multiple()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Maximum {max} files allowed")]
    TooManyFiles { max: usize },
    #[error("Only one file is allowed")]
    SingleFileOnly,
}

/// Accepted files plus the last rejection.
#[derive(Debug, Clone)]
pub struct UploadList {
    files: Vec<UploadFile>,
    limits: UploadLimits,
    error: Option<UploadError>,
    next_id: u64,
}

impl Default for UploadList {
    fn default() -> Self {
        Self::new(UploadLimits::default())
    }
}

impl UploadList {
    pub fn new(limits: UploadLimits) -> Self {
        Self {
            files: Vec::new(),
            limits,
            error: None,
            next_id: 1,
        }
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn limits(&self) -> UploadLimits {
        self.limits
    }

    pub fn error(&self) -> Option<&UploadError> {
        self.error.as_ref()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Add a batch. Either every file is accepted or none is.
    ///
    /// Files already in the list count against the limit, so a single-file
    /// list refuses a second file until the first is removed. Oversized files
    /// are accepted and reported by [`is_oversized`](Self::is_oversized).
    pub fn add(&mut self, batch: Vec<PendingFile>) -> Result<&[UploadFile], UploadError> {
        if batch.is_empty() {
            return Ok(&self.files);
        }
        if self.files.len() + batch.len() > self.limits.file_limit() {
            let err = if self.limits.multiple {
                UploadError::TooManyFiles {
                    max: self.limits.max_files,
                }
            } else {
                UploadError::SingleFileOnly
            };
            tracing::debug!(offered = batch.len(), %err, "upload batch rejected");
            self.error = Some(err.clone());
            return Err(err);
        }

        for file in batch {
            let id = self.next_id;
            self.next_id += 1;
            self.files.push(UploadFile {
                id,
                name: file.name,
                size: file.size,
            });
        }
        self.error = None;
        tracing::debug!(files = self.files.len(), "upload batch accepted");
        Ok(&self.files)
    }

    /// Remove a file by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        self.error = None;
        self.files.len() != before
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.error = None;
    }

    pub fn is_oversized(&self, file: &UploadFile) -> bool {
        file.size > self.limits.max_size
    }

    /// Whether any accepted file is over the size limit.
    pub fn has_oversized(&self) -> bool {
        self.files.iter().any(|f| self.is_oversized(f))
    }
}

/// Render a byte count with binary units and up to two decimals.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text} {}", UNITS[unit])
}

/// Messages for [`FileUpload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeyPress(KeyEvent),
    /// Pasted text, one path per line.
    Paste(String),
    /// Files offered by the owner.
    Add(Vec<PendingFile>),
    Remove(u64),
    /// Emitted when Enter is pressed; the owner shows its own file browser.
    Browse,
    /// Emitted whenever the accepted files change.
    Changed(Vec<UploadFile>),
}

/// A bordered list of accepted files with a hint line.
pub struct FileUpload {
    list: UploadList,
    selection: PagedSelection,
    label: String,
    focus: bool,
    disabled: bool,
}

impl FileUpload {
    pub fn new(limits: UploadLimits) -> Self {
        Self {
            list: UploadList::new(limits),
            selection: PagedSelection::new(0, 5),
            label: "Files".to_string(),
            focus: false,
            disabled: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn list(&self) -> &UploadList {
        &self.list
    }

    pub fn cursor(&self) -> usize {
        self.selection.cursor()
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    fn changed(&mut self) -> Command<Message> {
        self.selection.set_count(self.list.len());
        Command::message(Message::Changed(self.list.files().to_vec()))
    }

    fn add(&mut self, batch: Vec<PendingFile>) -> Command<Message> {
        match self.list.add(batch) {
            Ok(_) => self.changed(),
            Err(_) => Command::none(),
        }
    }

    fn paste(&mut self, text: &str) -> Command<Message> {
        let mut batch = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let path = Path::new(line.trim_matches(|c| c == '\'' || c == '"'));
            match PendingFile::from_path(path) {
                Ok(file) => batch.push(file),
                Err(err) => tracing::warn!(path = %path.display(), %err, "ignoring pasted path"),
            }
        }
        self.add(batch)
    }

    fn remove(&mut self, id: u64) -> Command<Message> {
        if self.list.remove(id) {
            self.changed()
        } else {
            Command::none()
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        match key.code {
            KeyCode::Enter => Command::message(Message::Browse),
            KeyCode::Up => {
                self.selection.move_up();
                Command::none()
            }
            KeyCode::Down => {
                self.selection.move_down();
                Command::none()
            }
            KeyCode::Delete | KeyCode::Backspace => {
                match self.list.files().get(self.selection.cursor()) {
                    Some(file) => {
                        let id = file.id;
                        self.remove(id)
                    }
                    None => Command::none(),
                }
            }
            _ => Command::none(),
        }
    }
}

impl Component for FileUpload {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        if self.disabled {
            return Command::none();
        }
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::Paste(text) if self.focus => self.paste(&text),
            Message::Add(batch) => self.add(batch),
            Message::Remove(id) => self.remove(id),
            Message::KeyPress(_) | Message::Paste(_) => Command::none(),
            Message::Browse | Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let state = FieldState {
            focused: self.focus,
            error: self.list.error().is_some() || self.list.has_oversized(),
            disabled: self.disabled,
        };
        let block = field_block(&self.label, state);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [list_area, hint_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        let width = usize::from(list_area.width);
        let limits = self.list.limits();
        let lines: Vec<Line> = self.list.files()[self.selection.page()]
            .iter()
            .enumerate()
            .map(|(offset, file)| {
                let index = self.selection.page_start() + offset;
                let size = if self.list.is_oversized(file) {
                    format!(
                        "{} (max. {})",
                        format_file_size(file.size),
                        format_file_size(limits.max_size)
                    )
                } else {
                    format_file_size(file.size)
                };
                let name_width = width.saturating_sub(size.len() + 3);
                let mut style = if self.list.is_oversized(file) {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default()
                };
                if self.focus && index == self.selection.cursor() {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Line::from(vec![
                    Span::styled(format!("{:<name_width$}", fit_width(&file.name, name_width)), style),
                    Span::raw("  "),
                    Span::styled(size, Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), list_area);

        let hint = match self.list.error() {
            Some(err) => Span::styled(err.to_string(), Style::default().fg(Color::Red)),
            None => Span::styled(
                format!(
                    "Max. {} files, {} each",
                    limits.file_limit(),
                    format_file_size(limits.max_size)
                ),
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(Line::from(hint)), hint_area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
