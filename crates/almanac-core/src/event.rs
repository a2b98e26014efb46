use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// Terminal events produced by the runtime's event loop.
///
/// `TerminalEvent` reaches your application through listeners such as
/// [`terminal_events`](crate::subscription::terminal_events) and
/// [`pointer_presses`](crate::subscription::pointer_presses). Each variant
/// wraps the corresponding [`crossterm::event::Event`] payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// The key event if this is a key *press* (repeats and releases are
    /// ignored so widgets do not act twice on terminals that report them).
    pub fn key_press(&self) -> Option<KeyEvent> {
        match self {
            TerminalEvent::Key(key) if key.kind != KeyEventKind::Release => Some(*key),
            _ => None,
        }
    }

    /// The cell under the pointer if this is a left-button press.
    pub fn pointer_press(&self) -> Option<Position> {
        match self {
            TerminalEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(Position::new(*column, *row)),
            _ => None,
        }
    }
}

impl From<crossterm::event::Event> for TerminalEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => TerminalEvent::Key(k),
            crossterm::event::Event::Mouse(m) => TerminalEvent::Mouse(m),
            crossterm::event::Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => TerminalEvent::FocusGained,
            crossterm::event::Event::FocusLost => TerminalEvent::FocusLost,
            crossterm::event::Event::Paste(s) => TerminalEvent::Paste(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn mouse(kind: MouseEventKind) -> TerminalEvent {
        TerminalEvent::Mouse(MouseEvent {
            kind,
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn left_press_reports_position() {
        let ev = mouse(MouseEventKind::Down(MouseButton::Left));
        assert_eq!(ev.pointer_press(), Some(Position::new(4, 7)));
    }

    #[test]
    fn other_mouse_events_are_not_presses() {
        assert_eq!(mouse(MouseEventKind::Up(MouseButton::Left)).pointer_press(), None);
        assert_eq!(mouse(MouseEventKind::Down(MouseButton::Right)).pointer_press(), None);
        assert_eq!(mouse(MouseEventKind::Moved).pointer_press(), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert!(TerminalEvent::Key(key).key_press().is_some());
        key.kind = KeyEventKind::Release;
        assert!(TerminalEvent::Key(key).key_press().is_none());
    }
}
