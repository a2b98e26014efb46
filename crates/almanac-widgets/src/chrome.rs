//! Shared borders and text fitting for form widgets.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Visual state of a bordered form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldState {
    pub focused: bool,
    pub error: bool,
    pub disabled: bool,
}

/// Bordered block for a form field. Errors win over focus; disabled fields
/// are dimmed.
pub fn field_block(title: &str, state: FieldState) -> Block<'_> {
    let style = if state.error {
        Style::default().fg(Color::Red)
    } else if state.disabled {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else if state.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::new()
        .borders(Borders::ALL)
        .title(title)
        .border_style(style)
}

/// Cut `text` to at most `width` terminal cells, ending in `…` when cut.
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_width_keeps_short_text() {
        assert_eq!(fit_width("March", 10), "March");
        assert_eq!(fit_width("March", 5), "March");
    }

    #[test]
    fn fit_width_cuts_long_text() {
        assert_eq!(fit_width("September", 5), "Sept…");
        assert_eq!(fit_width("September", 1), "…");
        assert_eq!(fit_width("September", 0), "");
    }

    #[test]
    fn fit_width_counts_wide_chars() {
        // Each CJK character takes two cells.
        assert_eq!(fit_width("十二月です", 5), "十二…");
    }

    #[test]
    fn error_border_is_red() {
        let state = FieldState {
            focused: true,
            error: true,
            disabled: false,
        };
        let block = field_block("Date", state);
        let area = ratatui::layout::Rect::new(0, 0, 10, 3);
        let mut buf = ratatui::buffer::Buffer::empty(area);
        ratatui::widgets::Widget::render(block, area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, Color::Red);
    }
}
