//! Placing and drawing popups over the rest of the screen.

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;

/// A `width` x `height` popup attached to `anchor`, kept inside `bounds`.
///
/// Opens below the anchor when it fits there, above when only that fits,
/// and otherwise sits against the bottom of `bounds`. Shifted left when it
/// would run past the right edge.
pub fn anchored_popup(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let w = width.min(bounds.width);
    let h = height.min(bounds.height);

    let below = anchor.bottom();
    let y = if below + h <= bounds.bottom() {
        below
    } else if anchor.y >= bounds.y + h {
        anchor.y - h
    } else {
        bounds.bottom() - h
    };

    let x = anchor.x.max(bounds.x).min(bounds.right() - w);
    Rect::new(x, y, w, h)
}

/// Clear the overlay area and optionally render a block border.
///
/// Returns the inner area (after block padding, if any).
pub fn render_overlay(frame: &mut Frame, area: Rect, block: Option<&Block>) -> Rect {
    frame.render_widget(Clear, area);
    if let Some(block) = block {
        let inner = block.inner(area);
        frame.render_widget(block.clone(), area);
        inner
    } else {
        area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_opens_below() {
        let bounds = Rect::new(0, 0, 80, 40);
        let anchor = Rect::new(5, 2, 30, 3);
        assert_eq!(anchored_popup(anchor, 24, 12, bounds), Rect::new(5, 5, 24, 12));
    }

    #[test]
    fn popup_flips_above_near_bottom() {
        let bounds = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(5, 18, 30, 3);
        assert_eq!(anchored_popup(anchor, 24, 12, bounds), Rect::new(5, 6, 24, 12));
    }

    #[test]
    fn popup_without_room_hugs_bottom() {
        let bounds = Rect::new(0, 0, 80, 14);
        let anchor = Rect::new(5, 3, 30, 3);
        assert_eq!(anchored_popup(anchor, 24, 12, bounds), Rect::new(5, 2, 24, 12));
    }

    #[test]
    fn popup_shifts_left_at_right_edge() {
        let bounds = Rect::new(0, 0, 40, 40);
        let anchor = Rect::new(30, 0, 10, 1);
        let popup = anchored_popup(anchor, 24, 12, bounds);
        assert_eq!(popup.x, 16);
        assert_eq!(popup.right(), 40);
    }

    #[test]
    fn popup_clamps_to_tiny_bounds() {
        let bounds = Rect::new(0, 0, 10, 5);
        let popup = anchored_popup(Rect::new(0, 0, 10, 1), 24, 12, bounds);
        assert_eq!(popup, Rect::new(0, 0, 10, 5));
    }
}
