//! Cursor and page window over a long option list.
//!
//! The window always starts on a multiple of the page size, so a list of
//! 3000 years is browsed in fixed pages rather than scrolled row by row.

use std::ops::Range;

/// Tracks the highlighted index and the page currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedSelection {
    cursor: usize,
    page_start: usize,
    count: usize,
    page_size: usize,
}

impl PagedSelection {
    pub fn new(count: usize, page_size: usize) -> Self {
        Self {
            cursor: 0,
            page_start: 0,
            count,
            page_size: page_size.max(1),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn page_start(&self) -> usize {
        self.page_start
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Indices shown on the current page.
    pub fn page(&self) -> Range<usize> {
        self.page_start..(self.page_start + self.page_size).min(self.count)
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_start > 0
    }

    pub fn has_next_page(&self) -> bool {
        self.page_start + self.page_size < self.count
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.select(self.cursor);
    }

    /// Put the cursor on `index` and show the page holding it.
    pub fn select(&mut self, index: usize) {
        if self.count == 0 {
            self.cursor = 0;
            self.page_start = 0;
            return;
        }
        self.cursor = index.min(self.count - 1);
        self.page_start = self.page_of(self.cursor);
    }

    pub fn move_up(&mut self) {
        self.select(self.cursor.saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        self.select(self.cursor + 1);
    }

    /// Show the previous page, keeping the cursor's row within the page.
    pub fn page_up(&mut self) {
        if self.has_previous_page() {
            self.select(self.cursor.saturating_sub(self.page_size));
        }
    }

    /// Show the next page, clamping the cursor to the last option.
    pub fn page_down(&mut self) {
        if self.has_next_page() {
            self.select(self.cursor + self.page_size);
        }
    }

    pub fn home(&mut self) {
        self.select(0);
    }

    pub fn end(&mut self) {
        self.select(self.count.saturating_sub(1));
    }

    fn page_of(&self, index: usize) -> usize {
        index / self.page_size * self.page_size
    }
}
