//! Selection values and the single/range selection state machine.
//!
//! A [`DateValue`] is owned by whoever embeds a calendar. The calendar reads
//! it to decide how days are highlighted and, when a day is clicked, asks
//! [`select_date`] what the next value should be. It then *requests* that
//! value from its owner instead of storing it.

use chrono::NaiveDate;

/// Whether a calendar picks one date or a start/end pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Every click selects one date and closes the picker.
    #[default]
    Single,
    /// Two clicks select a range; the second one closes the picker.
    Range,
}

/// The current selection: nothing, one date, or a range with optional ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateValue {
    /// Nothing selected.
    #[default]
    Empty,
    /// One selected date.
    Single(NaiveDate),
    /// A range. `start <= end` whenever both are set.
    Range {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateValue {
    /// A completed range, swapping the endpoints if they arrive reversed.
    pub fn range(a: NaiveDate, b: NaiveDate) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        DateValue::Range {
            start: Some(start),
            end: Some(end),
        }
    }

    /// A range with only its start chosen.
    pub fn range_start(start: NaiveDate) -> Self {
        DateValue::Range {
            start: Some(start),
            end: None,
        }
    }

    /// A range with neither end chosen.
    pub fn empty_range() -> Self {
        DateValue::Range {
            start: None,
            end: None,
        }
    }

    /// Bring a value from outside into canonical shape.
    ///
    /// A range with an end but no start becomes the empty range. A range
    /// whose ends are reversed is swapped.
    pub fn normalized(self) -> Self {
        match self {
            DateValue::Range {
                start: None,
                end: Some(end),
            } => {
                tracing::warn!(%end, "range without a start date; treating as no selection");
                DateValue::empty_range()
            }
            DateValue::Range {
                start: Some(start),
                end: Some(end),
            } if end < start => {
                tracing::warn!(%start, %end, "range endpoints reversed; swapping");
                DateValue::range(start, end)
            }
            other => other,
        }
    }

    /// Whether nothing is selected (including an empty range).
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            DateValue::Empty | DateValue::Range { start: None, .. }
        )
    }

    /// The date a calendar should open on: the single date or range start.
    pub fn first_date(&self) -> Option<NaiveDate> {
        match *self {
            DateValue::Empty => None,
            DateValue::Single(date) => Some(date),
            DateValue::Range { start, .. } => start,
        }
    }

    /// Start and end as seen by a calendar in `mode`.
    ///
    /// In range mode a single date counts as no selection; in single mode a
    /// range contributes its start only.
    pub fn endpoints(&self, mode: SelectionMode) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match (mode, *self) {
            (_, DateValue::Empty) => (None, None),
            (SelectionMode::Single, DateValue::Single(date)) => (Some(date), None),
            (SelectionMode::Single, DateValue::Range { start, .. }) => (start, None),
            (SelectionMode::Range, DateValue::Single(_)) => (None, None),
            (SelectionMode::Range, DateValue::Range { start: None, .. }) => (None, None),
            (SelectionMode::Range, DateValue::Range { start, end }) => (start, end),
        }
    }

    /// Per-day highlight flags for a calendar in `mode`.
    ///
    /// A single date under a range-mode calendar is drawn as a pending start,
    /// although clicking treats it as no selection. Comparisons are between
    /// calendar days, never timestamps.
    pub fn mark(&self, mode: SelectionMode, day: NaiveDate) -> DayMark {
        let (start, end) = match (mode, *self) {
            (SelectionMode::Range, DateValue::Single(date)) => (Some(date), None),
            _ => self.endpoints(mode),
        };
        let is_start = start == Some(day);
        let is_end = end == Some(day);
        let in_range = match (mode, start, end) {
            (SelectionMode::Range, Some(s), Some(e)) => s <= day && day <= e,
            _ => false,
        };
        DayMark {
            selected: is_start || is_end,
            in_range,
            range_start: mode == SelectionMode::Range && is_start,
            range_end: mode == SelectionMode::Range && is_end,
        }
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue::Single(date)
    }
}

/// How a single grid day relates to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayMark {
    /// The day is the single date or one of the range ends.
    pub selected: bool,
    /// The day lies within a completed range (ends included).
    pub in_range: bool,
    /// The day is the range start.
    pub range_start: bool,
    /// The day is the range end.
    pub range_end: bool,
}

/// Where a range selection stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeState {
    /// No endpoint chosen.
    Empty,
    /// Start chosen, waiting for the end.
    StartOnly(NaiveDate),
    /// Both chosen, `start <= end`.
    Complete(NaiveDate, NaiveDate),
}

impl RangeState {
    /// Read the state a range-mode calendar sees in `value`.
    pub fn of(value: &DateValue) -> Self {
        match value.endpoints(SelectionMode::Range) {
            (Some(start), Some(end)) => RangeState::Complete(start.min(end), start.max(end)),
            (Some(start), None) => RangeState::StartOnly(start),
            _ => RangeState::Empty,
        }
    }

    /// The state after clicking `date`.
    pub fn click(self, date: NaiveDate) -> Self {
        match self {
            RangeState::Empty | RangeState::Complete(..) => RangeState::StartOnly(date),
            RangeState::StartOnly(start) if date >= start => RangeState::Complete(start, date),
            RangeState::StartOnly(start) => RangeState::Complete(date, start),
        }
    }

    /// The value that represents this state.
    pub fn into_value(self) -> DateValue {
        match self {
            RangeState::Empty => DateValue::empty_range(),
            RangeState::StartOnly(start) => DateValue::range_start(start),
            RangeState::Complete(start, end) => DateValue::Range {
                start: Some(start),
                end: Some(end),
            },
        }
    }
}

/// The result of clicking a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOutcome {
    /// The value to request from the owner.
    pub value: DateValue,
    /// Whether the picker should close.
    pub close: bool,
}

/// Decide the next selection after `date` is clicked.
///
/// Single mode always selects `date` and closes. Range mode walks
/// [`RangeState`]: the first click starts a range, the second completes it
/// (swapping so that start comes first) and closes, a third starts over.
pub fn select_date(mode: SelectionMode, current: &DateValue, date: NaiveDate) -> SelectionOutcome {
    match mode {
        SelectionMode::Single => SelectionOutcome {
            value: DateValue::Single(date),
            close: true,
        },
        SelectionMode::Range => {
            let next = RangeState::of(current).click(date);
            SelectionOutcome {
                value: next.into_value(),
                close: matches!(next, RangeState::Complete(..)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_mode_selects_and_closes() {
        let out = select_date(SelectionMode::Single, &DateValue::Empty, d(2024, 3, 5));
        assert_eq!(out.value, DateValue::Single(d(2024, 3, 5)));
        assert!(out.close);

        let again = select_date(SelectionMode::Single, &out.value, d(2024, 3, 9));
        assert_eq!(again.value, DateValue::Single(d(2024, 3, 9)));
        assert!(again.close);
    }

    #[test]
    fn range_in_order() {
        let a = d(2024, 3, 5);
        let b = d(2024, 3, 20);
        let first = select_date(SelectionMode::Range, &DateValue::Empty, a);
        assert_eq!(first.value, DateValue::range_start(a));
        assert!(!first.close);

        let second = select_date(SelectionMode::Range, &first.value, b);
        assert_eq!(second.value, DateValue::range(a, b));
        assert!(second.close);
    }

    #[test]
    fn range_out_of_order_swaps() {
        let a = d(2024, 3, 5);
        let b = d(2024, 3, 20);
        let first = select_date(SelectionMode::Range, &DateValue::empty_range(), b);
        let second = select_date(SelectionMode::Range, &first.value, a);
        assert_eq!(
            second.value,
            DateValue::Range {
                start: Some(a),
                end: Some(b)
            }
        );
    }

    #[test]
    fn same_day_twice_is_one_day_range() {
        let a = d(2024, 1, 1);
        let first = select_date(SelectionMode::Range, &DateValue::Empty, a);
        let second = select_date(SelectionMode::Range, &first.value, a);
        assert_eq!(second.value, DateValue::range(a, a));
        assert!(second.close);
    }

    #[test]
    fn third_click_starts_over() {
        let done = DateValue::range(d(2024, 3, 5), d(2024, 3, 20));
        let out = select_date(SelectionMode::Range, &done, d(2024, 4, 1));
        assert_eq!(out.value, DateValue::range_start(d(2024, 4, 1)));
        assert!(!out.close);
    }

    #[test]
    fn single_value_in_range_mode_counts_as_empty() {
        let value = DateValue::Single(d(2024, 3, 5));
        assert_eq!(RangeState::of(&value), RangeState::Empty);
        let out = select_date(SelectionMode::Range, &value, d(2024, 3, 1));
        assert_eq!(out.value, DateValue::range_start(d(2024, 3, 1)));
        assert!(!out.close);
    }

    #[test]
    fn end_without_start_normalizes_to_empty() {
        let odd = DateValue::Range {
            start: None,
            end: Some(d(2024, 3, 5)),
        };
        assert_eq!(odd.normalized(), DateValue::empty_range());
        assert!(odd.is_empty());
        assert_eq!(RangeState::of(&odd), RangeState::Empty);
    }

    #[test]
    fn reversed_range_normalizes_by_swapping() {
        let odd = DateValue::Range {
            start: Some(d(2024, 3, 20)),
            end: Some(d(2024, 3, 5)),
        };
        assert_eq!(odd.normalized(), DateValue::range(d(2024, 3, 5), d(2024, 3, 20)));
    }

    #[test]
    fn marks_for_range() {
        let value = DateValue::range(d(2024, 3, 5), d(2024, 3, 8));
        let start = value.mark(SelectionMode::Range, d(2024, 3, 5));
        assert!(start.selected && start.in_range && start.range_start && !start.range_end);

        let middle = value.mark(SelectionMode::Range, d(2024, 3, 6));
        assert!(!middle.selected && middle.in_range);

        let end = value.mark(SelectionMode::Range, d(2024, 3, 8));
        assert!(end.selected && end.range_end);

        let outside = value.mark(SelectionMode::Range, d(2024, 3, 9));
        assert_eq!(outside, DayMark::default());
    }

    #[test]
    fn marks_for_single() {
        let value = DateValue::Single(d(2024, 3, 5));
        let mark = value.mark(SelectionMode::Single, d(2024, 3, 5));
        assert!(mark.selected);
        assert!(!mark.in_range && !mark.range_start);

        let pending = value.mark(SelectionMode::Range, d(2024, 3, 5));
        assert!(pending.selected && pending.range_start);
        assert!(!pending.in_range && !pending.range_end);
        assert_eq!(value.mark(SelectionMode::Range, d(2024, 3, 6)), DayMark::default());
    }

    #[test]
    fn first_date() {
        assert_eq!(DateValue::Empty.first_date(), None);
        assert_eq!(DateValue::from(d(2020, 2, 29)).first_date(), Some(d(2020, 2, 29)));
        assert_eq!(
            DateValue::range(d(2020, 1, 3), d(2020, 1, 1)).first_date(),
            Some(d(2020, 1, 1))
        );
    }
}
