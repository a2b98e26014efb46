//! The month a calendar is showing, independent of what is selected.

use crate::date_value::DateValue;
use crate::month_grid::{month_grid, CalendarError, MonthGrid};
use chrono::{Datelike, Months, NaiveDate};

/// Earliest year the calendar navigates to.
pub const MIN_YEAR: i32 = 1;
/// Latest year the calendar navigates to.
pub const MAX_YEAR: i32 = 3000;

/// The displayed (year, month) plus an anchor day-of-month.
///
/// Stepping a month keeps the anchor day where the target month has it and
/// clamps to the month's last day otherwise. Choosing a month or year
/// directly resets the anchor to the 1st.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMonth {
    anchor: NaiveDate,
}

impl DisplayMonth {
    /// Show `month` of `year`, anchored on the 1st.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::OutOfRange(year));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|anchor| Self { anchor })
            .ok_or(CalendarError::OutOfRange(year))
    }

    /// Show the month containing `date`, anchored on that day.
    ///
    /// Dates outside the navigable years are clamped to the nearest bound.
    pub fn from_date(date: NaiveDate) -> Self {
        let anchor = if date.year() < MIN_YEAR {
            NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1)
        } else if date.year() > MAX_YEAR {
            NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31)
        } else {
            Some(date)
        };
        Self {
            anchor: anchor.unwrap_or(date),
        }
    }

    /// Where a freshly opened calendar starts: the selection's first date,
    /// otherwise `today`.
    pub fn initial(value: &DateValue, today: NaiveDate) -> Self {
        Self::from_date(value.first_date().unwrap_or(today))
    }

    pub fn year(&self) -> i32 {
        self.anchor.year()
    }

    /// Month number, 1 to 12.
    pub fn month(&self) -> u32 {
        self.anchor.month()
    }

    /// The anchor day within the displayed month.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// One month back, staying put at January of [`MIN_YEAR`].
    pub fn previous_month(self) -> Self {
        self.step(self.anchor.checked_sub_months(Months::new(1)))
    }

    /// One month forward, staying put at December of [`MAX_YEAR`].
    pub fn next_month(self) -> Self {
        self.step(self.anchor.checked_add_months(Months::new(1)))
    }

    /// Jump to `month` in the same year.
    pub fn with_month(self, month: u32) -> Result<Self, CalendarError> {
        Self::new(self.year(), month)
    }

    /// Jump to `year`, keeping the month.
    pub fn with_year(self, year: i32) -> Result<Self, CalendarError> {
        Self::new(year, self.month())
    }

    /// The grid of days to draw.
    pub fn grid(&self) -> Result<MonthGrid, CalendarError> {
        month_grid(self.year(), self.month())
    }

    fn step(self, target: Option<NaiveDate>) -> Self {
        match target {
            Some(anchor) if (MIN_YEAR..=MAX_YEAR).contains(&anchor.year()) => Self { anchor },
            _ => self,
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
    fn march_back_to_leap_february() {
        let march = DisplayMonth::new(2024, 3).unwrap();
        let feb = march.previous_month();
        assert_eq!((feb.year(), feb.month()), (2024, 2));
        let grid = feb.grid().unwrap();
        for day in 1..=29 {
            assert!(grid.days().contains(&d(2024, 2, day)));
        }
    }

    #[test]
    fn rolls_over_year_boundaries() {
        let jan = DisplayMonth::new(2024, 1).unwrap();
        let dec = jan.previous_month();
        assert_eq!((dec.year(), dec.month()), (2023, 12));
        let back = dec.next_month();
        assert_eq!((back.year(), back.month()), (2024, 1));
    }

    #[test]
    fn anchor_day_is_clamped() {
        let m = DisplayMonth::from_date(d(2024, 3, 31));
        assert_eq!(m.previous_month().anchor(), d(2024, 2, 29));
        assert_eq!(DisplayMonth::from_date(d(2024, 1, 15)).next_month().anchor(), d(2024, 2, 15));
    }

    #[test]
    fn direct_navigation_resets_anchor() {
        let m = DisplayMonth::from_date(d(2024, 3, 31));
        let june = m.with_month(6).unwrap();
        assert_eq!(june.anchor(), d(2024, 6, 1));
        let y = m.with_year(1999).unwrap();
        assert_eq!(y.anchor(), d(1999, 3, 1));
        assert_eq!(m.with_month(13), Err(CalendarError::InvalidMonth(13)));
        assert_eq!(m.with_year(3001), Err(CalendarError::OutOfRange(3001)));
    }

    #[test]
    fn stays_within_year_bounds() {
        let first = DisplayMonth::new(MIN_YEAR, 1).unwrap();
        assert_eq!(first.previous_month(), first);
        let last = DisplayMonth::new(MAX_YEAR, 12).unwrap();
        assert_eq!(last.next_month(), last);
        assert_eq!(DisplayMonth::from_date(d(9999, 5, 5)).year(), MAX_YEAR);
    }

    #[test]
    fn initial_prefers_selection() {
        let today = d(2026, 10, 17);
        assert_eq!(DisplayMonth::initial(&DateValue::Empty, today).anchor(), today);
        let value = DateValue::range(d(2020, 5, 3), d(2020, 6, 1));
        assert_eq!(DisplayMonth::initial(&value, today).anchor(), d(2020, 5, 3));
    }
}
