//! Month grid generation.
//!
//! A month is drawn as whole weeks, Sunday first, so the grid is padded
//! with trailing days of the previous month and leading days of the next.

use chrono::{Datelike, Days, NaiveDate};

/// Errors from calendar arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The month is outside `1..=12`.
    #[error("invalid month {0}, expected 1 to 12")]
    InvalidMonth(u32),
    /// The date falls outside the range `chrono` can represent.
    #[error("year {0} is out of the supported date range")]
    OutOfRange(i32),
}

/// The first and last day of a month.
pub fn month_span(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::OutOfRange(year))?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = match next_first.and_then(|d| d.pred_opt()) {
        Some(last) => last,
        // December of the last representable year.
        None => NaiveDate::from_ymd_opt(year, month, 31).ok_or(CalendarError::OutOfRange(year))?,
    };
    Ok((first, last))
}

/// Number of days in a month.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    month_span(year, month).map(|(_, last)| last.day())
}

/// The days shown for one month, in whole Sunday-to-Saturday weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    days: Vec<NaiveDate>,
}

/// Build the grid for `month` of `year`.
///
/// The first day is the Sunday on or before the 1st, the last is the
/// Saturday on or after the month's last day, and every day in between
/// appears exactly once in order.
pub fn month_grid(year: i32, month: u32) -> Result<MonthGrid, CalendarError> {
    let (first, last) = month_span(year, month)?;

    let lead = u64::from(first.weekday().num_days_from_sunday());
    let trail = 6 - u64::from(last.weekday().num_days_from_sunday());
    let start = first
        .checked_sub_days(Days::new(lead))
        .ok_or(CalendarError::OutOfRange(year))?;
    let end = last
        .checked_add_days(Days::new(trail))
        .ok_or(CalendarError::OutOfRange(year))?;

    let days: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
    Ok(MonthGrid { year, month, days })
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Every day in the grid, oldest first. The length is a multiple of 7.
    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// The grid split into weeks of seven days.
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(7)
    }

    pub fn week_count(&self) -> usize {
        self.days.len() / 7
    }

    /// Whether `day` belongs to the displayed month rather than the padding.
    pub fn is_in_month(&self, day: NaiveDate) -> bool {
        day.year() == self.year && day.month() == self.month
    }

    /// Grid index of `day`, if it is shown.
    pub fn position(&self, day: NaiveDate) -> Option<usize> {
        let first = *self.days.first()?;
        let offset = usize::try_from((day - first).num_days()).ok()?;
        (offset < self.days.len()).then_some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn every_month_is_whole_contiguous_weeks() {
        for year in [1900, 1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let grid = month_grid(year, month).unwrap();
                let days = grid.days();
                assert_eq!(days.len() % 7, 0, "{year}-{month}");
                for pair in days.windows(2) {
                    assert_eq!(pair[0].succ_opt().unwrap(), pair[1], "{year}-{month}");
                }
                let (first, last) = month_span(year, month).unwrap();
                assert_eq!(days[0].weekday(), Weekday::Sun);
                assert!(days[0] <= first && first - days[0] < chrono::Duration::days(7));
                assert_eq!(days[days.len() - 1].weekday(), Weekday::Sat);
                assert!(days[days.len() - 1] >= last);
                assert!(days[days.len() - 1] - last < chrono::Duration::days(7));
            }
        }
    }

    #[test]
    fn leap_february() {
        let grid = month_grid(2024, 2).unwrap();
        let inside = grid.days().iter().filter(|d| grid.is_in_month(**d)).count();
        assert_eq!(inside, 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
    }

    #[test]
    fn february_2024_layout() {
        // 2024-02-01 is a Thursday.
        let grid = month_grid(2024, 2).unwrap();
        assert_eq!(grid.days()[0], d(2024, 1, 28));
        assert_eq!(*grid.days().last().unwrap(), d(2024, 3, 2));
        assert_eq!(grid.week_count(), 5);
        assert!(grid.days().contains(&d(2024, 2, 29)));
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_padding() {
        // 2023-10-01 is a Sunday.
        let grid = month_grid(2023, 10).unwrap();
        assert_eq!(grid.days()[0], d(2023, 10, 1));
    }

    #[test]
    fn february_2015_fits_four_weeks() {
        let grid = month_grid(2015, 2).unwrap();
        assert_eq!(grid.week_count(), 4);
        assert!(grid.days().iter().all(|d| grid.is_in_month(*d)));
    }

    #[test]
    fn december_crosses_year() {
        let grid = month_grid(2023, 12).unwrap();
        assert_eq!(*grid.days().last().unwrap(), d(2024, 1, 6));
        assert!(!grid.is_in_month(d(2024, 1, 1)));
    }

    #[test]
    fn weeks_are_seven_days() {
        let grid = month_grid(2024, 3).unwrap();
        assert!(grid.weeks().all(|w| w.len() == 7));
        assert_eq!(grid.weeks().count(), grid.week_count());
    }

    #[test]
    fn position_lookup() {
        let grid = month_grid(2024, 2).unwrap();
        assert_eq!(grid.position(d(2024, 1, 28)), Some(0));
        assert_eq!(grid.position(d(2024, 2, 1)), Some(4));
        assert_eq!(grid.position(d(2024, 1, 27)), None);
        assert_eq!(grid.position(d(2024, 3, 3)), None);
    }

    #[test]
    fn invalid_input() {
        assert_eq!(month_grid(2024, 0), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(month_grid(2024, 13), Err(CalendarError::InvalidMonth(13)));
        assert_eq!(month_grid(i32::MAX, 1), Err(CalendarError::OutOfRange(i32::MAX)));
    }
}
