//! Localized weekday and month labels, and the month/year option lists.

use crate::display_month::{MAX_YEAR, MIN_YEAR};
use crate::format::localized;
use crate::options::{OptionList, SelectOption};
use chrono::{Days, Locale, NaiveDate};

/// Two-character weekday labels, Sunday first.
///
/// Derived from the week starting Sunday 2021-06-06.
pub fn weekday_labels(locale: Locale) -> [String; 7] {
    let sunday = NaiveDate::from_ymd_opt(2021, 6, 6).unwrap_or_default();
    std::array::from_fn(|i| {
        let day = sunday
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(sunday);
        localized(day, "%a", locale).chars().take(2).collect()
    })
}

/// Full month names, January first.
pub fn month_names(locale: Locale) -> [String; 12] {
    std::array::from_fn(|i| {
        let first = NaiveDate::from_ymd_opt(2021, i as u32 + 1, 1).unwrap_or_default();
        localized(first, "%B", locale)
    })
}

/// The twelve localized month names, valued 1 to 12.
pub fn month_options(locale: Locale) -> OptionList {
    let options = month_names(locale)
        .into_iter()
        .zip(1..)
        .map(|(label, value)| SelectOption::new(label, value))
        .collect();
    OptionList::presorted(options, true)
}

/// Years from 3000 down to 1, labels zero-padded to four digits.
pub fn year_options() -> OptionList {
    let options = (MIN_YEAR..=MAX_YEAR)
        .rev()
        .map(|year| SelectOption::new(format!("{year:04}"), year))
        .collect();
    OptionList::presorted(options, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_weekdays() {
        let labels = weekday_labels(Locale::en_US);
        assert_eq!(labels, ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"].map(String::from));
    }

    #[test]
    fn german_weekdays_and_months() {
        let labels = weekday_labels(Locale::de_DE);
        assert_eq!(labels[0], "So");
        assert_eq!(labels[1], "Mo");
        let months = month_names(Locale::de_DE);
        assert_eq!(months[2], "März");
    }

    #[test]
    fn weekday_labels_truncate_by_character() {
        for label in weekday_labels(Locale::ru_RU) {
            assert_eq!(label.chars().count(), 2);
        }
    }

    #[test]
    fn english_months() {
        let months = month_names(Locale::en_US);
        assert_eq!(months[0], "January");
        assert_eq!(months[11], "December");
        let options = month_options(Locale::en_US);
        assert_eq!(options.len(), 12);
        assert_eq!(options.label_of(2), Some("February"));
        assert_eq!(options.position(12), Some(11));
    }

    #[test]
    fn years_descend_and_pad() {
        let years = year_options();
        assert_eq!(years.len(), 3000);
        assert_eq!(years.get(0).map(|o| o.value), Some(3000));
        assert_eq!(years.get(2999).map(|o| o.label.as_str()), Some("0001"));
        assert_eq!(years.label_of(987), Some("0987"));
        assert_eq!(years.position(2024), Some(976));
    }
}
