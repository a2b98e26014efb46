//! Locale and timezone configuration for calendar labels and "today".

use chrono::{DateTime, Locale, NaiveDate, Utc};
use chrono_tz::Tz;

/// Errors from parsing locale or timezone names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleError {
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),
}

/// The locale used for month and weekday names and the timezone used to
/// decide what "today" is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleConfig {
    locale: Locale,
    timezone: Tz,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            timezone: chrono_tz::UTC,
        }
    }
}

impl LocaleConfig {
    /// Build from a POSIX locale name (`de_DE`, `fr_FR.UTF-8`) and an IANA
    /// timezone (`Europe/Berlin`).
    pub fn new(locale: &str, timezone: &str) -> Result<Self, LocaleError> {
        Ok(Self {
            locale: parse_locale(locale)?,
            timezone: parse_timezone(timezone)?,
        })
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Resolve from `LC_ALL`, `LC_TIME`, `LANG` and `TZ`.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary variable lookup.
    ///
    /// The first of `LC_ALL`, `LC_TIME`, `LANG` that is set and non-empty
    /// picks the locale; `TZ` picks the timezone. Values that fail to parse
    /// are logged and fall back to `en_US` and `UTC`.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let raw_locale = ["LC_ALL", "LC_TIME", "LANG"]
            .iter()
            .filter_map(|key| lookup(key))
            .find(|value| !value.trim().is_empty());
        if let Some(raw) = raw_locale {
            match parse_locale(&raw) {
                Ok(locale) => config.locale = locale,
                Err(error) => tracing::warn!(%error, "falling back to en_US"),
            }
        }

        if let Some(raw) = lookup("TZ").filter(|v| !v.trim().is_empty()) {
            match parse_timezone(&raw) {
                Ok(tz) => config.timezone = tz,
                Err(error) => tracing::warn!(%error, "falling back to UTC"),
            }
        }

        tracing::debug!(locale = ?config.locale, timezone = %config.timezone, "locale resolved");
        config
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }

    /// The calendar date of `instant` in the configured timezone.
    pub fn date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }
}

/// Parse a POSIX locale name, ignoring any `.codeset` or `@modifier`.
///
/// `C` and `POSIX` map to the POSIX locale; hyphens are accepted in place
/// of underscores (`en-GB`).
pub fn parse_locale(raw: &str) -> Result<Locale, LocaleError> {
    let trimmed = raw.trim();
    let name = trimmed
        .split(['.', '@'])
        .next()
        .unwrap_or(trimmed)
        .replace('-', "_");
    let name = match name.as_str() {
        "C" | "POSIX" => "POSIX",
        other => other,
    };
    Locale::try_from(name).map_err(|_| LocaleError::UnknownLocale(trimmed.to_string()))
}

/// Parse an IANA timezone name. A leading `:` (as `TZ` allows) is ignored.
pub fn parse_timezone(raw: &str) -> Result<Tz, LocaleError> {
    let trimmed = raw.trim();
    trimmed
        .trim_start_matches(':')
        .parse::<Tz>()
        .map_err(|_| LocaleError::UnknownTimezone(trimmed.to_string()))
}
