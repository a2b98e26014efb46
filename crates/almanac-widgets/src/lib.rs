//! Calendar, date picker and form widgets for **almanac**.
//!
//! Every widget implements [`almanac_core::Component`], so it can be embedded
//! inside any [`almanac_core::Model`] and placed with ordinary [`ratatui`]
//! layouts.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`calendar`] | Month grid with single-date or range selection |
//! | [`date_picker`] | Date field plus a calendar popup that closes on outside presses |
//! | [`date_field`] | Read-only field showing the formatted selection |
//! | [`select`] | Paged option list, used for the month and year choosers |
//! | [`button`] | Push button with variants and a loading state |
//! | [`password`] | Masked input with strength meter and criteria checklist |
//! | [`upload`] | File list with count and size limits |
//! | [`switch`] | On/off toggle |
//!
//! # Calendar domain
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`date_value`] | Selection values and the range click state machine |
//! | [`month_grid`] | Whole-week grids for a month |
//! | [`display_month`] | The month being shown, independent of the selection |
//! | [`locale`] | Locale and timezone configuration |
//! | [`labels`] | Localized weekday, month and year labels |
//! | [`format`] | Date formatting for display |
//! | [`options`] | Ordered option lists with value lookup |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chrome`] | Field borders and width fitting |
//! | [`overlay`] | Popup placement |
//! | [`selection`] | Cursor and page tracking for lists |

pub mod button;
pub mod calendar;
pub mod chrome;
pub mod date_field;
pub mod date_picker;
pub mod date_value;
pub mod display_month;
pub mod format;
pub mod labels;
pub mod locale;
pub mod month_grid;
pub mod options;
pub mod overlay;
pub mod password;
pub mod select;
pub mod selection;
pub mod switch;
pub mod upload;

pub use calendar::Calendar;
pub use date_picker::DatePicker;
pub use date_value::{DateValue, SelectionMode};
pub use display_month::DisplayMonth;
pub use format::DateFormat;
pub use locale::LocaleConfig;
pub use month_grid::{month_grid, CalendarError, MonthGrid};
