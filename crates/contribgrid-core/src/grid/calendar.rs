//! Calendar arithmetic for the contribution grid.
//!
//! The grid is anchored on the Sunday on or before January 1 of the target
//! year. Column `c`, row `r` maps to `start + c * 7 + r` days, so every
//! column is one calendar week and every row one weekday (Sunday first).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of week columns in the grid.
pub const WEEKS: usize = 53;
/// Number of weekday rows in the grid.
pub const DAYS: usize = 7;

/// Lowest year accepted by [`Year::new`].
pub const MIN_YEAR: i32 = 1901;
/// Highest year accepted by [`Year::new`].
pub const MAX_YEAR: i32 = 2999;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar year inside the editable range.
///
/// Holds January 1 of the year so the date is available without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Year(NaiveDate);

impl Year {
    /// Validate `value` against the editable range (1901..=2999).
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&value) {
            return Err(ValidationError::InvalidYear(value.to_string()));
        }
        NaiveDate::from_ymd_opt(value, 1, 1)
            .map(Year)
            .ok_or_else(|| ValidationError::InvalidYear(value.to_string()))
    }

    /// The current calendar year (UTC), used for the initial grid.
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Year::new(today.year()).unwrap_or(Year(today.with_ordinal(1).unwrap_or(today)))
    }

    pub fn get(self) -> i32 {
        self.0.year()
    }

    /// January 1 of this year.
    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    /// 365 or 366.
    pub fn day_count(self) -> u32 {
        if self.0.leap_year() {
            366
        } else {
            365
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.get()
    }
}

impl TryFrom<i32> for Year {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Year::new(value)
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl FromStr for Year {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i32 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidYear(s.to_string()))?;
        Year::new(value)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// The Sunday on or before January 1 of `year`.
pub fn start_of_grid(year: Year) -> NaiveDate {
    let jan_first = year.first_day();
    let back = jan_first.weekday().num_days_from_sunday();
    jan_first - Days::new(u64::from(back))
}

/// Date shown at `column`, `row` of the grid for `year`.
///
/// Positions past the grid are still computed; bounds are the caller's concern.
pub fn cell_date(year: Year, column: usize, row: usize) -> NaiveDate {
    start_of_grid(year) + Days::new((column * DAYS + row) as u64)
}

/// Label slot for one grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    pub column: usize,
    /// Short English month name, present only at a boundary column.
    pub label: Option<&'static str>,
}

/// One entry per column, labelled where the anchor (row 0) month changes.
///
/// Column 0 is labelled only when its anchor falls in January, so a leading
/// week that starts in the previous December carries no label.
pub fn month_boundaries(year: Year) -> Vec<MonthLabel> {
    let mut last_month: Option<u32> = None;
    (0..WEEKS)
        .map(|column| {
            let month = cell_date(year, column, 0).month0();
            let mut label = None;
            if last_month != Some(month) {
                if column > 0 || month == 0 {
                    label = Some(MONTH_ABBREVIATIONS[month as usize]);
                }
                last_month = Some(month);
            }
            MonthLabel { column, label }
        })
        .collect()
}

/// ISO `YYYY-MM-DD` rendering used for cell labels and commit dates.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
