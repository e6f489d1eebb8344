//! Calendar windows for seasonal aggregation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Month and day of the last date kept by the absolute date range.
///
/// This is a fixed April cutoff, not derived from `month_end`.
pub const SEASON_END_MONTH_DAY: (u32, u32) = (4, 30);

/// A seasonal window: a year range plus an inclusive calendar-month range.
///
/// A day contributes only when it lies in
/// `[year_start-01-01, year_end-04-30]` and its month is in
/// `[month_start, month_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub year_start: i32,
    pub year_end: i32,
    pub month_start: u32,
    pub month_end: u32,
}

impl SeasonWindow {
    /// January through April, 1991 to 2020.
    pub const JAN_APR_1991_2020: SeasonWindow = SeasonWindow {
        year_start: 1991,
        year_end: 2020,
        month_start: 1,
        month_end: 4,
    };

    pub fn new(year_start: i32, year_end: i32, month_start: u32, month_end: u32) -> Self {
        Self {
            year_start,
            year_end,
            month_start,
            month_end,
        }
    }

    /// First date of the absolute range.
    pub fn first_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year_start, 1, 1)
    }

    /// Last date of the absolute range.
    pub fn last_date(&self) -> Option<NaiveDate> {
        let (month, day) = SEASON_END_MONTH_DAY;
        NaiveDate::from_ymd_opt(self.year_end, month, day)
    }

    /// Whether the date lies inside the absolute date range.
    pub fn in_date_range(&self, date: NaiveDate) -> bool {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => date >= first && date <= last,
            _ => false,
        }
    }

    /// Whether the date's calendar month lies inside the month window.
    pub fn in_months(&self, date: NaiveDate) -> bool {
        let month = date.month();
        month >= self.month_start && month <= self.month_end
    }
}

impl Default for SeasonWindow {
    fn default() -> Self {
        Self::JAN_APR_1991_2020
    }
}
