use crate::error::{Result, TrialBalanceError};
use chrono::{Datelike, Days, Months, NaiveDate};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(date)
}

/// Calendar-month addition. The day-of-month is clamped to the length of the
/// target month, so Jan 31 + 1 month is Feb 28 (or Feb 29 in a leap year).
/// Returns `None` only when the result falls outside chrono's date range.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

pub fn parse_iso_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|_| {
        TrialBalanceError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        }
    })
}

pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let year_diff = end.year() - start.year();
    let month_diff = end.month() as i32 - start.month() as i32;
    year_diff * 12 + month_diff
}

/// Number of distinct (year, month) pairs touched by `[from, to]`.
pub fn count_calendar_months(from: NaiveDate, to: NaiveDate) -> usize {
    if from > to {
        return 0;
    }
    (months_between(from, to) + 1) as usize
}
