use crate::schema::DateRange;
use crate::utils::add_months;
use chrono::{Days, NaiveDate};
use log::{debug, warn};

/// Splits `[from_date, to_date]` into consecutive one-month ranges.
///
/// Each range starts at the cursor and ends the day before the cursor plus
/// one calendar month; the cursor then advances by that calendar month. The
/// first range starts at `from_date` exactly, and later ranges keep its
/// day-of-month (clamped to the month length, see [`add_months`]). Starting on
/// the 1st therefore yields one range per calendar month.
///
/// A single-day span yields one range. `from_date > to_date` yields none.
pub fn split_into_months(from_date: NaiveDate, to_date: NaiveDate) -> Vec<DateRange> {
    let mut ranges = Vec::new();
    let mut cursor = from_date;

    while cursor <= to_date {
        let Some(next) = add_months(cursor, 1) else {
            warn!("Month split reached the end of the calendar at {}", cursor);
            ranges.push(DateRange::new(cursor, to_date));
            break;
        };

        let end = next.checked_sub_days(Days::new(1)).unwrap_or(next);
        ranges.push(DateRange::new(cursor, end));
        cursor = next;
    }

    debug!(
        "Split {}..{} into {} monthly ranges",
        from_date,
        to_date,
        ranges.len()
    );

    ranges
}
