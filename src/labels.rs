use crate::error::{Result, TrialBalanceError};
use crate::utils::{add_months, first_day_of_month};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 1-based month index to column label.
pub type MonthLabelMap = BTreeMap<usize, String>;

const ENGLISH: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const THAI: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Display names for calendar months, January first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MonthNames {
    names: [String; 12],
}

impl MonthNames {
    pub fn new(names: [String; 12]) -> Self {
        Self { names }
    }

    pub fn english() -> Self {
        Self::from_static(ENGLISH)
    }

    pub fn thai() -> Self {
        Self::from_static(THAI)
    }

    fn from_static(names: [&str; 12]) -> Self {
        Self {
            names: names.map(String::from),
        }
    }

    /// Name for calendar month `month` (1 = January).
    pub fn name(&self, month: u32) -> Option<&str> {
        let index = (month as usize).checked_sub(1)?;
        self.names.get(index).map(String::as_str)
    }
}

impl Default for MonthNames {
    fn default() -> Self {
        Self::english()
    }
}

impl TryFrom<Vec<String>> for MonthNames {
    type Error = TrialBalanceError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        let count = names.len();
        let names: [String; 12] = names
            .try_into()
            .map_err(|_| TrialBalanceError::InvalidMonthNames(count))?;
        Ok(Self { names })
    }
}

impl From<MonthNames> for Vec<String> {
    fn from(names: MonthNames) -> Self {
        names.names.into()
    }
}

/// Labels every calendar month from `fiscal_from`'s month through
/// `fiscal_to`'s month, in order, starting at index 1.
///
/// Months are enumerated on the 1st, independently of
/// [`split_into_months`](crate::splitter::split_into_months). The two agree
/// in length only when the reporting span starts on the 1st and covers the
/// same months as the fiscal year.
pub fn build_month_labels(
    fiscal_from: NaiveDate,
    fiscal_to: NaiveDate,
    names: &MonthNames,
) -> MonthLabelMap {
    let mut labels = BTreeMap::new();
    let end = first_day_of_month(fiscal_to);
    let mut current = first_day_of_month(fiscal_from);

    while current <= end {
        let label = names.name(current.month()).unwrap_or_default();
        labels.insert(labels.len() + 1, label.to_string());

        match add_months(current, 1) {
            Some(next) => current = next,
            None => break,
        }
    }

    labels
}
