use crate::error::Result as TbResult;
use crate::utils::{parse_iso_date, ISO_DATE_FORMAT};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// An inclusive calendar span handed to the ledger provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn num_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.from.format(ISO_DATE_FORMAT),
            self.to.format(ISO_DATE_FORMAT)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportFilter {
    #[schemars(description = "Name of the fiscal year whose boundaries drive the month column labels")]
    pub fiscal_year: String,

    #[schemars(description = "First day of the reporting span in YYYY-MM-DD format")]
    pub from_date: String,

    #[schemars(description = "Last day of the reporting span in YYYY-MM-DD format")]
    pub to_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Company the ledger query is scoped to")]
    pub company: Option<String>,

    #[serde(flatten)]
    #[schemars(
        description = "Any further provider-specific query context (cost center, project, finance book...). Passed through untouched."
    )]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ReportFilter {
    pub fn new(
        fiscal_year: impl Into<String>,
        from_date: impl Into<String>,
        to_date: impl Into<String>,
    ) -> Self {
        Self {
            fiscal_year: fiscal_year.into(),
            from_date: from_date.into(),
            to_date: to_date.into(),
            company: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Parses `from_date` and `to_date`. Their ordering is not checked.
    pub fn date_range(&self) -> TbResult<DateRange> {
        let from = parse_iso_date("from_date", &self.from_date)?;
        let to = parse_iso_date("to_date", &self.to_date)?;
        Ok(DateRange::new(from, to))
    }

    /// Returns a copy of this filter narrowed to `range`.
    pub fn scoped_to(&self, range: DateRange) -> Self {
        Self {
            from_date: range.from.format(ISO_DATE_FORMAT).to_string(),
            to_date: range.to.format(ISO_DATE_FORMAT).to_string(),
            ..self.clone()
        }
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ReportFilter)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// One ledger request: the caller's filter narrowed to a single month.
/// Built fresh for every fetch so the caller's filter is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerQuery {
    pub filter: ReportFilter,
    pub range: DateRange,
    /// 1-based month index this query feeds.
    pub month_index: usize,
}

impl LedgerQuery {
    pub fn new(base: &ReportFilter, range: DateRange, month_index: usize) -> Self {
        Self {
            filter: base.scoped_to(range),
            range,
            month_index,
        }
    }
}

/// A closing-balance row for one account over one range, as returned by the
/// ledger provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LedgerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_zero",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    #[schemars(with = "f64")]
    pub closing_debit: Decimal,

    #[serde(
        default,
        deserialize_with = "null_as_zero",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    #[schemars(with = "f64")]
    pub closing_credit: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl LedgerRecord {
    pub fn new(account: impl Into<String>, closing_debit: Decimal, closing_credit: Decimal) -> Self {
        Self {
            account: Some(account.into()),
            closing_debit,
            closing_credit,
            ..Self::default()
        }
    }

    pub fn with_period(mut self, range: DateRange) -> Self {
        self.from_date = Some(range.from);
        self.to_date = Some(range.to);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The account identifier, or `None` when absent or blank.
    pub fn account_id(&self) -> Option<&str> {
        self.account.as_deref().filter(|a| !a.trim().is_empty())
    }

    /// Debit balances are positive, credit balances negative.
    pub fn signed_balance(&self) -> Decimal {
        if !self.closing_debit.is_zero() {
            self.closing_debit
        } else if !self.closing_credit.is_zero() {
            -self.closing_credit
        } else {
            Decimal::ZERO
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn month_field_name(index: usize) -> String {
    format!("m{}", index)
}

/// One output row per account. `first_record` is the account's first
/// ledger record, kept as-is; only `months` changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub account: String,
    pub months: Vec<Decimal>,
    pub first_record: LedgerRecord,
}

impl AggregatedRow {
    pub fn new(account: impl Into<String>, first_record: LedgerRecord, month_count: usize) -> Self {
        Self {
            account: account.into(),
            months: vec![Decimal::ZERO; month_count],
            first_record,
        }
    }

    /// Value for the 1-based month `index`.
    pub fn month(&self, index: usize) -> Option<Decimal> {
        index.checked_sub(1).and_then(|i| self.months.get(i)).copied()
    }

    pub fn total(&self) -> Decimal {
        self.months.iter().copied().sum()
    }
}

/// Amounts leave the crate as JSON numbers.
struct Amount<'a>(&'a Decimal);

impl Serialize for Amount<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(self.0, serializer)
    }
}

struct MonthFields<'a>(&'a [Decimal]);

impl Serialize for MonthFields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (i, value) in self.0.iter().enumerate() {
            map.serialize_entry(&month_field_name(i + 1), &Amount(value))?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct RowView<'a> {
    #[serde(flatten)]
    record: &'a LedgerRecord,
    #[serde(flatten)]
    months: MonthFields<'a>,
}

impl Serialize for AggregatedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        RowView {
            record: &self.first_record,
            months: MonthFields(&self.months),
        }
        .serialize(serializer)
    }
}
