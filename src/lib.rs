//! # Trial Balance by Month
//!
//! Builds a month-by-month trial balance comparison: one row per account,
//! one value column per calendar month, from closing balances served by an
//! external ledger.
//!
//! ## Core Concepts
//!
//! - **Month split**: the reporting span is cut into consecutive one-month ranges
//! - **Ledger provider**: anything implementing [`LedgerProvider`]; it is asked once per range, in order
//! - **Signed balance**: a debit balance is positive, a credit balance negative
//! - **Month labels**: derived from the fiscal year's boundaries, independently of the month split
//!
//! ## Example
//!
//! ```rust,ignore
//! use trial_balance_by_month::*;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let filter = ReportFilter::new("2024", "2024-01-01", "2024-03-31").with_company("ACME Corp");
//!
//! let fiscal_years = FiscalYearTable::new().with_year(FiscalYear::new(
//!     "2024",
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
//! ));
//!
//! let ledger = |query: &LedgerQuery| -> Result<Vec<LedgerRecord>> {
//!     Ok(vec![LedgerRecord::new("1110 - Cash", Decimal::from(100), Decimal::ZERO)
//!         .with_period(query.range)])
//! };
//!
//! let report = execute_report(&filter, &ledger, &fiscal_years).unwrap();
//! println!("{}", report.to_markdown());
//! ```

pub mod aggregator;
pub mod columns;
pub mod config;
pub mod error;
pub mod fiscal;
pub mod labels;
pub mod report;
pub mod schema;
pub mod splitter;
pub mod utils;

pub use aggregator::{BalanceAggregator, LedgerProvider, DEFAULT_TOTAL_SENTINEL};
pub use columns::{build_columns, ColumnDescriptor, FieldType};
pub use config::ReportConfig;
pub use error::{Result, TrialBalanceError};
pub use fiscal::{FiscalYear, FiscalYearLookup, FiscalYearTable};
pub use labels::{build_month_labels, MonthLabelMap, MonthNames};
pub use report::TrialBalanceReport;
pub use schema::*;
pub use splitter::split_into_months;
pub use utils::*;

use log::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct MonthlyComparison {
    config: ReportConfig,
}

impl MonthlyComparison {
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Runs one report: parses the filter's dates, splits them into months,
    /// aggregates the ledger's balances and labels the month columns from
    /// the filter's fiscal year.
    ///
    /// Malformed dates and unknown fiscal years fail before the ledger is
    /// queried. A ledger error aborts the report.
    pub fn execute<P, L>(
        &self,
        filter: &ReportFilter,
        ledger: &P,
        fiscal_years: &L,
    ) -> Result<TrialBalanceReport>
    where
        P: LedgerProvider + ?Sized,
        L: FiscalYearLookup + ?Sized,
    {
        let span = filter.date_range()?;
        let fiscal_year = fiscal_years.resolve(&filter.fiscal_year)?;

        info!(
            "Building monthly trial balance for {} (fiscal year {})",
            span, fiscal_year.name
        );

        let ranges = split_into_months(span.from, span.to);
        let labels = build_month_labels(
            fiscal_year.year_start_date,
            fiscal_year.year_end_date,
            &self.config.month_names,
        );

        if labels.len() != ranges.len() {
            warn!(
                "Fiscal year {} has {} months but the report spans {} ranges; column labels may not line up",
                fiscal_year.name,
                labels.len(),
                ranges.len()
            );
        }

        let rows = self.config.aggregator().aggregate(filter, &ranges, ledger)?;
        let columns = build_columns(&labels, &self.config);

        debug!(
            "Report has {} rows and {} columns",
            rows.len(),
            columns.len()
        );

        Ok(TrialBalanceReport {
            columns,
            rows,
            ranges,
        })
    }
}

pub fn execute_report<P, L>(
    filter: &ReportFilter,
    ledger: &P,
    fiscal_years: &L,
) -> Result<TrialBalanceReport>
where
    P: LedgerProvider + ?Sized,
    L: FiscalYearLookup + ?Sized,
{
    MonthlyComparison::default().execute(filter, ledger, fiscal_years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::cell::Cell;

    fn fiscal_2024() -> FiscalYearTable {
        FiscalYearTable::new().with_year(FiscalYear::new(
            "2024",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        ))
    }

    #[test]
    fn test_end_to_end_processing() {
        let filter = ReportFilter::new("2024", "2024-01-01", "2024-03-31");
        let ledger = |query: &LedgerQuery| -> Result<Vec<LedgerRecord>> {
            Ok(match query.month_index {
                1 => vec![LedgerRecord::new("A1", Decimal::from(100), Decimal::ZERO)],
                2 => vec![
                    LedgerRecord::new("A1", Decimal::ZERO, Decimal::from(50)),
                    LedgerRecord::new("A2", Decimal::from(30), Decimal::ZERO),
                ],
                _ => vec![],
            })
        };

        let report = execute_report(&filter, &ledger, &fiscal_2024()).unwrap();

        assert_eq!(report.month_count(), 3);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(
            report.row("A1").unwrap().months,
            vec![Decimal::from(100), Decimal::from(-50), Decimal::ZERO]
        );
        assert_eq!(
            report.row("A2").unwrap().months,
            vec![Decimal::ZERO, Decimal::from(30), Decimal::ZERO]
        );
        assert_eq!(report.columns[1].label, "January");
        assert_eq!(report.columns[12].label, "December");
    }

    #[test]
    fn test_malformed_date_fails_before_fetch() {
        let filter = ReportFilter::new("2024", "2024/01/01", "2024-03-31");
        let calls = Cell::new(0);
        let ledger = |_: &LedgerQuery| -> Result<Vec<LedgerRecord>> {
            calls.set(calls.get() + 1);
            Ok(vec![])
        };

        let result = execute_report(&filter, &ledger, &fiscal_2024());
        assert!(matches!(result, Err(TrialBalanceError::InvalidDate { .. })));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_unknown_fiscal_year_is_a_configuration_error() {
        let filter = ReportFilter::new("2031", "2024-01-01", "2024-03-31");
        let ledger = |_: &LedgerQuery| -> Result<Vec<LedgerRecord>> { Ok(vec![]) };

        let result = execute_report(&filter, &ledger, &fiscal_2024());
        assert!(matches!(result, Err(TrialBalanceError::FiscalYearNotFound(_))));
    }

    #[test]
    fn test_inverted_span_gives_empty_report() {
        let filter = ReportFilter::new("2024", "2024-04-01", "2024-03-31");
        let ledger = |_: &LedgerQuery| -> Result<Vec<LedgerRecord>> {
            Ok(vec![LedgerRecord::new("A1", Decimal::ONE, Decimal::ZERO)])
        };

        let report = execute_report(&filter, &ledger, &fiscal_2024()).unwrap();
        assert!(report.rows.is_empty());
        assert_eq!(report.columns.len(), 13);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ReportConfig {
            column_width: 0,
            ..ReportConfig::default()
        };
        assert!(MonthlyComparison::new(config).is_err());
    }
}
