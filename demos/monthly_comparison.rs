use chrono::NaiveDate;
use rust_decimal::Decimal;
use trial_balance_by_month::{
    execute_report, FiscalYear, FiscalYearTable, LedgerQuery, LedgerRecord, ReportFilter, Result,
};

/// Stand-in for a real ledger: cash grows by 1,000 a month and sales are
/// booked as credits.
fn ledger(query: &LedgerQuery) -> Result<Vec<LedgerRecord>> {
    let month = Decimal::from(query.month_index as i64);
    Ok(vec![
        LedgerRecord::new("1110 - Cash", Decimal::from(1_000) * month, Decimal::ZERO)
            .with_period(query.range),
        LedgerRecord::new("4000 - Sales", Decimal::ZERO, Decimal::from(750) * month)
            .with_period(query.range),
        LedgerRecord::new("'Total'", Decimal::from(1_000) * month, Decimal::from(750) * month),
    ])
}

fn main() {
    let fiscal_years = FiscalYearTable::new().with_year(FiscalYear::new(
        "2024-2025",
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
    ));

    let filter = ReportFilter::new("2024-2025", "2024-10-01", "2025-09-30").with_company("ACME Corp");

    let report = execute_report(&filter, &ledger, &fiscal_years).expect("report should build");

    println!("{}", report.to_markdown());
    println!("{}", report.to_json().expect("report should serialize"));
}
