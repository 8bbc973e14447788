use crate::error::Result;
use crate::schema::{AggregatedRow, DateRange, LedgerQuery, LedgerRecord, ReportFilter};
use log::{debug, error, info};
use std::collections::HashMap;

/// Account value the ledger uses for its synthetic grand-total row. The
/// quote characters are part of the value.
pub const DEFAULT_TOTAL_SENTINEL: &str = "'Total'";

/// Source of per-account closing balances for one date range.
pub trait LedgerProvider {
    fn fetch(&self, query: &LedgerQuery) -> Result<Vec<LedgerRecord>>;
}

impl<F> LedgerProvider for F
where
    F: Fn(&LedgerQuery) -> Result<Vec<LedgerRecord>>,
{
    fn fetch(&self, query: &LedgerQuery) -> Result<Vec<LedgerRecord>> {
        self(query)
    }
}

pub struct BalanceAggregator {
    total_sentinel: String,
}

impl Default for BalanceAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_SENTINEL)
    }
}

impl BalanceAggregator {
    pub fn new(total_sentinel: impl Into<String>) -> Self {
        Self {
            total_sentinel: total_sentinel.into(),
        }
    }

    pub fn total_sentinel(&self) -> &str {
        &self.total_sentinel
    }

    /// Fetches every range in order and folds the records into one row per
    /// account, in first-seen order.
    ///
    /// Month `i` of a row holds the account's signed closing balance for
    /// `ranges[i]`, or zero when the ledger returned nothing for it. Records
    /// without an account and the grand-total row are skipped. A fetch error
    /// aborts the whole aggregation.
    pub fn aggregate<P>(
        &self,
        filter: &ReportFilter,
        ranges: &[DateRange],
        provider: &P,
    ) -> Result<Vec<AggregatedRow>>
    where
        P: LedgerProvider + ?Sized,
    {
        let month_count = ranges.len();
        let mut rows: Vec<AggregatedRow> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (offset, range) in ranges.iter().enumerate() {
            let query = LedgerQuery::new(filter, *range, offset + 1);
            let records = provider.fetch(&query).inspect_err(|e| {
                error!("Ledger fetch failed for month {} ({}): {}", offset + 1, range, e)
            })?;

            debug!(
                "Month {} ({}) returned {} ledger records",
                offset + 1,
                range,
                records.len()
            );

            for record in records {
                let account = match record.account_id() {
                    Some(account) => account.to_string(),
                    None => {
                        debug!("Skipping ledger record without an account: {:?}", record);
                        continue;
                    }
                };

                if account == self.total_sentinel {
                    debug!("Dropping grand-total row for month {}", offset + 1);
                    continue;
                }

                let value = record.signed_balance();
                let position = *positions.entry(account.clone()).or_insert_with(|| {
                    rows.push(AggregatedRow::new(account, record, month_count));
                    rows.len() - 1
                });

                rows[position].months[offset] = value;
            }
        }

        info!(
            "Aggregated {} accounts across {} months",
            rows.len(),
            month_count
        );

        Ok(rows)
    }
}
