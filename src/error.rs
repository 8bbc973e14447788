use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrialBalanceError {
    #[error("Invalid date '{value}' for field {field}: expected YYYY-MM-DD")]
    InvalidDate { field: String, value: String },

    #[error("Month name table must have 12 entries, got {0}")]
    InvalidMonthNames(usize),

    #[error("Fiscal year not found: {0}")]
    FiscalYearNotFound(String),

    #[error("Fiscal year {name} ends ({end}) before it starts ({start})")]
    InvalidFiscalYear {
        name: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Ledger provider failed for {from}..{to}: {details}")]
    LedgerFetch {
        from: NaiveDate,
        to: NaiveDate,
        details: String,
    },

    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrialBalanceError>;
