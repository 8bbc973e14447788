use crate::error::{Result, TrialBalanceError};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FiscalYear {
    #[schemars(description = "Fiscal year name as referenced by report filters (e.g. '2024-2025')")]
    pub name: String,

    #[schemars(description = "First day of the fiscal year")]
    pub year_start_date: NaiveDate,

    #[schemars(description = "Last day of the fiscal year")]
    pub year_end_date: NaiveDate,
}

impl FiscalYear {
    pub fn new(name: impl Into<String>, year_start_date: NaiveDate, year_end_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            year_start_date,
            year_end_date,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.year_end_date < self.year_start_date {
            return Err(TrialBalanceError::InvalidFiscalYear {
                name: self.name.clone(),
                start: self.year_start_date,
                end: self.year_end_date,
            });
        }
        Ok(())
    }
}

/// Resolves a fiscal year name to its boundaries.
pub trait FiscalYearLookup {
    fn find(&self, name: &str) -> Option<FiscalYear>;

    /// Like [`find`](Self::find), but a missing year is a configuration error.
    fn resolve(&self, name: &str) -> Result<FiscalYear> {
        let year = self
            .find(name)
            .ok_or_else(|| TrialBalanceError::FiscalYearNotFound(name.to_string()))?;
        year.validate()?;
        Ok(year)
    }
}

/// In-memory fiscal year register.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<FiscalYear>", into = "Vec<FiscalYear>")]
pub struct FiscalYearTable {
    years: BTreeMap<String, FiscalYear>,
}

impl FiscalYearTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: FiscalYear) {
        self.years.insert(year.name.clone(), year);
    }

    pub fn with_year(mut self, year: FiscalYear) -> Self {
        self.insert(year);
        self
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<FiscalYear>> for FiscalYearTable {
    fn from(years: Vec<FiscalYear>) -> Self {
        let mut table = Self::new();
        for year in years {
            table.insert(year);
        }
        table
    }
}

impl From<FiscalYearTable> for Vec<FiscalYear> {
    fn from(table: FiscalYearTable) -> Self {
        table.years.into_values().collect()
    }
}

impl FiscalYearLookup for FiscalYearTable {
    fn find(&self, name: &str) -> Option<FiscalYear> {
        self.years.get(name).cloned()
    }
}
