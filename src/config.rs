use crate::aggregator::{BalanceAggregator, DEFAULT_TOTAL_SENTINEL};
use crate::error::{Result, TrialBalanceError};
use crate::labels::MonthNames;
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_COLUMN_WIDTH: u32 = 300;
pub const DEFAULT_MONTH_COLUMNS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReportConfig {
    #[schemars(
        with = "Vec<String>",
        description = "Twelve month display names, January first. Defaults to English."
    )]
    pub month_names: MonthNames,

    #[schemars(
        description = "Account value of the ledger's grand-total row, which is left out of the report. Defaults to 'Total' including the quotes."
    )]
    pub total_sentinel: String,

    #[schemars(description = "Width hint for every report column")]
    pub column_width: u32,

    #[schemars(description = "Number of month columns described to the presentation layer")]
    pub month_columns: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            month_names: MonthNames::default(),
            total_sentinel: DEFAULT_TOTAL_SENTINEL.to_string(),
            column_width: DEFAULT_COLUMN_WIDTH,
            month_columns: DEFAULT_MONTH_COLUMNS,
        }
    }
}

impl ReportConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading report configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_sentinel.is_empty() {
            return Err(TrialBalanceError::InvalidConfig(
                "total_sentinel must not be empty".to_string(),
            ));
        }
        if self.column_width == 0 {
            return Err(TrialBalanceError::InvalidConfig(
                "column_width must be greater than zero".to_string(),
            ));
        }
        if self.month_columns == 0 {
            return Err(TrialBalanceError::InvalidConfig(
                "month_columns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn aggregator(&self) -> BalanceAggregator {
        BalanceAggregator::new(self.total_sentinel.clone())
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ReportConfig)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert_eq!(config.total_sentinel, "'Total'");
        assert_eq!(config.column_width, 300);
        assert_eq!(config.month_columns, 12);
        assert_eq!(config.month_names.name(1), Some("January"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = ReportConfig::from_json(r#"{"total_sentinel": "Total"}"#).unwrap();
        assert_eq!(config.total_sentinel, "Total");
        assert_eq!(config.column_width, 300);
        assert_eq!(config.aggregator().total_sentinel(), "Total");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            ReportConfig::from_json(r#"{"month_columns": 0}"#),
            Err(TrialBalanceError::InvalidConfig(_))
        ));
        assert!(matches!(
            ReportConfig::from_json(r#"{"total_sentinel": ""}"#),
            Err(TrialBalanceError::InvalidConfig(_))
        ));
        assert!(ReportConfig::from_json(r#"{"month_names": ["Jan"]}"#).is_err());
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!(
            "trial_balance_by_month_config_{}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"column_width": 120}}"#).unwrap();
        drop(file);

        let config = ReportConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.column_width, 120);

        let missing = ReportConfig::from_path(path.with_extension("missing"));
        assert!(matches!(missing, Err(TrialBalanceError::IoError(_))));
    }

    #[test]
    fn test_schema_generation() {
        let schema = ReportConfig::schema_as_json().unwrap();
        assert!(schema.contains("total_sentinel"));
        assert!(schema.contains("month_names"));
    }
}
