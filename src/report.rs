use crate::columns::{ColumnDescriptor, FieldType};
use crate::error::{Result, TrialBalanceError};
use crate::schema::{AggregatedRow, DateRange};
use serde::Serialize;

/// Column metadata plus one row per account.
#[derive(Debug, Clone, Serialize)]
pub struct TrialBalanceReport {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<AggregatedRow>,
    #[serde(skip)]
    pub ranges: Vec<DateRange>,
}

impl TrialBalanceReport {
    pub fn row(&self, account: &str) -> Option<&AggregatedRow> {
        self.rows.iter().find(|r| r.account == account)
    }

    pub fn month_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.columns.iter().map(header_for))?;

        for row in &self.rows {
            writer.write_record(self.cells(row))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| TrialBalanceError::ExportError(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| TrialBalanceError::ExportError(e.to_string()))
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        let headers: Vec<&str> = self.columns.iter().map(header_for).collect();
        output.push_str(&format!("| {} |\n", headers.join(" | ")));

        let alignments: Vec<&str> = self
            .columns
            .iter()
            .map(|c| match c.fieldtype {
                FieldType::Currency => "---:",
                FieldType::Data => "---",
            })
            .collect();
        output.push_str(&format!("|{}|\n", alignments.join("|")));

        for row in &self.rows {
            output.push_str(&format!("| {} |\n", self.cells(row).join(" | ")));
        }

        output
    }

    fn cells(&self, row: &AggregatedRow) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| {
                if column.fieldname == "account" {
                    return row.account.clone();
                }
                column
                    .fieldname
                    .strip_prefix('m')
                    .and_then(|index| index.parse::<usize>().ok())
                    .and_then(|index| row.month(index))
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

fn header_for(column: &ColumnDescriptor) -> &str {
    if column.label.is_empty() {
        column.fieldname.as_str()
    } else {
        column.label.as_str()
    }
}
