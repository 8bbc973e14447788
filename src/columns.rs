use crate::config::ReportConfig;
use crate::labels::MonthLabelMap;
use crate::schema::month_field_name;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FieldType {
    Data,
    Currency,
}

/// Presentation metadata for one report column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDescriptor {
    pub fieldname: String,
    pub label: String,
    pub fieldtype: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    pub width: u32,
}

/// `account` followed by `m1..m{config.month_columns}`. Month labels come
/// from `labels`; a month without one gets an empty label.
pub fn build_columns(labels: &MonthLabelMap, config: &ReportConfig) -> Vec<ColumnDescriptor> {
    let mut columns = Vec::with_capacity(config.month_columns + 1);

    columns.push(ColumnDescriptor {
        fieldname: "account".to_string(),
        label: "Account".to_string(),
        fieldtype: FieldType::Data,
        options: Some("Account".to_string()),
        width: config.column_width,
    });

    for index in 1..=config.month_columns {
        columns.push(ColumnDescriptor {
            fieldname: month_field_name(index),
            label: labels.get(&index).cloned().unwrap_or_default(),
            fieldtype: FieldType::Currency,
            options: Some("currency".to_string()),
            width: config.column_width,
        });
    }

    columns
}
