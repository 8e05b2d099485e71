use chrono::NaiveDate;
use serde::Deserialize;

/// A manual entry with an explicit span.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTimeEntry {
    #[serde(default)]
    pub project_id: String,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default)]
    pub description: Option<String>,
}

/// A manual entry given as a day and an amount of time. It starts at 09:00
/// local time on `date`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddManualEntry {
    pub project_id: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub minutes: f64,
    pub description: Option<String>,
}

/// Fields left out keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTimeEntry {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}
