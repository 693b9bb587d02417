use super::snapshot::VisualLogData;
use super::status_change::StatusChange;
use crate::core::certification::LogStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Daily log record as exchanged with the record service
/// (⇔ `log_sheets` row plus its `status_changes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLogRecord {
    pub id: i64,
    pub trip: i64,
    pub date: NaiveDate,
    pub status: LogStatus,
    #[serde(default)]
    pub vehicle_number: String,
    #[serde(default)]
    pub trailer_number: String,
    #[serde(default)]
    pub visual_log_data: VisualLogData,
    #[serde(default)]
    pub status_changes: Vec<StatusChange>,
    #[serde(default)]
    pub certified_at: Option<DateTime<Utc>>,
}

impl DayLogRecord {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
