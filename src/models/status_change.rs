use super::duty_status::DutyStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse duty-status change as stored by the record service
/// (⇔ `status_changes` rows). Used to bootstrap the visual grid of a
/// day that has never been edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    #[serde(default)]
    pub id: Option<i64>,
    pub status: DutyStatus,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Duration in hours, when the service reports it.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub remarks: String,
}

impl StatusChange {
    /// Duration in hours: explicit value first, otherwise end - start.
    pub fn duration_hours(&self) -> f64 {
        if let Some(d) = self.duration {
            return d;
        }
        match self.end_time {
            Some(end) => (end - self.start_time).num_minutes() as f64 / 60.0,
            None => 0.0,
        }
    }
}
