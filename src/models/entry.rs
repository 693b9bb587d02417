use super::duty_status::DutyStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One recorded duty-status segment of the daily grid.
///
/// Each entry occupies exactly one whole hour slot; `start_time` and
/// `end_time` are carried along for the record but are not validated
/// against `hour`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyStatusEntry {
    pub status: DutyStatus,
    pub hour: u8,
    pub location: Option<String>,
    pub remarks: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl DutyStatusEntry {
    /// Entry with no location, remarks or timestamps.
    pub fn new(status: DutyStatus, hour: u8) -> Self {
        Self {
            status,
            hour,
            location: None,
            remarks: None,
            start_time: None,
            end_time: None,
        }
    }

    /// Entry built from user input: blank strings are stored as `None`
    /// and the timestamps span the hour slot on `date`.
    pub fn from_input(
        date: NaiveDate,
        status: DutyStatus,
        hour: u8,
        location: Option<&str>,
        remarks: Option<&str>,
    ) -> Self {
        let start = date
            .and_hms_opt(u32::from(hour), 0, 0)
            .map(|dt| dt.and_utc());
        let end = start.map(|s| s + chrono::Duration::hours(1));

        Self {
            status,
            hour,
            location: non_blank(location),
            remarks: non_blank(remarks),
            start_time: start,
            end_time: end,
        }
    }

    pub fn location_str(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    pub fn remarks_str(&self) -> &str {
        self.remarks.as_deref().unwrap_or("")
    }
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}
