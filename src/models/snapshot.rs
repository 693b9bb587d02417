//! Strongly-typed visual snapshot of one or more daily grids.
//!
//! Wire shape (⇔ `visual_log_data`):
//! `{ "<date>": { "<hour>": { status, location, remarks, startTime, endTime } } }`
//!
//! Keys are validated when the snapshot is deserialized: a malformed date,
//! an hour outside 0–23 or an unknown status rejects the whole snapshot.

use super::duty_status::DutyStatus;
use super::entry::DutyStatusEntry;
use super::status_change::StatusChange;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hour slot → entry for a single day.
pub type DayEntries = BTreeMap<u8, DutyStatusEntry>;

/// Date formats accepted for snapshot keys. The second one is the
/// `Date.toDateString()` form written by older clients.
const DATE_KEY_FORMATS: [&str; 2] = ["%Y-%m-%d", "%a %b %d %Y"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireSnapshot", into = "WireSnapshot")]
pub struct VisualLogData {
    days: BTreeMap<NaiveDate, DayEntries>,
}

impl VisualLogData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot holding a single day.
    pub fn single_day(date: NaiveDate, entries: DayEntries) -> Self {
        let mut snap = Self::new();
        snap.set_day(date, entries);
        snap
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(|d| d.is_empty())
    }

    pub fn day(&self, date: &NaiveDate) -> Option<&DayEntries> {
        self.days.get(date)
    }

    pub fn set_day(&mut self, date: NaiveDate, entries: DayEntries) {
        self.days.insert(date, entries);
    }

    pub fn remove_day(&mut self, date: &NaiveDate) -> Option<DayEntries> {
        self.days.remove(date)
    }

    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &DayEntries)> {
        self.days.iter()
    }

    /// Build a snapshot from coarse status changes: each change is bucketed
    /// into the hour of its `start_time` (UTC) on that change's own date.
    /// A later change starting in the same hour overwrites the earlier one.
    pub fn from_status_changes(changes: &[StatusChange]) -> Self {
        let mut snap = Self::new();

        for change in changes {
            let date = change.start_time.date_naive();
            let hour = change.start_time.hour() as u8;

            let entry = DutyStatusEntry {
                status: change.status,
                hour,
                location: non_blank(&change.location),
                remarks: non_blank(&change.remarks),
                start_time: Some(change.start_time),
                end_time: change.end_time,
            };

            snap.days.entry(date).or_default().insert(hour, entry);
        }

        snap
    }

    /// Serialize to a `serde_json::Value` in wire shape.
    pub fn to_json(&self) -> AppResult<serde_json::Value> {
        serde_json::to_value(WireSnapshot::from(self.clone()))
            .map_err(|e| AppError::Snapshot(e.to_string()))
    }

    /// Parse and validate a `serde_json::Value` in wire shape.
    pub fn from_json(value: serde_json::Value) -> Result<Self, String> {
        if value.is_null() {
            return Ok(Self::new());
        }
        let wire: WireSnapshot = serde_json::from_value(value).map_err(|e| e.to_string())?;
        Self::try_from(wire)
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

// ---------------------------
// Wire representation
// ---------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireSnapshot(BTreeMap<String, BTreeMap<String, WireEntry>>);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireEntry {
    status: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    remarks: Option<String>,
    #[serde(default, rename = "startTime")]
    start_time: Option<DateTime<Utc>>,
    #[serde(default, rename = "endTime")]
    end_time: Option<DateTime<Utc>>,
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    DATE_KEY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(key.trim(), fmt).ok())
}

pub fn parse_hour_key(key: &str) -> Option<u8> {
    key.trim().parse::<u8>().ok().filter(|h| *h <= 23)
}

impl TryFrom<WireSnapshot> for VisualLogData {
    type Error = String;

    fn try_from(wire: WireSnapshot) -> Result<Self, Self::Error> {
        let mut days = BTreeMap::new();

        for (date_key, hours) in wire.0 {
            let date =
                parse_date_key(&date_key).ok_or_else(|| format!("invalid date key '{date_key}'"))?;

            let day: &mut DayEntries = days.entry(date).or_default();

            for (hour_key, raw) in hours {
                let hour = parse_hour_key(&hour_key)
                    .ok_or_else(|| format!("invalid hour key '{hour_key}' for {date}"))?;

                let status = DutyStatus::from_db_str(&raw.status).ok_or_else(|| {
                    format!("invalid status '{}' at {date} hour {hour}", raw.status)
                })?;

                day.insert(
                    hour,
                    DutyStatusEntry {
                        status,
                        hour,
                        location: raw.location,
                        remarks: raw.remarks,
                        start_time: raw.start_time,
                        end_time: raw.end_time,
                    },
                );
            }
        }

        Ok(Self { days })
    }
}

impl From<VisualLogData> for WireSnapshot {
    fn from(snap: VisualLogData) -> Self {
        let days = snap
            .days
            .into_iter()
            .map(|(date, entries)| {
                let hours = entries
                    .into_iter()
                    .map(|(hour, e)| {
                        (
                            hour.to_string(),
                            WireEntry {
                                status: e.status.to_db_str().to_string(),
                                location: e.location,
                                remarks: e.remarks,
                                start_time: e.start_time,
                                end_time: e.end_time,
                            },
                        )
                    })
                    .collect();
                (date.format("%Y-%m-%d").to_string(), hours)
            })
            .collect();

        WireSnapshot(days)
    }
}
