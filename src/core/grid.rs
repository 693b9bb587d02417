use crate::core::certification::LogStatus;
use crate::errors::{AppError, AppResult};
use crate::models::day_log::DayLogRecord;
use crate::models::duty_status::DutyStatus;
use crate::models::entry::DutyStatusEntry;
use crate::models::snapshot::{DayEntries, VisualLogData};
use chrono::NaiveDate;

pub const HOURS_IN_DAY: u8 = 24;

/// The 24-hour duty-status grid of one calendar day.
///
/// `entries` is sparse: an hour without an entry is implicitly off duty,
/// with no recorded detail. Every entry counts as one whole hour.
#[derive(Debug, Clone, PartialEq)]
pub struct DayLogModel {
    pub id: i64,
    pub trip: i64,
    date: NaiveDate,
    pub status: LogStatus,
    pub vehicle_number: String,
    pub trailer_number: String,
    entries: DayEntries,
    // days of the loaded snapshot keyed to other dates, saved back untouched
    other_days: VisualLogData,
}

/// Per-status hour totals for a day (or a whole trip).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoursSummary {
    pub off_duty: u32,
    pub sleeper_berth: u32,
    pub driving: u32,
    pub on_duty: u32,
}

impl HoursSummary {
    pub fn get(&self, status: DutyStatus) -> u32 {
        match status {
            DutyStatus::OffDuty => self.off_duty,
            DutyStatus::SleeperBerth => self.sleeper_berth,
            DutyStatus::Driving => self.driving,
            DutyStatus::OnDuty => self.on_duty,
        }
    }

    pub fn total(&self) -> u32 {
        self.off_duty + self.sleeper_berth + self.driving + self.on_duty
    }

    pub fn add(&mut self, other: &HoursSummary) {
        self.off_duty += other.off_duty;
        self.sleeper_berth += other.sleeper_berth;
        self.driving += other.driving;
        self.on_duty += other.on_duty;
    }
}

/// Validate a raw hour coming from user input or the projector.
pub fn validate_hour(hour: i32) -> AppResult<u8> {
    if (0..i32::from(HOURS_IN_DAY)).contains(&hour) {
        Ok(hour as u8)
    } else {
        Err(AppError::Validation(format!(
            "hour {} is out of range (expected 0-23)",
            hour
        )))
    }
}

impl DayLogModel {
    pub fn new(id: i64, trip: i64, date: NaiveDate) -> Self {
        Self {
            id,
            trip,
            date,
            status: LogStatus::Generated,
            vehicle_number: String::new(),
            trailer_number: String::new(),
            entries: DayEntries::new(),
            other_days: VisualLogData::new(),
        }
    }

    /// Hydrate from a service record. A non-empty visual snapshot wins;
    /// otherwise the grid is bootstrapped from the coarse status changes.
    pub fn from_record(record: &DayLogRecord) -> Self {
        let mut model = Self::new(record.id, record.trip, record.date);
        model.status = record.status;
        model.vehicle_number = record.vehicle_number.clone();
        model.trailer_number = record.trailer_number.clone();

        if !record.visual_log_data.is_empty() {
            model.load_from(&record.visual_log_data);
        } else {
            model.entries = VisualLogData::from_status_changes(&record.status_changes)
                .remove_day(&record.date)
                .unwrap_or_default();
        }

        model
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    pub fn entries(&self) -> &DayEntries {
        &self.entries
    }

    pub fn entry(&self, hour: u8) -> Option<&DutyStatusEntry> {
        self.entries.get(&hour)
    }

    /// Status occupied at `hour`, falling back to off duty.
    pub fn status_at(&self, hour: u8) -> DutyStatus {
        self.entries
            .get(&hour)
            .map(|e| e.status)
            .unwrap_or(DutyStatus::OffDuty)
    }

    /// Write `entry` into the `hour` slot, replacing whatever was there.
    /// The entry's own `hour` is aligned to the slot.
    pub fn set_entry(&mut self, hour: i32, mut entry: DutyStatusEntry) -> AppResult<()> {
        let slot = validate_hour(hour)?;
        self.status.ensure_editable(&self.date_str())?;

        entry.hour = slot;
        self.entries.insert(slot, entry);
        Ok(())
    }

    /// Remove every entry of the day.
    pub fn clear(&mut self) -> AppResult<()> {
        self.status.ensure_editable(&self.date_str())?;
        self.entries.clear();
        Ok(())
    }

    pub fn total_hours(&self, status: DutyStatus) -> u32 {
        self.entries.values().filter(|e| e.status == status).count() as u32
    }

    pub fn hours_by_status(&self) -> HoursSummary {
        let mut summary = HoursSummary::default();
        for e in self.entries.values() {
            match e.status {
                DutyStatus::OffDuty => summary.off_duty += 1,
                DutyStatus::SleeperBerth => summary.sleeper_berth += 1,
                DutyStatus::Driving => summary.driving += 1,
                DutyStatus::OnDuty => summary.on_duty += 1,
            }
        }
        summary
    }

    /// Replace all entries with this day's slice of `snapshot`.
    /// Hydration is not an edit, so the certification gate is skipped.
    /// Days keyed to other dates are not shown but are kept for `to_snapshot`.
    pub fn load_from(&mut self, snapshot: &VisualLogData) {
        let mut rest = snapshot.clone();
        self.entries = rest.remove_day(&self.date).unwrap_or_default();
        self.other_days = rest;
    }

    /// Overwrite the entry map directly (history replay).
    pub(crate) fn restore_entries(&mut self, entries: DayEntries) {
        self.entries = entries;
    }

    /// The loaded snapshot with this day's slot replaced by the current grid.
    pub fn to_snapshot(&self) -> VisualLogData {
        let mut snap = self.other_days.clone();
        snap.set_day(self.date, self.entries.clone());
        snap
    }
}
