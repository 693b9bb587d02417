use crate::core::grid::{DayLogModel, HoursSummary};
use crate::errors::AppResult;
use crate::gateway::PersistenceGateway;
use crate::models::duty_status::DutyStatus;
use chrono::NaiveDate;

/// Ordered set of daily logs belonging to one trip, ascending by date.
///
/// Dates are unique: adding a day whose date is already present replaces
/// the existing one (the service hands back the existing record when a
/// date is generated twice).
#[derive(Debug, Clone, Default)]
pub struct MultiDayLogSet {
    days: Vec<DayLogModel>,
}

impl MultiDayLogSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the logs of `trip_id` and build the set.
    pub async fn load(gateway: &dyn PersistenceGateway, trip_id: i64) -> AppResult<Self> {
        let records = gateway.fetch_logs(Some(trip_id)).await?;
        let mut set = Self::new();
        for r in &records {
            set.add(DayLogModel::from_record(r));
        }
        Ok(set)
    }

    pub fn add(&mut self, day: DayLogModel) {
        match self.days.binary_search_by_key(&day.date(), |d| d.date()) {
            Ok(pos) => self.days[pos] = day,
            Err(pos) => self.days.insert(pos, day),
        }
    }

    /// Ask the service for more days and merge what it returns.
    /// Nothing is merged if the call fails.
    pub async fn generate_more(
        &mut self,
        gateway: &dyn PersistenceGateway,
        trip_id: i64,
        start_date: NaiveDate,
        vehicle_number: Option<&str>,
        trailer_number: Option<&str>,
    ) -> AppResult<usize> {
        let records = gateway
            .generate_logs(trip_id, start_date, vehicle_number, trailer_number)
            .await?;

        for r in &records {
            self.add(DayLogModel::from_record(r));
        }
        Ok(records.len())
    }

    /// Drop a day from view once the service deleted it.
    pub fn remove(&mut self, log_id: i64) -> Option<DayLogModel> {
        let pos = self.days.iter().position(|d| d.id == log_id)?;
        Some(self.days.remove(pos))
    }

    pub fn totals_across_set(&self, status: DutyStatus) -> u32 {
        self.days.iter().map(|d| d.total_hours(status)).sum()
    }

    pub fn summary(&self) -> HoursSummary {
        let mut total = HoursSummary::default();
        for d in &self.days {
            total.add(&d.hours_by_status());
        }
        total
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayLogModel> {
        self.days
            .binary_search_by_key(&date, |d| d.date())
            .ok()
            .map(|pos| &self.days[pos])
    }

    pub fn get_by_id(&self, log_id: i64) -> Option<&DayLogModel> {
        self.days.iter().find(|d| d.id == log_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayLogModel> {
        self.days.iter()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.date()).collect()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
