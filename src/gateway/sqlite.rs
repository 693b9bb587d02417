//! Local record store backed by the SQLite database.

use super::PersistenceGateway;
use crate::core::generator::{TripDay, planned_changes};
use crate::db::initialize::open_initialized;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_log_sheet, find_log_sheet, insert_log_sheet, insert_status_change, load_log_sheet,
    load_log_sheets, load_log_status, load_trip, set_certified, update_equipment,
    update_visual_data,
};
use crate::errors::{AppError, AppResult};
use crate::models::day_log::DayLogRecord;
use crate::models::snapshot::VisualLogData;
use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use rusqlite::Connection;
use std::sync::{Mutex, MutexGuard};

pub struct SqliteGateway {
    pool: Mutex<DbPool>,
    timeline_template: bool,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl SqliteGateway {
    /// Open (and migrate) the database at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        Ok(Self::from_pool(open_initialized(path)?))
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self {
            pool: Mutex::new(pool),
            timeline_template: false,
        }
    }

    /// Seed newly generated days with the planned duty timeline.
    pub fn with_timeline_template(mut self, enabled: bool) -> Self {
        self.timeline_template = enabled;
        self
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, DbPool>> {
        self.pool
            .lock()
            .map_err(|_| AppError::Other("database connection lock poisoned".into()))
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> AppResult<T>) -> AppResult<T> {
        let pool = self.lock()?;
        f(&pool.conn)
    }

    fn save_blocking(&self, log_id: i64, snapshot: &VisualLogData) -> AppResult<()> {
        let pool = self.lock()?;
        let conn = &pool.conn;
        let target = log_id.to_string();

        let status = load_log_status(conn, log_id)?
            .ok_or_else(|| AppError::NotFound(format!("log {}", log_id)))?;
        status.ensure_editable(&target)?;

        update_visual_data(conn, log_id, snapshot)?;

        let hours: usize = snapshot.days().map(|(_, entries)| entries.len()).sum();
        ttlog(
            conn,
            "save",
            &target,
            &format!("Visual log data saved ({} entries)", hours),
        )?;
        Ok(())
    }

    fn certify_blocking(&self, log_id: i64) -> AppResult<()> {
        let pool = self.lock()?;
        let conn = &pool.conn;
        let target = log_id.to_string();

        let status = load_log_status(conn, log_id)?
            .ok_or_else(|| AppError::NotFound(format!("log {}", log_id)))?;
        status.ensure_certifiable(&target)?;

        set_certified(conn, log_id, Utc::now())?;
        ttlog(conn, "certify", &target, "Log certified")?;
        Ok(())
    }

    fn generate_blocking(
        &self,
        trip_id: i64,
        start_date: NaiveDate,
        vehicle_number: Option<&str>,
        trailer_number: Option<&str>,
    ) -> AppResult<Vec<DayLogRecord>> {
        let mut pool = self.lock()?;
        let vehicle = non_empty(vehicle_number);
        let trailer = non_empty(trailer_number);

        let tx = pool.conn.transaction()?;
        let trip = load_trip(&tx, trip_id)?;
        let days = trip.trip_days();

        let mut ids = Vec::with_capacity(days.min(366) as usize);
        let mut created = 0;
        for i in 0..days {
            let date = start_date
                .checked_add_days(Days::new(u64::from(i)))
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "day {} of trip {} falls after the last supported date",
                        i + 1,
                        trip_id
                    ))
                })?;

            let id = match find_log_sheet(&tx, trip_id, &date)? {
                Some(id) => {
                    update_equipment(&tx, id, vehicle, trailer)?;
                    id
                }
                None => {
                    let id = insert_log_sheet(
                        &tx,
                        trip_id,
                        &date,
                        vehicle.unwrap_or(""),
                        trailer.unwrap_or(""),
                    )?;
                    if self.timeline_template {
                        for change in planned_changes(&trip, date, TripDay::of(i, days)) {
                            insert_status_change(&tx, id, &change)?;
                        }
                    }
                    created += 1;
                    id
                }
            };
            ids.push(id);
        }

        ttlog(
            &tx,
            "generate",
            &trip_id.to_string(),
            &format!(
                "{} day(s) from {} ({} new)",
                days,
                start_date.format("%Y-%m-%d"),
                created
            ),
        )?;
        tx.commit()?;

        let conn = &pool.conn;
        ids.into_iter().map(|id| load_log_sheet(conn, id)).collect()
    }

    fn delete_blocking(&self, log_id: i64) -> AppResult<()> {
        let pool = self.lock()?;
        let conn = &pool.conn;

        if delete_log_sheet(conn, log_id)? == 0 {
            return Err(AppError::NotFound(format!("log {}", log_id)));
        }
        ttlog(conn, "delete", &log_id.to_string(), "Log deleted")?;
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    async fn fetch_logs(&self, trip_id: Option<i64>) -> AppResult<Vec<DayLogRecord>> {
        self.with_conn(|conn| load_log_sheets(conn, trip_id))
    }

    async fn save_visual_data(&self, log_id: i64, snapshot: &VisualLogData) -> AppResult<()> {
        self.save_blocking(log_id, snapshot)
    }

    async fn certify(&self, log_id: i64) -> AppResult<()> {
        self.certify_blocking(log_id)
    }

    async fn generate_logs(
        &self,
        trip_id: i64,
        start_date: NaiveDate,
        vehicle_number: Option<&str>,
        trailer_number: Option<&str>,
    ) -> AppResult<Vec<DayLogRecord>> {
        self.generate_blocking(trip_id, start_date, vehicle_number, trailer_number)
    }

    async fn delete_log(&self, log_id: i64) -> AppResult<()> {
        self.delete_blocking(log_id)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn fetch_log(&self, log_id: i64) -> AppResult<DayLogRecord> {
        self.with_conn(|conn| load_log_sheet(conn, log_id))
    }
}
