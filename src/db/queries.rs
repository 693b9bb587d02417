use crate::core::certification::LogStatus;
use crate::errors::{AppError, AppResult};
use crate::models::day_log::DayLogRecord;
use crate::models::duty_status::DutyStatus;
use crate::models::snapshot::VisualLogData;
use crate::models::status_change::StatusChange;
use crate::models::trip::Trip;
use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Wrap a parse failure into a rusqlite conversion error, keeping the
/// AppError as the source.
fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_utc(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(AppError::InvalidDate(s.to_string())))
}

// ---------------------------
// Trips
// ---------------------------

pub fn map_trip(row: &Row) -> Result<Trip> {
    Ok(Trip {
        id: row.get("id")?,
        name: row.get("name")?,
        current_location: row.get("current_location")?,
        pickup_location: row.get("pickup_location")?,
        dropoff_location: row.get("dropoff_location")?,
        total_trip_time: row.get("total_trip_time")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a trip and return its new id. `trip.id` is ignored.
pub fn insert_trip(conn: &Connection, trip: &Trip) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO trips (name, current_location, pickup_location, dropoff_location, total_trip_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            trip.name,
            trip.current_location,
            trip.pickup_location,
            trip.dropoff_location,
            trip.total_trip_time,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_trip(conn: &Connection, id: i64) -> AppResult<Trip> {
    conn.query_row("SELECT * FROM trips WHERE id = ?1", [id], map_trip)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("trip {}", id)))
}

pub fn list_trips(conn: &Connection) -> AppResult<Vec<Trip>> {
    let mut stmt = conn.prepare("SELECT * FROM trips ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_trip)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Log sheets
// ---------------------------

pub fn find_log_sheet(conn: &Connection, trip_id: i64, date: &NaiveDate) -> AppResult<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM log_sheets WHERE trip_id = ?1 AND date = ?2",
            params![trip_id, date.format("%Y-%m-%d").to_string()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn insert_log_sheet(
    conn: &Connection,
    trip_id: i64,
    date: &NaiveDate,
    vehicle_number: &str,
    trailer_number: &str,
) -> AppResult<i64> {
    let now = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO log_sheets (trip_id, date, status, vehicle_number, trailer_number, visual_log_data, created_at, updated_at)
         VALUES (?1, ?2, 'generated', ?3, ?4, '{}', ?5, ?5)",
        params![
            trip_id,
            date.format("%Y-%m-%d").to_string(),
            vehicle_number,
            trailer_number,
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update vehicle and/or trailer number; `None` leaves the column untouched.
pub fn update_equipment(
    conn: &Connection,
    id: i64,
    vehicle_number: Option<&str>,
    trailer_number: Option<&str>,
) -> AppResult<()> {
    let now = Local::now().to_rfc3339();
    if let Some(v) = vehicle_number {
        conn.execute(
            "UPDATE log_sheets SET vehicle_number = ?1, updated_at = ?2 WHERE id = ?3",
            params![v, now, id],
        )?;
    }
    if let Some(t) = trailer_number {
        conn.execute(
            "UPDATE log_sheets SET trailer_number = ?1, updated_at = ?2 WHERE id = ?3",
            params![t, now, id],
        )?;
    }
    Ok(())
}

pub fn load_log_status(conn: &Connection, id: i64) -> AppResult<Option<LogStatus>> {
    let raw: Option<String> = conn
        .query_row("SELECT status FROM log_sheets WHERE id = ?1", [id], |row| {
            row.get(0)
        })
        .optional()?;

    match raw {
        None => Ok(None),
        Some(s) => LogStatus::from_db_str(&s)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Invalid log status: {}", s))),
    }
}

/// Map a `log_sheets` row; status changes are attached separately.
pub fn map_log_sheet(row: &Row) -> Result<DayLogRecord> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_str.clone())))?;

    let status_str: String = row.get("status")?;
    let status = LogStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(AppError::Validation(format!(
            "Invalid log status: {}",
            status_str
        )))
    })?;

    let raw_visual: String = row.get("visual_log_data")?;
    let json: serde_json::Value = serde_json::from_str(&raw_visual)
        .map_err(|e| conversion_error(AppError::Snapshot(e.to_string())))?;
    let visual_log_data =
        VisualLogData::from_json(json).map_err(|e| conversion_error(AppError::Snapshot(e)))?;

    let certified_at: Option<String> = row.get("certified_at")?;
    let certified_at = certified_at.as_deref().map(parse_utc).transpose()?;

    Ok(DayLogRecord {
        id: row.get("id")?,
        trip: row.get("trip_id")?,
        date,
        status,
        vehicle_number: row.get("vehicle_number")?,
        trailer_number: row.get("trailer_number")?,
        visual_log_data,
        status_changes: Vec::new(),
        certified_at,
    })
}

pub fn load_log_sheet(conn: &Connection, id: i64) -> AppResult<DayLogRecord> {
    let mut record = conn
        .query_row("SELECT * FROM log_sheets WHERE id = ?1", [id], map_log_sheet)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("log {}", id)))?;

    record.status_changes = load_status_changes(conn, id)?;
    Ok(record)
}

/// All log sheets (optionally of one trip), ascending by date.
pub fn load_log_sheets(conn: &Connection, trip_id: Option<i64>) -> AppResult<Vec<DayLogRecord>> {
    let mut records = Vec::new();
    {
        let (sql, args): (&str, Vec<i64>) = match trip_id {
            Some(t) => (
                "SELECT * FROM log_sheets WHERE trip_id = ?1 ORDER BY date ASC, id ASC",
                vec![t],
            ),
            None => ("SELECT * FROM log_sheets ORDER BY date ASC, id ASC", vec![]),
        };

        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(args), map_log_sheet)?;
        for r in rows {
            records.push(r?);
        }
    }

    for record in records.iter_mut() {
        record.status_changes = load_status_changes(conn, record.id)?;
    }
    Ok(records)
}

pub fn update_visual_data(conn: &Connection, id: i64, snapshot: &VisualLogData) -> AppResult<usize> {
    let json = serde_json::to_string(&snapshot.to_json()?)
        .map_err(|e| AppError::Snapshot(e.to_string()))?;

    let n = conn.execute(
        "UPDATE log_sheets SET visual_log_data = ?1, updated_at = ?2 WHERE id = ?3",
        params![json, Local::now().to_rfc3339(), id],
    )?;
    Ok(n)
}

pub fn set_certified(conn: &Connection, id: i64, at: DateTime<Utc>) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE log_sheets SET status = 'certified', certified_at = ?1, updated_at = ?2 WHERE id = ?3",
        params![at.to_rfc3339(), Local::now().to_rfc3339(), id],
    )?;
    Ok(n)
}

pub fn delete_log_sheet(conn: &Connection, id: i64) -> AppResult<usize> {
    conn.execute("DELETE FROM status_changes WHERE log_sheet_id = ?1", [id])?;
    let n = conn.execute("DELETE FROM log_sheets WHERE id = ?1", [id])?;
    Ok(n)
}

// ---------------------------
// Status changes
// ---------------------------

pub fn map_status_change(row: &Row) -> Result<StatusChange> {
    let status_str: String = row.get("status")?;
    let status = DutyStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(AppError::Validation(format!(
            "Invalid duty status: {}",
            status_str
        )))
    })?;

    let start: String = row.get("start_time")?;
    let end: Option<String> = row.get("end_time")?;

    Ok(StatusChange {
        id: row.get("id")?,
        status,
        start_time: parse_utc(&start)?,
        end_time: end.as_deref().map(parse_utc).transpose()?,
        duration: row.get("duration")?,
        location: row.get("location")?,
        remarks: row.get("remarks")?,
    })
}

pub fn insert_status_change(conn: &Connection, log_sheet_id: i64, change: &StatusChange) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO status_changes (log_sheet_id, status, start_time, end_time, duration, location, remarks)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log_sheet_id,
            change.status.to_db_str(),
            change.start_time.to_rfc3339(),
            change.end_time.map(|t| t.to_rfc3339()),
            change.duration,
            change.location,
            change.remarks,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_status_changes(conn: &Connection, log_sheet_id: i64) -> AppResult<Vec<StatusChange>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM status_changes WHERE log_sheet_id = ?1 ORDER BY start_time ASC, id ASC",
    )?;
    let rows = stmt.query_map([log_sheet_id], map_status_change)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
