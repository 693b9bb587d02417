use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Run `sql` once, then mark `version` as applied in the `log` table.
fn apply_migration(conn: &Connection, version: &str, description: &str, sql: &str) -> Result<()> {
    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(sql)?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, description],
    )?;

    success(format!("Migration applied: {} → {}", version, description));
    Ok(())
}

/// Check if a column exists on a table.
fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

const CREATE_TRIPS: &str = r#"
    CREATE TABLE IF NOT EXISTS trips (
        id                INTEGER PRIMARY KEY AUTOINCREMENT,
        name              TEXT NOT NULL,
        current_location  TEXT NOT NULL DEFAULT '',
        pickup_location   TEXT NOT NULL DEFAULT '',
        dropoff_location  TEXT NOT NULL DEFAULT '',
        total_trip_time   REAL,
        created_at        TEXT NOT NULL
    );
"#;

const CREATE_LOG_SHEETS: &str = r#"
    CREATE TABLE IF NOT EXISTS log_sheets (
        id               INTEGER PRIMARY KEY AUTOINCREMENT,
        trip_id          INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
        date             TEXT NOT NULL,
        status           TEXT NOT NULL DEFAULT 'generated'
                         CHECK(status IN ('generated','certified','submitted')),
        vehicle_number   TEXT NOT NULL DEFAULT '',
        trailer_number   TEXT NOT NULL DEFAULT '',
        visual_log_data  TEXT NOT NULL DEFAULT '{}',
        created_at       TEXT NOT NULL,
        updated_at       TEXT NOT NULL,
        UNIQUE(trip_id, date)
    );

    CREATE INDEX IF NOT EXISTS idx_log_sheets_trip_date ON log_sheets(trip_id, date);
"#;

const CREATE_STATUS_CHANGES: &str = r#"
    CREATE TABLE IF NOT EXISTS status_changes (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        log_sheet_id  INTEGER NOT NULL REFERENCES log_sheets(id) ON DELETE CASCADE,
        status        TEXT NOT NULL
                      CHECK(status IN ('off_duty','sleeper_berth','driving','on_duty')),
        start_time    TEXT NOT NULL,
        end_time      TEXT,
        duration      REAL,
        location      TEXT NOT NULL DEFAULT '',
        remarks       TEXT NOT NULL DEFAULT ''
    );

    CREATE INDEX IF NOT EXISTS idx_status_changes_sheet ON status_changes(log_sheet_id, start_time);
"#;

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base schema
    apply_migration(conn, "20250301_0001_create_trips", "Created trips table", CREATE_TRIPS)?;
    apply_migration(
        conn,
        "20250301_0002_create_log_sheets",
        "Created log_sheets table",
        CREATE_LOG_SHEETS,
    )?;
    apply_migration(
        conn,
        "20250301_0003_create_status_changes",
        "Created status_changes table",
        CREATE_STATUS_CHANGES,
    )?;

    // 3) Certification timestamp (added after the first release)
    if !has_column(conn, "log_sheets", "certified_at")? {
        apply_migration(
            conn,
            "20250412_0004_add_certified_at",
            "Added certified_at to log_sheets",
            "ALTER TABLE log_sheets ADD COLUMN certified_at TEXT;",
        )?;
    }

    Ok(())
}
