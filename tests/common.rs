#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use eldlog::db::initialize::open_initialized;
use eldlog::db::queries::insert_trip;
use eldlog::models::trip::Trip;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn eld() -> Command {
    cargo_bin_cmd!("eldlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_eldlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB through the CLI (test mode: config file untouched)
pub fn init_db(db_path: &str) {
    eld()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize the DB and add one trip lasting `hours` through the CLI.
/// The trip gets id 1.
pub fn init_db_with_trip(db_path: &str, hours: &str) {
    init_db(db_path);

    eld()
        .args([
            "--db",
            db_path,
            "trip",
            "add",
            "Chicago run",
            "--from",
            "Denver, CO",
            "--pickup",
            "Omaha, NE",
            "--dropoff",
            "Chicago, IL",
            "--hours",
            hours,
        ])
        .assert()
        .success();
}

/// Same as `init_db_with_trip`, then generate the daily logs starting on
/// 2025-03-03 (ids 1..).
pub fn init_db_with_logs(db_path: &str, hours: &str) {
    init_db_with_trip(db_path, hours);

    eld()
        .args([
            "--db",
            db_path,
            "generate",
            "--trip",
            "1",
            "--start",
            "2025-03-03",
            "--vehicle",
            "TRK-1",
        ])
        .assert()
        .success();
}

pub fn sample_trip(hours: Option<f64>) -> Trip {
    Trip {
        id: 0,
        name: "Test trip".to_string(),
        current_location: "Denver, CO".to_string(),
        pickup_location: "Omaha, NE".to_string(),
        dropoff_location: "Chicago, IL".to_string(),
        total_trip_time: hours,
        created_at: String::new(),
    }
}

/// Insert a trip directly through the library and return its id
pub fn seed_trip(db_path: &str, hours: Option<f64>) -> i64 {
    let pool = open_initialized(db_path).expect("open db");
    insert_trip(&pool.conn, &sample_trip(hours)).expect("insert trip")
}
