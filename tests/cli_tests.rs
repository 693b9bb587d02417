mod common;

use common::{eld, init_db, init_db_with_logs, init_db_with_trip, setup_test_db, temp_out};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

#[test]
fn test_init_creates_database() {
    let db = setup_test_db("cli_init");

    eld()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized at"))
        .stdout(contains("initialization completed"));

    assert!(std::path::Path::new(&db).exists());
}

#[test]
fn test_trip_add_and_list() {
    let db = setup_test_db("cli_trip");
    init_db(&db);

    eld()
        .args(["--db", &db, "trip", "add", "Chicago run", "--from", "Denver, CO", "--hours", "30"])
        .assert()
        .success()
        .stdout(contains("Trip #1 'Chicago run' added: 2 daily log(s)"));

    eld()
        .args(["--db", &db, "trip", "list"])
        .assert()
        .success()
        .stdout(contains("Chicago run"))
        .stdout(contains("Denver, CO"))
        .stdout(contains("30.0"));
}

#[test]
fn test_trip_add_rejects_negative_hours() {
    let db = setup_test_db("cli_trip_bad");
    init_db(&db);

    eld()
        .args(["--db", &db, "trip", "add", "Bad", "--hours=-3"])
        .assert()
        .failure()
        .stderr(contains("non-negative"));
}

#[test]
fn test_trip_add_rejects_absurd_hours() {
    let db = setup_test_db("cli_trip_huge");
    init_db(&db);

    eld()
        .args(["--db", &db, "trip", "add", "Long", "--hours", "1e12"])
        .assert()
        .failure()
        .stderr(contains("must not exceed"));

    eld()
        .args(["--db", &db, "trip", "list"])
        .assert()
        .success()
        .stdout(contains("No trips recorded."));
}

#[test]
fn test_generate_lists_each_day() {
    let db = setup_test_db("cli_generate");
    init_db_with_trip(&db, "30");

    eld()
        .args(["--db", &db, "generate", "--trip", "1", "--start", "2025-03-03"])
        .assert()
        .success()
        .stdout(contains("Generated 2 daily log(s) for trip #1"))
        .stdout(contains("Mon 2025-03-03"))
        .stdout(contains("Tue 2025-03-04"));
}

#[test]
fn test_generate_unknown_trip_fails() {
    let db = setup_test_db("cli_generate_unknown");
    init_db(&db);

    eld()
        .args(["--db", &db, "generate", "--trip", "9", "--start", "2025-03-03"])
        .assert()
        .failure()
        .stderr(contains("trip 9"));
}

#[test]
fn test_generate_rejects_bad_date() {
    let db = setup_test_db("cli_generate_date");
    init_db_with_trip(&db, "10");

    eld()
        .args(["--db", &db, "generate", "--trip", "1", "--start", "03/03/2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn test_edit_over_stdin_then_show() {
    let db = setup_test_db("cli_edit");
    init_db_with_logs(&db, "10");

    eld()
        .args(["--db", &db, "edit", "1"])
        .write_stdin("set 8 d Reno | fuel\nset 9 on\nundo\ntotals\nquit\n")
        .assert()
        .success()
        .stdout(contains("08:00 → Driving"))
        .stdout(contains("Entry saved!"))
        .stdout(contains("Undone."))
        .stdout(contains("Driving 1h | On duty 0h"));

    eld()
        .args(["--db", &db, "show", "1"])
        .assert()
        .success()
        .stdout(contains("Log #1"))
        .stdout(contains("Vehicle: TRK-1"))
        .stdout(contains("Reno - fuel"))
        .stdout(contains("[generated]"));
}

#[test]
fn test_edit_click_and_commit() {
    let db = setup_test_db("cli_edit_click");
    init_db_with_logs(&db, "10");

    // centre of hour 10, on-duty row, on the default 1200x400 canvas
    eld()
        .args(["--db", &db, "edit", "1"])
        .write_stdin("click 528 360\ncommit Yard | pre-trip\nclick 5 5\nquit\n")
        .assert()
        .success()
        .stdout(contains("Selected 10:00 On Duty"))
        .stdout(contains("Outside the grid."))
        .stdout(contains("On duty 1h"));
}

#[test]
fn test_edit_reports_bad_commands_and_continues() {
    let db = setup_test_db("cli_edit_bad");
    init_db_with_logs(&db, "10");

    eld()
        .args(["--db", &db, "edit", "1"])
        .write_stdin("set 24 d\nfly away\nset 3 sb\n")
        .assert()
        .success()
        .stderr(contains("out of range"))
        .stderr(contains("unknown command"))
        .stdout(contains("Sleeper 1h"))
        .stdout(contains("2 command(s) failed."));
}

#[test]
fn test_certify_locks_log() {
    let db = setup_test_db("cli_certify");
    init_db_with_logs(&db, "10");

    eld()
        .args(["--db", &db, "certify", "1"])
        .assert()
        .success()
        .stdout(contains("Log #1 for 2025-03-03 certified"));

    eld()
        .args(["--db", &db, "edit", "1"])
        .write_stdin("set 8 d\nquit\n")
        .assert()
        .success()
        .stdout(contains("read-only"))
        .stderr(contains("can no longer be edited"));

    eld()
        .args(["--db", &db, "show", "1"])
        .assert()
        .success()
        .stdout(contains("[certified]"));

    eld()
        .args(["--db", &db, "certify", "1"])
        .assert()
        .failure()
        .stderr(contains("already certified"));
}

#[test]
fn test_list_filters_by_status() {
    let db = setup_test_db("cli_list");
    init_db_with_logs(&db, "30");

    eld()
        .args(["--db", &db, "certify", "2"])
        .assert()
        .success();

    eld()
        .args(["--db", &db, "list", "--status", "certified"])
        .assert()
        .success()
        .stdout(contains("2025-03-04"))
        .stdout(contains("2025-03-03").not());

    eld()
        .args(["--db", &db, "list", "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("2025-03-03"))
        .stdout(contains("Trip #1 over 2 day(s)"));

    eld()
        .args(["--db", &db, "list", "--status", "bogus"])
        .assert()
        .failure()
        .stderr(contains("unknown status"));
}

#[test]
fn test_list_empty_database() {
    let db = setup_test_db("cli_list_empty");
    init_db(&db);

    eld()
        .args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("No logs found."));
}

#[test]
fn test_show_missing_log_fails() {
    let db = setup_test_db("cli_show_missing");
    init_db(&db);

    eld()
        .args(["--db", &db, "show", "42"])
        .assert()
        .failure()
        .stderr(contains("Not found: log 42"));
}

#[test]
fn test_export_csv_and_json() {
    let db = setup_test_db("cli_export");
    init_db_with_logs(&db, "10");

    eld()
        .args(["--db", &db, "edit", "1"])
        .write_stdin("set 6 d Reno\nset 7 on\n")
        .assert()
        .success();

    let csv_out = temp_out("cli_export", "csv");
    eld()
        .args(["--db", &db, "export", "--format", "csv", "--file", &csv_out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&csv_out).expect("csv written");
    assert!(content.starts_with("log_id,trip,date,log_status,hour,duty_status,location,remarks"));
    assert!(content.contains("1,1,2025-03-03,generated,6,driving,Reno,"));
    assert_eq!(content.lines().count(), 3);

    let json_out = temp_out("cli_export", "json");
    eld()
        .args(["--db", &db, "export", "--format", "json", "--file", &json_out, "--trip", "1"])
        .assert()
        .success()
        .stdout(contains("JSON export completed"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("json written")).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["vehicle_number"], "TRK-1");
    assert_eq!(first["visual_log_data"]["2025-03-03"]["6"]["status"], "driving");
}

#[test]
fn test_export_requires_absolute_path() {
    let db = setup_test_db("cli_export_rel");
    init_db_with_logs(&db, "10");

    eld()
        .args(["--db", &db, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_refuses_overwrite_without_confirmation() {
    let db = setup_test_db("cli_export_overwrite");
    init_db_with_logs(&db, "10");

    let out = temp_out("cli_export_overwrite", "csv");
    fs::write(&out, "keep me").unwrap();

    eld()
        .args(["--db", &db, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    eld()
        .args(["--db", &db, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("log_id"));
}

#[test]
fn test_delete_with_and_without_confirmation() {
    let db = setup_test_db("cli_del");
    init_db_with_logs(&db, "30");

    eld()
        .args(["--db", &db, "del", "1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    eld()
        .args(["--db", &db, "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Log #1 for 2025-03-03 has been deleted."));

    eld()
        .args(["--db", &db, "list"])
        .assert()
        .success()
        .stdout(contains("2025-03-04"))
        .stdout(contains("2025-03-03").not());

    eld()
        .args(["--db", &db, "del", "1", "-y"])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}

#[test]
fn test_internal_log_records_operations() {
    let db = setup_test_db("cli_log");
    init_db_with_logs(&db, "10");

    eld()
        .args(["--db", &db, "certify", "1"])
        .assert()
        .success();

    eld()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("trip_add"))
        .stdout(contains("generate"))
        .stdout(contains("certify"));
}

#[test]
fn test_unknown_backend_is_rejected() {
    let db = setup_test_db("cli_backend");
    init_db(&db);

    eld()
        .args(["--db", &db, "--backend", "bogus", "list"])
        .assert()
        .failure()
        .stderr(contains("Unknown backend"));
}

#[test]
fn test_config_print_shows_settings() {
    let db = setup_test_db("cli_config_print");

    eld()
        .args(["--db", &db, "--test", "config", "--print"])
        .assert()
        .success()
        .stdout(contains("Current configuration"))
        .stdout(contains("database:"))
        .stdout(contains("cli_config_print"))
        .stdout(contains("history_limit:"));
}
