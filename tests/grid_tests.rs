use chrono::{NaiveDate, TimeZone, Utc};
use eldlog::core::certification::LogStatus;
use eldlog::core::grid::{DayLogModel, validate_hour};
use eldlog::core::history::{HistoryAction, HistoryStack};
use eldlog::core::log_set::MultiDayLogSet;
use eldlog::core::projector::{GridBounds, project};
use eldlog::core::save_status::{SaveIndicator, SaveState};
use eldlog::errors::AppError;
use eldlog::models::day_log::DayLogRecord;
use eldlog::models::duty_status::DutyStatus;
use eldlog::models::entry::DutyStatusEntry;
use eldlog::models::snapshot::VisualLogData;
use eldlog::models::status_change::StatusChange;
use serde_json::json;
use std::time::{Duration, Instant};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn model_on(d: u32) -> DayLogModel {
    DayLogModel::new(i64::from(d), 1, day(d))
}

fn entry(status: DutyStatus, hour: u8) -> DutyStatusEntry {
    DutyStatusEntry::new(status, hour)
}

// ---------------------------
// DayLogModel
// ---------------------------

#[test]
fn test_set_entry_overwrites_same_hour() {
    let mut m = model_on(3);
    m.set_entry(5, entry(DutyStatus::Driving, 5)).unwrap();
    m.set_entry(5, entry(DutyStatus::OnDuty, 5)).unwrap();

    assert_eq!(m.entries().len(), 1);
    assert_eq!(m.status_at(5), DutyStatus::OnDuty);
    assert_eq!(m.total_hours(DutyStatus::Driving), 0);
    assert_eq!(m.total_hours(DutyStatus::OnDuty), 1);
}

#[test]
fn test_set_entry_aligns_entry_hour_to_slot() {
    let mut m = model_on(3);
    m.set_entry(7, entry(DutyStatus::Driving, 2)).unwrap();

    assert_eq!(m.entry(7).unwrap().hour, 7);
    assert!(m.entry(2).is_none());
}

#[test]
fn test_set_entry_rejects_out_of_range_hours() {
    let mut m = model_on(3);

    for bad in [-1, 24, 100] {
        let err = m.set_entry(bad, entry(DutyStatus::Driving, 0)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "hour {bad}: {err}");
    }
    assert!(m.entries().is_empty());

    assert_eq!(validate_hour(0).unwrap(), 0);
    assert_eq!(validate_hour(23).unwrap(), 23);
}

#[test]
fn test_unrecorded_hours_are_off_duty_but_not_counted() {
    let m = model_on(3);
    assert_eq!(m.status_at(12), DutyStatus::OffDuty);
    assert_eq!(m.total_hours(DutyStatus::OffDuty), 0);
}

#[test]
fn test_totals_per_status() {
    let mut m = model_on(3);
    for h in 6..9 {
        m.set_entry(h, entry(DutyStatus::Driving, 0)).unwrap();
    }
    m.set_entry(9, entry(DutyStatus::OnDuty, 0)).unwrap();
    m.set_entry(10, entry(DutyStatus::OnDuty, 0)).unwrap();
    m.set_entry(22, entry(DutyStatus::SleeperBerth, 0)).unwrap();

    let summary = m.hours_by_status();
    assert_eq!(summary.driving, 3);
    assert_eq!(summary.on_duty, 2);
    assert_eq!(summary.sleeper_berth, 1);
    assert_eq!(summary.off_duty, 0);
    assert_eq!(summary.total(), 6);
    assert_eq!(m.total_hours(DutyStatus::Driving), summary.driving);
}

#[test]
fn test_certified_log_rejects_edits() {
    let mut m = model_on(3);
    m.set_entry(1, entry(DutyStatus::Driving, 1)).unwrap();
    m.status = LogStatus::Certified;

    let err = m.set_entry(2, entry(DutyStatus::Driving, 2)).unwrap_err();
    assert!(matches!(err, AppError::ImmutableLog(_)));

    let err = m.clear().unwrap_err();
    assert!(matches!(err, AppError::ImmutableLog(_)));

    assert_eq!(m.entries().len(), 1);
    assert!(!m.is_editable());
}

#[test]
fn test_clear_removes_everything() {
    let mut m = model_on(3);
    m.set_entry(1, entry(DutyStatus::Driving, 1)).unwrap();
    m.set_entry(2, entry(DutyStatus::OnDuty, 2)).unwrap();
    m.clear().unwrap();
    assert!(m.entries().is_empty());
}

// ---------------------------
// Snapshot
// ---------------------------

#[test]
fn test_snapshot_survives_json_round_trip() {
    let mut m = model_on(3);
    let e = DutyStatusEntry::from_input(
        day(3),
        DutyStatus::Driving,
        9,
        Some("Omaha, NE"),
        Some("I-80 east"),
    );
    m.set_entry(9, e).unwrap();
    m.set_entry(14, entry(DutyStatus::OnDuty, 14)).unwrap();

    let json = m.to_snapshot().to_json().unwrap();
    assert_eq!(json["2025-03-03"]["9"]["status"], "driving");
    assert_eq!(json["2025-03-03"]["9"]["location"], "Omaha, NE");

    let parsed = VisualLogData::from_json(json).unwrap();
    let mut other = model_on(3);
    other.load_from(&parsed);
    assert_eq!(other.entries(), m.entries());
}

#[test]
fn test_load_from_hides_other_dates_but_saves_them_back() {
    let mut snap = VisualLogData::new();
    let mut entries = std::collections::BTreeMap::new();
    entries.insert(4, entry(DutyStatus::Driving, 4));
    snap.set_day(day(4), entries);

    let mut m = model_on(3);
    m.load_from(&snap);
    assert!(m.entries().is_empty());

    m.set_entry(6, entry(DutyStatus::OnDuty, 6)).unwrap();
    let out = m.to_snapshot();
    assert_eq!(out.day(&day(4)), snap.day(&day(4)));
    assert_eq!(out.day(&day(3)).unwrap()[&6].status, DutyStatus::OnDuty);
}

#[test]
fn test_edit_keeps_legacy_day_of_previous_date() {
    // older clients west of UTC keyed 2024-01-01 as the day before
    let snap = VisualLogData::from_json(json!({
        "Sun Dec 31 2023": { "9": { "status": "driving" } }
    }))
    .unwrap();
    let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dec31 = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

    let mut m = DayLogModel::new(1, 1, jan1);
    m.load_from(&snap);
    m.set_entry(3, entry(DutyStatus::OnDuty, 3)).unwrap();
    m.clear().unwrap();
    m.set_entry(3, entry(DutyStatus::OnDuty, 3)).unwrap();

    let out = m.to_snapshot().to_json().unwrap();
    assert_eq!(out["2023-12-31"]["9"]["status"], "driving");
    assert_eq!(out["2024-01-01"]["3"]["status"], "on_duty");
    assert_eq!(m.to_snapshot().day(&dec31), snap.day(&dec31));
}

#[test]
fn test_to_json_emits_wire_shape() {
    let mut m = model_on(3);
    m.set_entry(0, entry(DutyStatus::SleeperBerth, 0)).unwrap();

    let out = m.to_snapshot().to_json().unwrap();
    assert!(out.is_object());
    assert_eq!(out["2025-03-03"]["0"]["status"], "sleeper_berth");
    assert!(VisualLogData::new().to_json().unwrap().as_object().unwrap().is_empty());
}

#[test]
fn test_snapshot_accepts_legacy_date_keys() {
    let snap = VisualLogData::from_json(json!({
        "Mon Mar 03 2025": { "7": { "status": "driving", "location": "Reno" } }
    }))
    .unwrap();

    let entries = snap.day(&day(3)).unwrap();
    assert_eq!(entries[&7].status, DutyStatus::Driving);
    assert_eq!(entries[&7].location_str(), "Reno");

    // always written back with ISO keys
    let out = snap.to_json().unwrap();
    assert!(out.get("2025-03-03").is_some());
}

#[test]
fn test_snapshot_rejects_malformed_keys_and_statuses() {
    let bad = [
        json!({ "2025-03-03": { "24": { "status": "driving" } } }),
        json!({ "2025-03-03": { "noon": { "status": "driving" } } }),
        json!({ "2025-03-03": { "5": { "status": "napping" } } }),
        json!({ "yesterday": { "5": { "status": "driving" } } }),
        json!([1, 2, 3]),
    ];
    for value in bad {
        assert!(VisualLogData::from_json(value.clone()).is_err(), "{value}");
    }
}

#[test]
fn test_null_and_empty_snapshots_are_empty() {
    assert!(VisualLogData::from_json(serde_json::Value::Null).unwrap().is_empty());
    assert!(VisualLogData::from_json(json!({})).unwrap().is_empty());
    assert!(
        VisualLogData::from_json(json!({ "2025-03-03": {} }))
            .unwrap()
            .is_empty()
    );
}

fn change(status: DutyStatus, h: u32, m: u32, location: &str) -> StatusChange {
    StatusChange {
        id: None,
        status,
        start_time: Utc.with_ymd_and_hms(2025, 3, 3, h, m, 0).unwrap(),
        end_time: None,
        duration: None,
        location: location.to_string(),
        remarks: String::new(),
    }
}

fn record_with(visual: VisualLogData, changes: Vec<StatusChange>) -> DayLogRecord {
    DayLogRecord {
        id: 7,
        trip: 1,
        date: day(3),
        status: LogStatus::Generated,
        vehicle_number: "TRK-1".to_string(),
        trailer_number: String::new(),
        visual_log_data: visual,
        status_changes: changes,
        certified_at: None,
    }
}

#[test]
fn test_grid_bootstraps_from_status_changes() {
    let record = record_with(
        VisualLogData::new(),
        vec![
            change(DutyStatus::OffDuty, 0, 0, "Denver, CO"),
            change(DutyStatus::OnDuty, 8, 0, "Omaha, NE"),
            change(DutyStatus::Driving, 9, 0, "Omaha, NE"),
            // same hour as the previous one: the later change wins
            change(DutyStatus::OnDuty, 9, 30, "Rest Area"),
        ],
    );

    let m = DayLogModel::from_record(&record);
    assert_eq!(m.entries().len(), 3);
    assert_eq!(m.status_at(8), DutyStatus::OnDuty);
    assert_eq!(m.status_at(9), DutyStatus::OnDuty);
    assert_eq!(m.entry(9).unwrap().location_str(), "Rest Area");
    assert!(m.entry(0).unwrap().remarks.is_none());
}

#[test]
fn test_visual_snapshot_wins_over_status_changes() {
    let mut entries = std::collections::BTreeMap::new();
    entries.insert(15, entry(DutyStatus::SleeperBerth, 15));
    let record = record_with(
        VisualLogData::single_day(day(3), entries),
        vec![change(DutyStatus::Driving, 9, 0, "Omaha, NE")],
    );

    let m = DayLogModel::from_record(&record);
    assert_eq!(m.entries().len(), 1);
    assert_eq!(m.status_at(15), DutyStatus::SleeperBerth);
    assert_eq!(m.vehicle_number, "TRK-1");
}

// ---------------------------
// Projector
// ---------------------------

#[test]
fn test_project_standard_canvas() {
    // label column 48 wide, header row 80 high, cells 48 x 80
    let b = GridBounds::standard(0.0, 0.0, 1200.0, 400.0);
    assert_eq!(b.label_width, 48.0);
    assert_eq!(b.header_height, 80.0);

    let c = project(48.0, 80.0, &b).unwrap();
    assert_eq!((c.hour, c.status_row), (0, 0));
    assert_eq!(c.status(), DutyStatus::OffDuty);

    let c = project(1199.9, 399.9, &b).unwrap();
    assert_eq!((c.hour, c.status_row), (23, 3));
    assert_eq!(c.status(), DutyStatus::OnDuty);

    let c = project(48.0 * 10.0 + 1.0, 80.0 * 3.0 + 1.0, &b).unwrap();
    assert_eq!((c.hour, c.status()), (9, DutyStatus::Driving));
}

#[test]
fn test_project_outside_grid_is_none() {
    let b = GridBounds::standard(0.0, 0.0, 1200.0, 400.0);

    assert!(project(47.9, 200.0, &b).is_none()); // label column
    assert!(project(600.0, 79.9, &b).is_none()); // header row
    assert!(project(1200.0, 200.0, &b).is_none()); // right edge
    assert!(project(600.0, 400.0, &b).is_none()); // bottom edge
    assert!(project(-5.0, -5.0, &b).is_none());
    assert!(project(f64::NAN, 200.0, &b).is_none());
    assert!(project(600.0, f64::INFINITY, &b).is_none());

    let flat = GridBounds::standard(0.0, 0.0, 0.0, 400.0);
    assert!(project(0.0, 200.0, &flat).is_none());
}

#[test]
fn test_cell_centers_project_back_to_their_cell() {
    let b = GridBounds::standard(15.0, 30.0, 960.0, 250.0);

    for hour in 0..24u8 {
        for status in DutyStatus::ALL {
            let row = status.row() as u8;
            let (x, y) = b.cell_center(hour, row);
            let c = project(x, y, &b).unwrap();
            assert_eq!((c.hour, c.status()), (hour, status));
        }
    }
}

// ---------------------------
// HistoryStack
// ---------------------------

#[test]
fn test_history_undo_redo_cursor() {
    let mut h = HistoryStack::new(10);
    assert!(!h.can_undo());
    assert!(!h.can_redo());

    h.record(HistoryAction::Add(entry(DutyStatus::Driving, 1)));
    h.record(HistoryAction::Add(entry(DutyStatus::Driving, 2)));
    assert_eq!(h.cursor(), Some(1));
    assert_eq!(h.applied().len(), 2);

    assert!(h.undo().is_some());
    assert!(h.undo().is_some());
    assert_eq!(h.cursor(), None);
    assert!(h.undo().is_none());
    assert!(h.applied().is_empty());

    assert!(h.redo().is_some());
    assert_eq!(h.applied().len(), 1);
    assert!(h.can_redo());
}

#[test]
fn test_history_new_action_drops_redo_branch() {
    let mut h = HistoryStack::new(10);
    h.record(HistoryAction::Add(entry(DutyStatus::Driving, 1)));
    h.record(HistoryAction::Add(entry(DutyStatus::Driving, 2)));
    h.undo();

    h.record(HistoryAction::Clear);
    assert!(!h.can_redo());
    assert_eq!(h.len(), 2);
    assert_eq!(h.applied().last(), Some(&HistoryAction::Clear));
}

#[test]
fn test_history_evicts_oldest_over_limit() {
    let mut h = HistoryStack::new(2);
    assert!(h.record(HistoryAction::Add(entry(DutyStatus::Driving, 1))).is_none());
    assert!(h.record(HistoryAction::Add(entry(DutyStatus::Driving, 2))).is_none());

    let evicted = h.record(HistoryAction::Add(entry(DutyStatus::Driving, 3)));
    assert_eq!(
        evicted,
        Some(HistoryAction::Add(entry(DutyStatus::Driving, 1)))
    );
    assert_eq!(h.len(), 2);
    assert_eq!(h.limit(), 2);
}

// ---------------------------
// Certification
// ---------------------------

#[test]
fn test_certification_lifecycle() {
    let mut s = LogStatus::default();
    assert_eq!(s, LogStatus::Generated);
    assert!(s.is_editable());

    s.certify("2025-03-03").unwrap();
    assert_eq!(s, LogStatus::Certified);
    assert!(!s.is_editable());

    let err = s.certify("2025-03-03").unwrap_err();
    assert!(matches!(err, AppError::AlreadyCertified(_)));
    assert_eq!(s, LogStatus::Certified);

    let mut submitted = LogStatus::Submitted;
    assert!(submitted.ensure_editable("x").is_err());
    assert!(matches!(
        submitted.certify("x").unwrap_err(),
        AppError::AlreadyCertified(_)
    ));
}

#[test]
fn test_log_status_db_strings() {
    for s in [LogStatus::Generated, LogStatus::Certified, LogStatus::Submitted] {
        assert_eq!(LogStatus::from_db_str(s.to_db_str()), Some(s));
    }
    assert_eq!(LogStatus::from_db_str(" Certified "), Some(LogStatus::Certified));
    assert_eq!(LogStatus::from_db_str("signed"), None);
}

// ---------------------------
// Save indicator
// ---------------------------

#[test]
fn test_save_indicator_clears_after_delays() {
    let t0 = Instant::now();
    let mut ind = SaveIndicator::default();
    assert_eq!(ind.current(t0), SaveState::Idle);
    assert!(ind.label(t0).is_none());

    ind.start(t0);
    assert_eq!(ind.label(t0).as_deref(), Some("Saving..."));

    ind.succeed(t0);
    assert_eq!(ind.label(t0 + Duration::from_millis(1999)).as_deref(), Some("Entry saved!"));
    assert_eq!(ind.current(t0 + Duration::from_millis(2000)), SaveState::Idle);

    ind.fail(t0, "HTTP 500");
    assert_eq!(
        ind.current(t0 + Duration::from_millis(2500)),
        SaveState::Failed("HTTP 500".to_string())
    );
    assert_eq!(ind.current(t0 + Duration::from_millis(3000)), SaveState::Idle);
}

#[test]
fn test_saving_state_does_not_clear() {
    let t0 = Instant::now();
    let mut ind = SaveIndicator::new(Duration::from_millis(10), Duration::from_millis(10));
    ind.start(t0);
    assert_eq!(ind.current(t0 + Duration::from_secs(60)), SaveState::Saving);
}

// ---------------------------
// MultiDayLogSet
// ---------------------------

#[test]
fn test_log_set_keeps_dates_ordered_and_unique() {
    let mut set = MultiDayLogSet::new();
    set.add(model_on(5));
    set.add(model_on(3));
    set.add(model_on(4));
    assert_eq!(set.dates(), vec![day(3), day(4), day(5)]);

    let mut replacement = DayLogModel::new(99, 1, day(4));
    replacement.set_entry(1, entry(DutyStatus::Driving, 1)).unwrap();
    set.add(replacement);

    assert_eq!(set.len(), 3);
    assert_eq!(set.get(day(4)).unwrap().id, 99);
}

#[test]
fn test_log_set_totals_across_days() {
    let mut set = MultiDayLogSet::new();
    for d in 3..6 {
        let mut m = model_on(d);
        m.set_entry(8, entry(DutyStatus::Driving, 8)).unwrap();
        m.set_entry(9, entry(DutyStatus::Driving, 9)).unwrap();
        m.set_entry(12, entry(DutyStatus::OnDuty, 12)).unwrap();
        set.add(m);
    }

    assert_eq!(set.totals_across_set(DutyStatus::Driving), 6);
    assert_eq!(set.totals_across_set(DutyStatus::OnDuty), 3);
    assert_eq!(set.summary().total(), 9);

    assert!(set.remove(4).is_some());
    assert_eq!(set.totals_across_set(DutyStatus::Driving), 4);
    assert!(set.get_by_id(4).is_none());
}
