//! Planned duty timeline used to seed freshly generated daily logs.
//!
//! The timeline is a simplified HOS day: a first day that starts at the
//! driver's location and picks up the load, middle days with a 30-minute
//! break after eight hours of driving, and a last day ending at the
//! drop-off.

use crate::models::duty_status::DutyStatus;
use crate::models::status_change::StatusChange;
use crate::models::trip::Trip;
use chrono::{DateTime, NaiveDate, Utc};

/// (status, start, end, location, remarks) with times as (hour, minute).
type Slot<'a> = (DutyStatus, (u32, u32), (u32, u32), &'a str, &'a str);

fn at(date: NaiveDate, (h, m): (u32, u32)) -> DateTime<Utc> {
    date.and_hms_opt(h, m, 0)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN))
        .and_utc()
}

/// Which part of the trip a day is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripDay {
    First,
    Middle,
    Last,
}

impl TripDay {
    /// Day `index` (0-based) of a trip lasting `days` days. A one-day trip
    /// is treated as a first day.
    pub fn of(index: u32, days: u32) -> Self {
        if index == 0 {
            TripDay::First
        } else if index + 1 == days {
            TripDay::Last
        } else {
            TripDay::Middle
        }
    }
}

/// Status changes for one generated day.
pub fn planned_changes(trip: &Trip, date: NaiveDate, day: TripDay) -> Vec<StatusChange> {
    let slots: Vec<Slot> = match day {
        TripDay::First => vec![
            (DutyStatus::OffDuty, (0, 0), (8, 0), trip.current_location.as_str(), "Start of day"),
            (DutyStatus::OnDuty, (8, 0), (9, 0), trip.pickup_location.as_str(), "Pickup operations"),
            (DutyStatus::Driving, (9, 0), (17, 0), trip.pickup_location.as_str(), "Driving"),
            (DutyStatus::OffDuty, (17, 0), (23, 59), "Rest Stop", "End of day rest"),
        ],
        TripDay::Middle => vec![
            (DutyStatus::OffDuty, (0, 0), (6, 0), "Rest Stop", "Start of day"),
            (DutyStatus::Driving, (6, 0), (14, 0), "En Route", "Morning driving"),
            (DutyStatus::OnDuty, (14, 0), (14, 30), "Rest Area", "30-minute break"),
            (DutyStatus::Driving, (14, 30), (17, 30), "En Route", "Afternoon driving"),
            (DutyStatus::OffDuty, (17, 30), (23, 59), "Rest Stop", "End of day rest"),
        ],
        TripDay::Last => vec![
            (DutyStatus::OffDuty, (0, 0), (8, 0), "Rest Stop", "Start of day"),
            (DutyStatus::Driving, (8, 0), (12, 0), "En Route", "Driving to destination"),
            (DutyStatus::OnDuty, (12, 0), (13, 0), trip.dropoff_location.as_str(), "Dropoff operations"),
            (DutyStatus::OffDuty, (13, 0), (23, 59), trip.dropoff_location.as_str(), "End of trip"),
        ],
    };

    slots
        .into_iter()
        .map(|(status, start, end, location, remarks)| {
            let start_time = at(date, start);
            let end_time = at(date, end);
            StatusChange {
                id: None,
                status,
                start_time,
                end_time: Some(end_time),
                duration: Some((end_time - start_time).num_minutes() as f64 / 60.0),
                location: location.to_string(),
                remarks: remarks.to_string(),
            }
        })
        .collect()
}
