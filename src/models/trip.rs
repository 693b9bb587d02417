use serde::{Deserialize, Serialize};

/// Trip as produced by the route planner. Only the fields log generation
/// needs are kept; distance/stop computation lives outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub current_location: String, // ⇔ trips.current_location
    pub pickup_location: String,  // ⇔ trips.pickup_location
    pub dropoff_location: String, // ⇔ trips.dropoff_location
    pub total_trip_time: Option<f64>, // hours, as planned
    pub created_at: String,       // ISO8601
}

/// Upper bound accepted for a trip's planned hours (one year of driving days).
pub const MAX_TRIP_HOURS: f64 = 24.0 * 366.0;

impl Trip {
    /// Number of daily logs the trip spans: one per started 24h block.
    pub fn trip_days(&self) -> u32 {
        let hours = self.total_trip_time.unwrap_or(0.0).max(0.0);
        ((hours / 24.0).floor() as u32).saturating_add(1)
    }
}
