use crate::cli::parser::{Commands, TripAction};
use crate::config::Config;
use crate::db::initialize::open_initialized;
use crate::db::log::ttlog;
use crate::db::queries::{insert_trip, list_trips};
use crate::errors::{AppError, AppResult};
use crate::models::trip::{MAX_TRIP_HOURS, Trip};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_optional;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Trip { action } = cmd {
        let pool = open_initialized(&cfg.database)?;

        match action {
            TripAction::Add {
                name,
                current,
                pickup,
                dropoff,
                hours,
            } => {
                if name.trim().is_empty() {
                    return Err(AppError::Validation("trip name must not be empty".into()));
                }
                if let Some(h) = hours
                    && (!h.is_finite() || *h < 0.0)
                {
                    return Err(AppError::Validation(format!(
                        "trip hours must be a non-negative number (got {})",
                        h
                    )));
                }
                if let Some(h) = hours
                    && *h > MAX_TRIP_HOURS
                {
                    return Err(AppError::Validation(format!(
                        "trip hours must not exceed {} (got {})",
                        MAX_TRIP_HOURS, h
                    )));
                }

                let trip = Trip {
                    id: 0,
                    name: name.trim().to_string(),
                    current_location: current.trim().to_string(),
                    pickup_location: pickup.trim().to_string(),
                    dropoff_location: dropoff.trim().to_string(),
                    total_trip_time: *hours,
                    created_at: String::new(),
                };

                let id = insert_trip(&pool.conn, &trip)?;
                ttlog(
                    &pool.conn,
                    "trip_add",
                    &id.to_string(),
                    &format!("Trip '{}' added ({} day(s))", trip.name, trip.trip_days()),
                )?;
                success(format!(
                    "Trip #{} '{}' added: {} daily log(s) when generated.",
                    id,
                    trip.name,
                    trip.trip_days()
                ));
            }

            TripAction::List => {
                let trips = list_trips(&pool.conn)?;
                if trips.is_empty() {
                    info("No trips recorded.");
                    return Ok(());
                }

                let mut table =
                    Table::with_headers(&["ID", "Name", "From", "Pickup", "Dropoff", "Hours", "Days"]);
                for t in &trips {
                    let hours = t
                        .total_trip_time
                        .map(|h| format!("{:.1}", h))
                        .unwrap_or_else(|| "-".to_string());
                    table.add_row(vec![
                        t.id.to_string(),
                        t.name.clone(),
                        colorize_optional(&t.current_location),
                        colorize_optional(&t.pickup_location),
                        colorize_optional(&t.dropoff_location),
                        colorize_optional(&hours),
                        t.trip_days().to_string(),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
