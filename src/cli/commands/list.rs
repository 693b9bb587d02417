use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::certification::LogStatus;
use crate::core::grid::DayLogModel;
use crate::core::log_set::MultiDayLogSet;
use crate::errors::{AppError, AppResult};
use crate::gateway;
use crate::models::duty_status::DutyStatus;
use crate::ui::messages::info;
use crate::utils::colors::{color_for_log_status, colorize_optional, paint};
use crate::utils::table::Table;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { trip, status } = cmd {
        let status_filter = match status {
            Some(s) => Some(LogStatus::from_db_str(s).ok_or_else(|| {
                AppError::Validation(format!(
                    "unknown status '{}' (use generated, certified or submitted)",
                    s
                ))
            })?),
            None => None,
        };

        let gw = gateway::connect(cfg)?;
        let records = gw.fetch_logs(*trip).await?;

        let mut set = MultiDayLogSet::new();
        let mut table = Table::with_headers(&[
            "ID", "Date", "Trip", "Status", "Vehicle", "Trailer", "OFF", "SB", "D", "ON",
        ]);

        for r in records
            .iter()
            .filter(|r| status_filter.is_none_or(|s| r.status == s))
        {
            let day = DayLogModel::from_record(r);
            let hours = day.hours_by_status();
            table.add_row(vec![
                day.id.to_string(),
                day.date_str(),
                day.trip.to_string(),
                paint(color_for_log_status(day.status), day.status.to_db_str()),
                colorize_optional(&day.vehicle_number),
                colorize_optional(&day.trailer_number),
                hours.get(DutyStatus::OffDuty).to_string(),
                hours.get(DutyStatus::SleeperBerth).to_string(),
                hours.get(DutyStatus::Driving).to_string(),
                hours.get(DutyStatus::OnDuty).to_string(),
            ]);
            if trip.is_some() {
                set.add(day);
            }
        }

        if table.is_empty() {
            info("No logs found.");
            return Ok(());
        }
        print!("{}", table.render());

        // trip totals only make sense within one trip
        if let Some(t) = trip {
            let total = set.summary();
            println!(
                "\nTrip #{} over {} day(s): driving {}h, on duty {}h, sleeper {}h, off duty {}h",
                t,
                set.len(),
                total.driving,
                total.on_duty,
                total.sleeper_berth,
                total.off_duty
            );
        }
    }

    Ok(())
}
