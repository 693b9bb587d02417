use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log_set::MultiDayLogSet;
use crate::errors::AppResult;
use crate::gateway;
use crate::models::duty_status::DutyStatus;
use crate::ui::messages::{info, success};
use crate::utils::date::{parse_date, weekday_label};
use crate::utils::table::Table;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Generate {
        trip,
        start,
        vehicle,
        trailer,
        template,
    } = cmd
    {
        let start_date = parse_date(start)?;

        let mut cfg = cfg.clone();
        cfg.timeline_template |= *template;
        let gw = gateway::connect(&cfg)?;

        let mut set = MultiDayLogSet::load(gw.as_ref(), *trip).await?;
        let before = set.len();

        let n = set
            .generate_more(
                gw.as_ref(),
                *trip,
                start_date,
                vehicle.as_deref(),
                trailer.as_deref(),
            )
            .await?;

        success(format!(
            "Generated {} daily log(s) for trip #{} starting {} ({} new).",
            n,
            trip,
            start_date,
            set.len() - before
        ));

        let mut table = Table::with_headers(&["ID", "Date", "Status", "Driving", "On duty"]);
        for day in set.iter() {
            table.add_row(vec![
                day.id.to_string(),
                weekday_label(day.date()),
                day.status.to_db_str().to_string(),
                day.total_hours(DutyStatus::Driving).to_string(),
                day.total_hours(DutyStatus::OnDuty).to_string(),
            ]);
        }
        print!("{}", table.render());
        info(format!("Edit a day with: eldlog edit <ID>  ({} backend)", gw.backend_name()));
    }

    Ok(())
}
