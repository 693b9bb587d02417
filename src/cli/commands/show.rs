use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::grid::DayLogModel;
use crate::errors::AppResult;
use crate::gateway;
use crate::ui::grid::render_day;
use std::io::IsTerminal;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let gw = gateway::connect(cfg)?;
        let record = gw.fetch_log(*id).await?;
        let model = DayLogModel::from_record(&record);

        print!("{}", render_day(&model, std::io::stdout().is_terminal()));
    }

    Ok(())
}
