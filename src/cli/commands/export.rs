use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::initialize::open_initialized;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::gateway;
use crate::utils::path::absolute_output;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        trip,
        force,
    } = cmd
    {
        let path = absolute_output(file)
            .ok_or_else(|| AppError::Export(format!("Output file path must be absolute: {file}")))?;

        let gw = gateway::connect(cfg)?;
        let records = gw.fetch_logs(*trip).await?;

        let written = ExportLogic::export(&records, *format, &path, *force)?;

        if written > 0 && gw.backend_name() == "sqlite" {
            let pool = open_initialized(&cfg.database)?;
            ttlog(
                &pool.conn,
                "export",
                format.as_str(),
                &format!("{} row(s) exported to {}", written, path.display()),
            )?;
        }
    }
    Ok(())
}
