use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::EditorSession;
use crate::errors::AppResult;
use crate::gateway;
use crate::ui::messages::success;

/// Certify from the command line: the stored grid is pushed once more and
/// the log is signed.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Certify { id } = cmd {
        let gw = gateway::connect(cfg)?;
        let record = gw.fetch_log(*id).await?;

        let mut session = EditorSession::open(&record);
        session.certify(gw.as_ref()).await?;

        success(format!(
            "Log #{} for {} certified. It can no longer be edited.",
            id,
            record.date_str()
        ));
    }

    Ok(())
}
