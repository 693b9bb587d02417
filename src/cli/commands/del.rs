use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::gateway;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let gw = gateway::connect(cfg)?;
        let record = gw.fetch_log(*id).await?;

        let prompt = format!(
            "Delete log #{} ({}, trip #{})? This action is irreversible.",
            id,
            record.date_str(),
            record.trip
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        gw.delete_log(*id).await?;
        success(format!("Log #{} for {} has been deleted.", id, record.date_str()));
    }

    Ok(())
}
