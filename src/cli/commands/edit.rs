//! Line-oriented editing session over stdin.
//!
//! ```text
//! set HOUR STATUS [location] [| remarks]   write one hour
//! click X Y [W H]                          pick a cell on a W×H canvas
//! commit [location] [| remarks]            write the picked cell
//! undo | redo | clear
//! totals | grid | save | certify | help | quit
//! ```
//!
//! Every successful edit is saved right away.

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::grid::{DayLogModel, validate_hour};
use crate::core::history::HistoryStack;
use crate::core::projector::GridBounds;
use crate::core::save_status::SaveIndicator;
use crate::core::session::EditorSession;
use crate::errors::{AppError, AppResult};
use crate::gateway::{self, PersistenceGateway};
use crate::models::duty_status::DutyStatus;
use crate::models::entry::DutyStatusEntry;
use crate::ui::grid::{render_day, render_grid};
use crate::ui::messages::{error, info, save_status, success, warning};
use std::io::{self, BufRead, IsTerminal, Write};
use std::time::{Duration, Instant};

/// Canvas size assumed by `click` when none is given.
const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 400.0;

const HELP: &str = "\
Commands:
  set HOUR STATUS [location] [| remarks]   STATUS: off, sb, d, on
  click X Y [W H]                          pick a cell (default canvas 1200x400)
  commit [location] [| remarks]            write the picked cell
  undo | redo | clear
  totals | grid | save | certify | help | quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    Set {
        hour: i32,
        status: DutyStatus,
        location: Option<String>,
        remarks: Option<String>,
    },
    Click {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Commit {
        location: Option<String>,
        remarks: Option<String>,
    },
    Undo,
    Redo,
    Clear,
    Totals,
    Grid,
    Save,
    Certify,
    Help,
    Quit,
}

/// `location | remarks` → (location, remarks), blanks dropped.
fn split_details(rest: &str) -> (Option<String>, Option<String>) {
    let (loc, rem) = match rest.split_once('|') {
        Some((l, r)) => (l, Some(r)),
        None => (rest, None),
    };
    let clean = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    (clean(loc), rem.and_then(clean))
}

fn parse_number(word: Option<&str>, what: &str) -> AppResult<f64> {
    let w = word.ok_or_else(|| AppError::Validation(format!("missing {}", what)))?;
    w.parse::<f64>()
        .map_err(|_| AppError::Validation(format!("invalid {}: '{}'", what, w)))
}

/// Split off the first whitespace-separated word.
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> AppResult<Option<EditCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = next_word(line);
    let cmd = match verb.to_lowercase().as_str() {
        "set" => {
            let (hour, rest) = next_word(rest);
            let (status, rest) = next_word(rest);
            let hour = hour
                .parse::<i32>()
                .map_err(|_| AppError::Validation(format!("invalid hour: '{}'", hour)))?;
            let status = DutyStatus::from_code(status).ok_or_else(|| {
                AppError::Validation(format!(
                    "unknown duty status '{}' (use off, sb, d or on)",
                    status
                ))
            })?;
            let (location, remarks) = split_details(rest);
            EditCommand::Set {
                hour,
                status,
                location,
                remarks,
            }
        }
        "click" => {
            let mut words = rest.split_whitespace();
            let x = parse_number(words.next(), "x")?;
            let y = parse_number(words.next(), "y")?;
            let (width, height) = match (words.next(), words.next()) {
                (Some(w), Some(h)) => (
                    parse_number(Some(w), "width")?,
                    parse_number(Some(h), "height")?,
                ),
                _ => (DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            };
            EditCommand::Click {
                x,
                y,
                width,
                height,
            }
        }
        "commit" => {
            let (location, remarks) = split_details(rest);
            EditCommand::Commit { location, remarks }
        }
        "undo" => EditCommand::Undo,
        "redo" => EditCommand::Redo,
        "clear" => EditCommand::Clear,
        "totals" => EditCommand::Totals,
        "grid" | "show" => EditCommand::Grid,
        "save" => EditCommand::Save,
        "certify" => EditCommand::Certify,
        "help" | "?" => EditCommand::Help,
        "quit" | "exit" | "q" => EditCommand::Quit,
        other => {
            return Err(AppError::Validation(format!(
                "unknown command '{}' (type 'help')",
                other
            )));
        }
    };
    Ok(Some(cmd))
}

/// Save and report the indicator.
async fn autosave(session: &mut EditorSession, gw: &dyn PersistenceGateway) {
    let result = session.save(gw).await;
    if let Some(label) = session.indicator().label(Instant::now()) {
        save_status(label, result.is_err());
    }
}

fn print_totals(model: &DayLogModel) {
    let h = model.hours_by_status();
    println!(
        "Off duty {}h | Sleeper {}h | Driving {}h | On duty {}h | Total {}h",
        h.off_duty,
        h.sleeper_berth,
        h.driving,
        h.on_duty,
        h.total()
    );
}

/// Apply one command. Returns `false` when the session should end.
async fn apply(
    session: &mut EditorSession,
    gw: &dyn PersistenceGateway,
    cmd: EditCommand,
) -> AppResult<bool> {
    match cmd {
        EditCommand::Set {
            hour,
            status,
            location,
            remarks,
        } => {
            let slot = validate_hour(hour)?;
            let entry = DutyStatusEntry::from_input(
                session.model().date(),
                status,
                slot,
                location.as_deref(),
                remarks.as_deref(),
            );
            session.set_entry(hour, entry)?;
            success(format!("{:02}:00 → {}", slot, status.label()));
            autosave(session, gw).await;
        }
        EditCommand::Click {
            x,
            y,
            width,
            height,
        } => {
            let bounds = GridBounds::standard(0.0, 0.0, width, height);
            match session.pick(x, y, &bounds)? {
                Some(cell) => info(format!(
                    "Selected {:02}:00 {}. Enter: commit [location] [| remarks]",
                    cell.hour,
                    cell.status().label()
                )),
                None => warning("Outside the grid."),
            }
        }
        EditCommand::Commit { location, remarks } => {
            let entry = session.commit_pending(location.as_deref(), remarks.as_deref())?;
            success(format!("{:02}:00 → {}", entry.hour, entry.status.label()));
            autosave(session, gw).await;
        }
        EditCommand::Undo => {
            if session.undo()? {
                success("Undone.");
                autosave(session, gw).await;
            } else {
                info("Nothing to undo.");
            }
        }
        EditCommand::Redo => {
            if session.redo()? {
                success("Redone.");
                autosave(session, gw).await;
            } else {
                info("Nothing to redo.");
            }
        }
        EditCommand::Clear => {
            session.clear()?;
            success("Grid cleared.");
            autosave(session, gw).await;
        }
        EditCommand::Totals => print_totals(session.model()),
        EditCommand::Grid => print!(
            "{}",
            render_grid(session.model(), io::stdout().is_terminal())
        ),
        EditCommand::Save => autosave(session, gw).await,
        EditCommand::Certify => {
            session.certify(gw).await?;
            success(format!(
                "Log for {} certified. It can no longer be edited.",
                session.model().date_str()
            ));
        }
        EditCommand::Help => println!("{}", HELP),
        EditCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Run a session over any line source. Errors on individual lines are
/// reported and the session goes on; the number of failed lines is
/// returned.
pub async fn run_session<R: BufRead>(
    session: &mut EditorSession,
    gw: &dyn PersistenceGateway,
    input: R,
    prompt: bool,
) -> AppResult<usize> {
    let mut failures = 0;

    for line in input.lines() {
        let line = line?;

        let cmd = match parse_command(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                error(e);
                failures += 1;
                continue;
            }
        };

        match apply(session, gw, cmd).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                error(e);
                failures += 1;
            }
        }

        if prompt {
            print!("eldlog> ");
            io::stdout().flush().ok();
        }
    }

    Ok(failures)
}

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { id } = cmd {
        let gw = gateway::connect(cfg)?;
        let record = gw.fetch_log(*id).await?;

        let mut session = EditorSession::with_options(
            DayLogModel::from_record(&record),
            HistoryStack::new(cfg.history_limit),
            SaveIndicator::new(
                Duration::from_millis(cfg.save_ok_clear_ms),
                Duration::from_millis(cfg.save_error_clear_ms),
            ),
        );

        let interactive = io::stdin().is_terminal();
        print!("{}", render_day(session.model(), io::stdout().is_terminal()));
        if !session.model().is_editable() {
            warning(format!(
                "Log #{} is {}: read-only.",
                id,
                session.model().status.to_db_str()
            ));
        }
        if interactive {
            println!("{}", HELP);
            print!("eldlog> ");
            io::stdout().flush().ok();
        }

        let stdin = io::stdin();
        let failures = run_session(&mut session, gw.as_ref(), stdin.lock(), interactive).await?;

        println!();
        print_totals(session.model());
        if failures > 0 {
            warning(format!("{} command(s) failed.", failures));
        }
    }

    Ok(())
}
