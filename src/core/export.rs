use crate::core::grid::DayLogModel;
use crate::errors::{AppError, AppResult};
use crate::models::day_log::DayLogRecord;
use crate::ui::messages::{success, warning};
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// One grid entry, flattened for CSV.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct EntryExport {
    pub log_id: i64,
    pub trip: i64,
    pub date: String,
    pub log_status: String,
    pub hour: u8,
    pub duty_status: String,
    pub location: String,
    pub remarks: String,
}

/// Flatten records into one row per recorded hour, ordered by date then
/// hour. Days that were never edited contribute their bootstrapped grid.
pub fn entry_rows(records: &[DayLogRecord]) -> Vec<EntryExport> {
    let mut sorted: Vec<&DayLogRecord> = records.iter().collect();
    sorted.sort_by_key(|r| (r.date, r.id));

    let mut rows = Vec::new();
    for record in sorted {
        let model = DayLogModel::from_record(record);
        for (hour, entry) in model.entries() {
            rows.push(EntryExport {
                log_id: record.id,
                trip: record.trip,
                date: record.date_str(),
                log_status: record.status.to_db_str().to_string(),
                hour: *hour,
                duty_status: entry.status.to_db_str().to_string(),
                location: entry.location_str().to_string(),
                remarks: entry.remarks_str().to_string(),
            });
        }
    }
    rows
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export daily logs.
    ///
    /// - `csv`: one row per recorded hour ([`EntryExport`])
    /// - `json`: the full records, snapshot included
    ///
    /// Returns the number of rows (csv) or records (json) written.
    pub fn export(
        records: &[DayLogRecord],
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<usize> {
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {}",
                path.display()
            )));
        }

        if records.is_empty() {
            warning("No logs found for the selected trip. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let written = match format {
            ExportFormat::Csv => export_csv(&entry_rows(records), path)?,
            ExportFormat::Json => export_json(records, path)?,
        };

        success(format!(
            "{} export completed: {}",
            format.as_str().to_uppercase(),
            path.display()
        ));
        Ok(written)
    }
}

/// Check whether the file may be overwritten.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    eprint!(
        "⚠️  File '{}' already exists. Overwrite? [y/N]: ",
        path.display()
    );
    io::stderr().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        Ok(())
    } else {
        Err(AppError::Export(
            "Export cancelled: existing file not overwritten".into(),
        ))
    }
}

fn export_json(records: &[DayLogRecord], path: &Path) -> AppResult<usize> {
    let json_data = serde_json::to_string_pretty(records)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(records.len())
}

fn export_csv(rows: &[EntryExport], path: &Path) -> AppResult<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    if rows.is_empty() {
        // keep a header line even without entries
        wtr.write_record([
            "log_id",
            "trip",
            "date",
            "log_status",
            "hour",
            "duty_status",
            "location",
            "remarks",
        ])
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    Ok(rows.len())
}
