//! Terminal rendering of a daily log grid.
//!
//! ```text
//!            0  1  2  3 ...  23   Hrs
//! Off Duty  ██ ██ ·· ·· ...          2
//! Sleeper                             0
//! Driving         ██ ██              2
//! On Duty                             0
//! ```

use crate::core::grid::{DayLogModel, HOURS_IN_DAY};
use crate::models::duty_status::DutyStatus;
use crate::utils::colors::{GREY, color_for_log_status, color_for_status, paint};
use crate::utils::table::pad_right;
use unicode_width::UnicodeWidthStr;

const CELL: &str = "██";
const IMPLICIT: &str = "··";
const REMARKS_WIDTH: usize = 72;

fn label_width() -> usize {
    DutyStatus::ALL
        .iter()
        .map(|s| UnicodeWidthStr::width(s.short_label()))
        .max()
        .unwrap_or(0)
        + 2
}

fn maybe_paint(color: &str, s: &str, use_color: bool) -> String {
    if use_color {
        paint(color, s)
    } else {
        s.to_string()
    }
}

/// Title block: id, date, trip, certification status, equipment.
pub fn render_header(model: &DayLogModel, use_color: bool) -> String {
    let status = model.status.to_db_str();
    let status = maybe_paint(color_for_log_status(model.status), status, use_color);

    let mut out = format!(
        "Log #{}  {}  trip {}  [{}]\n",
        model.id,
        model.date().format("%a %Y-%m-%d"),
        model.trip,
        status
    );

    let vehicle = if model.vehicle_number.is_empty() {
        "-"
    } else {
        model.vehicle_number.as_str()
    };
    let trailer = if model.trailer_number.is_empty() {
        "-"
    } else {
        model.trailer_number.as_str()
    };
    out.push_str(&format!("Vehicle: {}   Trailer: {}\n", vehicle, trailer));
    out
}

/// The 24×4 grid with per-status totals.
pub fn render_grid(model: &DayLogModel, use_color: bool) -> String {
    let lw = label_width();
    let mut out = String::new();

    // Hour ruler
    out.push_str(&" ".repeat(lw));
    for h in 0..HOURS_IN_DAY {
        out.push_str(&format!("{:>2} ", h));
    }
    out.push_str("  Hrs\n");

    let summary = model.hours_by_status();

    for status in DutyStatus::ALL {
        out.push_str(&pad_right(status.short_label(), lw));

        for h in 0..HOURS_IN_DAY {
            let cell = match model.entry(h) {
                Some(e) if e.status == status => {
                    maybe_paint(color_for_status(status), CELL, use_color)
                }
                // unrecorded hours count as off duty in the picture only
                None if status == DutyStatus::OffDuty => maybe_paint(GREY, IMPLICIT, use_color),
                _ => "  ".to_string(),
            };
            out.push_str(&cell);
            out.push(' ');
        }

        out.push_str(&format!("{:>5}\n", summary.get(status)));
    }

    out.push_str(&" ".repeat(lw + usize::from(HOURS_IN_DAY) * 3));
    out.push_str(&format!("{:>5}\n", summary.total()));
    out
}

/// Location / remarks lines, one per recorded hour that carries either.
pub fn render_remarks(model: &DayLogModel) -> String {
    let mut out = String::new();

    for (hour, entry) in model.entries() {
        let location = entry.location_str();
        let remarks = entry.remarks_str();
        if location.is_empty() && remarks.is_empty() {
            continue;
        }

        let text = match (location.is_empty(), remarks.is_empty()) {
            (false, false) => format!("{} - {}", location, remarks),
            (false, true) => location.to_string(),
            _ => remarks.to_string(),
        };

        let prefix = format!("  {:02}:00 {:<9}", hour, entry.status.short_label());
        let indent = " ".repeat(UnicodeWidthStr::width(prefix.as_str()) + 1);
        let options = textwrap::Options::new(REMARKS_WIDTH)
            .initial_indent("")
            .subsequent_indent(&indent);

        out.push_str(&prefix);
        out.push(' ');
        out.push_str(&textwrap::fill(&text, options));
        out.push('\n');
    }

    if out.is_empty() {
        String::new()
    } else {
        format!("Remarks:\n{}", out)
    }
}

/// Header, grid and remarks in one block.
pub fn render_day(model: &DayLogModel, use_color: bool) -> String {
    let mut out = render_header(model, use_color);
    out.push('\n');
    out.push_str(&render_grid(model, use_color));

    let remarks = render_remarks(model);
    if !remarks.is_empty() {
        out.push('\n');
        out.push_str(&remarks);
    }
    out
}
