use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::visible_width;
use ansi_term::Colour;

/// Max visible width of the "operation (target)" column.
const OP_COLUMN_MAX: usize = 60;

/// ANSI colour of an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "trip_add" => Colour::Cyan,
        "generate" => Colour::Green,
        "save" => Colour::Yellow,
        "certify" => Colour::Blue,
        "delete" => Colour::Red,
        "export" => Colour::RGB(102, 204, 255),
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

/// Cut `s` to `max` visible characters, ending with "..." when cut.
fn truncate_visible(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    /// Render the audit rows, one per line.
    pub fn render_log(pool: &DbPool) -> AppResult<Vec<String>> {
        let rows = load_log(&pool.conn)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<(i64, String, String, String, String)> = rows
            .into_iter()
            .map(|(id, raw_date, operation, target, message)| {
                let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(raw_date);

                // single op+target column
                let op_target = if target.is_empty() {
                    operation.clone()
                } else {
                    format!("{operation} ({target})")
                };
                (id, date, operation, op_target, message)
            })
            .collect();

        let op_w = entries
            .iter()
            .map(|(_, _, _, op_target, _)| op_target.chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_COLUMN_MAX);
        let id_w = entries
            .iter()
            .map(|(id, _, _, _, _)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, _, _, _)| date.len())
            .max()
            .unwrap_or(10);

        let mut lines = Vec::with_capacity(entries.len());
        for (id, date, operation, op_target, message) in entries {
            let color = color_for_operation(&operation);

            let visible = truncate_visible(&op_target, OP_COLUMN_MAX);

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(visible_width(&colored)));

            lines.push(format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            ));
        }

        Ok(lines)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let lines = Self::render_log(pool)?;

        println!("📜 Internal log:\n");
        if lines.is_empty() {
            println!("(empty)");
        }
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }
}
