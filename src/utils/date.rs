use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` command-line date; `today` is accepted as well.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// `Mon 2025-03-03`
pub fn weekday_label(d: NaiveDate) -> String {
    d.format("%a %Y-%m-%d").to_string()
}
