/// ANSI color helper utilities for terminal output.
use crate::core::certification::LogStatus;
use crate::models::duty_status::DutyStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Grid line colour per duty status.
pub fn color_for_status(status: DutyStatus) -> &'static str {
    match status {
        DutyStatus::OffDuty => GREY,
        DutyStatus::SleeperBerth => BLUE,
        DutyStatus::Driving => GREEN,
        DutyStatus::OnDuty => YELLOW,
    }
}

pub fn color_for_log_status(status: LogStatus) -> &'static str {
    match status {
        LogStatus::Generated => CYAN,
        LogStatus::Certified => GREEN,
        LogStatus::Submitted => RED,
    }
}

/// Wrap `value` in `color` … RESET.
pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}

/// Grey out empty values (`""` or `-`).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
