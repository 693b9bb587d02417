use serde::{Deserialize, Serialize};

/// The four mutually exclusive duty states a driver can be in.
/// The declaration order is also the row order of the log grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    OffDuty,      // row 0
    SleeperBerth, // row 1
    Driving,      // row 2
    OnDuty,       // row 3
}

impl DutyStatus {
    pub const ALL: [DutyStatus; 4] = [
        DutyStatus::OffDuty,
        DutyStatus::SleeperBerth,
        DutyStatus::Driving,
        DutyStatus::OnDuty,
    ];

    /// Convert enum → DB / wire string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "off_duty",
            DutyStatus::SleeperBerth => "sleeper_berth",
            DutyStatus::Driving => "driving",
            DutyStatus::OnDuty => "on_duty",
        }
    }

    /// Convert DB / wire string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "off_duty" => Some(DutyStatus::OffDuty),
            "sleeper_berth" => Some(DutyStatus::SleeperBerth),
            "driving" => Some(DutyStatus::Driving),
            "on_duty" => Some(DutyStatus::OnDuty),
            _ => None,
        }
    }

    /// Helper: accept user input from the CLI (case-insensitive, dashes or
    /// underscores, plus the short codes OFF/SB/D/ON).
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "off" => Some(DutyStatus::OffDuty),
            "sb" | "sleeper" => Some(DutyStatus::SleeperBerth),
            "d" | "drive" => Some(DutyStatus::Driving),
            "on" => Some(DutyStatus::OnDuty),
            other => Self::from_db_str(other),
        }
    }

    pub fn row(&self) -> usize {
        match self {
            DutyStatus::OffDuty => 0,
            DutyStatus::SleeperBerth => 1,
            DutyStatus::Driving => 2,
            DutyStatus::OnDuty => 3,
        }
    }

    pub fn from_row(row: usize) -> Option<Self> {
        Self::ALL.get(row).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::SleeperBerth => "Sleeper Berth",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDuty => "On Duty (Not Driving)",
        }
    }

    /// Short label used in the terminal grid.
    pub fn short_label(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::SleeperBerth => "Sleeper",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDuty => "On Duty",
        }
    }
}
