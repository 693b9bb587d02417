//! Certification lifecycle of a daily log.
//!
//! ```text
//! generated ──certify()──▶ certified ──(server)──▶ submitted
//! ```
//!
//! Only `generated` logs accept edits. `submitted` is reported by the
//! record service and is treated exactly like `certified` on this side.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    #[default]
    Generated,
    Certified,
    Submitted,
}

impl LogStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LogStatus::Generated => "generated",
            LogStatus::Certified => "certified",
            LogStatus::Submitted => "submitted",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "generated" => Some(LogStatus::Generated),
            "certified" => Some(LogStatus::Certified),
            "submitted" => Some(LogStatus::Submitted),
            _ => None,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, LogStatus::Generated)
    }

    /// Gate for `set_entry` / `clear`. `target` names the log in the error.
    pub fn ensure_editable(&self, target: &str) -> AppResult<()> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(AppError::ImmutableLog(target.to_string()))
        }
    }

    /// Check that `certify()` would succeed, without transitioning.
    pub fn ensure_certifiable(&self, target: &str) -> AppResult<()> {
        match self {
            LogStatus::Generated => Ok(()),
            LogStatus::Certified | LogStatus::Submitted => {
                Err(AppError::AlreadyCertified(target.to_string()))
            }
        }
    }

    /// generated → certified. Fails on an already certified/submitted log.
    pub fn certify(&mut self, target: &str) -> AppResult<()> {
        self.ensure_certifiable(target)?;
        *self = LogStatus::Certified;
        Ok(())
    }
}
