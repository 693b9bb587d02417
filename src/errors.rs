//! Unified application error type.
//! All modules (core, gateway, db, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing / input validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed log snapshot: {0}")]
    Snapshot(String),

    // ---------------------------
    // Log lifecycle
    // ---------------------------
    #[error("Log for {0} is certified and can no longer be edited")]
    ImmutableLog(String),

    #[error("Log {0} is already certified")]
    AlreadyCertified(String),

    // ---------------------------
    // Remote record store
    // ---------------------------
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error during {op}: {message}")]
    Transport { op: String, message: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Build a transport error naming the failing operation.
    pub fn transport(op: &str, message: impl ToString) -> Self {
        AppError::Transport {
            op: op.to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
