//! Boundary to the remote log-record service.
//!
//! The editor only needs the five operations of [`PersistenceGateway`].
//! Two implementations ship with the crate: [`sqlite::SqliteGateway`]
//! (local record store, used by the CLI by default) and
//! [`http::HttpGateway`] (REST client for the hosted service).

pub mod http;
pub mod sqlite;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::day_log::DayLogRecord;
use crate::models::snapshot::VisualLogData;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::future::Future;

#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// All logs, or only those of `trip_id`.
    async fn fetch_logs(&self, trip_id: Option<i64>) -> AppResult<Vec<DayLogRecord>>;

    /// Overwrite the visual snapshot of a log. Safe to repeat.
    async fn save_visual_data(&self, log_id: i64, snapshot: &VisualLogData) -> AppResult<()>;

    /// Mark a log as certified.
    async fn certify(&self, log_id: i64) -> AppResult<()>;

    /// Create (or reuse) one log per trip day starting at `start_date`.
    async fn generate_logs(
        &self,
        trip_id: i64,
        start_date: NaiveDate,
        vehicle_number: Option<&str>,
        trailer_number: Option<&str>,
    ) -> AppResult<Vec<DayLogRecord>>;

    async fn delete_log(&self, log_id: i64) -> AppResult<()>;

    fn backend_name(&self) -> &'static str;

    /// Single log lookup built on `fetch_logs`.
    async fn fetch_log(&self, log_id: i64) -> AppResult<DayLogRecord> {
        self.fetch_logs(None)
            .await?
            .into_iter()
            .find(|r| r.id == log_id)
            .ok_or_else(|| AppError::NotFound(format!("log {}", log_id)))
    }
}

/// Alternate request forms tried when the service answers "not found"
/// because of a path-style mismatch (e.g. trailing slash handling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestShape {
    Canonical,
    Alternate,
}

/// Run `op` with the canonical request shape; on `NotFound` retry exactly
/// once with the alternate shape. Any other outcome is returned as is.
pub async fn with_shape_fallback<T, F, Fut>(mut op: F) -> AppResult<T>
where
    F: FnMut(RequestShape) -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    match op(RequestShape::Canonical).await {
        Err(e) if e.is_not_found() => op(RequestShape::Alternate).await,
        other => other,
    }
}

/// Build the gateway selected by the configuration.
pub fn connect(cfg: &Config) -> AppResult<Box<dyn PersistenceGateway>> {
    match cfg.backend.as_str() {
        "sqlite" => Ok(Box::new(
            sqlite::SqliteGateway::open(&cfg.database)?.with_timeline_template(cfg.timeline_template),
        )),
        "http" => Ok(Box::new(http::HttpGateway::new(&cfg.api_base_url)?)),
        other => Err(AppError::Config(format!(
            "Unknown backend '{}'. Use 'sqlite' or 'http'.",
            other
        ))),
    }
}
