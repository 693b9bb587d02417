//! REST client for the hosted log-record service.
//!
//! Routes (relative to `api_base_url`):
//!
//! ```text
//! GET    logs/                          list (array or paged {results})
//! PUT    logs/{id}/update_visual_data/  {visual_log_data}
//! POST   logs/{id}/certify/
//! POST   logs/generate/                 {trip_id, start_date, vehicle_number?, trailer_number?}
//! DELETE logs/{id}/
//! ```
//!
//! Some deployments do not route the trailing-slash form; every call is
//! retried once without it when the first attempt answers 404.

use super::{PersistenceGateway, RequestShape, with_shape_fallback};
use crate::core::certification::LogStatus;
use crate::errors::{AppError, AppResult};
use crate::models::day_log::DayLogRecord;
use crate::models::snapshot::VisualLogData;
use crate::models::status_change::StatusChange;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

/// Longest slice of an error body kept in a transport error.
const MAX_BODY_IN_ERROR: usize = 200;

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

/// Log record as serialized by the service. `visual_log_data` may be
/// `null`, `{}` or a full snapshot.
#[derive(Debug, Deserialize)]
struct WireLogRecord {
    id: i64,
    trip: i64,
    date: NaiveDate,
    #[serde(default)]
    status: LogStatus,
    #[serde(default)]
    vehicle_number: Option<String>,
    #[serde(default)]
    trailer_number: Option<String>,
    #[serde(default)]
    visual_log_data: Value,
    #[serde(default)]
    status_changes: Vec<StatusChange>,
    #[serde(default)]
    certified_at: Option<DateTime<Utc>>,
}

impl TryFrom<WireLogRecord> for DayLogRecord {
    type Error = AppError;

    fn try_from(w: WireLogRecord) -> AppResult<Self> {
        let visual_log_data = VisualLogData::from_json(w.visual_log_data)
            .map_err(|e| AppError::Snapshot(format!("log {}: {}", w.id, e)))?;

        Ok(DayLogRecord {
            id: w.id,
            trip: w.trip,
            date: w.date,
            status: w.status,
            vehicle_number: w.vehicle_number.unwrap_or_default(),
            trailer_number: w.trailer_number.unwrap_or_default(),
            visual_log_data,
            status_changes: w.status_changes,
            certified_at: w.certified_at,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Plain(Vec<WireLogRecord>),
    Paged { results: Vec<WireLogRecord> },
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    log_sheets: Vec<WireLogRecord>,
}

/// Absolute URL for `path` under `base`. The canonical shape ends with a
/// slash, the alternate one does not.
pub fn endpoint(base: &str, path: &str, shape: RequestShape) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_matches('/');
    match shape {
        RequestShape::Canonical => format!("{}/{}/", base, path),
        RequestShape::Alternate => format!("{}/{}", base, path),
    }
}

/// Translate a non-success HTTP status into an application error.
pub fn map_status(op: &str, target: &str, status: StatusCode, body: &str) -> AppError {
    if status == StatusCode::NOT_FOUND {
        return AppError::NotFound(target.to_string());
    }
    if status == StatusCode::BAD_REQUEST && body.to_lowercase().contains("already certified") {
        return AppError::AlreadyCertified(target.to_string());
    }

    let snippet: String = body.chars().take(MAX_BODY_IN_ERROR).collect();
    AppError::transport(op, format!("HTTP {}: {}", status.as_u16(), snippet.trim()))
}

/// Decode a log list, accepting both a bare array and a paged object.
pub fn parse_log_list(value: Value) -> AppResult<Vec<DayLogRecord>> {
    let list: ListResponse =
        serde_json::from_value(value).map_err(|e| AppError::transport("fetch_logs", e))?;

    let wire = match list {
        ListResponse::Plain(v) => v,
        ListResponse::Paged { results } => results,
    };

    let mut records = wire
        .into_iter()
        .map(DayLogRecord::try_from)
        .collect::<AppResult<Vec<_>>>()?;
    records.sort_by_key(|r| (r.date, r.id));
    Ok(records)
}

/// Decode the `{success, log_sheets}` answer of the generate call.
pub fn parse_generated(value: Value) -> AppResult<Vec<DayLogRecord>> {
    let resp: GenerateResponse =
        serde_json::from_value(value).map_err(|e| AppError::transport("generate_logs", e))?;

    resp.log_sheets
        .into_iter()
        .map(DayLogRecord::try_from)
        .collect()
}

impl HttpGateway {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let base_url = base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api_base_url must start with http:// or https:// (got '{}')",
                base_url
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("eldlog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::transport("connect", e))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One request in the given shape. Returns the decoded JSON body
    /// (`Value::Null` for empty bodies).
    async fn send(
        &self,
        op: &str,
        target: &str,
        method: Method,
        path: &str,
        body: Option<&Value>,
        shape: RequestShape,
    ) -> AppResult<Value> {
        let url = endpoint(&self.base_url, path, shape);

        let mut req = self.client.request(method, &url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| AppError::transport(op, e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| AppError::transport(op, e))?;

        if !status.is_success() {
            return Err(map_status(op, target, status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| AppError::transport(op, e))
    }

    async fn call(
        &self,
        op: &str,
        target: &str,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> AppResult<Value> {
        with_shape_fallback(|shape| {
            self.send(op, target, method.clone(), path, body.as_ref(), shape)
        })
        .await
    }
}

#[async_trait]
impl PersistenceGateway for HttpGateway {
    async fn fetch_logs(&self, trip_id: Option<i64>) -> AppResult<Vec<DayLogRecord>> {
        let value = self.call("fetch_logs", "logs", Method::GET, "logs", None).await?;
        let mut records = parse_log_list(value)?;

        // the list endpoint has no trip filter
        if let Some(t) = trip_id {
            records.retain(|r| r.trip == t);
        }
        Ok(records)
    }

    async fn save_visual_data(&self, log_id: i64, snapshot: &VisualLogData) -> AppResult<()> {
        let data = snapshot.to_json()?;
        let body = json!({ "visual_log_data": data });
        self.call(
            "save_visual_data",
            &format!("log {}", log_id),
            Method::PUT,
            &format!("logs/{}/update_visual_data", log_id),
            Some(body),
        )
        .await?;
        Ok(())
    }

    async fn certify(&self, log_id: i64) -> AppResult<()> {
        self.call(
            "certify",
            &format!("log {}", log_id),
            Method::POST,
            &format!("logs/{}/certify", log_id),
            Some(json!({})),
        )
        .await?;
        Ok(())
    }

    async fn generate_logs(
        &self,
        trip_id: i64,
        start_date: NaiveDate,
        vehicle_number: Option<&str>,
        trailer_number: Option<&str>,
    ) -> AppResult<Vec<DayLogRecord>> {
        let mut body = json!({
            "trip_id": trip_id,
            "start_date": start_date.format("%Y-%m-%d").to_string(),
        });
        if let Some(v) = vehicle_number.filter(|v| !v.trim().is_empty()) {
            body["vehicle_number"] = json!(v);
        }
        if let Some(t) = trailer_number.filter(|t| !t.trim().is_empty()) {
            body["trailer_number"] = json!(t);
        }

        let value = self
            .call(
                "generate_logs",
                &format!("trip {}", trip_id),
                Method::POST,
                "logs/generate",
                Some(body),
            )
            .await?;
        parse_generated(value)
    }

    async fn delete_log(&self, log_id: i64) -> AppResult<()> {
        self.call(
            "delete_log",
            &format!("log {}", log_id),
            Method::DELETE,
            &format!("logs/{}", log_id),
            None,
        )
        .await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
