use crate::analytics::{DateRange, SlaReport, SlaReportRequest};
use crate::api::auth::{require_admin, require_staff};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::models::{AnalystFilter, CallerContext, Ticket};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Window used when the analytics view sends no dates
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        last_report_at: state.engine.last_generated_at(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub last_report_at: Option<DateTime<Utc>>,
}

/// Prometheus exposition endpoint
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}

/// SLA report for the caller
pub async fn sla_report(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiQuery(params): ApiQuery<SlaReportQuery>,
) -> Result<Json<SlaReport>> {
    require_staff(&caller)?;
    params.validate()?;

    let request = params.into_request(caller, Utc::now().date_naive());
    let report = state.engine.generate_sla_report(&request).await?;

    Ok(Json(report))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SlaReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(length(min = 1, max = 128))]
    pub analyst_id: Option<String>,
}

impl SlaReportQuery {
    /// Missing dates default to the trailing window ending `today`
    pub fn into_request(self, caller: CallerContext, today: NaiveDate) -> SlaReportRequest {
        let fallback = DateRange::trailing_days(today, DEFAULT_WINDOW_DAYS);
        let range = DateRange::new(
            self.start_date.unwrap_or(fallback.start_date),
            self.end_date.unwrap_or(fallback.end_date),
        );

        SlaReportRequest::new(range, caller)
            .with_analyst(AnalystFilter::from_param(self.analyst_id.as_deref()))
    }
}

/// Replace the ticket snapshot
pub async fn import_tickets(
    State(state): State<AppState>,
    caller: CallerContext,
    ApiJson(tickets): ApiJson<Vec<Ticket>>,
) -> Result<(StatusCode, Json<ImportResponse>)> {
    require_admin(&caller)?;

    for ticket in &tickets {
        ticket
            .validate()
            .map_err(|e| AppError::Validation(format!("ticket {}: {}", ticket.id, e)))?;
    }

    let imported = state.engine.import_tickets(tickets).await?;
    tracing::info!(caller = %caller.caller_id, imported, "Ticket snapshot imported over HTTP");

    Ok((StatusCode::OK, Json(ImportResponse { imported })))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: usize,
}

/// Number of non-archived tickets
pub async fn ticket_count(
    State(state): State<AppState>,
    caller: CallerContext,
) -> Result<Json<TicketCountResponse>> {
    require_staff(&caller)?;
    let total = state.engine.ticket_count().await?;
    Ok(Json(TicketCountResponse { total }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketCountResponse {
    pub total: u64,
}
