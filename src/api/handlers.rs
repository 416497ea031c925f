//! HTTP request handlers for the muster roll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregation::{MusterRoll, PeriodCalendar, build_daily_summary, classify_with_shift};
use crate::config::{ConfigLoader, ReportTimezone, ShiftCutoffs};
use crate::error::ReportResult;
use crate::models::{AttendanceRecord, EmployeeSummary, Shift, localize_records};
use crate::report::{ExportedFile, ReportContext, TableView, export_muster_roll, export_summary};
use crate::source::AttendanceQuery;

use super::request::{
    ExportQuery, MusterRollRequest, PageQuery, StatusRequest, SummaryRequest, ViewRefreshRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, MusterRollResponse, RefreshResponse, StatusEntry,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/muster-roll", post(muster_roll_handler))
        .route("/muster-roll/export", post(export_muster_roll_handler))
        .route("/attendance/status", post(status_handler))
        .route("/summary", post(summary_handler))
        .route("/summary/export", post(export_summary_handler))
        .route("/views/muster-roll/refresh", post(refresh_view_handler))
        .route("/views/muster-roll", get(read_view_handler))
        .with_state(state)
}

/// Handler for POST /muster-roll.
///
/// Aggregates the posted records and returns one table page with totals.
async fn muster_roll_handler(
    State(state): State<AppState>,
    payload: Result<Json<MusterRollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing muster roll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match build_roll(&request, state.config()) {
        Ok(roll) => {
            let page = request.page.unwrap_or(1);
            let page_size = request
                .page_size
                .unwrap_or(state.config().report().default_page_size);
            let body = roll_response(&roll, page, page_size, None);
            info!(
                correlation_id = %correlation_id,
                records = request.records.len(),
                rows = roll.rows().len(),
                grand_total = roll.totals().grand_total,
                duration_us = start_time.elapsed().as_micros(),
                "Muster roll built"
            );
            json_response(StatusCode::OK, &body)
        }
        Err(err) => error_response(correlation_id, err.into(), "Muster roll build failed"),
    }
}

/// Handler for POST /muster-roll/export?format=xlsx|pdf|txt.
async fn export_muster_roll_handler(
    State(state): State<AppState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
    payload: Result<Json<MusterRollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing muster roll export");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let config = state.config();
    let exported = build_roll(&request, config).and_then(|roll| {
        let context = ReportContext::new(config.organization().name.as_str(), request.scope.clone())
            .with_generated_by(request.generated_by.clone());
        export_muster_roll(&roll, &context, config.config(), query.format, query.fallback)
    });

    match exported {
        Ok(file) => {
            info!(
                correlation_id = %correlation_id,
                file_name = %file.file_name,
                bytes = file.bytes.len(),
                "Muster roll exported"
            );
            file_response(file)
        }
        Err(err) => error_response(correlation_id, err.into(), "Muster roll export failed"),
    }
}

/// Handler for POST /attendance/status.
///
/// Classifies each record as Absent, Working, Present or Late.
async fn status_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let entries = classify_records(
        &request.records,
        &request.employees,
        state.config().config().shift_cutoffs(),
        &state.config().report().timezone,
    );
    info!(
        correlation_id = %correlation_id,
        records = entries.len(),
        "Classified attendance records"
    );
    json_response(StatusCode::OK, &entries)
}

/// Handler for POST /summary.
///
/// Builds the day-by-day summary through the configured source.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let site_id = request.scope.site_id();
    match build_daily_summary(state.source(), request.from, request.to, site_id).await {
        Ok(summary) => {
            if summary.failed_days > 0 {
                warn!(
                    correlation_id = %correlation_id,
                    failed_days = summary.failed_days,
                    "Summary built with zero-filled days"
                );
            }
            json_response(StatusCode::OK, &summary)
        }
        Err(err) => error_response(correlation_id, err.into(), "Summary build failed"),
    }
}

/// Handler for POST /summary/export?format=xlsx|pdf|txt.
async fn export_summary_handler(
    State(state): State<AppState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary export");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let config = state.config();
    let summary =
        build_daily_summary(state.source(), request.from, request.to, request.scope.site_id()).await;
    let exported = match summary {
        Ok(summary) => {
            let context = ReportContext::new(config.organization().name.as_str(), request.scope)
                .with_generated_by(request.generated_by);
            export_summary(&summary, &context, config.config(), query.format, query.fallback)
        }
        Err(err) => Err(err),
    };

    match exported {
        Ok(file) => file_response(file),
        Err(err) => error_response(correlation_id, err.into(), "Summary export failed"),
    }
}

/// Handler for POST /views/muster-roll/refresh.
///
/// Fetches through the source and applies the result to the shared view
/// unless a newer refresh started meanwhile.
async fn refresh_view_handler(
    State(state): State<AppState>,
    payload: Result<Json<ViewRefreshRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let ticket = state.view().begin();
    info!(
        correlation_id = %correlation_id,
        ticket = ticket.sequence(),
        "Refreshing muster roll view"
    );

    match fetch_roll(&state, &request).await {
        Ok(roll) => {
            let rows = roll.rows().len();
            let applied = state.view().apply(ticket, roll);
            if !applied {
                warn!(
                    correlation_id = %correlation_id,
                    ticket = ticket.sequence(),
                    "Refresh superseded by a newer request"
                );
            }
            json_response(
                StatusCode::OK,
                &RefreshResponse {
                    ticket: ticket.sequence(),
                    applied,
                    rows,
                },
            )
        }
        Err(err) => error_response(correlation_id, err.into(), "View refresh failed"),
    }
}

/// Handler for GET /views/muster-roll.
async fn read_view_handler(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let Some(snapshot) = state.view().current() else {
        return ApiErrorResponse::new(StatusCode::NOT_FOUND, ApiError::view_empty()).into_response();
    };

    let page_size = query
        .page_size
        .unwrap_or(state.config().report().default_page_size);
    let body = roll_response(
        &snapshot.value,
        query.page.unwrap_or(1),
        page_size,
        Some(snapshot.ticket.sequence()),
    );
    json_response(StatusCode::OK, &body)
}

fn build_roll(request: &MusterRollRequest, config: &ConfigLoader) -> ReportResult<MusterRoll> {
    let calendar = PeriodCalendar::from_request(&request.period)?;
    let records = localize_records(&request.records, &config.report().timezone);
    Ok(MusterRoll::build(
        &records,
        &request.employees,
        calendar,
        request.mode,
        request.filter.clone(),
        &config.report().time_format,
    ))
}

async fn fetch_roll(state: &AppState, request: &ViewRefreshRequest) -> ReportResult<MusterRoll> {
    let calendar = PeriodCalendar::from_request(&request.period)?;
    let site_id = request.scope.site_id();

    let mut query = AttendanceQuery::between(calendar.first_date(), calendar.last_date());
    query.site_id = site_id.map(str::to_string);

    let records = state.source().fetch_attendance(&query).await?;
    let records = localize_records(&records, &state.config().report().timezone);
    let employees = state.source().fetch_employees(site_id).await?;

    Ok(MusterRoll::build(
        &records,
        &employees,
        calendar,
        request.mode,
        request.filter.clone(),
        &state.config().report().time_format,
    ))
}

/// Classifies records in the reporting zone, taking the shift from the
/// record, then its embedded employee, then the directory.
fn classify_records(
    records: &[AttendanceRecord],
    employees: &[EmployeeSummary],
    cutoffs: &ShiftCutoffs,
    timezone: &ReportTimezone,
) -> Vec<StatusEntry> {
    let roster: HashMap<&str, Option<Shift>> =
        employees.iter().map(|e| (e.id.as_str(), e.shift)).collect();

    records
        .iter()
        .map(|record| {
            let record = record.localized(timezone);
            let employee_id = record.employee_id.id();
            let shift = record
                .shift
                .or_else(|| record.employee_id.embedded().and_then(|e| e.shift))
                .or_else(|| roster.get(employee_id).copied().flatten());
            StatusEntry {
                record_id: record.id.clone(),
                employee_id: employee_id.to_string(),
                date: record.work_date(),
                status: classify_with_shift(&record, shift, cutoffs),
            }
        })
        .collect()
}

fn roll_response(
    roll: &MusterRoll,
    page: usize,
    page_size: usize,
    ticket: Option<u64>,
) -> MusterRollResponse {
    MusterRollResponse {
        period: roll.calendar().period().label(),
        from: roll.calendar().first_date(),
        to: roll.calendar().last_date(),
        table: TableView::new(roll).page(page, page_size),
        totals: roll.totals().clone(),
        duplicates: roll.duplicates().to_vec(),
        ticket,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn file_response(file: ExportedFile) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, api_error: ApiErrorResponse, context: &str) -> Response {
    warn!(
        correlation_id = %correlation_id,
        status = api_error.status.as_u16(),
        code = %api_error.error.code,
        message = %api_error.error.message,
        "{}", context
    );
    api_error.into_response()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let message = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %message,
        "Query string error"
    );
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, ApiError::validation_error(message))
        .into_response()
}
