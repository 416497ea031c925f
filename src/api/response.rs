//! Response types for the muster roll API.
//!
//! This module defines the error response structures and the mapping from
//! [`ReportError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregation::{AttendanceStatus, DuplicateEntry, PeriodTotals};
use crate::error::ReportError;
use crate::report::TablePage;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates the error returned when a view has nothing applied yet.
    pub fn view_empty() -> Self {
        Self::with_details(
            "VIEW_EMPTY",
            "No muster roll has been loaded into the view",
            "POST /views/muster-roll/refresh first",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a response from a status and error body.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<ReportError> for ApiErrorResponse {
    fn from(error: ReportError) -> Self {
        match error {
            ReportError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            ReportError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            err @ ReportError::InvertedPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERIOD",
                    err.to_string(),
                    "The period end date must not be before its start date",
                ),
            },
            ReportError::InvalidPeriod { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_PERIOD", format!("Invalid period: {}", message)),
            },
            ReportError::InvalidRequest { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}': {}", field, message),
                    "The request contains invalid information",
                ),
            },
            ReportError::Upstream { endpoint, message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "UPSTREAM_ERROR",
                    format!("Upstream request to '{}' failed", endpoint),
                    message,
                ),
            },
            ReportError::ExportUnavailable { format, reason } => ApiErrorResponse {
                status: StatusCode::NOT_IMPLEMENTED,
                error: ApiError::with_details(
                    "EXPORT_UNAVAILABLE",
                    format!("Export format '{}' is unavailable", format),
                    reason,
                ),
            },
            ReportError::Export { format, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "EXPORT_ERROR",
                    format!("Failed to export {}", format),
                    message,
                ),
            },
        }
    }
}

/// Response body of `/muster-roll` and `GET /views/muster-roll`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusterRollResponse {
    /// Period label.
    pub period: String,
    /// First period day.
    pub from: NaiveDate,
    /// Last period day.
    pub to: NaiveDate,
    /// The requested table page.
    pub table: TablePage,
    /// Totals over the filtered rows.
    pub totals: PeriodTotals,
    /// Same-day overwrites seen while aggregating.
    pub duplicates: Vec<DuplicateEntry>,
    /// Refresh ticket that produced the view, for view reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<u64>,
}

/// One classified record in the `/attendance/status` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    /// Record identifier, if the record carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Employee identifier.
    pub employee_id: String,
    /// Calendar day of the step-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Classified status.
    pub status: AttendanceStatus,
}

/// Response body of `/views/muster-roll/refresh`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Ticket issued for this refresh.
    pub ticket: u64,
    /// False when a newer refresh superseded this one.
    pub applied: bool,
    /// Filtered rows in the built roll.
    pub rows: usize,
}
