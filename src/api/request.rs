//! Request types for the muster roll API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! report endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregation::{AggregationMode, RowFilter};
use crate::models::{AttendanceRecord, EmployeeSummary, PeriodRequest};
use crate::report::{ExportFormat, ReportScope};

/// Request body for `/muster-roll` and `/muster-roll/export`.
///
/// Carries the raw records and directory to aggregate, so the endpoint works
/// without reaching the upstream API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusterRollRequest {
    /// Raw attendance records.
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    /// The employee directory.
    #[serde(default)]
    pub employees: Vec<EmployeeSummary>,
    /// Reporting period: explicit dates or month/year.
    #[serde(default)]
    pub period: PeriodRequest,
    /// How absent employees and days are represented.
    #[serde(default)]
    pub mode: AggregationMode,
    /// Row filter applied before totals.
    #[serde(default)]
    pub filter: RowFilter,
    /// 1-based table page. Defaults to 1.
    #[serde(default)]
    pub page: Option<usize>,
    /// Rows per table page. Defaults to the configured page size.
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Report scope. Defaults to all sites.
    #[serde(default)]
    pub scope: ReportScope,
    /// User printed as "generated by" on exports.
    #[serde(default)]
    pub generated_by: Option<String>,
}

/// Query string for export endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportQuery {
    /// Output format.
    pub format: ExportFormat,
    /// Fall back to plain text if the requested document backend is unavailable.
    #[serde(default)]
    pub fallback: bool,
}

/// Request body for `/attendance/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    /// Records to classify.
    pub records: Vec<AttendanceRecord>,
    /// Optional directory supplying shifts for records without one.
    #[serde(default)]
    pub employees: Vec<EmployeeSummary>,
}

/// Request body for `/summary` and `/summary/export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
    /// Report scope. A site scope counts only that site.
    #[serde(default)]
    pub scope: ReportScope,
    /// User printed as "generated by" on exports.
    #[serde(default)]
    pub generated_by: Option<String>,
}

/// Request body for `/views/muster-roll/refresh`.
///
/// Records and directory are fetched through the configured source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRefreshRequest {
    /// Reporting period.
    #[serde(default)]
    pub period: PeriodRequest,
    /// Aggregation mode.
    #[serde(default)]
    pub mode: AggregationMode,
    /// Row filter.
    #[serde(default)]
    pub filter: RowFilter,
    /// Report scope; a site scope narrows both upstream queries.
    #[serde(default)]
    pub scope: ReportScope,
}

/// Query string for `GET /views/muster-roll`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// 1-based page.
    #[serde(default)]
    pub page: Option<usize>,
    /// Rows per page.
    #[serde(default)]
    pub page_size: Option<usize>,
}
