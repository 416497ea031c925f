//! Upstream attendance data sources.
//!
//! The engine reads attendance records, the employee directory and per-day
//! summary counts through the [`AttendanceSource`] trait. [`HttpAttendanceSource`]
//! talks to the REST API; [`InMemorySource`] serves fixed data.

mod http;
mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReportResult;
use crate::models::{AttendanceRecord, EmployeeSummary, Shift};

pub use http::HttpAttendanceSource;
pub use memory::InMemorySource;

/// Credentials and identity for calling the upstream API.
///
/// Passed explicitly to sources; nothing reads it from ambient storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    /// Name of the signed-in user, printed as "generated by" on exports.
    #[serde(default)]
    pub user: Option<String>,
}

/// Filters for the attendance records endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceQuery {
    /// First day to fetch, inclusive.
    pub start_date: NaiveDate,
    /// Last day to fetch, inclusive.
    pub end_date: NaiveDate,
    /// Only records for this employee.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Only records on this shift.
    #[serde(default)]
    pub shift: Option<Shift>,
    /// Only records captured at this site.
    #[serde(default)]
    pub site_id: Option<String>,
}

impl AttendanceQuery {
    /// Creates a query for a date range with no further filters.
    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            employee_id: None,
            shift: None,
            site_id: None,
        }
    }
}

/// A provider of attendance data.
#[async_trait]
pub trait AttendanceSource: Send + Sync {
    /// Fetches attendance records matching the query.
    async fn fetch_attendance(&self, query: &AttendanceQuery) -> ReportResult<Vec<AttendanceRecord>>;

    /// Fetches the employee directory, optionally scoped to one site.
    async fn fetch_employees(&self, site_id: Option<&str>) -> ReportResult<Vec<EmployeeSummary>>;

    /// Fetches the number of employees present on a day and shift,
    /// optionally counting only one site.
    async fn attendance_summary(
        &self,
        date: NaiveDate,
        shift: Shift,
        site_id: Option<&str>,
    ) -> ReportResult<u32>;
}
