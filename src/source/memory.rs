//! In-memory attendance source.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{ReportError, ReportResult};
use crate::models::{AttendanceRecord, EmployeeSummary, Shift};

use super::{AttendanceQuery, AttendanceSource};

/// [`AttendanceSource`] serving fixed data, with optional per-day failures.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<AttendanceRecord>,
    employees: Vec<EmployeeSummary>,
    site_rosters: HashMap<String, Vec<String>>,
    summaries: HashMap<(Option<String>, NaiveDate, Shift), u32>,
    failing_days: HashSet<NaiveDate>,
}

impl InMemorySource {
    /// Creates a source over the given records and directory.
    pub fn new(records: Vec<AttendanceRecord>, employees: Vec<EmployeeSummary>) -> Self {
        Self {
            records,
            employees,
            ..Default::default()
        }
    }

    /// Assigns employees to a site for site-scoped directory lookups.
    pub fn with_site(mut self, site_id: impl Into<String>, employee_ids: &[&str]) -> Self {
        self.site_rosters.insert(
            site_id.into(),
            employee_ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    /// Sets the present count returned for a day and shift.
    pub fn with_summary(mut self, date: NaiveDate, shift: Shift, present: u32) -> Self {
        self.summaries.insert((None, date, shift), present);
        self
    }

    /// Sets the present count returned for one site's day and shift.
    pub fn with_site_summary(
        mut self,
        site_id: impl Into<String>,
        date: NaiveDate,
        shift: Shift,
        present: u32,
    ) -> Self {
        self.summaries
            .insert((Some(site_id.into()), date, shift), present);
        self
    }

    /// Makes every summary request for a day fail.
    pub fn with_failing_day(mut self, date: NaiveDate) -> Self {
        self.failing_days.insert(date);
        self
    }
}

#[async_trait]
impl AttendanceSource for InMemorySource {
    async fn fetch_attendance(&self, query: &AttendanceQuery) -> ReportResult<Vec<AttendanceRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| {
                r.work_date()
                    .is_some_and(|d| d >= query.start_date && d <= query.end_date)
            })
            .filter(|r| {
                query
                    .employee_id
                    .as_deref()
                    .is_none_or(|id| r.employee_id.id() == id)
            })
            .filter(|r| query.shift.is_none_or(|s| r.shift == Some(s)))
            .filter(|r| {
                query
                    .site_id
                    .as_deref()
                    .is_none_or(|site| r.site_id.as_deref() == Some(site))
            })
            .cloned()
            .collect())
    }

    async fn fetch_employees(&self, site_id: Option<&str>) -> ReportResult<Vec<EmployeeSummary>> {
        let Some(site_id) = site_id else {
            return Ok(self.employees.clone());
        };
        let members = self.site_rosters.get(site_id).ok_or_else(|| ReportError::Upstream {
            endpoint: "employees".to_string(),
            message: format!("unknown site: {}", site_id),
        })?;
        Ok(self
            .employees
            .iter()
            .filter(|e| members.contains(&e.id))
            .cloned()
            .collect())
    }

    async fn attendance_summary(
        &self,
        date: NaiveDate,
        shift: Shift,
        site_id: Option<&str>,
    ) -> ReportResult<u32> {
        if self.failing_days.contains(&date) {
            return Err(ReportError::Upstream {
                endpoint: "attendanceSummary".to_string(),
                message: format!("simulated failure for {}", date),
            });
        }
        if let Some(site_id) = site_id.filter(|id| !self.site_rosters.contains_key(*id)) {
            return Err(ReportError::Upstream {
                endpoint: "attendanceSummary".to_string(),
                message: format!("unknown site: {}", site_id),
            });
        }
        let key = (site_id.map(str::to_string), date, shift);
        Ok(self.summaries.get(&key).copied().unwrap_or(0))
    }
}
