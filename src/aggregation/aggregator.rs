//! Attendance aggregation.
//!
//! Folds raw attendance records and the employee directory into one
//! [`EmployeeAttendanceRow`] per employee, with cells keyed by calendar date.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{
    AttendanceRecord, DayCell, EmployeeAttendanceRow, EmployeeSummary, NOT_AVAILABLE,
    UNKNOWN_NAME,
};

use super::calendar::PeriodCalendar;

/// How absent employees and days are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Rows only for employees with at least one record; missing days stay missing.
    #[default]
    Sparse,
    /// One row per roster employee, every period day filled, gaps marked absent.
    Dense,
}

/// A same-day record that overwrote an earlier cell for the same employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    /// The employee whose cell was overwritten.
    pub employee_id: String,
    /// The day the duplicate fell on.
    pub date: NaiveDate,
}

/// The result of one aggregation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// One row per employee, in roster order then first-appearance order.
    pub rows: Vec<EmployeeAttendanceRow>,
    /// Same-day overwrites, in the order they happened.
    pub duplicates: Vec<DuplicateEntry>,
    /// Records dropped because they carry no step-in.
    pub skipped_without_step_in: usize,
    /// Records dropped because their step-in falls outside the period.
    pub skipped_outside_period: usize,
}

/// Aggregates records and the directory into per-employee rows.
///
/// A record is placed on the calendar day of its step-in; records without a
/// step-in, or outside the period, contribute nothing. When two records land
/// on the same employee and day, the later one wins and the overwrite is
/// reported in [`Aggregation::duplicates`].
///
/// Step times are read as local wall-clock times; records carrying a UTC
/// offset go through [`crate::models::localize_records`] first.
///
/// Employee details come from the record's embedded summary when present,
/// then from the roster, then fall back to `"Unknown"`/`"N/A"`. Unresolved
/// records still get a row.
///
/// # Example
///
/// ```
/// use muster_roll::aggregation::{aggregate, AggregationMode, PeriodCalendar};
/// use muster_roll::models::{AttendanceRecord, ReportPeriod};
/// use chrono::NaiveDate;
///
/// let records: Vec<AttendanceRecord> = serde_json::from_str(r#"[
///     {"employeeId": "e1", "stepIn": "2026-01-05T07:15:00", "stepOut": "2026-01-05T15:02:00"}
/// ]"#).unwrap();
/// let calendar = PeriodCalendar::new(ReportPeriod::Range {
///     from: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     to: NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
/// }).unwrap();
///
/// let result = aggregate(&records, &[], &calendar, AggregationMode::Sparse, "%H:%M");
/// assert_eq!(result.rows.len(), 1);
/// assert_eq!(result.rows[0].name, "Unknown");
/// assert_eq!(result.rows[0].attendance.len(), 1);
/// ```
pub fn aggregate(
    records: &[AttendanceRecord],
    employees: &[EmployeeSummary],
    calendar: &PeriodCalendar,
    mode: AggregationMode,
    time_format: &str,
) -> Aggregation {
    let roster: HashMap<&str, &EmployeeSummary> =
        employees.iter().map(|e| (e.id.as_str(), e)).collect();

    let mut rows: Vec<EmployeeAttendanceRow> = Vec::new();
    let mut row_index: HashMap<String, usize> = HashMap::new();

    if mode == AggregationMode::Dense {
        for employee in employees {
            if row_index.contains_key(&employee.id) {
                continue;
            }
            row_index.insert(employee.id.clone(), rows.len());
            rows.push(EmployeeAttendanceRow::new(
                employee.id.clone(),
                employee.name.clone(),
                employee.designation_or_default(),
                employee.shift,
            ));
        }
    }

    let mut duplicates = Vec::new();
    let mut skipped_without_step_in = 0;
    let mut skipped_outside_period = 0;

    for record in records {
        let Some(step_in) = record.step_in_time() else {
            skipped_without_step_in += 1;
            continue;
        };
        let date = step_in.date();
        if !calendar.contains(date) {
            skipped_outside_period += 1;
            continue;
        }

        let employee_id = record.employee_id.id();
        let index = match row_index.get(employee_id) {
            Some(&index) => index,
            None => {
                let index = rows.len();
                rows.push(resolve_row(record, &roster));
                row_index.insert(employee_id.to_string(), index);
                index
            }
        };

        let cell = DayCell::present(
            step_in.format(time_format).to_string(),
            record
                .step_out_time()
                .map(|t| t.format(time_format).to_string()),
        );

        if rows[index].attendance.insert(date, cell).is_some() {
            warn!(
                employee_id = %employee_id,
                date = %date,
                "Duplicate same-day attendance record, later record kept"
            );
            duplicates.push(DuplicateEntry {
                employee_id: employee_id.to_string(),
                date,
            });
        }
    }

    if mode == AggregationMode::Dense {
        for row in &mut rows {
            for day in calendar.days() {
                row.attendance.entry(day.date).or_insert_with(DayCell::absent);
            }
        }
    }

    debug!(
        records = records.len(),
        employees = employees.len(),
        rows = rows.len(),
        mode = ?mode,
        duplicates = duplicates.len(),
        skipped_without_step_in,
        skipped_outside_period,
        "Aggregated attendance"
    );

    Aggregation {
        rows,
        duplicates,
        skipped_without_step_in,
        skipped_outside_period,
    }
}

fn resolve_row(
    record: &AttendanceRecord,
    roster: &HashMap<&str, &EmployeeSummary>,
) -> EmployeeAttendanceRow {
    let employee_id = record.employee_id.id();
    let summary = record
        .employee_id
        .embedded()
        .or_else(|| roster.get(employee_id).copied());

    match summary {
        Some(summary) => EmployeeAttendanceRow::new(
            employee_id,
            summary.name.clone(),
            summary.designation_or_default(),
            summary.shift.or(record.shift),
        ),
        None => {
            debug!(employee_id = %employee_id, "Unresolved employee reference");
            EmployeeAttendanceRow::new(employee_id, UNKNOWN_NAME, NOT_AVAILABLE, record.shift)
        }
    }
}
