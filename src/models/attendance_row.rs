//! Derived muster roll row models.
//!
//! These types are built fresh by every aggregation run and discarded after
//! rendering. Nothing here is persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{NOT_AVAILABLE, Shift};

/// Status of one employee on one day in the muster roll grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DayStatus {
    /// Present: a step-in was recorded on this day.
    #[serde(rename = "P")]
    Present,
    /// Absent: explicitly back-filled for a day without a record.
    #[serde(rename = "A")]
    Absent,
    /// Week-off. Reserved; aggregation never produces it.
    #[serde(rename = "W")]
    WeekOff,
    /// No record for this day. Never stored in a row.
    #[serde(rename = "N")]
    NoRecord,
}

impl DayStatus {
    /// Returns the short code shown in report grids.
    pub fn code(&self) -> &'static str {
        match self {
            DayStatus::Present => "P",
            DayStatus::Absent => "A",
            DayStatus::WeekOff => "W",
            DayStatus::NoRecord => "-",
        }
    }
}

/// One cell of the muster roll grid.
///
/// A present cell always carries its step-in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    status: DayStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    step_in_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    step_out_time: Option<String>,
}

impl DayCell {
    /// Creates a present cell with formatted step-in and optional step-out times.
    pub fn present(step_in_time: String, step_out_time: Option<String>) -> Self {
        Self {
            status: DayStatus::Present,
            step_in_time: Some(step_in_time),
            step_out_time,
        }
    }

    /// Creates an explicit absent cell.
    pub fn absent() -> Self {
        Self {
            status: DayStatus::Absent,
            step_in_time: None,
            step_out_time: None,
        }
    }

    /// The cell status.
    pub fn status(&self) -> DayStatus {
        self.status
    }

    /// Formatted step-in time, set only for present cells.
    pub fn step_in_time(&self) -> Option<&str> {
        self.step_in_time.as_deref()
    }

    /// Formatted step-out time, set only for present cells that were closed.
    pub fn step_out_time(&self) -> Option<&str> {
        self.step_out_time.as_deref()
    }

    /// Returns true if the cell counts towards present totals.
    pub fn is_present(&self) -> bool {
        self.status == DayStatus::Present
    }
}

/// One employee's attendance across a reporting period.
///
/// Keys are calendar dates; renderers display the day-of-month number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAttendanceRow {
    /// The employee's identifier.
    pub employee_id: String,
    /// Display name, or `"Unknown"` when the reference could not be resolved.
    pub name: String,
    /// Designation, or `"N/A"`.
    pub designation: String,
    /// Rostered shift, if known.
    pub shift: Option<Shift>,
    /// Cells keyed by calendar date.
    pub attendance: BTreeMap<NaiveDate, DayCell>,
}

impl EmployeeAttendanceRow {
    /// Creates a row with an empty attendance map.
    pub fn new(
        employee_id: impl Into<String>,
        name: impl Into<String>,
        designation: impl Into<String>,
        shift: Option<Shift>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            designation: designation.into(),
            shift,
            attendance: BTreeMap::new(),
        }
    }

    /// Returns the cell for a date, if one was recorded or back-filled.
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.attendance.get(&date)
    }

    /// Returns the status for a date, reading a missing key as no record.
    pub fn status_on(&self, date: NaiveDate) -> DayStatus {
        self.cell(date)
            .map(DayCell::status)
            .unwrap_or(DayStatus::NoRecord)
    }

    /// Counts present cells in the row.
    pub fn present_days(&self) -> u32 {
        self.attendance.values().filter(|c| c.is_present()).count() as u32
    }

    /// Shift label for display, `"N/A"` when unknown.
    pub fn shift_label(&self) -> String {
        self.shift
            .map(|s| s.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}
