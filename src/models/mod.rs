//! Core data models for the muster roll engine.
//!
//! This module contains the external attendance and directory shapes, the
//! reporting period, and the derived per-employee rows.

mod attendance;
mod attendance_row;
mod employee;
mod period;
mod shift;

pub use attendance::{AttendanceRecord, EmployeeRef, StepEvent, localize_records, parse_timestamp};
pub use attendance_row::{DayCell, DayStatus, EmployeeAttendanceRow};
pub use employee::{EmployeeSummary, NOT_AVAILABLE, UNKNOWN_NAME};
pub use period::{PeriodRequest, ReportPeriod};
pub use shift::Shift;
