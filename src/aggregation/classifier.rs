//! Single-word attendance status classification.
//!
//! List views show one status per record. This is a separate model from the
//! `P`/`A` cells of the muster roll grid.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::config::ShiftCutoffs;
use crate::models::{AttendanceRecord, Shift};

/// Status of a single attendance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// No step-in was recorded.
    Absent,
    /// Stepped in, not yet stepped out.
    Working,
    /// Stepped in and out, on time.
    Present,
    /// Stepped in and out, with a step-in hour after the shift cutoff.
    Late,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Absent => write!(f, "Absent"),
            AttendanceStatus::Working => write!(f, "Working"),
            AttendanceStatus::Present => write!(f, "Present"),
            AttendanceStatus::Late => write!(f, "Late"),
        }
    }
}

/// Classifies a record using the shift captured on the record.
///
/// Lateness compares only the hour of step-in against the shift cutoff, and
/// only once the session is closed. A record with no shift is never late. A
/// night step-in after midnight is not late either, since its hour is small.
///
/// # Example
///
/// ```
/// use muster_roll::aggregation::{classify, AttendanceStatus};
/// use muster_roll::config::ShiftCutoffs;
/// use muster_roll::models::AttendanceRecord;
///
/// let record: AttendanceRecord = serde_json::from_str(r#"{
///     "employeeId": "e1",
///     "shift": "morning",
///     "stepIn": "2026-01-05T08:05:00",
///     "stepOut": "2026-01-05T16:00:00"
/// }"#).unwrap();
/// assert_eq!(classify(&record, &ShiftCutoffs::default()), AttendanceStatus::Late);
/// ```
pub fn classify(record: &AttendanceRecord, cutoffs: &ShiftCutoffs) -> AttendanceStatus {
    classify_with_shift(record, record.shift, cutoffs)
}

/// Classifies a record against an explicitly supplied shift.
///
/// Used when the record lacks a shift and the directory supplies one.
pub fn classify_with_shift(
    record: &AttendanceRecord,
    shift: Option<Shift>,
    cutoffs: &ShiftCutoffs,
) -> AttendanceStatus {
    let Some(step_in) = record.step_in_time() else {
        return AttendanceStatus::Absent;
    };

    if record.step_out.is_none() {
        return AttendanceStatus::Working;
    }

    match shift {
        Some(shift) if step_in.hour() > cutoffs.cutoff(shift) => AttendanceStatus::Late,
        _ => AttendanceStatus::Present,
    }
}
