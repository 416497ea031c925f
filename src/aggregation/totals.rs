//! Present-day totals.
//!
//! Day totals and row totals count the same set of present cells, so their
//! sums always equal the grand total.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DayStatus, EmployeeAttendanceRow};

use super::calendar::PeriodCalendar;

/// Column, row and grand totals of present cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    /// Present count per period day. Every period day has an entry.
    pub day_totals: BTreeMap<NaiveDate, u32>,
    /// Present days per row, indexed like the row slice.
    pub row_totals: Vec<u32>,
    /// Sum of all present cells.
    pub grand_total: u32,
}

impl PeriodTotals {
    /// Returns the present count for a day, zero outside the period.
    pub fn day_total(&self, date: NaiveDate) -> u32 {
        self.day_totals.get(&date).copied().unwrap_or(0)
    }

    /// Returns the present days for a row, zero for an unknown index.
    pub fn row_total(&self, index: usize) -> u32 {
        self.row_totals.get(index).copied().unwrap_or(0)
    }
}

/// Computes totals over the given rows and period.
///
/// Only cells inside the period are counted.
///
/// # Example
///
/// ```
/// use muster_roll::aggregation::{compute_totals, PeriodCalendar};
/// use muster_roll::models::{DayCell, EmployeeAttendanceRow, ReportPeriod};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// let calendar = PeriodCalendar::new(ReportPeriod::Range { from: day, to: day }).unwrap();
/// let mut row = EmployeeAttendanceRow::new("e1", "Asha", "Guard", None);
/// row.attendance.insert(day, DayCell::present("07:15".to_string(), None));
///
/// let totals = compute_totals(&[row], &calendar);
/// assert_eq!(totals.day_total(day), 1);
/// assert_eq!(totals.grand_total, 1);
/// ```
pub fn compute_totals(rows: &[EmployeeAttendanceRow], calendar: &PeriodCalendar) -> PeriodTotals {
    let mut day_totals: BTreeMap<NaiveDate, u32> =
        calendar.days().iter().map(|d| (d.date, 0)).collect();
    let mut row_totals = Vec::with_capacity(rows.len());

    for row in rows {
        let mut present = 0;
        for day in calendar.days() {
            if row.status_on(day.date) == DayStatus::Present {
                present += 1;
                *day_totals.entry(day.date).or_insert(0) += 1;
            }
        }
        row_totals.push(present);
    }

    let grand_total = row_totals.iter().sum();

    PeriodTotals {
        day_totals,
        row_totals,
        grand_total,
    }
}
