//! The assembled muster roll.
//!
//! Ties a calendar, the aggregated rows, the active filter and the totals
//! together. Totals always describe the filtered rows and are recomputed on
//! every filter change.

use serde::Serialize;

use crate::models::{AttendanceRecord, EmployeeAttendanceRow, EmployeeSummary};

use super::aggregator::{Aggregation, AggregationMode, DuplicateEntry, aggregate};
use super::calendar::PeriodCalendar;
use super::filter::RowFilter;
use super::totals::{PeriodTotals, compute_totals};

/// A per-employee, per-day attendance grid for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusterRoll {
    #[serde(skip)]
    calendar: PeriodCalendar,
    mode: AggregationMode,
    #[serde(skip)]
    all_rows: Vec<EmployeeAttendanceRow>,
    filter: RowFilter,
    rows: Vec<EmployeeAttendanceRow>,
    totals: PeriodTotals,
    duplicates: Vec<DuplicateEntry>,
}

impl MusterRoll {
    /// Aggregates records and the roster into a muster roll.
    pub fn build(
        records: &[AttendanceRecord],
        employees: &[EmployeeSummary],
        calendar: PeriodCalendar,
        mode: AggregationMode,
        filter: RowFilter,
        time_format: &str,
    ) -> Self {
        let Aggregation {
            rows, duplicates, ..
        } = aggregate(records, employees, &calendar, mode, time_format);
        Self::from_rows(calendar, mode, rows, filter, duplicates)
    }

    fn from_rows(
        calendar: PeriodCalendar,
        mode: AggregationMode,
        all_rows: Vec<EmployeeAttendanceRow>,
        filter: RowFilter,
        duplicates: Vec<DuplicateEntry>,
    ) -> Self {
        let rows = filter.apply(&all_rows);
        let totals = compute_totals(&rows, &calendar);
        Self {
            calendar,
            mode,
            all_rows,
            filter,
            rows,
            totals,
            duplicates,
        }
    }

    /// Returns a copy narrowed by a different filter, with fresh totals.
    pub fn with_filter(&self, filter: RowFilter) -> Self {
        Self::from_rows(
            self.calendar.clone(),
            self.mode,
            self.all_rows.clone(),
            filter,
            self.duplicates.clone(),
        )
    }

    /// The period calendar.
    pub fn calendar(&self) -> &PeriodCalendar {
        &self.calendar
    }

    /// The aggregation mode used.
    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    /// The active filter.
    pub fn filter(&self) -> &RowFilter {
        &self.filter
    }

    /// Rows passing the active filter.
    pub fn rows(&self) -> &[EmployeeAttendanceRow] {
        &self.rows
    }

    /// Totals over the filtered rows.
    pub fn totals(&self) -> &PeriodTotals {
        &self.totals
    }

    /// Same-day overwrites seen while aggregating.
    pub fn duplicates(&self) -> &[DuplicateEntry] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRef, ReportPeriod, Shift, StepEvent, parse_timestamp};
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn record(id: &str, step_in: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: None,
            employee_id: EmployeeRef::Id(id.to_string()),
            shift: None,
            step_in: Some(StepEvent::at(parse_timestamp(step_in).unwrap())),
            step_out: None,
            site_id: None,
        }
    }

    fn roster() -> Vec<EmployeeSummary> {
        vec![
            EmployeeSummary {
                id: "e1".to_string(),
                name: "Asha".to_string(),
                designation: None,
                shift: Some(Shift::Morning),
            },
            EmployeeSummary {
                id: "e2".to_string(),
                name: "Ravi".to_string(),
                designation: None,
                shift: Some(Shift::Night),
            },
        ]
    }

    fn calendar() -> PeriodCalendar {
        PeriodCalendar::new(ReportPeriod::Range {
            from: date(5),
            to: date(6),
        })
        .unwrap()
    }

    #[test]
    fn test_filter_change_recomputes_totals() {
        let records = vec![
            record("e1", "2026-01-05T07:00:00"),
            record("e2", "2026-01-05T23:00:00"),
            record("e2", "2026-01-06T23:00:00"),
        ];
        let roll = MusterRoll::build(
            &records,
            &roster(),
            calendar(),
            AggregationMode::Dense,
            RowFilter::default(),
            "%H:%M",
        );
        assert_eq!(roll.totals().grand_total, 3);

        let night = roll.with_filter(RowFilter {
            search: None,
            shift: Some(Shift::Night),
        });
        assert_eq!(night.rows().len(), 1);
        assert_eq!(night.totals().grand_total, 2);
        assert_eq!(night.totals().day_total(date(5)), 1);

        let back = night.with_filter(RowFilter::default());
        assert_eq!(back.rows().len(), 2);
        assert_eq!(back.totals(), roll.totals());
    }
}
