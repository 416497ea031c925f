//! On-screen table model of a muster roll.

use serde::Serialize;

use crate::aggregation::MusterRoll;
use crate::models::{DayCell, DayStatus};

use super::grid_headers;

/// Label of the synthetic totals row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// One day cell as displayed on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// Status code: `P`, `A`, `W` or `-`.
    pub code: &'static str,
    /// Formatted step-in time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_in_time: Option<String>,
    /// Formatted step-out time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_out_time: Option<String>,
}

impl TableCell {
    fn from_cell(cell: Option<&DayCell>) -> Self {
        match cell {
            Some(cell) => Self {
                code: cell.status().code(),
                step_in_time: cell.step_in_time().map(str::to_string),
                step_out_time: cell.step_out_time().map(str::to_string),
            },
            None => Self {
                code: DayStatus::NoRecord.code(),
                step_in_time: None,
                step_out_time: None,
            },
        }
    }
}

/// One employee row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// 1-based serial number across the whole filtered set.
    pub sr: usize,
    /// Employee identifier.
    pub employee_id: String,
    /// Display name.
    pub name: String,
    /// Designation.
    pub designation: String,
    /// Shift label.
    pub shift: String,
    /// One cell per period day.
    pub cells: Vec<TableCell>,
    /// Present days in the period.
    pub total: u32,
}

/// The synthetic totals row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsRow {
    /// Always [`TOTAL_LABEL`].
    pub label: &'static str,
    /// Present count per period day.
    pub day_totals: Vec<u32>,
    /// Grand total.
    pub grand_total: u32,
}

/// One page of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    /// Column headings.
    pub headers: Vec<String>,
    /// Rows on this page.
    pub rows: Vec<TableRow>,
    /// Totals over the full filtered set.
    pub totals: TotalsRow,
    /// 1-based page number.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Number of pages, at least one.
    pub total_pages: usize,
    /// Number of filtered rows across all pages.
    pub total_rows: usize,
}

/// Table projection over a built muster roll.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    roll: &'a MusterRoll,
}

impl<'a> TableView<'a> {
    /// Wraps a muster roll.
    pub fn new(roll: &'a MusterRoll) -> Self {
        Self { roll }
    }

    /// Column headings.
    pub fn headers(&self) -> Vec<String> {
        grid_headers(self.roll.calendar())
    }

    /// Every filtered row, numbered from 1.
    pub fn rows(&self) -> Vec<TableRow> {
        self.rows_in(0, self.roll.rows().len())
    }

    /// The totals row.
    pub fn totals_row(&self) -> TotalsRow {
        let totals = self.roll.totals();
        TotalsRow {
            label: TOTAL_LABEL,
            day_totals: self
                .roll
                .calendar()
                .days()
                .iter()
                .map(|d| totals.day_total(d.date))
                .collect(),
            grand_total: totals.grand_total,
        }
    }

    /// Slices one page of rows. Page numbers start at 1; page 0 reads as 1.
    ///
    /// A page past the end yields no rows but still reports the page count and
    /// the full totals.
    pub fn page(&self, page: usize, page_size: usize) -> TablePage {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_rows = self.roll.rows().len();
        let total_pages = total_rows.div_ceil(page_size).max(1);

        let start = (page - 1).saturating_mul(page_size).min(total_rows);
        let end = start.saturating_add(page_size).min(total_rows);

        TablePage {
            headers: self.headers(),
            rows: self.rows_in(start, end),
            totals: self.totals_row(),
            page,
            page_size,
            total_pages,
            total_rows,
        }
    }

    fn rows_in(&self, start: usize, end: usize) -> Vec<TableRow> {
        let days = self.roll.calendar().days();
        let totals = self.roll.totals();
        self.roll.rows()[start..end]
            .iter()
            .enumerate()
            .map(|(offset, row)| {
                let index = start + offset;
                TableRow {
                    sr: index + 1,
                    employee_id: row.employee_id.clone(),
                    name: row.name.clone(),
                    designation: row.designation.clone(),
                    shift: row.shift_label(),
                    cells: days
                        .iter()
                        .map(|d| TableCell::from_cell(row.cell(d.date)))
                        .collect(),
                    total: totals.row_total(index),
                }
            })
            .collect()
    }
}
