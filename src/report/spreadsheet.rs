//! Spreadsheet exports.

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::aggregation::{DailySummary, MusterRoll};
use crate::error::{ReportError, ReportResult};
use crate::models::{DayStatus, Shift};

use super::context::{ReportContext, ReportScope};
use super::grid_headers;
use super::table::TOTAL_LABEL;

/// One spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetCell {
    /// Text value.
    Text(String),
    /// Whole number.
    Number(u32),
    /// Left empty.
    Empty,
}

impl SheetCell {
    fn text(value: impl Into<String>) -> Self {
        SheetCell::Text(value.into())
    }
}

/// The muster roll grid as written to the sheet, header row first.
///
/// Day cells are reduced to `P` or `-`. The last row carries the day totals
/// and the grand total.
pub fn muster_roll_grid(roll: &MusterRoll) -> Vec<Vec<SheetCell>> {
    let days = roll.calendar().days();
    let totals = roll.totals();

    let mut grid = Vec::with_capacity(roll.rows().len() + 2);
    grid.push(
        grid_headers(roll.calendar())
            .into_iter()
            .map(SheetCell::Text)
            .collect(),
    );

    for (index, row) in roll.rows().iter().enumerate() {
        let mut cells = vec![
            SheetCell::Number(index as u32 + 1),
            SheetCell::text(row.name.as_str()),
            SheetCell::text(row.designation.as_str()),
            SheetCell::text(row.shift_label()),
        ];
        cells.extend(days.iter().map(|d| match row.status_on(d.date) {
            DayStatus::Present => SheetCell::text("P"),
            _ => SheetCell::text("-"),
        }));
        cells.push(SheetCell::Number(totals.row_total(index)));
        grid.push(cells);
    }

    let mut total_row = vec![
        SheetCell::Empty,
        SheetCell::text(TOTAL_LABEL),
        SheetCell::Empty,
        SheetCell::Empty,
    ];
    total_row.extend(days.iter().map(|d| SheetCell::Number(totals.day_total(d.date))));
    total_row.push(SheetCell::Number(totals.grand_total));
    grid.push(total_row);

    grid
}

/// The summary grid as written to the sheet, header row first.
pub fn summary_grid(summary: &DailySummary) -> Vec<Vec<SheetCell>> {
    let mut grid = Vec::with_capacity(summary.rows.len() + 2);
    grid.push(
        ["DATE", "MORNING", "EVENING", "NIGHT", TOTAL_LABEL]
            .into_iter()
            .map(SheetCell::text)
            .collect(),
    );

    for row in &summary.rows {
        grid.push(vec![
            SheetCell::Text(format_date(row.date)),
            SheetCell::Number(row.morning),
            SheetCell::Number(row.evening),
            SheetCell::Number(row.night),
            SheetCell::Number(row.total),
        ]);
    }

    grid.push(vec![
        SheetCell::text(TOTAL_LABEL),
        SheetCell::Number(summary.shift_total(Shift::Morning)),
        SheetCell::Number(summary.shift_total(Shift::Evening)),
        SheetCell::Number(summary.shift_total(Shift::Night)),
        SheetCell::Number(summary.grand_total),
    ]);

    grid
}

/// Key/value rows of the site information sheet.
pub fn info_rows(roll: &MusterRoll, context: &ReportContext) -> Vec<(&'static str, String)> {
    let filters = roll.filter().describe();
    vec![
        ("Organization", context.organization.clone()),
        ("Site", context.scope.label().to_string()),
        ("Period", roll.calendar().period().label()),
        (
            "Filters",
            if filters.is_empty() {
                "None".to_string()
            } else {
                filters.join("; ")
            },
        ),
        ("Generated At", context.generated_at_label()),
        (
            "Generated By",
            context.generated_by.clone().unwrap_or_else(|| "-".to_string()),
        ),
    ]
}

/// Writes the muster roll workbook.
///
/// Site-scoped reports get a second "Info" sheet.
pub fn muster_roll_workbook(roll: &MusterRoll, context: &ReportContext) -> ReportResult<Vec<u8>> {
    let grid = muster_roll_grid(roll);
    let info = match context.scope {
        ReportScope::Site { .. } => Some(info_rows(roll, context)),
        ReportScope::Global => None,
    };

    let bytes = write_muster_roll(&grid, info.as_deref()).map_err(xlsx_error)?;
    debug!(
        rows = roll.rows().len(),
        days = roll.calendar().len(),
        bytes = bytes.len(),
        "Wrote muster roll workbook"
    );
    Ok(bytes)
}

/// Writes the day-by-day summary workbook.
pub fn summary_workbook(summary: &DailySummary) -> ReportResult<Vec<u8>> {
    let grid = summary_grid(summary);
    let bytes = write_summary(&grid).map_err(xlsx_error)?;
    debug!(days = summary.rows.len(), bytes = bytes.len(), "Wrote summary workbook");
    Ok(bytes)
}

fn write_muster_roll(
    grid: &[Vec<SheetCell>],
    info: Option<&[(&'static str, String)]>,
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = header_format();
    let total_format = Format::new().set_bold().set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Muster Roll")?;
    write_grid(worksheet, grid, &header_format, &total_format)?;

    let columns = grid.first().map_or(0, Vec::len) as u16;
    worksheet.set_column_width(0, 6)?; // SR
    worksheet.set_column_width(1, 28)?; // Name
    worksheet.set_column_width(2, 20)?; // Designation
    worksheet.set_column_width(3, 10)?; // Shift
    for col in 4..columns.saturating_sub(1) {
        worksheet.set_column_width(col, 4)?;
    }
    if columns > 4 {
        worksheet.set_column_width(columns - 1, 8)?; // Total
    }
    worksheet.set_freeze_panes(1, 4)?;

    if let Some(info) = info {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Info")?;
        sheet.set_column_width(0, 16)?;
        sheet.set_column_width(1, 40)?;
        for (row, (key, value)) in info.iter().enumerate() {
            sheet.write_string_with_format(row as u32, 0, *key, &header_format)?;
            sheet.write_string(row as u32, 1, value.as_str())?;
        }
    }

    workbook.save_to_buffer()
}

fn write_summary(grid: &[Vec<SheetCell>]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = header_format();
    let total_format = Format::new().set_bold().set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Summary")?;
    write_grid(worksheet, grid, &header_format, &total_format)?;

    worksheet.set_column_width(0, 14)?; // Date
    for col in 1..5 {
        worksheet.set_column_width(col, 11)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save_to_buffer()
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

fn write_grid(
    worksheet: &mut Worksheet,
    grid: &[Vec<SheetCell>],
    header_format: &Format,
    total_format: &Format,
) -> Result<(), XlsxError> {
    let last = grid.len().saturating_sub(1);
    for (row_index, cells) in grid.iter().enumerate() {
        let row = row_index as u32;
        let format = match row_index {
            0 => Some(header_format),
            i if i == last => Some(total_format),
            _ => None,
        };
        for (col_index, cell) in cells.iter().enumerate() {
            let col = col_index as u16;
            match (cell, format) {
                (SheetCell::Text(text), Some(format)) => {
                    worksheet.write_string_with_format(row, col, text.as_str(), format)?;
                }
                (SheetCell::Text(text), None) => {
                    worksheet.write_string(row, col, text.as_str())?;
                }
                (SheetCell::Number(n), Some(format)) => {
                    worksheet.write_number_with_format(row, col, *n, format)?;
                }
                (SheetCell::Number(n), None) => {
                    worksheet.write_number(row, col, *n)?;
                }
                (SheetCell::Empty, Some(format)) => {
                    worksheet.write_blank(row, col, format)?;
                }
                (SheetCell::Empty, None) => {}
            }
        }
    }
    Ok(())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

fn xlsx_error(err: XlsxError) -> ReportError {
    ReportError::Export {
        format: "xlsx".to_string(),
        message: err.to_string(),
    }
}
