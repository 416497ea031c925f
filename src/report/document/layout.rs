//! Page layout for paginated documents.
//!
//! Layout is pure geometry and text: it decides column positions, how many
//! lines each cell stacks and where pages break. Backends only draw.

use serde::Serialize;

use crate::aggregation::{DailySummary, MusterRoll};
use crate::config::DocumentLayoutConfig;
use crate::models::{DayCell, DayStatus, Shift};

use crate::report::context::ReportContext;
use crate::report::table::TOTAL_LABEL;

/// Ellipsis appended to truncated names.
pub const ELLIPSIS: &str = "...";

/// The branded block at the top of every page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentHeader {
    /// Organization name.
    pub organization: String,
    /// Report title.
    pub title: String,
    /// Period label.
    pub period: String,
    /// Scope label.
    pub scope: String,
    /// Active filter descriptions.
    pub filters: Vec<String>,
}

/// One table column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentColumn {
    /// Column heading.
    pub heading: String,
    /// Left edge, measured from the left page edge.
    pub x_mm: f32,
    /// Column width.
    pub width_mm: f32,
}

/// One table row, each cell already split into lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRow {
    /// Lines per cell, one entry per column.
    pub cells: Vec<Vec<String>>,
    /// Row height including padding.
    pub height_mm: f32,
    /// Drawn in bold.
    pub emphasis: bool,
}

/// The rows placed on one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentPage {
    /// 1-based page number.
    pub number: usize,
    /// Rows on this page.
    pub rows: Vec<DocumentRow>,
}

/// A fully laid out document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    /// Header repeated on every page.
    pub header: DocumentHeader,
    /// Table columns.
    pub columns: Vec<DocumentColumn>,
    /// Height of the column heading row.
    pub heading_height_mm: f32,
    /// Pages, at least one.
    pub pages: Vec<DocumentPage>,
    /// Footer timestamp label.
    pub generated_at: String,
    /// Geometry the layout was computed with.
    #[serde(skip)]
    pub settings: DocumentLayoutConfig,
}

impl DocumentLayout {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Left and right footer text for a page.
    pub fn footer(&self, page: &DocumentPage) -> (String, String) {
        (
            format!("Generated {}", self.generated_at),
            format!("Page {} of {}", page.number, self.page_count()),
        )
    }

    /// Distance from the top page edge to the column heading row.
    pub fn table_top_mm(&self) -> f32 {
        self.settings.margin_mm + self.settings.header_height_mm
    }
}

/// Width of one day column.
///
/// ```
/// use muster_roll::report::document::day_column_width;
///
/// assert_eq!(day_column_width(186.0, 31, 5.5), 6.0);
/// assert_eq!(day_column_width(100.0, 31, 5.5), 5.5);
/// ```
pub fn day_column_width(available_mm: f32, day_count: usize, min_width_mm: f32) -> f32 {
    if day_count == 0 {
        return min_width_mm;
    }
    (available_mm / day_count as f32).max(min_width_mm)
}

/// Truncates a name to `budget` characters, ending in [`ELLIPSIS`] when cut.
///
/// The result never exceeds `budget`; a budget too small for the ellipsis
/// cuts without one.
pub fn truncate_name(name: &str, budget: usize) -> String {
    if name.chars().count() <= budget {
        return name.to_string();
    }
    if budget < ELLIPSIS.len() {
        return name.chars().take(budget).collect();
    }
    let keep = budget.saturating_sub(ELLIPSIS.len());
    let mut truncated: String = name.chars().take(keep).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Lines stacked in one day cell.
///
/// Three lines when both times exist, two with only a step-in, one otherwise.
pub fn cell_lines(cell: Option<&DayCell>) -> Vec<String> {
    let Some(cell) = cell else {
        return vec![DayStatus::NoRecord.code().to_string()];
    };
    let mut lines = vec![cell.status().code().to_string()];
    if let Some(step_in) = cell.step_in_time() {
        lines.push(step_in.to_string());
        if let Some(step_out) = cell.step_out_time() {
            lines.push(step_out.to_string());
        }
    }
    lines
}

/// Lays out a muster roll across landscape pages.
pub fn lay_out_muster_roll(
    roll: &MusterRoll,
    context: &ReportContext,
    title: &str,
    settings: &DocumentLayoutConfig,
) -> DocumentLayout {
    let days = roll.calendar().days();
    let totals = roll.totals();

    let fixed = settings.sr_width_mm
        + settings.name_width_mm
        + settings.designation_width_mm
        + settings.shift_width_mm
        + settings.total_width_mm;
    let available = settings.page_width_mm - 2.0 * settings.margin_mm - fixed;
    let day_width = day_column_width(available, days.len(), settings.min_day_column_width_mm);

    let mut widths = vec![
        ("SR".to_string(), settings.sr_width_mm),
        ("NAME".to_string(), settings.name_width_mm),
        ("DESIGNATION".to_string(), settings.designation_width_mm),
        ("SHIFT".to_string(), settings.shift_width_mm),
    ];
    widths.extend(days.iter().map(|d| (d.day_number.to_string(), day_width)));
    widths.push((TOTAL_LABEL.to_string(), settings.total_width_mm));

    let mut rows: Vec<DocumentRow> = roll
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut cells = vec![
                vec![(index + 1).to_string()],
                vec![truncate_name(&row.name, settings.name_char_budget)],
                vec![row.designation.clone()],
                vec![row.shift_label()],
            ];
            cells.extend(days.iter().map(|d| cell_lines(row.cell(d.date))));
            cells.push(vec![totals.row_total(index).to_string()]);
            body_row(cells, false, settings)
        })
        .collect();

    let mut total_cells = vec![
        vec![String::new()],
        vec![TOTAL_LABEL.to_string()],
        vec![String::new()],
        vec![String::new()],
    ];
    total_cells.extend(days.iter().map(|d| vec![totals.day_total(d.date).to_string()]));
    total_cells.push(vec![totals.grand_total.to_string()]);
    rows.push(body_row(total_cells, true, settings));

    let header = DocumentHeader {
        organization: context.organization.clone(),
        title: title.to_string(),
        period: roll.calendar().period().label(),
        scope: context.scope.label().to_string(),
        filters: roll.filter().describe(),
    };

    assemble(header, widths, rows, context, settings)
}

/// Lays out a day-by-day summary across landscape pages.
pub fn lay_out_summary(
    summary: &DailySummary,
    context: &ReportContext,
    title: &str,
    settings: &DocumentLayoutConfig,
) -> DocumentLayout {
    let available = settings.page_width_mm - 2.0 * settings.margin_mm;
    let date_width = available * 0.3;
    let count_width = (available - date_width) / 4.0;

    let widths = vec![
        ("DATE".to_string(), date_width),
        ("MORNING".to_string(), count_width),
        ("EVENING".to_string(), count_width),
        ("NIGHT".to_string(), count_width),
        (TOTAL_LABEL.to_string(), count_width),
    ];

    let mut rows: Vec<DocumentRow> = summary
        .rows
        .iter()
        .map(|row| {
            let date = if row.failed {
                format!("{} (unavailable)", row.date.format("%d %b %Y"))
            } else {
                row.date.format("%d %b %Y").to_string()
            };
            let cells = vec![
                vec![date],
                vec![row.morning.to_string()],
                vec![row.evening.to_string()],
                vec![row.night.to_string()],
                vec![row.total.to_string()],
            ];
            body_row(cells, false, settings)
        })
        .collect();

    rows.push(body_row(
        vec![
            vec![TOTAL_LABEL.to_string()],
            vec![summary.shift_total(Shift::Morning).to_string()],
            vec![summary.shift_total(Shift::Evening).to_string()],
            vec![summary.shift_total(Shift::Night).to_string()],
            vec![summary.grand_total.to_string()],
        ],
        true,
        settings,
    ));

    let header = DocumentHeader {
        organization: context.organization.clone(),
        title: title.to_string(),
        period: format!(
            "{} to {}",
            summary.from.format("%d %b %Y"),
            summary.to.format("%d %b %Y")
        ),
        scope: context.scope.label().to_string(),
        filters: Vec::new(),
    };

    assemble(header, widths, rows, context, settings)
}

fn body_row(cells: Vec<Vec<String>>, emphasis: bool, settings: &DocumentLayoutConfig) -> DocumentRow {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    DocumentRow {
        cells,
        height_mm: lines as f32 * settings.line_height_mm + settings.row_padding_mm,
        emphasis,
    }
}

fn assemble(
    header: DocumentHeader,
    widths: Vec<(String, f32)>,
    rows: Vec<DocumentRow>,
    context: &ReportContext,
    settings: &DocumentLayoutConfig,
) -> DocumentLayout {
    let mut x = settings.margin_mm;
    let columns = widths
        .into_iter()
        .map(|(heading, width_mm)| {
            let column = DocumentColumn {
                heading,
                x_mm: x,
                width_mm,
            };
            x += width_mm;
            column
        })
        .collect();

    let heading_height_mm = settings.line_height_mm + settings.row_padding_mm;
    let body_height = settings.page_height_mm
        - 2.0 * settings.margin_mm
        - settings.header_height_mm
        - settings.footer_height_mm
        - heading_height_mm;

    DocumentLayout {
        header,
        columns,
        heading_height_mm,
        pages: paginate(rows, body_height),
        generated_at: context.generated_at_label(),
        settings: settings.clone(),
    }
}

/// Breaks rows into pages. A row never splits; an oversized row gets a page
/// of its own.
fn paginate(rows: Vec<DocumentRow>, body_height_mm: f32) -> Vec<DocumentPage> {
    let mut pages = vec![DocumentPage {
        number: 1,
        rows: Vec::new(),
    }];
    let mut used = 0.0;

    for row in rows {
        let fits = used + row.height_mm <= body_height_mm;
        let page_has_rows = pages.last().is_some_and(|p| !p.rows.is_empty());
        if !fits && page_has_rows {
            used = 0.0;
            pages.push(DocumentPage {
                number: pages.len() + 1,
                rows: Vec::new(),
            });
        }
        used += row.height_mm;
        if let Some(page) = pages.last_mut() {
            page.rows.push(row);
        }
    }

    pages
}
