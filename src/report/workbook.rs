//! Spreadsheet (Excel) report renderer.
//!
//! Writes one worksheet per non-empty result set, then an "Overall Summary"
//! sheet that is always present. Amounts and ratios are numeric cells with
//! a display format; absent ratios are written as text.

use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, XlsxError};

use crate::error::{EngineError, EngineResult};
use crate::models::AnalyticsSnapshot;

use super::{ReportFormat, ReportRenderer, ABSENT_MARKER};

enum Cell {
    Text(String),
    Number(f64),
    Money(f64),
    Ratio(Option<f64>),
}

impl Cell {
    fn label(value: Option<&str>) -> Self {
        Cell::Text(value.unwrap_or(ABSENT_MARKER).to_string())
    }
}

/// Renders a snapshot as an `.xlsx` workbook.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRenderer;

impl XlsxRenderer {
    /// Creates a renderer.
    pub fn new() -> Self {
        Self
    }
}

/// Adds one sheet: a bold header row followed by the data rows.
fn write_sheet(
    workbook: &mut Workbook,
    name: &str,
    header: &[&str],
    rows: Vec<Vec<Cell>>,
) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00");
    let percent = Format::new().set_num_format("0.00%");

    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;
    for (col, title) in header.iter().enumerate() {
        sheet.write_string_with_format(0, col as ColNum, *title, &bold)?;
    }
    for (index, cells) in rows.into_iter().enumerate() {
        let row = index as RowNum + 1;
        for (col, cell) in cells.into_iter().enumerate() {
            let col = col as ColNum;
            match cell {
                Cell::Text(text) => sheet.write_string(row, col, text)?,
                Cell::Number(value) => sheet.write_number(row, col, value)?,
                Cell::Money(value) => sheet.write_number_with_format(row, col, value, &money)?,
                Cell::Ratio(Some(value)) => {
                    sheet.write_number_with_format(row, col, value, &percent)?
                }
                Cell::Ratio(None) => sheet.write_string(row, col, ABSENT_MARKER)?,
            };
        }
    }
    sheet.autofit();
    Ok(())
}

fn build(snapshot: &AnalyticsSnapshot) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    if !snapshot.employee_roi.is_empty() {
        let rows = snapshot
            .employee_roi
            .iter()
            .map(|r| {
                vec![
                    Cell::Number(r.employee_id as f64),
                    Cell::Text(r.employee_name.clone()),
                    Cell::label(r.department.as_deref()),
                    Cell::Number(r.total_hours),
                    Cell::Money(r.total_cost),
                    Cell::Money(r.total_revenue),
                    Cell::Ratio(r.roi),
                ]
            })
            .collect();
        write_sheet(
            &mut workbook,
            "Employee ROI",
            &[
                "Employee ID",
                "Employee",
                "Department",
                "Total Hours",
                "Total Cost",
                "Total Revenue",
                "ROI",
            ],
            rows,
        )?;
    }

    if !snapshot.project_profit.is_empty() {
        let rows = snapshot
            .project_profit
            .iter()
            .map(|r| {
                vec![
                    Cell::Number(r.project_id as f64),
                    Cell::Text(r.project_name.clone()),
                    Cell::Number(r.total_hours),
                    Cell::Money(r.total_cost),
                    Cell::Money(r.total_revenue),
                    Cell::Money(r.profit),
                    Cell::Ratio(r.profit_margin),
                ]
            })
            .collect();
        write_sheet(
            &mut workbook,
            "Project Profit",
            &[
                "Project ID",
                "Project",
                "Total Hours",
                "Total Cost",
                "Total Revenue",
                "Profit",
                "Profit Margin",
            ],
            rows,
        )?;
    }

    if !snapshot.department_summary.is_empty() {
        let rows = snapshot
            .department_summary
            .iter()
            .map(|r| {
                vec![
                    Cell::label(r.department.as_deref()),
                    Cell::Number(r.total_hours),
                    Cell::Money(r.total_cost),
                    Cell::Money(r.total_revenue),
                    Cell::Ratio(r.roi),
                ]
            })
            .collect();
        write_sheet(
            &mut workbook,
            "Department Summary",
            &["Department", "Total Hours", "Total Cost", "Total Revenue", "ROI"],
            rows,
        )?;
    }

    let overall = &snapshot.overall;
    write_sheet(
        &mut workbook,
        "Overall Summary",
        &["Metric", "Value"],
        vec![
            vec![Cell::Text("Total Cost".to_string()), Cell::Money(overall.total_cost)],
            vec![
                Cell::Text("Total Revenue".to_string()),
                Cell::Money(overall.total_revenue),
            ],
            vec![Cell::Text("ROI".to_string()), Cell::Ratio(overall.roi)],
        ],
    )?;

    Ok(workbook)
}

impl ReportRenderer for XlsxRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Excel
    }

    fn render(&self, snapshot: &AnalyticsSnapshot) -> EngineResult<Vec<u8>> {
        build(snapshot)
            .and_then(|mut workbook| workbook.save_to_buffer())
            .map_err(|e| EngineError::render_failed(ReportFormat::Excel.as_str(), e))
    }
}
