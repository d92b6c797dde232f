//! Tabular (CSV) report renderer.
//!
//! Writes one titled CSV section per result set, separated by a blank
//! line. Empty list sections are omitted; the overall section is always
//! written. Numbers keep full precision.

use crate::error::{EngineError, EngineResult};
use crate::models::AnalyticsSnapshot;

use super::{format_optional, ReportFormat, ReportRenderer, ABSENT_MARKER};

/// Renders a snapshot as sectioned CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabularRenderer;

impl TabularRenderer {
    /// Creates a renderer.
    pub fn new() -> Self {
        Self
    }
}

fn render_err(e: impl Into<crate::error::BoxedCause>) -> EngineError {
    EngineError::render_failed(ReportFormat::Csv.as_str(), e)
}

/// Writes one section: a title row, a header row and the data rows.
fn section(title: &str, header: &[&str], rows: Vec<Vec<String>>) -> EngineResult<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record([title]).map_err(render_err)?;
    writer.write_record(header).map_err(render_err)?;
    for row in rows {
        writer.write_record(&row).map_err(render_err)?;
    }
    writer
        .into_inner()
        .map_err(|e| render_err(e.into_error()))
}

impl ReportRenderer for TabularRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn render(&self, snapshot: &AnalyticsSnapshot) -> EngineResult<Vec<u8>> {
        let mut sections = Vec::new();

        if !snapshot.employee_roi.is_empty() {
            let rows = snapshot
                .employee_roi
                .iter()
                .map(|r| {
                    vec![
                        r.employee_id.to_string(),
                        r.employee_name.clone(),
                        r.department.clone().unwrap_or_else(|| ABSENT_MARKER.to_string()),
                        r.total_hours.to_string(),
                        r.total_cost.to_string(),
                        r.total_revenue.to_string(),
                        format_optional(r.roi),
                    ]
                })
                .collect();
            sections.push(section(
                "Employee ROI",
                &[
                    "employee_id",
                    "employee_name",
                    "department",
                    "total_hours",
                    "total_cost",
                    "total_revenue",
                    "roi",
                ],
                rows,
            )?);
        }

        if !snapshot.project_profit.is_empty() {
            let rows = snapshot
                .project_profit
                .iter()
                .map(|r| {
                    vec![
                        r.project_id.to_string(),
                        r.project_name.clone(),
                        r.total_hours.to_string(),
                        r.total_cost.to_string(),
                        r.total_revenue.to_string(),
                        r.profit.to_string(),
                        format_optional(r.profit_margin),
                    ]
                })
                .collect();
            sections.push(section(
                "Project Profit",
                &[
                    "project_id",
                    "project_name",
                    "total_hours",
                    "total_cost",
                    "total_revenue",
                    "profit",
                    "profit_margin",
                ],
                rows,
            )?);
        }

        if !snapshot.department_summary.is_empty() {
            let rows = snapshot
                .department_summary
                .iter()
                .map(|r| {
                    vec![
                        r.department.clone().unwrap_or_else(|| ABSENT_MARKER.to_string()),
                        r.total_hours.to_string(),
                        r.total_cost.to_string(),
                        r.total_revenue.to_string(),
                        format_optional(r.roi),
                    ]
                })
                .collect();
            sections.push(section(
                "Department Summary",
                &["department", "total_hours", "total_cost", "total_revenue", "roi"],
                rows,
            )?);
        }

        let overall = &snapshot.overall;
        sections.push(section(
            "Overall Summary",
            &["total_cost", "total_revenue", "roi"],
            vec![vec![
                overall.total_cost.to_string(),
                overall.total_revenue.to_string(),
                format_optional(overall.roi),
            ]],
        )?);

        Ok(sections.join(&b"\n"[..]))
    }
}
