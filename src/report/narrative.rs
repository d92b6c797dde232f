//! Narrative (plain-text) report renderer.
//!
//! Produces a short summary document: title, generation time, the overall
//! figures, and the top employees ranked by ROI.

use std::fmt::Write;

use crate::error::{EngineError, EngineResult};
use crate::models::AnalyticsSnapshot;

use super::{
    format_currency, format_ratio, top_by_roi, ReportFormat, ReportRenderer, ABSENT_MARKER,
};

pub(super) const TITLE: &str = "Employee Productivity & Cost Dashboard Report";

/// Renders a snapshot as a plain-text summary.
#[derive(Debug, Clone)]
pub struct NarrativeRenderer {
    top_employees: usize,
    currency_symbol: String,
}

impl NarrativeRenderer {
    /// Creates a renderer listing `top_employees` employees.
    pub fn new(top_employees: usize, currency_symbol: impl Into<String>) -> Self {
        Self {
            top_employees,
            currency_symbol: currency_symbol.into(),
        }
    }

    fn money(&self, value: f64) -> String {
        format_currency(value, &self.currency_symbol)
    }
}

/// Writes a left-aligned table with a header rule.
fn write_table(out: &mut String, header: &[&str], rows: &[Vec<String>]) -> std::fmt::Result {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}", width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(header.to_vec()))?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("-+-"))?;
    for row in rows {
        writeln!(out, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

fn heading(out: &mut String, text: &str) -> std::fmt::Result {
    writeln!(out, "{text}")?;
    writeln!(out, "{}", "-".repeat(text.chars().count()))
}

impl NarrativeRenderer {
    /// The summary as text, shared with the PDF layout.
    pub(super) fn document(
        &self,
        snapshot: &AnalyticsSnapshot,
    ) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        self.write_document(snapshot, &mut out)?;
        Ok(out)
    }

    fn write_document(&self, snapshot: &AnalyticsSnapshot, out: &mut String) -> std::fmt::Result {
        writeln!(out, "{TITLE}")?;
        writeln!(out, "{}", "=".repeat(TITLE.chars().count()))?;
        writeln!(out)?;
        writeln!(
            out,
            "Generated on: {}",
            snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(out)?;

        heading(out, "Overall Summary")?;
        let overall = &snapshot.overall;
        write_table(
            out,
            &["Metric", "Value"],
            &[
                vec!["Total Cost".to_string(), self.money(overall.total_cost)],
                vec!["Total Revenue".to_string(), self.money(overall.total_revenue)],
                vec!["ROI".to_string(), format_ratio(overall.roi)],
            ],
        )?;

        if snapshot.employee_roi.is_empty() {
            return Ok(());
        }

        writeln!(out)?;
        heading(out, "Top Employees by ROI")?;
        let rows: Vec<Vec<String>> = top_by_roi(&snapshot.employee_roi, self.top_employees)
            .into_iter()
            .map(|e| {
                vec![
                    e.employee_name.clone(),
                    e.department
                        .clone()
                        .unwrap_or_else(|| ABSENT_MARKER.to_string()),
                    format_ratio(e.roi),
                    self.money(e.total_cost),
                    self.money(e.total_revenue),
                ]
            })
            .collect();
        write_table(
            out,
            &["Employee", "Department", "ROI", "Total Cost", "Total Revenue"],
            &rows,
        )
    }
}

impl ReportRenderer for NarrativeRenderer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }

    fn render(&self, snapshot: &AnalyticsSnapshot) -> EngineResult<Vec<u8>> {
        let text = self
            .document(snapshot)
            .map_err(|e| EngineError::render_failed(ReportFormat::Text.as_str(), e))?;
        Ok(text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRoi, OverallSummary};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn employee(id: i64, name: &str, roi: Option<f64>) -> EmployeeRoi {
        EmployeeRoi {
            employee_id: id,
            employee_name: name.to_string(),
            department: Some("Engineering".to_string()),
            total_hours: 10.0,
            total_cost: 1500.0,
            total_revenue: 2250.0,
            roi,
        }
    }

    fn snapshot(employees: Vec<EmployeeRoi>) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            snapshot_id: Uuid::new_v4(),
            generated_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            engine_version: "0.1.0".to_string(),
            employee_roi: employees,
            project_profit: vec![],
            department_summary: vec![],
            overall: OverallSummary {
                total_cost: 12345.678,
                total_revenue: 20000.0,
                roi: Some(1.62),
            },
        }
    }

    fn render(renderer: &NarrativeRenderer, snapshot: &AnalyticsSnapshot) -> String {
        String::from_utf8(renderer.render(snapshot).unwrap()).unwrap()
    }

    #[test]
    fn test_overall_summary_is_formatted() {
        let text = render(&NarrativeRenderer::new(5, "$"), &snapshot(vec![]));
        assert!(text.starts_with(TITLE));
        assert!(text.contains("Generated on: 2026-01-02 03:04:05 UTC"));
        assert!(text.contains("$12,345.68"));
        assert!(text.contains("$20,000.00"));
        assert!(text.contains("162.00%"));
    }

    #[test]
    fn test_ranking_section_omitted_without_employees() {
        let text = render(&NarrativeRenderer::new(5, "$"), &snapshot(vec![]));
        assert!(!text.contains("Top Employees by ROI"));
    }

    #[test]
    fn test_ranking_orders_and_limits() {
        let employees = vec![
            employee(1, "Low", Some(0.5)),
            employee(2, "Absent", None),
            employee(3, "High", Some(3.0)),
            employee(4, "Zero", Some(0.0)),
        ];
        let text = render(&NarrativeRenderer::new(3, "$"), &snapshot(employees));

        let high = text.find("High").unwrap();
        let low = text.find("Low").unwrap();
        let zero = text.find("Zero").unwrap();
        assert!(high < low && low < zero);
        assert!(!text.contains("Absent"));
        assert!(text.contains("0.00%"));
    }

    #[test]
    fn test_absent_roi_prints_marker() {
        let mut snap = snapshot(vec![employee(1, "Solo", None)]);
        snap.overall.roi = None;
        let text = render(&NarrativeRenderer::new(5, "$"), &snap);
        assert!(text.contains("| N/A"));
    }

    #[test]
    fn test_currency_symbol_is_configurable() {
        let text = render(&NarrativeRenderer::new(5, "€"), &snapshot(vec![]));
        assert!(text.contains("€20,000.00"));
    }
}
