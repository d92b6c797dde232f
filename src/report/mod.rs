//! Report rendering.
//!
//! Renderers consume an [`AnalyticsSnapshot`] and produce a downloadable
//! document. The engine never depends on them: a failed render is reported
//! as [`EngineError::RenderFailed`] and leaves the snapshot untouched.

mod document;
mod narrative;
mod ranking;
mod tabular;
mod workbook;

use std::fmt;
use std::str::FromStr;

use tracing::info;

use crate::config::ReportConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::AnalyticsSnapshot;

pub use document::PdfRenderer;
pub use narrative::NarrativeRenderer;
pub use ranking::{compare_roi_desc, top_by_roi};
pub use tabular::TabularRenderer;
pub use workbook::XlsxRenderer;

/// Text written wherever a nullable value is absent.
pub const ABSENT_MARKER: &str = "N/A";

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// One CSV section per result set.
    Csv,
    /// Plain-text summary with an ROI ranking.
    Text,
    /// Excel workbook with one sheet per result set.
    Excel,
    /// PDF rendition of the plain-text summary.
    Pdf,
}

impl ReportFormat {
    /// Name used in URLs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Text => "text",
            ReportFormat::Excel => "excel",
            ReportFormat::Pdf => "pdf",
        }
    }

    /// File extension for downloads.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Text => "txt",
            ReportFormat::Excel => "xlsx",
            ReportFormat::Pdf => "pdf",
        }
    }

    /// MIME type for downloads.
    pub fn media_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv; charset=utf-8",
            ReportFormat::Text => "text/plain; charset=utf-8",
            ReportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ReportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ReportFormat::Csv),
            "text" | "txt" => Ok(ReportFormat::Text),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "pdf" => Ok(ReportFormat::Pdf),
            other => Err(EngineError::UnsupportedReportFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Turns a snapshot into document bytes.
pub trait ReportRenderer: Send + Sync {
    /// The format this renderer produces.
    fn format(&self) -> ReportFormat;

    /// Renders the snapshot.
    fn render(&self, snapshot: &AnalyticsSnapshot) -> EngineResult<Vec<u8>>;
}

/// A rendered document ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// Suggested file name.
    pub filename: String,
    /// MIME type.
    pub media_type: &'static str,
    /// Document content.
    pub bytes: Vec<u8>,
}

/// Returns the renderer for `format`.
pub fn renderer_for(format: ReportFormat, config: &ReportConfig) -> Box<dyn ReportRenderer> {
    match format {
        ReportFormat::Csv => Box::new(TabularRenderer::new()),
        ReportFormat::Text => Box::new(NarrativeRenderer::new(
            config.top_employees,
            config.currency_symbol.clone(),
        )),
        ReportFormat::Excel => Box::new(XlsxRenderer::new()),
        ReportFormat::Pdf => Box::new(PdfRenderer::new(
            config.top_employees,
            config.currency_symbol.clone(),
        )),
    }
}

/// Renders `snapshot` with the given renderer and names the file.
pub fn render_with(
    renderer: &dyn ReportRenderer,
    snapshot: &AnalyticsSnapshot,
) -> EngineResult<RenderedReport> {
    let format = renderer.format();
    let bytes = renderer.render(snapshot)?;
    let filename = format!(
        "analytics_report_{}.{}",
        snapshot.generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    info!(
        snapshot_id = %snapshot.snapshot_id,
        format = %format,
        bytes = bytes.len(),
        "Rendered report"
    );
    Ok(RenderedReport {
        filename,
        media_type: format.media_type(),
        bytes,
    })
}

/// Renders `snapshot` in `format` using `config`.
pub fn render_report(
    format: ReportFormat,
    snapshot: &AnalyticsSnapshot,
    config: &ReportConfig,
) -> EngineResult<RenderedReport> {
    render_with(renderer_for(format, config).as_ref(), snapshot)
}

/// Formats money with thousands separators and two decimals.
///
/// # Examples
///
/// ```
/// use workforce_analytics::report::format_currency;
///
/// assert_eq!(format_currency(1234567.891, "$"), "$1,234,567.89");
/// assert_eq!(format_currency(-42.5, "$"), "-$42.50");
/// ```
pub fn format_currency(value: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{cents}")
}

/// Formats a ratio as a percentage, or [`ABSENT_MARKER`].
///
/// # Examples
///
/// ```
/// use workforce_analytics::report::format_ratio;
///
/// assert_eq!(format_ratio(Some(1.2345)), "123.45%");
/// assert_eq!(format_ratio(Some(0.0)), "0.00%");
/// assert_eq!(format_ratio(None), "N/A");
/// ```
pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(ratio) => format!("{:.2}%", ratio * 100.0),
        None => ABSENT_MARKER.to_string(),
    }
}

/// Formats an optional raw number, or [`ABSENT_MARKER`].
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| ABSENT_MARKER.to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::models::OverallSummary;

    struct FailingRenderer;

    impl ReportRenderer for FailingRenderer {
        fn format(&self) -> ReportFormat {
            ReportFormat::Csv
        }

        fn render(&self, _snapshot: &AnalyticsSnapshot) -> EngineResult<Vec<u8>> {
            Err(EngineError::render_failed(
                "csv",
                std::io::Error::other("writer closed"),
            ))
        }
    }

    fn empty_snapshot() -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            snapshot_id: Uuid::new_v4(),
            generated_at: Utc.with_ymd_and_hms(2026, 3, 4, 5, 6, 7).unwrap(),
            engine_version: "0.1.0".to_string(),
            employee_roi: vec![],
            project_profit: vec![],
            department_summary: vec![],
            overall: OverallSummary {
                total_cost: 0.0,
                total_revenue: 0.0,
                roi: None,
            },
        }
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!("csv".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("excel".parse::<ReportFormat>().unwrap(), ReportFormat::Excel);
        assert_eq!("pdf".parse::<ReportFormat>().unwrap(), ReportFormat::Pdf);
        assert!(matches!(
            "docx".parse::<ReportFormat>(),
            Err(EngineError::UnsupportedReportFormat { ref format }) if format == "docx"
        ));
    }

    #[test]
    fn test_filename_uses_snapshot_timestamp() {
        let report =
            render_report(ReportFormat::Csv, &empty_snapshot(), &ReportConfig::default()).unwrap();
        assert_eq!(report.filename, "analytics_report_20260304_050607.csv");
        assert_eq!(report.media_type, "text/csv; charset=utf-8");

        let text =
            render_report(ReportFormat::Text, &empty_snapshot(), &ReportConfig::default()).unwrap();
        assert!(text.filename.ends_with(".txt"));
    }

    #[test]
    fn test_binary_formats_name_and_type() {
        let config = ReportConfig::default();
        let excel = render_report(ReportFormat::Excel, &empty_snapshot(), &config).unwrap();
        assert_eq!(excel.filename, "analytics_report_20260304_050607.xlsx");
        assert_eq!(
            excel.media_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );

        let pdf = render_report(ReportFormat::Pdf, &empty_snapshot(), &config).unwrap();
        assert_eq!(pdf.filename, "analytics_report_20260304_050607.pdf");
        assert_eq!(pdf.media_type, "application/pdf");
        assert!(pdf.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_renderer_failure_is_reported() {
        let snapshot = empty_snapshot();
        let err = render_with(&FailingRenderer, &snapshot).unwrap_err();
        assert!(matches!(err, EngineError::RenderFailed { .. }));
        assert_eq!(snapshot.overall.total_cost, 0.0);
    }

    #[test]
    fn test_format_currency_small_values() {
        assert_eq!(format_currency(0.0, "$"), "$0.00");
        assert_eq!(format_currency(999.999, "$"), "$1,000.00");
        assert_eq!(format_currency(12.3, "€"), "€12.30");
        assert_eq!(format_currency(-0.001, "$"), "$0.00");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(1.5)), "1.5");
        assert_eq!(format_optional(None), "N/A");
    }
}
