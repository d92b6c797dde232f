//! Analytics result models.
//!
//! This module contains the row types for the four analytics views and
//! the [`AnalyticsSnapshot`] that bundles them. Ratio fields are
//! `Option<f64>` and serialize as `null` when absent, never as `0`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the Employee ROI view.
///
/// # Example
///
/// ```
/// use workforce_analytics::models::EmployeeRoi;
///
/// let row = EmployeeRoi {
///     employee_id: 1,
///     employee_name: "Ada".to_string(),
///     department: None,
///     total_hours: 10.0,
///     total_cost: 500.0,
///     total_revenue: 500.0,
///     roi: Some(1.0),
/// };
/// assert_eq!(serde_json::to_value(&row).unwrap()["department"], serde_json::Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRoi {
    /// The employee's id.
    pub employee_id: i64,
    /// The employee's name.
    pub employee_name: String,
    /// The employee's department, if any.
    pub department: Option<String>,
    /// Hours logged across all projects.
    pub total_hours: f64,
    /// Hours multiplied by the employee's rate.
    pub total_cost: f64,
    /// Revenue allocated to the employee across all projects.
    pub total_revenue: f64,
    /// Revenue over cost; absent when cost is zero.
    pub roi: Option<f64>,
}

/// One row of the Project Profit view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProfit {
    /// The project's id.
    pub project_id: i64,
    /// The project's name.
    pub project_name: String,
    /// Hours logged against the project.
    pub total_hours: f64,
    /// Labour cost of those hours.
    pub total_cost: f64,
    /// The project's own revenue field.
    pub total_revenue: f64,
    /// Revenue minus cost; may be negative.
    pub profit: f64,
    /// Profit over revenue; absent when revenue is zero.
    pub profit_margin: Option<f64>,
}

/// One row of the Department Summary view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    /// The department label; `None` groups employees without one.
    pub department: Option<String>,
    /// Hours logged by the department's employees.
    pub total_hours: f64,
    /// Labour cost of those hours.
    pub total_cost: f64,
    /// Revenue allocated to the department's employees.
    pub total_revenue: f64,
    /// Revenue over cost; absent when cost is zero.
    pub roi: Option<f64>,
}

/// The organisation-wide totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSummary {
    /// Labour cost of every resolved timesheet entry.
    pub total_cost: f64,
    /// Every project's revenue counted once.
    pub total_revenue: f64,
    /// Revenue over cost; absent when cost is zero.
    pub roi: Option<f64>,
}

/// All four views computed from a single read of the data source.
///
/// This is what report renderers consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Unique identifier for this snapshot.
    pub snapshot_id: Uuid,
    /// When the snapshot was computed.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that computed it.
    pub engine_version: String,
    /// Employee ROI view.
    pub employee_roi: Vec<EmployeeRoi>,
    /// Project Profit view.
    pub project_profit: Vec<ProjectProfit>,
    /// Department Summary view.
    pub department_summary: Vec<DepartmentSummary>,
    /// Overall view.
    pub overall: OverallSummary,
}
