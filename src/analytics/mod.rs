//! Analytics aggregation engine.
//!
//! This module turns raw employee, project and timesheet records into the
//! four analytics views. Work happens in three pure stages over one
//! [`Dataset`]:
//!
//! 1. [`allocate`] costs every entry and splits project revenue by hours.
//! 2. [`aggregation`] groups contributions by employee, project,
//!    department and globally.
//! 3. [`metrics`] derives ROI, profit and profit margin per group.
//!
//! [`AnalyticsEngine`] wraps a [`DataSource`]; each call reads a fresh
//! snapshot and holds no state between calls.

pub mod aggregation;
mod allocation;
pub mod metrics;
mod summation;

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    AnalyticsSnapshot, DepartmentSummary, EmployeeRoi, OverallSummary, ProjectProfit,
};
use crate::storage::{DataSource, Dataset};

pub use allocation::{
    allocate, allocated_revenue, project_hours_totals, AllocatedContribution, Allocation,
    SkipReason, SkippedEntry,
};
pub use metrics::{profit, profit_margin, roi, Metrics, Totals};
pub use summation::{ordered_sum, OrderedSum};

/// Computes every view from an already-loaded dataset.
///
/// # Example
///
/// ```
/// use workforce_analytics::analytics::compute_snapshot;
/// use workforce_analytics::models::{Employee, Project, TimesheetEntry};
/// use workforce_analytics::storage::Dataset;
///
/// let dataset = Dataset::new(
///     vec![
///         Employee { id: 1, name: "A".into(), department: None, hourly_rate: 50.0 },
///         Employee { id: 2, name: "B".into(), department: None, hourly_rate: 50.0 },
///     ],
///     vec![Project { id: 1, name: "X".into(), revenue: 1000.0 }],
///     vec![
///         TimesheetEntry { id: 1, employee_id: 1, project_id: 1, hours_worked: 10.0 },
///         TimesheetEntry { id: 2, employee_id: 2, project_id: 1, hours_worked: 10.0 },
///     ],
/// );
///
/// let snapshot = compute_snapshot(&dataset);
/// assert_eq!(snapshot.employee_roi[0].total_revenue, 500.0);
/// assert_eq!(snapshot.employee_roi[1].roi, Some(1.0));
/// ```
pub fn compute_snapshot(dataset: &Dataset) -> AnalyticsSnapshot {
    let allocation = allocate(dataset);
    let contributions = &allocation.contributions;

    debug!(
        contributions = contributions.len(),
        skipped = allocation.skipped.len(),
        "Allocation stage complete"
    );

    AnalyticsSnapshot {
        snapshot_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_roi: aggregation::by_employee(dataset, contributions),
        project_profit: aggregation::by_project(dataset, contributions),
        department_summary: aggregation::by_department(contributions),
        overall: aggregation::overall(dataset, contributions),
    }
}

/// Read-only analytics over a shared data source.
///
/// Cloning is cheap; clones share the data source. Any number of calls may
/// run in parallel since the engine performs no writes and takes no locks
/// of its own.
#[derive(Clone)]
pub struct AnalyticsEngine {
    source: Arc<dyn DataSource>,
}

impl AnalyticsEngine {
    /// Creates an engine reading from `source`.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    fn load(&self) -> EngineResult<Dataset> {
        let started = Instant::now();
        let dataset = self.source.load()?;
        debug!(
            employees = dataset.employees.len(),
            projects = dataset.projects.len(),
            timesheets = dataset.timesheets.len(),
            duration_us = started.elapsed().as_micros() as u64,
            "Loaded dataset snapshot"
        );
        Ok(dataset)
    }

    /// Employee ROI view.
    pub fn employee_roi(&self) -> EngineResult<Vec<EmployeeRoi>> {
        let dataset = self.load()?;
        let allocation = allocate(&dataset);
        Ok(aggregation::by_employee(&dataset, &allocation.contributions))
    }

    /// Project Profit view.
    pub fn project_profit(&self) -> EngineResult<Vec<ProjectProfit>> {
        let dataset = self.load()?;
        let allocation = allocate(&dataset);
        Ok(aggregation::by_project(&dataset, &allocation.contributions))
    }

    /// Department Summary view.
    pub fn department_summary(&self) -> EngineResult<Vec<DepartmentSummary>> {
        let dataset = self.load()?;
        let allocation = allocate(&dataset);
        Ok(aggregation::by_department(&allocation.contributions))
    }

    /// Overall view.
    pub fn overall(&self) -> EngineResult<OverallSummary> {
        let dataset = self.load()?;
        let allocation = allocate(&dataset);
        Ok(aggregation::overall(&dataset, &allocation.contributions))
    }

    /// All four views from a single read.
    pub fn snapshot(&self) -> EngineResult<AnalyticsSnapshot> {
        let dataset = self.load()?;
        Ok(compute_snapshot(&dataset))
    }
}
