//! Allocation stage.
//!
//! Costs each timesheet entry and attributes to it a share of its
//! project's revenue proportional to the hours it represents:
//!
//! ```text
//! cost              = hours_worked * hourly_rate
//! allocated_revenue = (hours_worked / project_total_hours) * project.revenue
//! ```
//!
//! Project totals are computed in a first pass and shared by every entry
//! of the project in the second pass.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Employee, Project, TimesheetEntry};
use crate::storage::Dataset;

use super::summation::OrderedSum;

/// One timesheet entry after costing and revenue allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocatedContribution {
    /// The source entry's id.
    pub entry_id: i64,
    /// The employee who logged the hours.
    pub employee_id: i64,
    /// The project the hours were logged against.
    pub project_id: i64,
    /// The employee's department at the time of the read.
    pub department: Option<String>,
    /// Hours worked.
    pub hours: f64,
    /// Hours multiplied by the employee's hourly rate.
    pub cost: f64,
    /// This entry's share of the project revenue.
    pub allocated_revenue: f64,
}

/// Why an entry was left out of every aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "id", rename_all = "snake_case")]
pub enum SkipReason {
    /// The referenced employee does not exist.
    MissingEmployee(i64),
    /// The referenced project does not exist.
    MissingProject(i64),
}

/// An entry excluded for referencing a record that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// The excluded entry's id.
    pub entry_id: i64,
    /// What could not be resolved.
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Output of the allocation stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allocation {
    /// One contribution per resolved entry, ordered by entry id.
    pub contributions: Vec<AllocatedContribution>,
    /// Entries excluded for dangling references, ordered by entry id.
    pub skipped: Vec<SkippedEntry>,
}

/// An entry whose employee and project both exist.
struct ResolvedEntry<'a> {
    entry: &'a TimesheetEntry,
    employee: &'a Employee,
    project: &'a Project,
}

/// Sums hours per project, adding entries in the order given.
///
/// # Example
///
/// ```
/// use workforce_analytics::analytics::project_hours_totals;
/// use workforce_analytics::models::TimesheetEntry;
///
/// let entries = vec![
///     TimesheetEntry { id: 1, employee_id: 1, project_id: 7, hours_worked: 10.0 },
///     TimesheetEntry { id: 2, employee_id: 2, project_id: 7, hours_worked: 10.0 },
/// ];
/// let totals = project_hours_totals(&entries);
/// assert_eq!(totals[&7], 20.0);
/// ```
pub fn project_hours_totals<'a, I>(entries: I) -> BTreeMap<i64, f64>
where
    I: IntoIterator<Item = &'a TimesheetEntry>,
{
    let mut sums: BTreeMap<i64, OrderedSum> = BTreeMap::new();
    for entry in entries {
        sums.entry(entry.project_id)
            .or_default()
            .add(entry.hours_worked);
    }
    sums.into_iter()
        .map(|(project_id, sum)| (project_id, sum.value()))
        .collect()
}

/// Revenue share for `hours` out of `project_total_hours`.
///
/// Returns zero when the project has no logged hours.
pub fn allocated_revenue(hours: f64, project_total_hours: f64, project_revenue: f64) -> f64 {
    if project_total_hours > 0.0 {
        (hours / project_total_hours) * project_revenue
    } else {
        0.0
    }
}

fn entry_order(a: &TimesheetEntry, b: &TimesheetEntry) -> Ordering {
    a.id.cmp(&b.id)
        .then(a.employee_id.cmp(&b.employee_id))
        .then(a.project_id.cmp(&b.project_id))
        .then(a.hours_worked.total_cmp(&b.hours_worked))
}

/// Runs the allocation stage over a dataset.
///
/// Entries are processed in id order regardless of the order the data
/// source returned them, so totals are reproducible. Entries referencing
/// a missing employee or project are reported in
/// [`Allocation::skipped`] and take no part in the project hour totals.
pub fn allocate(dataset: &Dataset) -> Allocation {
    let employees: HashMap<i64, &Employee> =
        dataset.employees.iter().map(|e| (e.id, e)).collect();
    let projects: HashMap<i64, &Project> = dataset.projects.iter().map(|p| (p.id, p)).collect();

    let mut ordered: Vec<&TimesheetEntry> = dataset.timesheets.iter().collect();
    ordered.sort_by(|a, b| entry_order(a, b));

    let mut resolved = Vec::with_capacity(ordered.len());
    let mut skipped = Vec::new();

    for entry in ordered {
        let Some(employee) = employees.get(&entry.employee_id).copied() else {
            warn!(
                entry_id = entry.id,
                employee_id = entry.employee_id,
                "Skipping timesheet entry with missing employee"
            );
            skipped.push(SkippedEntry {
                entry_id: entry.id,
                reason: SkipReason::MissingEmployee(entry.employee_id),
            });
            continue;
        };
        let Some(project) = projects.get(&entry.project_id).copied() else {
            warn!(
                entry_id = entry.id,
                project_id = entry.project_id,
                "Skipping timesheet entry with missing project"
            );
            skipped.push(SkippedEntry {
                entry_id: entry.id,
                reason: SkipReason::MissingProject(entry.project_id),
            });
            continue;
        };
        resolved.push(ResolvedEntry {
            entry,
            employee,
            project,
        });
    }

    // First pass: per-project hour totals over resolved entries only.
    let totals = project_hours_totals(resolved.iter().map(|r| r.entry));

    // Second pass: apply the shared total to each entry.
    let contributions = resolved
        .into_iter()
        .map(|r| {
            let hours = r.entry.hours_worked;
            let project_total = totals.get(&r.project.id).copied().unwrap_or(0.0);
            AllocatedContribution {
                entry_id: r.entry.id,
                employee_id: r.employee.id,
                project_id: r.project.id,
                department: r.employee.department.clone(),
                hours,
                cost: hours * r.employee.hourly_rate,
                allocated_revenue: allocated_revenue(hours, project_total, r.project.revenue),
            }
        })
        .collect();

    Allocation {
        contributions,
        skipped,
    }
}
