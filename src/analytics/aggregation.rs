//! Aggregation stage.
//!
//! Groups allocated contributions by employee, project and department and
//! produces the global totals. Each function returns finished view rows
//! with metrics already derived.

use std::collections::{BTreeMap, HashMap};

use crate::models::{
    DepartmentSummary, Employee, EmployeeRoi, OverallSummary, Project, ProjectProfit,
};
use crate::storage::Dataset;

use super::allocation::AllocatedContribution;
use super::metrics::Totals;
use super::summation::{ordered_sum, OrderedSum};

/// Running sums for one group.
#[derive(Debug, Default)]
struct GroupSum {
    hours: OrderedSum,
    cost: OrderedSum,
    revenue: OrderedSum,
}

impl GroupSum {
    fn add(&mut self, contribution: &AllocatedContribution) {
        self.hours.add(contribution.hours);
        self.cost.add(contribution.cost);
        self.revenue.add(contribution.allocated_revenue);
    }

    fn totals(&self) -> Totals {
        Totals {
            hours: self.hours.value(),
            cost: self.cost.value(),
            revenue: self.revenue.value(),
        }
    }
}

fn group_by<K: Ord>(
    contributions: &[AllocatedContribution],
    key: impl Fn(&AllocatedContribution) -> K,
) -> BTreeMap<K, GroupSum> {
    let mut groups: BTreeMap<K, GroupSum> = BTreeMap::new();
    for contribution in contributions {
        groups.entry(key(contribution)).or_default().add(contribution);
    }
    groups
}

fn projects_by_id(dataset: &Dataset) -> Vec<&Project> {
    let mut projects: Vec<&Project> = dataset.projects.iter().collect();
    projects.sort_by_key(|p| p.id);
    projects
}

/// Builds the Employee ROI view.
///
/// Only employees with at least one contribution appear; rows are ordered
/// by employee id. Revenue is the sum of the employee's allocated shares.
pub fn by_employee(
    dataset: &Dataset,
    contributions: &[AllocatedContribution],
) -> Vec<EmployeeRoi> {
    let employees: HashMap<i64, &Employee> =
        dataset.employees.iter().map(|e| (e.id, e)).collect();

    group_by(contributions, |c| c.employee_id)
        .into_iter()
        .filter_map(|(employee_id, sums)| {
            let employee = employees.get(&employee_id)?;
            let totals = sums.totals();
            Some(EmployeeRoi {
                employee_id,
                employee_name: employee.name.clone(),
                department: employee.department.clone(),
                total_hours: totals.hours,
                total_cost: totals.cost,
                total_revenue: totals.revenue,
                roi: totals.metrics().roi,
            })
        })
        .collect()
}

/// Builds the Project Profit view.
///
/// Every project appears, including projects with no logged hours.
/// `total_revenue` is the project's own revenue field rather than the sum
/// of its allocations.
pub fn by_project(
    dataset: &Dataset,
    contributions: &[AllocatedContribution],
) -> Vec<ProjectProfit> {
    let groups = group_by(contributions, |c| c.project_id);

    projects_by_id(dataset)
        .into_iter()
        .map(|project| {
            let (hours, cost) = groups
                .get(&project.id)
                .map(|sums| (sums.hours.value(), sums.cost.value()))
                .unwrap_or((0.0, 0.0));
            let totals = Totals {
                hours,
                cost,
                revenue: project.revenue,
            };
            let metrics = totals.metrics();
            ProjectProfit {
                project_id: project.id,
                project_name: project.name.clone(),
                total_hours: totals.hours,
                total_cost: totals.cost,
                total_revenue: totals.revenue,
                profit: metrics.profit,
                profit_margin: metrics.profit_margin,
            }
        })
        .collect()
}

/// Builds the Department Summary view.
///
/// Employees without a department are grouped together under `None`,
/// which sorts before every named department.
pub fn by_department(contributions: &[AllocatedContribution]) -> Vec<DepartmentSummary> {
    group_by(contributions, |c| c.department.clone())
        .into_iter()
        .map(|(department, sums)| {
            let totals = sums.totals();
            DepartmentSummary {
                department,
                total_hours: totals.hours,
                total_cost: totals.cost,
                total_revenue: totals.revenue,
                roi: totals.metrics().roi,
            }
        })
        .collect()
}

/// Builds the Overall view.
///
/// Cost sums every contribution; revenue sums each project's revenue field
/// exactly once, whatever the number of contributors.
pub fn overall(dataset: &Dataset, contributions: &[AllocatedContribution]) -> OverallSummary {
    let total_cost = ordered_sum(contributions.iter().map(|c| c.cost));
    let total_revenue = ordered_sum(projects_by_id(dataset).into_iter().map(|p| p.revenue));
    let totals = Totals {
        hours: 0.0,
        cost: total_cost,
        revenue: total_revenue,
    };
    OverallSummary {
        total_cost,
        total_revenue,
        roi: totals.metrics().roi,
    }
}
