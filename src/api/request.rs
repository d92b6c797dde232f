//! Request types for the analytics API.
//!
//! This module defines the JSON bodies accepted when creating or replacing
//! employees, projects and timesheet entries.

use serde::{Deserialize, Serialize};

use crate::models::{EmployeeDraft, ProjectDraft, TimesheetDraft};

/// Request body for `POST /employees` and `PUT /employees/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Display name.
    pub name: String,
    /// Optional department label.
    #[serde(default)]
    pub department: Option<String>,
    /// Hourly pay rate.
    pub hourly_rate: f64,
}

/// Request body for `POST /projects` and `PUT /projects/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRequest {
    /// Display name.
    pub name: String,
    /// Total revenue.
    pub revenue: f64,
}

/// Request body for `POST /timesheets` and `PUT /timesheets/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetRequest {
    /// The employee who logged the hours.
    pub employee_id: i64,
    /// The project the hours were logged against.
    pub project_id: i64,
    /// Hours worked.
    pub hours_worked: f64,
}

impl From<EmployeeRequest> for EmployeeDraft {
    fn from(req: EmployeeRequest) -> Self {
        EmployeeDraft {
            name: req.name,
            department: req.department.filter(|d| !d.trim().is_empty()),
            hourly_rate: req.hourly_rate,
        }
    }
}

impl From<ProjectRequest> for ProjectDraft {
    fn from(req: ProjectRequest) -> Self {
        ProjectDraft {
            name: req.name,
            revenue: req.revenue,
        }
    }
}

impl From<TimesheetRequest> for TimesheetDraft {
    fn from(req: TimesheetRequest) -> Self {
        TimesheetDraft {
            employee_id: req.employee_id,
            project_id: req.project_id,
            hours_worked: req.hours_worked,
        }
    }
}
