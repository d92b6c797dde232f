//! Core data models for the workforce analytics engine.
//!
//! This module contains the source records the engine reads and the
//! result rows it emits.

mod analytics_result;
mod employee;
mod entity;
mod project;
mod timesheet;

pub use analytics_result::{
    AnalyticsSnapshot, DepartmentSummary, EmployeeRoi, OverallSummary, ProjectProfit,
};
pub use employee::{Employee, EmployeeDraft};
pub use entity::{EntityKind, MAX_FIELD_VALUE};
pub use project::{Project, ProjectDraft};
pub use timesheet::{TimesheetDraft, TimesheetEntry};
