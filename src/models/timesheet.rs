//! Timesheet entry model.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::entity::{require_finite, require_id, EntityKind};

/// One unit of labour: hours an employee logged against a project.
///
/// Many entries may reference the same employee and/or project. The
/// references are plain ids; they are resolved when analytics run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// Unique identifier for the entry.
    pub id: i64,
    /// The employee who logged the hours.
    pub employee_id: i64,
    /// The project the hours were logged against.
    pub project_id: i64,
    /// Hours worked; zero or more.
    pub hours_worked: f64,
}

impl TimesheetEntry {
    /// Builds an entry from a draft and an assigned id.
    pub fn from_draft(id: i64, draft: TimesheetDraft) -> Self {
        TimesheetEntry {
            id,
            employee_id: draft.employee_id,
            project_id: draft.project_id,
            hours_worked: draft.hours_worked,
        }
    }

    /// Validates the fields owned by this record.
    ///
    /// Reference checks need the store and live there.
    pub fn validate(&self) -> EngineResult<()> {
        require_id(EntityKind::Timesheet, self.id)?;
        require_finite(EntityKind::Timesheet, "hours_worked", self.hours_worked)?;
        if self.hours_worked < 0.0 {
            return Err(EngineError::invalid(
                EntityKind::Timesheet,
                "hours_worked",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

/// Fields supplied when creating or replacing a timesheet entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetDraft {
    /// The employee who logged the hours.
    pub employee_id: i64,
    /// The project the hours were logged against.
    pub project_id: i64,
    /// Hours worked.
    pub hours_worked: f64,
}
