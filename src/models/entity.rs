//! Entity kinds stored by the data source.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The three record kinds the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// An [`Employee`](super::Employee) record.
    Employee,
    /// A [`Project`](super::Project) record.
    Project,
    /// A [`TimesheetEntry`](super::TimesheetEntry) record.
    Timesheet,
}

impl EntityKind {
    /// Capitalised label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Employee => "Employee",
            EntityKind::Project => "Project",
            EntityKind::Timesheet => "Timesheet",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Employee => "employee",
            EntityKind::Project => "project",
            EntityKind::Timesheet => "timesheet",
        };
        f.write_str(name)
    }
}

/// Largest magnitude accepted for a rate, revenue or hour count.
///
/// Keeps every cost product and aggregate sum finite.
pub const MAX_FIELD_VALUE: f64 = 1e12;

/// Rejects NaN, infinite and out-of-range values for a numeric field.
pub(crate) fn require_finite(entity: EntityKind, field: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(EngineError::invalid(entity, field, "must be a finite number"));
    }
    if value.abs() > MAX_FIELD_VALUE {
        return Err(EngineError::invalid(
            entity,
            field,
            format!("must not exceed {MAX_FIELD_VALUE:e}"),
        ));
    }
    Ok(())
}

/// Rejects ids the store cannot advance past.
pub(crate) fn require_id(entity: EntityKind, id: i64) -> EngineResult<()> {
    if id == i64::MAX {
        return Err(EngineError::invalid(
            entity,
            "id",
            format!("must be less than {}", i64::MAX),
        ));
    }
    Ok(())
}
