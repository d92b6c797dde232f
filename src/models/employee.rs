//! Employee model.
//!
//! This module defines the [`Employee`] record and the [`EmployeeDraft`]
//! used to create or replace one.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::entity::{require_finite, require_id, EntityKind};

/// An employee whose logged hours are costed at a fixed hourly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optional department label used for the department grouping.
    #[serde(default)]
    pub department: Option<String>,
    /// Hourly pay rate; must be greater than zero.
    pub hourly_rate: f64,
}

impl Employee {
    /// Builds an employee from a draft and an assigned id.
    pub fn from_draft(id: i64, draft: EmployeeDraft) -> Self {
        Employee {
            id,
            name: draft.name,
            department: draft.department,
            hourly_rate: draft.hourly_rate,
        }
    }

    /// Validates the fields owned by this record.
    ///
    /// # Examples
    ///
    /// ```
    /// use workforce_analytics::models::Employee;
    ///
    /// let employee = Employee {
    ///     id: 1,
    ///     name: "Ada".to_string(),
    ///     department: Some("Engineering".to_string()),
    ///     hourly_rate: 0.0,
    /// };
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        require_id(EntityKind::Employee, self.id)?;
        if self.name.trim().is_empty() {
            return Err(EngineError::invalid(
                EntityKind::Employee,
                "name",
                "must not be empty",
            ));
        }
        require_finite(EntityKind::Employee, "hourly_rate", self.hourly_rate)?;
        if self.hourly_rate <= 0.0 {
            return Err(EngineError::invalid(
                EntityKind::Employee,
                "hourly_rate",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Fields supplied when creating or replacing an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    /// Display name.
    pub name: String,
    /// Optional department label.
    #[serde(default)]
    pub department: Option<String>,
    /// Hourly pay rate.
    pub hourly_rate: f64,
}
