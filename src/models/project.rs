//! Project model.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::entity::{require_finite, require_id, EntityKind};

/// A project with a fixed, externally supplied revenue figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for the project.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Total revenue; never derived from timesheets.
    pub revenue: f64,
}

impl Project {
    /// Builds a project from a draft and an assigned id.
    pub fn from_draft(id: i64, draft: ProjectDraft) -> Self {
        Project {
            id,
            name: draft.name,
            revenue: draft.revenue,
        }
    }

    /// Validates the fields owned by this record.
    pub fn validate(&self) -> EngineResult<()> {
        require_id(EntityKind::Project, self.id)?;
        if self.name.trim().is_empty() {
            return Err(EngineError::invalid(
                EntityKind::Project,
                "name",
                "must not be empty",
            ));
        }
        require_finite(EntityKind::Project, "revenue", self.revenue)?;
        if self.revenue < 0.0 {
            return Err(EngineError::invalid(
                EntityKind::Project,
                "revenue",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

/// Fields supplied when creating or replacing a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    /// Display name.
    pub name: String,
    /// Total revenue.
    pub revenue: f64,
}
