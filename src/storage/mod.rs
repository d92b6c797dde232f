//! Storage collaborator for the analytics engine.
//!
//! The engine only ever reads through [`DataSource`], receiving an
//! independent [`Dataset`] per call. [`InMemoryStore`] is the bundled
//! implementation and also provides the create/read/update/delete
//! surface used by the HTTP API and CSV ingestion.

mod memory;

pub use memory::{InMemoryStore, Record};

use crate::error::EngineResult;
use crate::models::{Employee, Project, TimesheetEntry};

/// A consistent, owned copy of every stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// All employees.
    pub employees: Vec<Employee>,
    /// All projects.
    pub projects: Vec<Project>,
    /// All timesheet entries.
    pub timesheets: Vec<TimesheetEntry>,
}

impl Dataset {
    /// Creates a dataset from its three tables.
    pub fn new(
        employees: Vec<Employee>,
        projects: Vec<Project>,
        timesheets: Vec<TimesheetEntry>,
    ) -> Self {
        Self {
            employees,
            projects,
            timesheets,
        }
    }
}

/// A read-only source of dataset snapshots.
///
/// Each call to [`load`](DataSource::load) must return a snapshot that is
/// internally consistent; the engine never retries a failed read.
pub trait DataSource: Send + Sync {
    /// Reads the current state of every table.
    ///
    /// Returns [`DataSourceUnavailable`](crate::error::EngineError::DataSourceUnavailable) when
    /// the backing store cannot be read.
    fn load(&self) -> EngineResult<Dataset>;
}

impl DataSource for Dataset {
    fn load(&self) -> EngineResult<Dataset> {
        Ok(self.clone())
    }
}
