//! In-memory record store.
//!
//! Records live in ordered maps behind a single [`RwLock`], so every
//! [`DataSource::load`] observes one consistent state and any number of
//! readers may proceed in parallel.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeeDraft, EntityKind, Project, ProjectDraft, TimesheetDraft, TimesheetEntry,
};

use super::{DataSource, Dataset};

/// Rows of one record kind, keyed by id.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    /// Stores `row` and moves `next_id` past `id`.
    ///
    /// Validation rejects `i64::MAX`, so the successor always exists.
    fn put(&mut self, id: i64, row: T) {
        self.next_id = self.next_id.max(id.saturating_add(1));
        self.rows.insert(id, row);
    }
}

/// All tables held by the store.
#[derive(Debug, Default)]
pub struct Tables {
    employees: Table<Employee>,
    projects: Table<Project>,
    timesheets: Table<TimesheetEntry>,
}

/// A record kind the store knows how to hold.
pub trait Record: Clone + Send + Sync + Sized + 'static {
    /// The kind reported in errors.
    const KIND: EntityKind;

    /// Fields supplied on create and update.
    type Draft;

    /// The record's id.
    fn id(&self) -> i64;

    /// Builds a record from an id and a draft.
    fn build(id: i64, draft: Self::Draft) -> Self;

    /// Validates the record's own fields.
    fn validate(&self) -> EngineResult<()>;

    /// Checks references to other records on create and update.
    fn check_references(&self, _tables: &Tables) -> EngineResult<()> {
        Ok(())
    }

    #[doc(hidden)]
    fn table(tables: &Tables) -> &Table<Self>;

    #[doc(hidden)]
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;
}

impl Record for Employee {
    const KIND: EntityKind = EntityKind::Employee;
    type Draft = EmployeeDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, draft: EmployeeDraft) -> Self {
        Employee::from_draft(id, draft)
    }

    fn validate(&self) -> EngineResult<()> {
        Employee::validate(self)
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.employees
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.employees
    }
}

impl Record for Project {
    const KIND: EntityKind = EntityKind::Project;
    type Draft = ProjectDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, draft: ProjectDraft) -> Self {
        Project::from_draft(id, draft)
    }

    fn validate(&self) -> EngineResult<()> {
        Project::validate(self)
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.projects
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.projects
    }
}

impl Record for TimesheetEntry {
    const KIND: EntityKind = EntityKind::Timesheet;
    type Draft = TimesheetDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, draft: TimesheetDraft) -> Self {
        TimesheetEntry::from_draft(id, draft)
    }

    fn validate(&self) -> EngineResult<()> {
        TimesheetEntry::validate(self)
    }

    fn check_references(&self, tables: &Tables) -> EngineResult<()> {
        if !tables.employees.contains(self.employee_id) {
            return Err(EngineError::invalid(
                EntityKind::Timesheet,
                "employee_id",
                format!("employee {} does not exist", self.employee_id),
            ));
        }
        if !tables.projects.contains(self.project_id) {
            return Err(EngineError::invalid(
                EntityKind::Timesheet,
                "project_id",
                format!("project {} does not exist", self.project_id),
            ));
        }
        Ok(())
    }

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.timesheets
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.timesheets
    }
}

/// Thread-safe in-memory implementation of [`DataSource`].
///
/// # Example
///
/// ```
/// use workforce_analytics::models::{Employee, EmployeeDraft};
/// use workforce_analytics::storage::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let created: Employee = store
///     .create(EmployeeDraft {
///         name: "Ada".to_string(),
///         department: None,
///         hourly_rate: 50.0,
///     })
///     .unwrap();
/// assert_eq!(created.id, 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the records of `dataset`.
    ///
    /// Records are validated but references are not checked.
    pub fn with_dataset(dataset: Dataset) -> EngineResult<Self> {
        let store = Self::new();
        store.upsert_all(dataset.employees)?;
        store.upsert_all(dataset.projects)?;
        store.upsert_all(dataset.timesheets)?;
        Ok(store)
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| EngineError::DataSourceUnavailable {
                message: "record store lock poisoned".to_string(),
            })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| EngineError::DataSourceUnavailable {
                message: "record store lock poisoned".to_string(),
            })
    }

    /// Creates a record with the next free id.
    pub fn create<T: Record>(&self, draft: T::Draft) -> EngineResult<T> {
        let mut tables = self.write()?;
        let id = T::table(&tables).next_id;
        let record = T::build(id, draft);
        record.validate()?;
        record.check_references(&tables)?;

        T::table_mut(&mut tables).put(id, record.clone());
        debug!(entity = %T::KIND, id, "record created");
        Ok(record)
    }

    /// Returns the record with `id`.
    pub fn get<T: Record>(&self, id: i64) -> EngineResult<T> {
        let tables = self.read()?;
        T::table(&tables)
            .rows
            .get(&id)
            .cloned()
            .ok_or(EngineError::NotFound { entity: T::KIND, id })
    }

    /// Returns every record of a kind, ordered by id.
    pub fn list<T: Record>(&self) -> EngineResult<Vec<T>> {
        let tables = self.read()?;
        Ok(T::table(&tables).rows.values().cloned().collect())
    }

    /// Replaces the record with `id`.
    pub fn update<T: Record>(&self, id: i64, draft: T::Draft) -> EngineResult<T> {
        let mut tables = self.write()?;
        if !T::table(&tables).contains(id) {
            return Err(EngineError::NotFound { entity: T::KIND, id });
        }
        let record = T::build(id, draft);
        record.validate()?;
        record.check_references(&tables)?;

        T::table_mut(&mut tables).put(id, record.clone());
        debug!(entity = %T::KIND, id, "record updated");
        Ok(record)
    }

    /// Removes and returns the record with `id`.
    ///
    /// Dependent timesheet entries are left in place.
    pub fn delete<T: Record>(&self, id: i64) -> EngineResult<T> {
        let mut tables = self.write()?;
        let removed = T::table_mut(&mut tables)
            .rows
            .remove(&id)
            .ok_or(EngineError::NotFound { entity: T::KIND, id })?;
        debug!(entity = %T::KIND, id, "record deleted");
        Ok(removed)
    }

    /// Inserts or replaces records by id.
    ///
    /// Every record is validated before the write lock is taken, so a
    /// failing batch leaves the store untouched.
    pub fn upsert_all<T: Record>(&self, records: Vec<T>) -> EngineResult<usize> {
        for record in &records {
            record.validate()?;
        }
        let mut tables = self.write()?;
        let table = T::table_mut(&mut tables);
        let count = records.len();
        for record in records {
            table.put(record.id(), record);
        }
        debug!(entity = %T::KIND, count, "records upserted");
        Ok(count)
    }
}

impl DataSource for InMemoryStore {
    fn load(&self) -> EngineResult<Dataset> {
        let tables = self.read()?;
        Ok(Dataset {
            employees: tables.employees.rows.values().cloned().collect(),
            projects: tables.projects.rows.values().cloned().collect(),
            timesheets: tables.timesheets.rows.values().cloned().collect(),
        })
    }
}
