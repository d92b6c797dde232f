//! CSV ingestion into the record store.
//!
//! Each data kind has a fixed header:
//!
//! | Kind | Columns |
//! |---|---|
//! | employees | `id,name,department,hourly_rate` |
//! | projects | `id,name,revenue` |
//! | timesheets | `id,employee_id,project_id,hours_worked` |
//!
//! Rows are upserted by id. The whole upload is parsed and validated
//! before anything is stored.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Project, TimesheetEntry};
use crate::storage::{InMemoryStore, Record};

/// The table an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// Employee rows.
    Employees,
    /// Project rows.
    Projects,
    /// Timesheet rows.
    Timesheets,
}

impl DataKind {
    /// The table name as used in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Employees => "employees",
            DataKind::Projects => "projects",
            DataKind::Timesheets => "timesheets",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employees" => Ok(DataKind::Employees),
            "projects" => Ok(DataKind::Projects),
            "timesheets" => Ok(DataKind::Timesheets),
            other => Err(EngineError::UnknownDataType {
                name: other.to_string(),
            }),
        }
    }
}

/// Outcome of a successful ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    /// The table written to.
    pub table: DataKind,
    /// Number of rows upserted.
    pub rows_inserted: usize,
}

#[derive(Debug, Deserialize)]
struct EmployeeRow {
    id: i64,
    name: String,
    department: Option<String>,
    hourly_rate: f64,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            department: row.department.filter(|d| !d.is_empty()),
            hourly_rate: row.hourly_rate,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProjectRow {
    id: i64,
    name: String,
    revenue: f64,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            revenue: row.revenue,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TimesheetRow {
    id: i64,
    employee_id: i64,
    project_id: i64,
    hours_worked: f64,
}

impl From<TimesheetRow> for TimesheetEntry {
    fn from(row: TimesheetRow) -> Self {
        TimesheetEntry {
            id: row.id,
            employee_id: row.employee_id,
            project_id: row.project_id,
            hours_worked: row.hours_worked,
        }
    }
}

/// Parses and validates every row, numbering rows from 1 after the header.
fn parse_rows<R, T>(data: &[u8]) -> EngineResult<Vec<T>>
where
    R: DeserializeOwned + Into<T>,
    T: Record,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<R>().enumerate() {
        let row_number = index + 1;
        let record: T = row
            .map_err(|e| EngineError::IngestError {
                row: row_number,
                message: e.to_string(),
            })?
            .into();
        record.validate().map_err(|e| EngineError::IngestError {
            row: row_number,
            message: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

fn store_rows<R, T>(store: &InMemoryStore, data: &[u8]) -> EngineResult<usize>
where
    R: DeserializeOwned + Into<T>,
    T: Record,
{
    let records = parse_rows::<R, T>(data)?;
    store.upsert_all(records)
}

/// Parses `data` as CSV for `kind` and upserts the rows into `store`.
///
/// # Example
///
/// ```
/// use workforce_analytics::ingest::{ingest_csv, DataKind};
/// use workforce_analytics::storage::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let csv = b"id,name,revenue\n1,Portal,1200.0\n2,App,800.0\n";
/// let summary = ingest_csv(&store, DataKind::Projects, csv).unwrap();
/// assert_eq!(summary.rows_inserted, 2);
/// ```
pub fn ingest_csv(
    store: &InMemoryStore,
    kind: DataKind,
    data: &[u8],
) -> EngineResult<IngestSummary> {
    let rows_inserted = match kind {
        DataKind::Employees => store_rows::<EmployeeRow, Employee>(store, data)?,
        DataKind::Projects => store_rows::<ProjectRow, Project>(store, data)?,
        DataKind::Timesheets => store_rows::<TimesheetRow, TimesheetEntry>(store, data)?,
    };
    info!(table = %kind, rows_inserted, "Ingested CSV data");
    Ok(IngestSummary {
        table: kind,
        rows_inserted,
    })
}

/// Reads a CSV file and ingests it.
///
/// A missing file is reported as `ConfigNotFound`, since seed paths come
/// from configuration. Any other read failure is `DataSourceUnavailable`
/// and carries the underlying cause.
pub fn ingest_file<P: AsRef<Path>>(
    store: &InMemoryStore,
    kind: DataKind,
    path: P,
) -> EngineResult<IngestSummary> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => EngineError::ConfigNotFound {
            path: path.display().to_string(),
        },
        _ => EngineError::DataSourceUnavailable {
            message: format!("failed to read {}: {e}", path.display()),
        },
    })?;
    ingest_csv(store, kind, &data)
}
