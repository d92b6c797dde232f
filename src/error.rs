//! Error types for the workforce analytics engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine and its collaborators can report.

use thiserror::Error;

use crate::models::EntityKind;

/// Boxed error carried by failures that wrap a foreign cause.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for the workforce analytics engine.
///
/// Computation never fails on data shape alone (dangling references and
/// zero denominators are handled inside the engine), so the variants here
/// describe configuration, storage, validation, ingestion and rendering
/// failures.
///
/// # Example
///
/// ```
/// use workforce_analytics::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/analytics.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/analytics.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or held invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The underlying data source could not produce a snapshot.
    #[error("Data source unavailable: {message}")]
    DataSourceUnavailable {
        /// A description of the read failure.
        message: String,
    },

    /// A record with the given id does not exist.
    #[error("{} not found: {id}", .entity.label())]
    NotFound {
        /// The kind of record that was looked up.
        entity: EntityKind,
        /// The id that was not found.
        id: i64,
    },

    /// A record failed write-time validation.
    #[error("Invalid {entity} field '{field}': {message}")]
    InvalidRecord {
        /// The kind of record being written.
        entity: EntityKind,
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An upload named a data type that is not ingestible.
    #[error("Unknown data type: {name}")]
    UnknownDataType {
        /// The name that was supplied.
        name: String,
    },

    /// A CSV row could not be ingested.
    #[error("CSV row {row}: {message}")]
    IngestError {
        /// The 1-based data row number (header excluded).
        row: usize,
        /// A description of the problem.
        message: String,
    },

    /// A report was requested in a format no renderer handles.
    #[error("Unsupported report format: {format}")]
    UnsupportedReportFormat {
        /// The format that was requested.
        format: String,
    },

    /// A renderer failed to produce a document.
    #[error("Failed to render {format} report: {source}")]
    RenderFailed {
        /// The report format being rendered.
        format: String,
        /// The underlying cause.
        #[source]
        source: BoxedCause,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidRecord`].
    pub fn invalid(entity: EntityKind, field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidRecord {
            entity,
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Wraps a renderer failure for the given format.
    pub fn render_failed(format: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        EngineError::RenderFailed {
            format: format.into(),
            source: source.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
