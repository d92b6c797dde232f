//! HTTP request handlers for the analytics API.
//!
//! This module contains the router and the handlers for the analytics
//! views, report downloads and CSV uploads. Record CRUD lives in
//! [`super::records`].

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::ingest::{ingest_csv, DataKind};
use crate::models::{Employee, Project, TimesheetEntry};
use crate::report::{render_report, ReportFormat};

use super::records::{create_record, delete_record, get_record, list_records, update_record};
use super::request::{EmployeeRequest, ProjectRequest, TimesheetRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analytics/employee-roi", get(employee_roi_handler))
        .route("/analytics/project-profit", get(project_profit_handler))
        .route(
            "/analytics/department-summary",
            get(department_summary_handler),
        )
        .route("/analytics/overall", get(overall_handler))
        .route("/analytics/snapshot", get(snapshot_handler))
        .route("/report/:format", get(report_handler))
        .route("/upload/:data_type", post(upload_handler))
        .route(
            "/employees",
            get(list_records::<Employee>).post(create_record::<EmployeeRequest, Employee>),
        )
        .route(
            "/employees/:id",
            get(get_record::<Employee>)
                .put(update_record::<EmployeeRequest, Employee>)
                .delete(delete_record::<Employee>),
        )
        .route(
            "/projects",
            get(list_records::<Project>).post(create_record::<ProjectRequest, Project>),
        )
        .route(
            "/projects/:id",
            get(get_record::<Project>)
                .put(update_record::<ProjectRequest, Project>)
                .delete(delete_record::<Project>),
        )
        .route(
            "/timesheets",
            get(list_records::<TimesheetEntry>)
                .post(create_record::<TimesheetRequest, TimesheetEntry>),
        )
        .route(
            "/timesheets/:id",
            get(get_record::<TimesheetEntry>)
                .put(update_record::<TimesheetRequest, TimesheetEntry>)
                .delete(delete_record::<TimesheetEntry>),
        )
        .with_state(state)
}

/// Serializes `body` as a JSON response with `status`.
pub(super) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Logs `err` against the request and converts it to an error response.
pub(super) fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    api_error.into_response()
}

/// Converts a JSON body rejection into a 400 response.
pub(super) fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

/// Runs one analytics view and wraps the outcome.
fn view_response<T: Serialize>(
    view: &'static str,
    compute: impl FnOnce() -> EngineResult<T>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, view, "Processing analytics request");

    let start_time = Instant::now();
    match compute() {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                view,
                duration_us = start_time.elapsed().as_micros(),
                "Analytics view computed"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /analytics/employee-roi.
async fn employee_roi_handler(State(state): State<AppState>) -> Response {
    view_response("employee_roi", || state.engine().employee_roi())
}

/// Handler for GET /analytics/project-profit.
async fn project_profit_handler(State(state): State<AppState>) -> Response {
    view_response("project_profit", || state.engine().project_profit())
}

/// Handler for GET /analytics/department-summary.
async fn department_summary_handler(State(state): State<AppState>) -> Response {
    view_response("department_summary", || state.engine().department_summary())
}

/// Handler for GET /analytics/overall.
async fn overall_handler(State(state): State<AppState>) -> Response {
    view_response("overall", || state.engine().overall())
}

/// Handler for GET /analytics/snapshot.
///
/// Returns all four views computed from a single read of the store.
async fn snapshot_handler(State(state): State<AppState>) -> Response {
    view_response("snapshot", || state.engine().snapshot())
}

/// Handler for GET /report/:format.
///
/// Computes a fresh snapshot and returns it as a downloadable document.
async fn report_handler(State(state): State<AppState>, Path(format): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, format = %format, "Processing report request");

    let rendered = format
        .parse::<ReportFormat>()
        .and_then(|format| {
            let snapshot = state.engine().snapshot()?;
            render_report(format, &snapshot, state.reports())
        });

    match rendered {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                filename = %report.filename,
                bytes = report.bytes.len(),
                "Report generated"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, report.media_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", report.filename),
                    ),
                ],
                report.bytes,
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /upload/:data_type.
///
/// The request body is the raw CSV file.
async fn upload_handler(
    State(state): State<AppState>,
    Path(data_type): Path<String>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        data_type = %data_type,
        bytes = body.len(),
        "Processing upload"
    );

    let outcome = data_type
        .parse::<DataKind>()
        .and_then(|kind| ingest_csv(state.store(), kind, &body));

    match outcome {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                table = %summary.table,
                rows_inserted = summary.rows_inserted,
                "Upload ingested"
            );
            json_response(
                StatusCode::OK,
                json!({
                    "status": "success",
                    "table": summary.table,
                    "rows_inserted": summary.rows_inserted,
                }),
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}
