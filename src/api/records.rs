//! CRUD handlers shared by the employee, project and timesheet routes.
//!
//! Each handler is generic over the stored [`Record`] type and, for writes,
//! the request body that converts into its draft.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::storage::Record;

use super::handlers::{error_response, json_rejection_response, json_response};
use super::state::AppState;

/// Handler for `GET /<entity>`.
pub(super) async fn list_records<T>(State(state): State<AppState>) -> Response
where
    T: Record + Serialize,
{
    let correlation_id = Uuid::new_v4();
    match state.store().list::<T>() {
        Ok(records) => {
            info!(
                correlation_id = %correlation_id,
                entity = %T::KIND,
                count = records.len(),
                "Listed records"
            );
            json_response(StatusCode::OK, records)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `GET /<entity>/:id`.
pub(super) async fn get_record<T>(State(state): State<AppState>, Path(id): Path<i64>) -> Response
where
    T: Record + Serialize,
{
    let correlation_id = Uuid::new_v4();
    match state.store().get::<T>(id) {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `POST /<entity>`.
pub(super) async fn create_record<R, T>(
    State(state): State<AppState>,
    payload: Result<Json<R>, JsonRejection>,
) -> Response
where
    R: DeserializeOwned + Into<T::Draft> + Send + 'static,
    T: Record + Serialize,
{
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, entity = %T::KIND, "Creating record");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    match state.store().create::<T>(request.into()) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                entity = %T::KIND,
                id = record.id(),
                "Record created"
            );
            json_response(StatusCode::CREATED, record)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `PUT /<entity>/:id`. Replaces every field.
pub(super) async fn update_record<R, T>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<R>, JsonRejection>,
) -> Response
where
    R: DeserializeOwned + Into<T::Draft> + Send + 'static,
    T: Record + Serialize,
{
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, entity = %T::KIND, id, "Updating record");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    match state.store().update::<T>(id, request.into()) {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `DELETE /<entity>/:id`.
///
/// Responds with `{"status": "deleted", "<entity>_id": id}`.
pub(super) async fn delete_record<T>(State(state): State<AppState>, Path(id): Path<i64>) -> Response
where
    T: Record,
{
    let correlation_id = Uuid::new_v4();
    match state.store().delete::<T>(id) {
        Ok(_) => {
            info!(
                correlation_id = %correlation_id,
                entity = %T::KIND,
                id,
                "Record deleted"
            );
            let mut body = Map::new();
            body.insert("status".to_string(), Value::from("deleted"));
            body.insert(format!("{}_id", T::KIND), Value::from(id));
            json_response(StatusCode::OK, Value::Object(body))
        }
        Err(err) => error_response(correlation_id, err),
    }
}
