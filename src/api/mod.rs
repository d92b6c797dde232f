//! HTTP API module for the workforce analytics engine.
//!
//! This module provides the REST endpoints for the analytics views,
//! report downloads, record management and CSV uploads.

mod handlers;
mod records;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EmployeeRequest, ProjectRequest, TimesheetRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
