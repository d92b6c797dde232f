//! Workforce analytics engine
//!
//! This crate turns employee, project and timesheet records into cost,
//! revenue, ROI and profitability views. Project revenue is allocated to
//! contributors in proportion to the hours they logged, then aggregated per
//! employee, per project, per department and globally.
//!
//! Around the engine sit an in-memory record store, CSV ingestion, report
//! rendering and an axum HTTP API.

#![warn(missing_docs)]

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod report;
pub mod storage;
