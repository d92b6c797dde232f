//! Integration tests for the workforce analytics HTTP API.
//!
//! This test suite covers:
//! - The four analytics views and the combined snapshot
//! - Proportional revenue allocation scenarios
//! - Absent ratios serialized as null
//! - Record CRUD and CSV uploads
//! - Report downloads
//! - Error cases

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use workforce_analytics::api::{create_router, AppState};
use workforce_analytics::config::{AppConfig, ConfigLoader};
use workforce_analytics::ingest::{ingest_file, DataKind};
use workforce_analytics::storage::InMemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

const TOLERANCE: f64 = 1e-6;

fn empty_state() -> AppState {
    AppState::new(Arc::new(InMemoryStore::new()), &AppConfig::default())
}

/// State seeded from the CSV files named in `config/analytics.yaml`.
fn seeded_state() -> AppState {
    let config = ConfigLoader::load("./config/analytics.yaml")
        .expect("Failed to load config")
        .into_config();
    let store = Arc::new(InMemoryStore::new());
    let seed = &config.seed;
    for (kind, path) in [
        (DataKind::Employees, &seed.employees),
        (DataKind::Projects, &seed.projects),
        (DataKind::Timesheets, &seed.timesheets),
    ] {
        let path = path.as_ref().expect("seed path configured");
        ingest_file(&store, kind, path).expect("Failed to ingest seed file");
    }
    AppState::new(store, &config)
}

fn router(state: &AppState) -> Router {
    create_router(state.clone())
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
    send(
        state,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post_json(state: &AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        state,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn upload(state: &AppState, data_type: &str, csv: &str) -> (StatusCode, Value) {
    send(
        state,
        Request::builder()
            .method("POST")
            .uri(format!("/upload/{data_type}"))
            .header("Content-Type", "text/csv")
            .body(Body::from(csv.to_string()))
            .unwrap(),
    )
    .await
}

fn number(value: &Value) -> f64 {
    value.as_f64().unwrap_or_else(|| panic!("expected number, got {value}"))
}

fn assert_close(actual: &Value, expected: f64) {
    let actual = number(actual);
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= TOLERANCE * scale,
        "expected {expected}, got {actual}"
    );
}

/// Two employees split Project X; Project Y has no hours.
async fn scenario_state() -> AppState {
    let state = empty_state();
    for body in [
        json!({ "name": "A", "department": "Delivery", "hourly_rate": 50.0 }),
        json!({ "name": "B", "department": "Delivery", "hourly_rate": 50.0 }),
    ] {
        let (status, _) = post_json(&state, "/employees", body).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    for body in [
        json!({ "name": "X", "revenue": 1000.0 }),
        json!({ "name": "Y", "revenue": 500.0 }),
    ] {
        let (status, _) = post_json(&state, "/projects", body).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    for body in [
        json!({ "employee_id": 1, "project_id": 1, "hours_worked": 10.0 }),
        json!({ "employee_id": 2, "project_id": 1, "hours_worked": 10.0 }),
    ] {
        let (status, _) = post_json(&state, "/timesheets", body).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    state
}

// =============================================================================
// Allocation Scenarios
// =============================================================================

#[tokio::test]
async fn test_equal_split_between_two_employees() {
    let state = scenario_state().await;
    let (status, employees) = get(&state, "/analytics/employee-roi").await;

    assert_eq!(status, StatusCode::OK);
    let employees = employees.as_array().unwrap();
    assert_eq!(employees.len(), 2);
    for employee in employees {
        assert_close(&employee["total_revenue"], 500.0);
        assert_close(&employee["total_cost"], 500.0);
        assert_close(&employee["roi"], 1.0);
    }
    assert_eq!(employees[0]["employee_name"], "A");
    assert_eq!(employees[1]["employee_name"], "B");
}

#[tokio::test]
async fn test_project_without_hours_keeps_its_revenue() {
    let state = scenario_state().await;
    let (status, projects) = get(&state, "/analytics/project-profit").await;

    assert_eq!(status, StatusCode::OK);
    let y = projects
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["project_name"] == "Y")
        .expect("project Y listed");
    assert_eq!(number(&y["total_hours"]), 0.0);
    assert_eq!(number(&y["total_cost"]), 0.0);
    assert_eq!(number(&y["total_revenue"]), 500.0);
    assert_eq!(number(&y["profit"]), 500.0);
    assert_close(&y["profit_margin"], 1.0);

    // Y contributes nothing to employees or departments
    let (_, departments) = get(&state, "/analytics/department-summary").await;
    assert_eq!(departments.as_array().unwrap().len(), 1);
    assert_eq!(departments[0]["department"], "Delivery");
    assert_close(&departments[0]["total_revenue"], 1000.0);
}

#[tokio::test]
async fn test_overall_counts_each_project_once() {
    let state = scenario_state().await;
    let (status, overall) = get(&state, "/analytics/overall").await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&overall["total_cost"], 1000.0);
    assert_close(&overall["total_revenue"], 1500.0);
    assert_close(&overall["roi"], 1.5);
}

// =============================================================================
// Empty and Absent Values
// =============================================================================

#[tokio::test]
async fn test_no_timesheets_yields_empty_views() {
    let state = empty_state();
    post_json(&state, "/projects", json!({ "name": "X", "revenue": 1000.0 })).await;
    post_json(&state, "/projects", json!({ "name": "Y", "revenue": 250.0 })).await;

    let (_, employees) = get(&state, "/analytics/employee-roi").await;
    assert_eq!(employees, json!([]));

    let (_, departments) = get(&state, "/analytics/department-summary").await;
    assert_eq!(departments, json!([]));

    let (status, overall) = get(&state, "/analytics/overall").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(number(&overall["total_cost"]), 0.0);
    assert_close(&overall["total_revenue"], 1250.0);
    assert!(overall["roi"].is_null());
}

#[tokio::test]
async fn test_absent_ratios_serialize_as_null_not_zero() {
    let state = seeded_state();
    let (_, projects) = get(&state, "/analytics/project-profit").await;

    let audit = projects
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["project_name"] == "Internal Audit")
        .expect("Internal Audit listed");
    assert!(audit.as_object().unwrap().contains_key("profit_margin"));
    assert!(audit["profit_margin"].is_null());
    assert_close(&audit["profit"], -880.0);
}

// =============================================================================
// Seeded Dataset
// =============================================================================

#[tokio::test]
async fn test_seeded_overall_summary() {
    let state = seeded_state();
    let (status, overall) = get(&state, "/analytics/overall").await;

    assert_eq!(status, StatusCode::OK);
    assert_close(&overall["total_cost"], 32770.0);
    assert_close(&overall["total_revenue"], 79500.0);
    assert_close(&overall["roi"], 79500.0 / 32770.0);
}

#[tokio::test]
async fn test_seeded_departments_include_unassigned_group() {
    let state = seeded_state();
    let (_, departments) = get(&state, "/analytics/department-summary").await;
    let departments = departments.as_array().unwrap();

    let names: Vec<&Value> = departments.iter().map(|d| &d["department"]).collect();
    assert_eq!(
        names,
        vec![
            &Value::Null,
            &json!("Design"),
            &json!("Engineering"),
            &json!("Sales"),
        ]
    );

    // Dmitri has no department: 60h on Data Migration
    assert_close(&departments[0]["total_hours"], 60.0);
    assert_close(&departments[0]["total_cost"], 2400.0);
    assert_close(&departments[0]["total_revenue"], 7125.0);

    let engineering = &departments[2];
    assert_close(&engineering["total_hours"], 376.0);
    assert_close(&engineering["total_cost"], 22680.0);

    let department_hours: f64 = departments.iter().map(|d| number(&d["total_hours"])).sum();
    let (_, employees) = get(&state, "/analytics/employee-roi").await;
    let employee_hours: f64 = employees
        .as_array()
        .unwrap()
        .iter()
        .map(|e| number(&e["total_hours"]))
        .sum();
    assert!((department_hours - employee_hours).abs() < TOLERANCE);
}

#[tokio::test]
async fn test_seeded_project_revenue_is_conserved() {
    let state = seeded_state();
    let (_, employees) = get(&state, "/analytics/employee-roi").await;

    let allocated: f64 = employees
        .as_array()
        .unwrap()
        .iter()
        .map(|e| number(&e["total_revenue"]))
        .sum();
    // Internal Audit has no revenue, so every other project is fully allocated
    assert_close(&json!(allocated), 79500.0);
}

#[tokio::test]
async fn test_snapshot_carries_metadata_and_all_views() {
    let state = seeded_state();
    let (status, snapshot) = get(&state, "/analytics/snapshot").await;

    assert_eq!(status, StatusCode::OK);
    assert!(snapshot["snapshot_id"].is_string());
    assert!(snapshot["generated_at"].is_string());
    assert_eq!(snapshot["engine_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(snapshot["employee_roi"].as_array().unwrap().len(), 5);
    assert_eq!(snapshot["project_profit"].as_array().unwrap().len(), 4);
    assert_eq!(snapshot["department_summary"].as_array().unwrap().len(), 4);
    assert_close(&snapshot["overall"]["total_revenue"], 79500.0);
}

#[tokio::test]
async fn test_repeated_queries_are_identical() {
    let state = seeded_state();
    let (_, first) = get(&state, "/analytics/employee-roi").await;
    let (_, second) = get(&state, "/analytics/employee-roi").await;
    assert_eq!(first, second);
}

// =============================================================================
// Records and Uploads
// =============================================================================

#[tokio::test]
async fn test_deleted_employee_entries_are_skipped() {
    let state = scenario_state().await;
    let (status, deleted) = send(
        &state,
        Request::builder()
            .method("DELETE")
            .uri("/employees/2")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "status": "deleted", "employee_id": 2 }));

    // B's entry no longer resolves, so A receives all of X
    let (status, employees) = get(&state, "/analytics/employee-roi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(employees.as_array().unwrap().len(), 1);
    assert_close(&employees[0]["total_revenue"], 1000.0);
    assert_close(&employees[0]["roi"], 2.0);

    // The project view keeps its authoritative revenue
    let (_, projects) = get(&state, "/analytics/project-profit").await;
    assert_close(&projects[0]["total_revenue"], 1000.0);
    assert_close(&projects[0]["total_hours"], 10.0);
}

#[tokio::test]
async fn test_upload_merges_by_id() {
    let state = empty_state();
    let (status, body) = upload(
        &state,
        "employees",
        "id,name,department,hourly_rate\n7,Ada,,30\n9,Grace,Ops,40\n",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "success", "table": "employees", "rows_inserted": 2 })
    );

    upload(&state, "employees", "id,name,department,hourly_rate\n7,Ada L,R&D,35\n").await;

    let (_, ada) = get(&state, "/employees/7").await;
    assert_eq!(ada["name"], "Ada L");
    assert_eq!(ada["department"], "R&D");

    let (_, grace) = get(&state, "/employees/9").await;
    assert_eq!(grace["name"], "Grace");

    // New records continue after the highest ingested id
    let (_, created) = post_json(
        &state,
        "/employees",
        json!({ "name": "Linus", "hourly_rate": 20.0 }),
    )
    .await;
    assert_eq!(created["id"], 10);
    assert!(created["department"].is_null());
}

#[tokio::test]
async fn test_invalid_upload_row_rejects_whole_file() {
    let state = empty_state();
    let (status, body) = upload(
        &state,
        "projects",
        "id,name,revenue\n1,X,100\n2,Y,not-a-number\n",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INGEST_ERROR");

    let (_, projects) = get(&state, "/projects").await;
    assert_eq!(projects, json!([]));
}

#[tokio::test]
async fn test_rejects_non_positive_hourly_rate() {
    let state = empty_state();
    let (status, body) = post_json(
        &state,
        "/employees",
        json!({ "name": "Zero", "hourly_rate": 0.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_field_is_validation_error() {
    let state = empty_state();
    let (status, body) = post_json(&state, "/projects", json!({ "name": "X" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("revenue"));
}

#[tokio::test]
async fn test_update_missing_timesheet_returns_404() {
    let state = scenario_state().await;
    let (status, body) = send(
        &state,
        Request::builder()
            .method("PUT")
            .uri("/timesheets/99")
            .header("Content-Type", "application/json")
            .body(Body::from(
                json!({ "employee_id": 1, "project_id": 1, "hours_worked": 1.0 }).to_string(),
            ))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Timesheet not found: 99");
}

// =============================================================================
// Reports
// =============================================================================

async fn download(state: &AppState, format: &str) -> (StatusCode, String, String, Vec<u8>) {
    let response = router(state)
        .oneshot(
            Request::builder()
                .uri(format!("/report/{format}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let header_value = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default()
    };
    let content_type = header_value(header::CONTENT_TYPE);
    let disposition = header_value(header::CONTENT_DISPOSITION);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, disposition, body.to_vec())
}

#[tokio::test]
async fn test_csv_report_download() {
    let state = seeded_state();
    let (status, content_type, disposition, body) = download(&state, "csv").await;
    let body = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/csv"));
    assert!(disposition.ends_with(".csv\""));
    assert!(body.starts_with("Employee ROI\n"));
    assert!(body.contains("\nProject Profit\n"));
    assert!(body.contains("\nDepartment Summary\n"));
    assert!(body.contains("\nOverall Summary\n"));
    // Internal Audit has no margin
    assert!(body.contains("4,Internal Audit,16,880,0,-880,N/A\n"));
}

#[tokio::test]
async fn test_text_report_download() {
    let state = seeded_state();
    let (status, content_type, disposition, body) = download(&state, "text").await;
    let body = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));
    assert!(disposition.ends_with(".txt\""));
    assert!(body.contains("Overall Summary"));
    assert!(body.contains("$79,500.00"));
    assert!(body.contains("$32,770.00"));
    assert!(body.contains("Top Employees by ROI"));

    // Dmitri (ROI 2.97) outranks Ben (ROI 2.17)
    let dmitri = body.find("Dmitri Volkov").unwrap();
    let ben = body.find("Ben Carter").unwrap();
    assert!(dmitri < ben);
}

#[tokio::test]
async fn test_excel_report_download() {
    let state = seeded_state();
    let (status, content_type, disposition, body) = download(&state, "excel").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert!(disposition.ends_with(".xlsx\""));
    assert!(body.starts_with(b"PK"));
}

#[tokio::test]
async fn test_pdf_report_download() {
    let state = seeded_state();
    let (status, content_type, disposition, body) = download(&state, "pdf").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/pdf");
    assert!(disposition.ends_with(".pdf\""));
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_unknown_report_format() {
    let state = empty_state();
    let (status, body) = get(&state, "/report/docx").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REPORT_TYPE");
}
