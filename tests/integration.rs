//! Integration tests for the muster roll service.
//!
//! This suite drives the HTTP router end to end and checks the aggregation
//! properties with proptest:
//! - Muster roll building (sparse, dense, filtered, paged)
//! - Single-status classification
//! - Spreadsheet and document exports
//! - Day-by-day summary with partial failures
//! - Sequenced view refresh
//! - Error cases

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;

use muster_roll::aggregation::{
    AggregationMode, PeriodCalendar, RowFilter, aggregate, compute_totals,
};
use muster_roll::api::{AppState, create_router};
use muster_roll::config::{ConfigLoader, EngineConfig, ShiftsConfig};
use muster_roll::models::{
    AttendanceRecord, EmployeeRef, EmployeeSummary, ReportPeriod, Shift, StepEvent,
};
use muster_roll::source::InMemorySource;

// =============================================================================
// Test Helpers
// =============================================================================

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

fn create_router_with(source: InMemorySource) -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    create_router(AppState::new(config, Arc::new(source)))
}

/// Router whose reports are read in India Standard Time.
fn create_router_in_ist() -> Router {
    let base = ConfigLoader::load("./config/default").expect("Failed to load config");
    let mut report = base.report().clone();
    report.timezone = "+05:30".parse().unwrap();
    let config = EngineConfig::new(
        base.organization().clone(),
        ShiftsConfig {
            cutoffs: *base.config().shift_cutoffs(),
        },
        report,
        base.source().clone(),
    );
    create_router(AppState::new(
        ConfigLoader::from_config(config),
        Arc::new(InMemorySource::default()),
    ))
}

fn create_router_for_test() -> Router {
    create_router_with(InMemorySource::default())
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, disposition, body.to_vec())
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, _, bytes) = send(router, post(uri, &body)).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (status, _, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// E1 closes a morning session on day 5; E2 is still working on day 6.
fn scenario_records() -> Value {
    json!([
        {
            "employeeId": "E1",
            "shift": "morning",
            "stepIn": "2026-01-05T07:15:00",
            "stepOut": "2026-01-05T15:02:00"
        },
        {
            "employeeId": "E2",
            "shift": "morning",
            "stepIn": "2026-01-06T08:30:00"
        }
    ])
}

fn scenario_period() -> Value {
    json!({"from": "2026-01-05", "to": "2026-01-06"})
}

fn roster_json() -> Value {
    json!([
        {"_id": "E1", "name": "Asha Patel", "designation": "Guard", "shift": "morning"},
        {"_id": "E2", "name": "Ravi Kumar", "designation": "Supervisor", "shift": "morning"},
        {"_id": "E3", "name": "Meena Rao", "shift": "night"}
    ])
}

fn record(employee: &str, site: &str, step_in: &str) -> AttendanceRecord {
    AttendanceRecord {
        id: None,
        employee_id: EmployeeRef::Id(employee.to_string()),
        shift: Some(Shift::Morning),
        step_in: Some(StepEvent::at(
            muster_roll::models::parse_timestamp(step_in).unwrap(),
        )),
        step_out: None,
        site_id: Some(site.to_string()),
    }
}

fn employee(id: &str, name: &str) -> EmployeeSummary {
    EmployeeSummary {
        id: id.to_string(),
        name: name.to_string(),
        designation: None,
        shift: Some(Shift::Morning),
    }
}

// =============================================================================
// Muster roll
// =============================================================================

#[tokio::test]
async fn test_two_record_scenario() {
    let router = create_router_for_test();
    let (status, json) = post_json(
        router,
        "/muster-roll",
        json!({"records": scenario_records(), "period": scenario_period()}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = json["table"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["employeeId"], "E1");
    assert_eq!(rows[0]["name"], "Unknown");
    assert_eq!(rows[0]["cells"][0]["code"], "P");
    assert_eq!(rows[0]["cells"][0]["stepInTime"], "07:15");
    assert_eq!(rows[0]["cells"][0]["stepOutTime"], "15:02");
    assert_eq!(rows[0]["cells"][1]["code"], "-");

    assert_eq!(rows[1]["employeeId"], "E2");
    assert_eq!(rows[1]["cells"][0]["code"], "-");
    assert_eq!(rows[1]["cells"][1]["code"], "P");
    assert!(rows[1]["cells"][1].get("stepOutTime").is_none());

    assert_eq!(json["totals"]["day_totals"]["2026-01-05"], 1);
    assert_eq!(json["totals"]["day_totals"]["2026-01-06"], 1);
    assert_eq!(json["totals"]["grand_total"], 2);
    assert_eq!(json["table"]["totals"]["dayTotals"], json!([1, 1]));
    assert_eq!(json["table"]["headers"], json!(["SR", "NAME", "DESIGNATION", "SHIFT", "5", "6", "TOTAL"]));
}

#[tokio::test]
async fn test_scenario_statuses() {
    let router = create_router_for_test();
    let (status, json) = post_json(
        router,
        "/attendance/status",
        json!({"records": scenario_records()}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["status"], "Present");
    // Still working, so the hour-8 step-in is not judged late.
    assert_eq!(json[1]["status"], "Working");
    assert_eq!(json[1]["date"], "2026-01-06");
}

#[tokio::test]
async fn test_lateness_boundary_is_exclusive() {
    let router = create_router_for_test();
    let records = json!([
        {"employeeId": "a", "shift": "morning", "stepIn": "2026-01-05T07:59:00", "stepOut": "2026-01-05T15:00:00"},
        {"employeeId": "b", "shift": "morning", "stepIn": "2026-01-05T08:00:00", "stepOut": "2026-01-05T15:00:00"},
        {"employeeId": "c", "stepIn": "2026-01-05T12:00:00", "stepOut": "2026-01-05T15:00:00"},
        {"employeeId": "d"}
    ]);
    let (_, json) = post_json(router, "/attendance/status", json!({"records": records})).await;

    assert_eq!(json[0]["status"], "Present");
    assert_eq!(json[1]["status"], "Late");
    assert_eq!(json[2]["status"], "Present");
    assert_eq!(json[3]["status"], "Absent");
}

#[tokio::test]
async fn test_utc_step_in_is_late_in_reporting_zone() {
    let records = json!([{
        "employeeId": "a",
        "shift": "morning",
        "stepIn": "2026-01-06T03:00:00.000Z",
        "stepOut": "2026-01-06T10:00:00.000Z"
    }]);
    let (status, json) = post_json(
        create_router_in_ist(),
        "/attendance/status",
        json!({"records": records}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 03:00Z is 08:30 in the reporting zone.
    assert_eq!(json[0]["status"], "Late");
    assert_eq!(json[0]["date"], "2026-01-06");
}

#[tokio::test]
async fn test_utc_night_step_in_lands_on_local_day() {
    let body = json!({
        "records": [{
            "employeeId": "E3",
            "shift": "night",
            "stepIn": "2026-01-05T19:00:00.000Z"
        }],
        "employees": roster_json(),
        "period": scenario_period(),
        "mode": "dense"
    });
    let (status, json) = post_json(create_router_in_ist(), "/muster-roll", body).await;

    assert_eq!(status, StatusCode::OK);
    let rows = json["table"]["rows"].as_array().unwrap();
    let meena = rows.iter().find(|r| r["name"] == "Meena Rao").unwrap();
    assert_eq!(meena["cells"][0]["code"], "A");
    assert_eq!(meena["cells"][1]["code"], "P");
    assert_eq!(meena["cells"][1]["stepInTime"], "00:30");
    assert_eq!(json["totals"]["day_totals"]["2026-01-05"], 0);
    assert_eq!(json["totals"]["day_totals"]["2026-01-06"], 1);
}

#[tokio::test]
async fn test_dense_roll_includes_whole_roster() {
    let router = create_router_for_test();
    let (status, json) = post_json(
        router,
        "/muster-roll",
        json!({
            "records": scenario_records(),
            "employees": roster_json(),
            "period": scenario_period(),
            "mode": "dense"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = json["table"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["name"], "Asha Patel");
    assert_eq!(rows[0]["cells"][1]["code"], "A");
    assert_eq!(rows[2]["name"], "Meena Rao");
    assert_eq!(rows[2]["designation"], "N/A");
    assert_eq!(rows[2]["shift"], "Night");
    assert_eq!(rows[2]["cells"], json!([{"code": "A"}, {"code": "A"}]));
    assert_eq!(json["totals"]["grand_total"], 2);
}

#[tokio::test]
async fn test_filter_recomputes_totals() {
    let router = create_router_for_test();
    let (_, json) = post_json(
        router,
        "/muster-roll",
        json!({
            "records": scenario_records(),
            "employees": roster_json(),
            "period": scenario_period(),
            "mode": "dense",
            "filter": {"search": "supervisor"}
        }),
    )
    .await;

    let rows = json["table"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["employeeId"], "E2");
    assert_eq!(rows[0]["sr"], 1);
    assert_eq!(json["totals"]["grand_total"], 1);
    assert_eq!(json["table"]["totals"]["dayTotals"], json!([0, 1]));
}

#[tokio::test]
async fn test_paging_keeps_serial_numbers_and_full_totals() {
    let router = create_router_for_test();
    let (_, json) = post_json(
        router,
        "/muster-roll",
        json!({
            "records": scenario_records(),
            "employees": roster_json(),
            "period": scenario_period(),
            "mode": "dense",
            "page": 2,
            "pageSize": 2
        }),
    )
    .await;

    assert_eq!(json["table"]["page"], 2);
    assert_eq!(json["table"]["totalPages"], 2);
    assert_eq!(json["table"]["totalRows"], 3);
    let rows = json["table"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["sr"], 3);
    assert_eq!(json["table"]["totals"]["grandTotal"], 2);
}

#[tokio::test]
async fn test_duplicate_same_day_records_are_reported() {
    let router = create_router_for_test();
    let records = json!([
        {"employeeId": "E1", "stepIn": "2026-01-05T07:00:00"},
        {"employeeId": "E1", "stepIn": "2026-01-05T13:45:00"}
    ]);
    let (_, json) = post_json(
        router,
        "/muster-roll",
        json!({"records": records, "period": scenario_period()}),
    )
    .await;

    assert_eq!(json["duplicates"], json!([{"employee_id": "E1", "date": "2026-01-05"}]));
    assert_eq!(json["table"]["rows"][0]["cells"][0]["stepInTime"], "13:45");
    assert_eq!(json["totals"]["grand_total"], 1);
}

#[tokio::test]
async fn test_month_period() {
    let router = create_router_for_test();
    let (status, json) = post_json(
        router,
        "/muster-roll",
        json!({"records": scenario_records(), "period": {"month": 2, "year": 2028}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["period"], "February 2028");
    assert_eq!(json["to"], "2028-02-29");
    assert!(json["table"]["rows"].as_array().unwrap().is_empty());
    assert_eq!(json["table"]["headers"].as_array().unwrap().len(), 4 + 29 + 1);
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_inverted_period_is_rejected() {
    let router = create_router_for_test();
    let (status, json) = post_json(
        router,
        "/muster-roll",
        json!({"records": [], "period": {"from": "2026-01-10", "to": "2026-01-05"}}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_missing_period_is_rejected() {
    let router = create_router_for_test();
    let (status, json) = post_json(router, "/muster-roll", json!({"records": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let router = create_router_for_test();
    let request = Request::builder()
        .method("POST")
        .uri("/muster-roll")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, bytes) = send(router, request).await;
    let json: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_bad_timestamp_is_rejected() {
    let router = create_router_for_test();
    let (status, _) = post_json(
        router,
        "/muster-roll",
        json!({
            "records": [{"employeeId": "E1", "stepIn": "yesterday"}],
            "period": scenario_period()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Exports
// =============================================================================

#[tokio::test]
async fn test_xlsx_export_is_named_and_attached() {
    let router = create_router_for_test();
    let body = json!({"records": scenario_records(), "period": scenario_period()});
    let (status, disposition, bytes) =
        send(router, post("/muster-roll/export?format=xlsx", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"All_Sites_MusterRoll_2026_01.xlsx\"")
    );
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn test_text_export_for_site() {
    let router = create_router_for_test();
    let body = json!({
        "records": scenario_records(),
        "employees": roster_json(),
        "period": scenario_period(),
        "mode": "dense",
        "scope": {"kind": "site", "id": "s1", "name": "North Gate"}
    });
    let (status, disposition, bytes) =
        send(router, post("/muster-roll/export?format=txt", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"North_Gate_MusterRoll_2026_01.txt\"")
    );
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("Northfield Facility Services"));
    assert!(text.contains("Scope: North Gate"));
    assert!(text.contains("P 07:15 15:02"));
    assert!(text.contains("Page 1 of 1"));
}

#[cfg(feature = "pdf")]
#[tokio::test]
async fn test_pdf_export() {
    let router = create_router_for_test();
    let body = json!({"records": scenario_records(), "period": {"month": 1, "year": 2026}});
    let (status, disposition, bytes) =
        send(router, post("/muster-roll/export?format=pdf", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(disposition.unwrap().ends_with("MusterRoll_2026_01.pdf\""));
    assert!(bytes.starts_with(b"%PDF"));
}

#[cfg(not(feature = "pdf"))]
#[tokio::test]
async fn test_pdf_export_without_backend() {
    let body = json!({"records": scenario_records(), "period": {"month": 1, "year": 2026}});

    let (status, _, _) = send(
        create_router_for_test(),
        post("/muster-roll/export?format=pdf", &body),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);

    let (status, disposition, _) = send(
        create_router_for_test(),
        post("/muster-roll/export?format=pdf&fallback=true", &body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(disposition.unwrap().ends_with(".txt\""));
}

// =============================================================================
// Day-by-day summary
// =============================================================================

fn summary_source() -> InMemorySource {
    InMemorySource::default()
        .with_summary(date(5), Shift::Morning, 4)
        .with_summary(date(5), Shift::Evening, 3)
        .with_summary(date(5), Shift::Night, 2)
        .with_summary(date(6), Shift::Morning, 9)
        .with_summary(date(7), Shift::Evening, 1)
        .with_failing_day(date(6))
}

#[tokio::test]
async fn test_summary_tolerates_a_failing_day() {
    let router = create_router_with(summary_source());
    let (status, json) = post_json(
        router,
        "/summary",
        json!({"from": "2026-01-05", "to": "2026-01-07"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["total"], 9);
    assert_eq!(rows[1]["failed"], true);
    assert_eq!(rows[1]["morning"], 0);
    assert_eq!(rows[1]["evening"], 0);
    assert_eq!(rows[1]["night"], 0);
    assert_eq!(rows[1]["total"], 0);
    assert_eq!(rows[2]["evening"], 1);
    assert_eq!(json["grand_total"], 10);
    assert_eq!(json["failed_days"], 1);
}

#[tokio::test]
async fn test_summary_export_name() {
    let router = create_router_with(summary_source());
    let body = json!({"from": "2026-01-05", "to": "2026-01-07"});
    let (status, disposition, bytes) =
        send(router, post("/summary/export?format=xlsx", &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"All_Sites_SummaryReport_2026-01-05_2026-01-07.xlsx\"")
    );
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn test_site_summary_counts_only_that_site() {
    let source = summary_source()
        .with_site("s1", &["e1"])
        .with_site_summary("s1", date(5), Shift::Morning, 1)
        .with_site_summary("s1", date(7), Shift::Night, 2);
    let body = json!({
        "from": "2026-01-05",
        "to": "2026-01-07",
        "scope": {"kind": "site", "id": "s1", "name": "North Gate"}
    });

    let (status, json) = post_json(create_router_with(source.clone()), "/summary", body.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows[0]["morning"], 1);
    assert_eq!(rows[0]["evening"], 0);
    assert_eq!(rows[0]["total"], 1);
    assert_eq!(rows[2]["night"], 2);
    assert_eq!(json["grand_total"], 3);

    let (status, disposition, _) =
        send(create_router_with(source), post("/summary/export?format=xlsx", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"North_Gate_SummaryReport_2026-01-05_2026-01-07.xlsx\"")
    );
}

// =============================================================================
// Sequenced view
// =============================================================================

fn site_source() -> InMemorySource {
    InMemorySource::new(
        vec![
            record("e1", "s1", "2026-01-05T07:00:00"),
            record("e2", "s2", "2026-01-05T07:00:00"),
            record("e1", "s1", "2026-01-06T07:00:00"),
        ],
        vec![employee("e1", "Asha"), employee("e2", "Ravi")],
    )
    .with_site("s1", &["e1"])
}

#[tokio::test]
async fn test_view_refresh_then_read() {
    let router = create_router_with(site_source());

    let (status, refresh) = post_json(
        router.clone(),
        "/views/muster-roll/refresh",
        json!({
            "period": scenario_period(),
            "mode": "dense",
            "scope": {"kind": "site", "id": "s1", "name": "North"}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refresh["ticket"], 1);
    assert_eq!(refresh["applied"], true);
    assert_eq!(refresh["rows"], 1);

    let (status, view) = get_json(router, "/views/muster-roll?page=1&pageSize=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["ticket"], 1);
    assert_eq!(view["table"]["rows"][0]["name"], "Asha");
    assert_eq!(view["totals"]["grand_total"], 2);
}

#[tokio::test]
async fn test_later_refresh_replaces_view() {
    let router = create_router_with(site_source());

    post_json(
        router.clone(),
        "/views/muster-roll/refresh",
        json!({"period": scenario_period()}),
    )
    .await;
    let (_, second) = post_json(
        router.clone(),
        "/views/muster-roll/refresh",
        json!({"period": {"from": "2026-01-06", "to": "2026-01-06"}}),
    )
    .await;
    assert_eq!(second["ticket"], 2);

    let (_, view) = get_json(router, "/views/muster-roll").await;
    assert_eq!(view["ticket"], 2);
    assert_eq!(view["from"], "2026-01-06");
    assert_eq!(view["totals"]["grand_total"], 1);
}

#[tokio::test]
async fn test_unknown_site_is_upstream_error() {
    let router = create_router_with(site_source());
    let (status, json) = post_json(
        router,
        "/views/muster-roll/refresh",
        json!({
            "period": scenario_period(),
            "scope": {"kind": "site", "id": "missing", "name": "Missing"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}

// =============================================================================
// Aggregation properties
// =============================================================================

/// (employee index, day offset, hour, minute)
fn arb_records() -> impl Strategy<Value = Vec<(usize, i64, u32, u32)>> {
    prop::collection::vec((0usize..6, -3i64..14, 0u32..24, 0u32..60), 0..60)
}

fn build_records(specs: &[(usize, i64, u32, u32)]) -> Vec<AttendanceRecord> {
    specs
        .iter()
        .map(|&(employee, offset, hour, minute)| {
            let time = (date(1) + Duration::days(offset))
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            AttendanceRecord {
                id: None,
                employee_id: EmployeeRef::Id(format!("e{}", employee)),
                shift: None,
                step_in: Some(StepEvent::at(time)),
                step_out: None,
                site_id: None,
            }
        })
        .collect()
}

fn property_roster() -> Vec<EmployeeSummary> {
    (0..4).map(|i| employee(&format!("e{}", i), &format!("Employee {}", i))).collect()
}

fn property_calendar() -> PeriodCalendar {
    PeriodCalendar::new(ReportPeriod::Range {
        from: date(1),
        to: date(10),
    })
    .unwrap()
}

proptest! {
    #[test]
    fn prop_totals_are_consistent(specs in arb_records(), dense in any::<bool>()) {
        let mode = if dense { AggregationMode::Dense } else { AggregationMode::Sparse };
        let calendar = property_calendar();
        let result = aggregate(&build_records(&specs), &property_roster(), &calendar, mode, "%H:%M");
        let totals = compute_totals(&result.rows, &calendar);

        let day_sum: u32 = totals.day_totals.values().sum();
        let row_sum: u32 = totals.row_totals.iter().sum();
        prop_assert_eq!(day_sum, totals.grand_total);
        prop_assert_eq!(row_sum, totals.grand_total);
        prop_assert_eq!(totals.day_totals.len(), calendar.len());
    }

    #[test]
    fn prop_aggregation_is_idempotent(specs in arb_records()) {
        let records = build_records(&specs);
        let calendar = property_calendar();
        let first = aggregate(&records, &property_roster(), &calendar, AggregationMode::Dense, "%H:%M");
        let second = aggregate(&records, &property_roster(), &calendar, AggregationMode::Dense, "%H:%M");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_dense_rows_cover_roster_and_period(specs in arb_records()) {
        let calendar = property_calendar();
        let result = aggregate(
            &build_records(&specs),
            &property_roster(),
            &calendar,
            AggregationMode::Dense,
            "%H:%M",
        );

        for employee in property_roster() {
            let row = result.rows.iter().find(|r| r.employee_id == employee.id);
            prop_assert!(row.is_some());
            let row = row.unwrap();
            for day in calendar.days() {
                prop_assert!(row.attendance.contains_key(&day.date));
            }
        }
        for row in &result.rows {
            prop_assert_eq!(row.attendance.len(), calendar.len());
        }
    }

    #[test]
    fn prop_filtering_never_increases_totals(specs in arb_records(), shift_only in any::<bool>()) {
        let calendar = property_calendar();
        let records = build_records(&specs);
        let roll = muster_roll::aggregation::MusterRoll::build(
            &records,
            &property_roster(),
            calendar,
            AggregationMode::Dense,
            RowFilter::default(),
            "%H:%M",
        );
        let filter = if shift_only {
            RowFilter { search: None, shift: Some(Shift::Night) }
        } else {
            RowFilter { search: Some("employee 1".to_string()), shift: None }
        };
        let narrowed = roll.with_filter(filter);
        prop_assert!(narrowed.totals().grand_total <= roll.totals().grand_total);
    }
}
