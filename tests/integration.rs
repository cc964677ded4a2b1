//! Integration tests for the hours planner HTTP API.
//!
//! This test suite covers:
//! - Allocation of a full month through `/allocate`
//! - Non-working days and daily totals
//! - Reproducibility with a seed
//! - CSV export through `/allocate/csv`
//! - Batch planning through `/batch`
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use hours_planner::api::{AppState, create_router};
use hours_planner::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal serialized as string")).unwrap()
}

async fn send(router: Router, uri: &str, content_type: &str, body: String) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

async fn post_allocate(router: Router, body: Value) -> (StatusCode, Value) {
    let (status, text) = send(router, "/allocate", "application/json", body.to_string()).await;
    (status, serde_json::from_str(&text).unwrap())
}

fn create_request(
    month: u32,
    year: i32,
    hours: u32,
    holidays: Vec<&str>,
    contracts: Vec<(&str, &str)>,
    seed: u64,
) -> Value {
    let contracts: Vec<Value> = contracts
        .into_iter()
        .map(|(code, pct)| json!({"code": code, "percentage": pct}))
        .collect();
    json!({
        "month": month,
        "year": year,
        "hours_per_working_day": hours,
        "holidays": holidays,
        "contracts": contracts,
        "seed": seed
    })
}

fn october_request(contracts: Vec<(&str, &str)>, seed: u64) -> Value {
    create_request(10, 2025, 8, vec!["2025-10-01", "2025-10-15"], contracts, seed)
}

fn row<'a>(result: &'a Value, code: &str) -> &'a Value {
    result["contracts"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["code"] == code)
        .unwrap_or_else(|| panic!("contract {} missing", code))
}

// =============================================================================
// SECTION 1: Monthly allocation
// =============================================================================

#[tokio::test]
async fn test_october_two_contracts_fifty_fifty() {
    let router = create_router_for_test();
    let (status, result) =
        post_allocate(router, october_request(vec![("A", "50"), ("B", "50")], 42)).await;

    assert_eq!(status, StatusCode::OK);
    let dates = result["dates"].as_array().unwrap();
    assert_eq!(dates.len(), 31);

    let a = row(&result, "A");
    let b = row(&result, "B");
    assert_eq!(decimal(&a["target_hours"]), Decimal::from(84));

    let not_applicable = a["hours"].as_array().unwrap().iter().filter(|h| h.is_null()).count();
    assert_eq!(not_applicable, 10);

    let total = decimal(&a["total_hours"]) + decimal(&b["total_hours"]);
    assert_eq!(total, Decimal::from(168));
    assert!((decimal(&a["total_hours"]) - Decimal::from(84)).abs() <= Decimal::new(5, 1));
}

#[tokio::test]
async fn test_daily_totals_match_budget() {
    let router = create_router_for_test();
    let (status, result) = post_allocate(
        router,
        october_request(vec![("A", "20"), ("B", "30"), ("C", "50")], 3),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let a_hours = row(&result, "A")["hours"].as_array().unwrap().clone();
    for (i, total) in result["total_per_day"].as_array().unwrap().iter().enumerate() {
        if a_hours[i].is_null() {
            assert_eq!(decimal(total), Decimal::ZERO);
        } else {
            assert_eq!(decimal(total), Decimal::from(8));
        }
    }
}

#[tokio::test]
async fn test_weekends_and_holidays_are_null() {
    let router = create_router_for_test();
    let (_, result) = post_allocate(router, october_request(vec![("A", "100")], 1)).await;

    let dates = result["dates"].as_array().unwrap();
    let hours = row(&result, "A")["hours"].as_array().unwrap();
    for (d, h) in dates.iter().zip(hours) {
        match d.as_str().unwrap() {
            // Holidays, then the first weekend
            "2025-10-01" | "2025-10-15" | "2025-10-04" | "2025-10-05" => assert!(h.is_null()),
            // Thursday after the holiday
            "2025-10-02" => assert_eq!(decimal(h), Decimal::from(8)),
            _ => {}
        }
    }
}

#[tokio::test]
async fn test_same_seed_gives_same_planning() {
    let request = october_request(vec![("A", "33.33"), ("B", "33.33"), ("C", "33.34")], 77);
    let (_, first) = post_allocate(create_router_for_test(), request.clone()).await;
    let (_, second) = post_allocate(create_router_for_test(), request).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_fractional_percentages_as_numbers() {
    let router = create_router_for_test();
    let body = json!({
        "month": 3,
        "year": 2026,
        "hours_per_working_day": 7.5,
        "contracts": [
            {"code": "FH71_01", "percentage": 62.5, "donor": "EU"},
            {"code": "FH71_02", "percentage": 37.5}
        ],
        "seed": 5
    });
    let (status, result) = post_allocate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(row(&result, "FH71_01")["donor"], "EU");
    assert!(row(&result, "FH71_02").get("donor").is_none());
    assert!(result["diagnostics"].is_array());
}

#[tokio::test]
async fn test_month_with_no_working_days() {
    let holidays: Vec<String> = (1..=28).map(|d| format!("2026-02-{:02}", d)).collect();
    let body = json!({
        "month": 2,
        "year": 2026,
        "hours_per_working_day": 8,
        "holidays": holidays,
        "contracts": [{"code": "A", "percentage": 60}, {"code": "B", "percentage": 40}],
        "seed": 9
    });
    let (status, result) = post_allocate(create_router_for_test(), body).await;

    assert_eq!(status, StatusCode::OK);
    for code in ["A", "B"] {
        let r = row(&result, code);
        assert!(r["hours"].as_array().unwrap().iter().all(Value::is_null));
        assert_eq!(decimal(&r["total_hours"]), Decimal::ZERO);
    }
}

#[tokio::test]
async fn test_ten_contracts_stay_close_to_targets() {
    let codes: Vec<String> = (0..10).map(|i| format!("C{}", i)).collect();
    let contracts: Vec<(&str, &str)> = codes.iter().map(|c| (c.as_str(), "10")).collect();
    let (status, result) =
        post_allocate(create_router_for_test(), october_request(contracts, 11)).await;

    assert_eq!(status, StatusCode::OK);
    for code in &codes {
        let r = row(&result, code);
        // 168h over ten contracts
        assert_eq!(decimal(&r["target_hours"]), Decimal::new(168, 1));
        let total = decimal(&result["total_per_contract"][code.as_str()]);
        assert_eq!(total, decimal(&r["total_hours"]));
        assert!((total - Decimal::new(168, 1)).abs() <= Decimal::new(5, 1));
    }
}

// =============================================================================
// SECTION 2: CSV export
// =============================================================================

#[tokio::test]
async fn test_csv_export_layout() {
    let body = october_request(vec![("A", "50"), ("B", "50")], 42);
    let (status, text) = send(
        create_router_for_test(),
        "/allocate/csv",
        "application/json",
        body.to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "code,percentage,donor,target_hours");
    assert_eq!(lines[1], "A,50,,84");
    assert!(lines[3].starts_with("contract,2025-10-01,2025-10-02,"));
    assert!(lines[3].ends_with(",2025-10-31,total"));
    assert!(lines[6].starts_with("total/day,,8,8,"));
    assert!(lines[6].ends_with(",168"));
}

// =============================================================================
// SECTION 3: Batch planning
// =============================================================================

#[tokio::test]
async fn test_batch_skips_bad_rows() {
    let csv = "month,year,hours_per_day,holidays,contracts,donors\n\
               10,2025,8,\"2025-10-01,2025-10-15\",\"A:50,B:50\",\"EU,ANR\"\n\
               11,2025,8,,\"A:50,B:49\",\n\
               13,2025,8,,A:100,\n\
               12,2025,7,2025-12-25,\"A:25,B:75\",\n";
    let (status, text) = send(create_router_for_test(), "/batch", "text/csv", csv.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let report: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(report["planned"], 2);
    assert_eq!(report["skipped"], 2);

    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes[0]["status"], "planned");
    assert_eq!(outcomes[1]["status"], "skipped");
    assert!(outcomes[1]["error"].as_str().unwrap().contains("99"));
    assert_eq!(outcomes[2]["status"], "skipped");
    assert_eq!(outcomes[3]["status"], "planned");
    assert_eq!(outcomes[3]["row"], 4);
    assert_eq!(row(&outcomes[0]["result"], "B")["donor"], "ANR");
}

// =============================================================================
// SECTION 4: Error cases
// =============================================================================

#[tokio::test]
async fn test_percentages_summing_to_101_rejected() {
    let (status, error) = post_allocate(
        create_router_for_test(),
        october_request(vec![("A", "51"), ("B", "50")], 1),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "PERCENTAGE_SUM");
}

#[tokio::test]
async fn test_duplicate_contract_rejected() {
    let (status, error) = post_allocate(
        create_router_for_test(),
        october_request(vec![("A", "50"), ("A", "50")], 1),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_CONTRACT");
}

#[tokio::test]
async fn test_invalid_holiday_rejected() {
    let body = create_request(10, 2025, 8, vec!["2025-10-32"], vec![("A", "100")], 1);
    let (status, error) = post_allocate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_DATE");
    assert!(error["message"].as_str().unwrap().contains("2025-10-32"));
}

#[tokio::test]
async fn test_invalid_month_rejected() {
    let body = create_request(13, 2025, 8, vec![], vec![("A", "100")], 1);
    let (status, error) = post_allocate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_PERIOD");
}

#[tokio::test]
async fn test_zero_hours_rejected() {
    let body = create_request(10, 2025, 0, vec![], vec![("A", "100")], 1);
    let (status, error) = post_allocate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_HOURS");
}

#[tokio::test]
async fn test_huge_hours_rejected() {
    let body = json!({
        "month": 10,
        "year": 2025,
        "hours_per_working_day": "79228162514264337593543950335",
        "contracts": [{"code": "A", "percentage": 100}]
    });
    let (status, error) = post_allocate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_HOURS");
}

#[tokio::test]
async fn test_batch_skips_huge_hours() {
    let csv = "month,year,hours_per_day,holidays,contracts,donors\n\
               10,2025,79228162514264337593543950335,,A:100,\n\
               10,2025,8,,A:100,\n";
    let (status, text) = send(create_router_for_test(), "/batch", "text/csv", csv.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let report: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(report["planned"], 1);
    assert_eq!(report["outcomes"][0]["status"], "skipped");
}

#[tokio::test]
async fn test_no_contracts_rejected() {
    let body = create_request(10, 2025, 8, vec![], vec![], 1);
    let (status, error) = post_allocate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "NO_CONTRACTS");
}

#[tokio::test]
async fn test_missing_field_is_validation_error() {
    let body = json!({"month": 10, "year": 2025, "contracts": []});
    let (status, error) = post_allocate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (status, text) = send(
        create_router_for_test(),
        "/allocate",
        "application/json",
        "{not json".to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}
