//! HTTP request handlers for the hours planner API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::allocation::seeded_rng;
use crate::batch::BatchPlanner;
use crate::error::PlannerResult;
use crate::export::planning_csv_string;
use crate::models::{AllocationRequest, AllocationResult};

use super::request::AllocateRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/allocate", post(allocate_handler))
        .route("/allocate/csv", post(allocate_csv_handler))
        .route("/batch", post(batch_handler))
        .with_state(state)
}

fn json_error(status: StatusCode, error: ApiError) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn planner_error(correlation_id: Uuid, err: crate::error::PlannerError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Planning failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_error(api_error.status, api_error.error)
}

/// Unwraps the JSON body or builds the 400 response describing why it could
/// not be read.
fn read_payload(
    correlation_id: Uuid,
    payload: Result<Json<AllocateRequest>, JsonRejection>,
) -> Result<AllocateRequest, Response> {
    let rejection = match payload {
        Ok(Json(req)) => return Ok(req),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
    Err(json_error(StatusCode::BAD_REQUEST, error))
}

/// Converts, validates and plans one request.
fn plan_request(state: &AppState, body: AllocateRequest) -> PlannerResult<AllocationResult> {
    let seed = body.seed.or(state.default_seed());
    let request = AllocationRequest::try_from(body)?;
    state.engine().plan(&request, &mut seeded_rng(seed))
}

/// Plans the request and logs the outcome.
fn plan_logged(
    state: &AppState,
    correlation_id: Uuid,
    body: AllocateRequest,
) -> PlannerResult<AllocationResult> {
    let (month, year) = (body.month, body.year);
    let start_time = Instant::now();
    let result = plan_request(state, body)?;
    info!(
        correlation_id = %correlation_id,
        month,
        year,
        contracts = result.contracts().len(),
        working_days = result.working_days().len(),
        diagnostics = result.diagnostics().len(),
        duration_us = start_time.elapsed().as_micros(),
        "Allocation completed successfully"
    );
    Ok(result)
}

/// Handler for POST /allocate.
///
/// Returns the planned month as JSON.
async fn allocate_handler(
    State(state): State<AppState>,
    payload: Result<Json<AllocateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allocation request");

    let body = match read_payload(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    match plan_logged(&state, correlation_id, body) {
        Ok(result) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(result),
        )
            .into_response(),
        Err(err) => planner_error(correlation_id, err),
    }
}

/// Handler for POST /allocate/csv.
///
/// Returns the planned month rendered as CSV.
async fn allocate_csv_handler(
    State(state): State<AppState>,
    payload: Result<Json<AllocateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing CSV allocation request");

    let body = match read_payload(correlation_id, payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    match plan_logged(&state, correlation_id, body).and_then(|r| planning_csv_string(&r)) {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(err) => planner_error(correlation_id, err),
    }
}

/// Handler for POST /batch.
///
/// The body is CSV text; every row is planned independently and bad rows
/// are reported without failing the batch.
async fn batch_handler(State(state): State<AppState>, body: String) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch request");

    let start_time = Instant::now();
    let report = BatchPlanner::new(state.engine(), state.default_seed()).run(body.as_bytes());
    info!(
        correlation_id = %correlation_id,
        planned = report.planned,
        skipped = report.skipped,
        duration_us = start_time.elapsed().as_micros(),
        "Batch completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(report),
    )
        .into_response()
}
