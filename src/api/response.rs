//! Response types for the hours planner API.
//!
//! This module defines the error response structures and the mapping from
//! [`PlannerError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

fn error_code(error: &PlannerError) -> &'static str {
    match error {
        PlannerError::ConfigNotFound { .. } | PlannerError::ConfigParseError { .. } => {
            "CONFIG_ERROR"
        }
        PlannerError::PercentageSum { .. } => "PERCENTAGE_SUM",
        PlannerError::NoContracts => "NO_CONTRACTS",
        PlannerError::EmptyContractCode { .. }
        | PlannerError::DuplicateContract { .. }
        | PlannerError::PercentageOutOfRange { .. }
        | PlannerError::MalformedContract { .. } => "INVALID_CONTRACT",
        PlannerError::InvalidHoursPerDay { .. } => "INVALID_HOURS",
        PlannerError::InvalidPeriod { .. } => "INVALID_PERIOD",
        PlannerError::InvalidDate { .. } => "INVALID_DATE",
        PlannerError::DonorCountMismatch { .. } => "DONOR_MISMATCH",
        PlannerError::MalformedRow { .. } => "MALFORMED_ROW",
        PlannerError::ExportError { .. } => "EXPORT_ERROR",
    }
}

impl From<PlannerError> for ApiErrorResponse {
    fn from(error: PlannerError) -> Self {
        let code = error_code(&error);
        if error.is_validation() {
            ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(code, error.to_string()),
            }
        } else {
            ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(code, "Planning failed", error.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_percentage_sum_maps_to_bad_request() {
        let api_error: ApiErrorResponse = PlannerError::PercentageSum {
            total: Decimal::from(99),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "PERCENTAGE_SUM");
        assert!(api_error.error.message.contains("99"));
    }

    #[test]
    fn test_export_error_maps_to_server_error() {
        let api_error: ApiErrorResponse = PlannerError::ExportError {
            message: "broken pipe".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "EXPORT_ERROR");
        assert!(api_error.error.details.unwrap().contains("broken pipe"));
    }
}
