//! HTTP API module for the hours planner.
//!
//! This module provides the REST endpoints for planning a month as JSON or
//! CSV and for planning batches of months.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AllocateRequest, ContractShareRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
