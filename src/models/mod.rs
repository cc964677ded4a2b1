//! Core data models for the hours planner.
//!
//! This module contains the request and result types shared by the
//! allocation engine, the batch importer and the HTTP API.

mod allocation_request;
mod allocation_result;

pub use allocation_request::{AllocationRequest, ContractShare};
pub use allocation_result::{AllocationResult, ContractAllocation, LivenessWarning};
