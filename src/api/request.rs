//! Request types for the hours planner API.
//!
//! This module defines the JSON request body shared by the `/allocate` and
//! `/allocate/csv` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::parse_holidays;
use crate::error::PlannerError;
use crate::models::{AllocationRequest, ContractShare};

/// Request body for the `/allocate` endpoints.
///
/// Holidays arrive as raw strings so that a malformed date is reported as a
/// validation error naming the offending entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocateRequest {
    /// Month to plan, 1 to 12.
    pub month: u32,
    /// Year to plan.
    pub year: i32,
    /// Hours per working day.
    pub hours_per_working_day: Decimal,
    /// Holidays as `YYYY-MM-DD` strings.
    #[serde(default)]
    pub holidays: Vec<String>,
    /// Contracts in display order.
    pub contracts: Vec<ContractShareRequest>,
    /// Seed for a reproducible planning.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// A contract share in an allocation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractShareRequest {
    /// The contract code.
    pub code: String,
    /// Target share of the month, in percent.
    pub percentage: Decimal,
    /// The funding body, if known.
    #[serde(default)]
    pub donor: Option<String>,
}

impl From<ContractShareRequest> for ContractShare {
    fn from(req: ContractShareRequest) -> Self {
        ContractShare {
            code: req.code,
            percentage: req.percentage,
            donor: req.donor.filter(|d| !d.trim().is_empty()),
        }
    }
}

impl TryFrom<AllocateRequest> for AllocationRequest {
    type Error = PlannerError;

    fn try_from(req: AllocateRequest) -> Result<Self, Self::Error> {
        Ok(AllocationRequest {
            month: req.month,
            year: req.year,
            hours_per_working_day: req.hours_per_working_day,
            holidays: parse_holidays(&req.holidays)?,
            contracts: req.contracts.into_iter().map(Into::into).collect(),
        })
    }
}
