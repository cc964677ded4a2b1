//! Allocation request models.
//!
//! This module contains the [`AllocationRequest`] and [`ContractShare`] types
//! that describe one month to plan.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A funding contract and the share of the month it should receive.
///
/// # Example
///
/// ```
/// use hours_planner::models::ContractShare;
/// use rust_decimal::Decimal;
///
/// let share = ContractShare::new("FH71_01", Decimal::from(60));
/// assert_eq!(share.code, "FH71_01");
/// assert!(share.donor.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractShare {
    /// The contract (funding) code, unique within a request.
    pub code: String,
    /// Target share of the month's working hours, in percent.
    pub percentage: Decimal,
    /// The funding body paying for this contract, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor: Option<String>,
}

impl ContractShare {
    /// Creates a contract share without a donor.
    pub fn new(code: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            code: code.into(),
            percentage,
            donor: None,
        }
    }

    /// Attaches a donor to the contract share.
    pub fn with_donor(mut self, donor: impl Into<String>) -> Self {
        self.donor = Some(donor.into());
        self
    }
}

/// Everything needed to plan one month.
///
/// The request is checked by [`crate::allocation::validate_request`] before
/// any allocation runs.
///
/// # Example
///
/// ```
/// use hours_planner::models::{AllocationRequest, ContractShare};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let request = AllocationRequest::new(10, 2025, Decimal::from(8))
///     .with_holiday(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap())
///     .with_contract(ContractShare::new("A", Decimal::from(50)))
///     .with_contract(ContractShare::new("B", Decimal::from(50)));
///
/// assert_eq!(request.contracts.len(), 2);
/// assert!(request.is_holiday(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Month to plan, 1 to 12.
    pub month: u32,
    /// Year to plan.
    pub year: i32,
    /// Hours to spread over the contracts on every working day.
    pub hours_per_working_day: Decimal,
    /// Non-working dates besides weekends.
    #[serde(default)]
    pub holidays: BTreeSet<NaiveDate>,
    /// Contracts in display order.
    pub contracts: Vec<ContractShare>,
}

impl AllocationRequest {
    /// Creates a request with no holidays and no contracts.
    pub fn new(month: u32, year: i32, hours_per_working_day: Decimal) -> Self {
        Self {
            month,
            year,
            hours_per_working_day,
            holidays: BTreeSet::new(),
            contracts: Vec::new(),
        }
    }

    /// Adds a holiday.
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Appends a contract.
    pub fn with_contract(mut self, contract: ContractShare) -> Self {
        self.contracts.push(contract);
        self
    }

    /// Checks whether the given date was declared a holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Sum of all contract percentages.
    pub fn percentage_total(&self) -> Decimal {
        self.contracts.iter().map(|c| c.percentage).sum()
    }
}
