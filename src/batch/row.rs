//! Batch row format.
//!
//! One CSV row describes one month to plan:
//!
//! ```text
//! month,year,hours_per_day,holidays,contracts,donors
//! 10,2025,8,"2025-10-01,2025-10-15","FH71_01:60,FH71_02:40","EU,ANR"
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::allocation::{attach_donors, parse_contract_entry, parse_holidays};
use crate::error::PlannerResult;
use crate::models::{AllocationRequest, ContractShare};

/// Separator inside the list columns.
pub const LIST_SEPARATOR: char = ',';

/// A raw batch row, before list columns are parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BatchRow {
    /// Month to plan, 1 to 12.
    pub month: u32,
    /// Year to plan.
    pub year: i32,
    /// Hours per working day.
    #[serde(with = "rust_decimal::serde::str")]
    pub hours_per_day: Decimal,
    /// Comma-joined ISO dates.
    #[serde(default)]
    pub holidays: String,
    /// Comma-joined `code:percentage` pairs.
    pub contracts: String,
    /// Optional comma-joined donors, one per contract.
    #[serde(default)]
    pub donors: Option<String>,
}

impl BatchRow {
    /// Parses the list columns into an [`AllocationRequest`].
    ///
    /// The request still has to be validated before planning.
    ///
    /// # Example
    ///
    /// ```
    /// use hours_planner::batch::BatchRow;
    /// use rust_decimal::Decimal;
    ///
    /// let row = BatchRow {
    ///     month: 10,
    ///     year: 2025,
    ///     hours_per_day: Decimal::from(8),
    ///     holidays: "2025-10-01,2025-10-15".to_string(),
    ///     contracts: "FH71_01:60,FH71_02:40".to_string(),
    ///     donors: Some("EU,ANR".to_string()),
    /// };
    /// let request = row.into_request().unwrap();
    ///
    /// assert_eq!(request.holidays.len(), 2);
    /// assert_eq!(request.contracts[1].donor.as_deref(), Some("ANR"));
    /// ```
    pub fn into_request(self) -> PlannerResult<AllocationRequest> {
        let holidays = parse_holidays(self.holidays.split(LIST_SEPARATOR))?;

        let mut contracts = self
            .contracts
            .split(LIST_SEPARATOR)
            .filter(|entry| !entry.trim().is_empty())
            .map(parse_contract_entry)
            .collect::<PlannerResult<Vec<ContractShare>>>()?;

        if let Some(donors) = self.donors.as_deref().filter(|d| !d.trim().is_empty()) {
            let donors: Vec<&str> = donors.split(LIST_SEPARATOR).collect();
            contracts = attach_donors(contracts, &donors)?;
        }

        Ok(AllocationRequest {
            month: self.month,
            year: self.year,
            hours_per_working_day: self.hours_per_day,
            holidays,
            contracts,
        })
    }
}
