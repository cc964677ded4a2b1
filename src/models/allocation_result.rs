//! Allocation result models for the hours planner.
//!
//! This module contains the [`AllocationResult`] type that carries the
//! per-contract, per-day hours matrix from the engine to any renderer, along
//! with the derived totals and the diagnostics raised while allocating.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ContractShare;

/// Raised when a working day could not be split within the retry bound.
///
/// The day still receives a best-effort allocation; the warning lets the
/// caller know which days were repaired rather than drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessWarning {
    /// The working day concerned.
    pub date: NaiveDate,
    /// Number of random draws made before giving up.
    pub attempts: u32,
    /// Hours by which the kept allocation still misses the day budget
    /// after repair. Zero unless the contract caps cannot cover the day.
    pub residual_hours: Decimal,
}

/// One row of the allocation matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAllocation {
    /// The contract code.
    pub code: String,
    /// The requested share, in percent.
    pub percentage: Decimal,
    /// The funding body, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor: Option<String>,
    /// Hours the contract should accumulate over the month.
    pub target_hours: Decimal,
    /// Hours per date, aligned with [`AllocationResult::dates`]. `None` marks
    /// a weekend or holiday.
    pub hours: Vec<Option<Decimal>>,
    /// Sum of the allocated hours.
    pub total_hours: Decimal,
}

/// The planned month.
///
/// Built once by the allocation engine and read-only afterwards: totals are
/// derived at construction and fields are only exposed through accessors.
/// Deserializing goes through [`AllocationResult::assemble`] as well, so
/// totals found in the input are recomputed rather than trusted.
///
/// # Example
///
/// ```
/// use hours_planner::models::{AllocationResult, ContractShare};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let dates = vec![
///     NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(), // Friday
///     NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(), // Saturday
/// ];
/// let result = AllocationResult::assemble(
///     2,
///     2026,
///     Decimal::from(8),
///     dates,
///     vec![(
///         ContractShare::new("A", Decimal::from(100)),
///         Decimal::from(8),
///         vec![Some(Decimal::from(8)), None],
///     )],
///     vec![],
/// );
///
/// assert_eq!(result.total_per_day(), &[Decimal::from(8), Decimal::ZERO]);
/// assert_eq!(result.total_for("A"), Some(Decimal::from(8)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PlannedMonth")]
pub struct AllocationResult {
    month: u32,
    year: i32,
    hours_per_working_day: Decimal,
    dates: Vec<NaiveDate>,
    contracts: Vec<ContractAllocation>,
    total_per_day: Vec<Decimal>,
    total_per_contract: BTreeMap<String, Decimal>,
    diagnostics: Vec<LivenessWarning>,
}

/// Serialized form of a result, read back without its totals.
#[derive(Deserialize)]
struct PlannedMonth {
    month: u32,
    year: i32,
    hours_per_working_day: Decimal,
    dates: Vec<NaiveDate>,
    contracts: Vec<PlannedRow>,
    #[serde(default)]
    diagnostics: Vec<LivenessWarning>,
}

#[derive(Deserialize)]
struct PlannedRow {
    code: String,
    percentage: Decimal,
    #[serde(default)]
    donor: Option<String>,
    target_hours: Decimal,
    hours: Vec<Option<Decimal>>,
}

impl From<PlannedMonth> for AllocationResult {
    fn from(month: PlannedMonth) -> Self {
        let rows = month
            .contracts
            .into_iter()
            .map(|row| {
                let share = ContractShare {
                    code: row.code,
                    percentage: row.percentage,
                    donor: row.donor,
                };
                (share, row.target_hours, row.hours)
            })
            .collect();

        AllocationResult::assemble(
            month.month,
            month.year,
            month.hours_per_working_day,
            month.dates,
            rows,
            month.diagnostics,
        )
    }
}

impl AllocationResult {
    /// Builds the result from per-contract rows and derives the totals.
    ///
    /// Each row is `(contract, target hours, hours per date)`, the hours
    /// being aligned with `dates`.
    pub fn assemble(
        month: u32,
        year: i32,
        hours_per_working_day: Decimal,
        dates: Vec<NaiveDate>,
        rows: Vec<(ContractShare, Decimal, Vec<Option<Decimal>>)>,
        diagnostics: Vec<LivenessWarning>,
    ) -> Self {
        let mut total_per_day = vec![Decimal::ZERO; dates.len()];

        let contracts = rows
            .into_iter()
            .map(|(share, target_hours, hours)| {
                for (day_total, value) in total_per_day.iter_mut().zip(&hours) {
                    if let Some(h) = value {
                        *day_total += *h;
                    }
                }
                let total_hours = hours.iter().flatten().copied().sum();
                ContractAllocation {
                    code: share.code,
                    percentage: share.percentage,
                    donor: share.donor,
                    target_hours,
                    hours,
                    total_hours,
                }
            })
            .collect::<Vec<ContractAllocation>>();

        let total_per_contract = contracts
            .iter()
            .map(|c| (c.code.clone(), c.total_hours))
            .collect();

        Self {
            month,
            year,
            hours_per_working_day,
            dates,
            contracts,
            total_per_day,
            total_per_contract,
            diagnostics,
        }
    }

    /// The planned month, 1 to 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The planned year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The daily budget every working day adds up to.
    pub fn hours_per_working_day(&self) -> Decimal {
        self.hours_per_working_day
    }

    /// Every date of the month, in order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Matrix rows, in request order.
    pub fn contracts(&self) -> &[ContractAllocation] {
        &self.contracts
    }

    /// Looks up a row by contract code.
    pub fn contract(&self, code: &str) -> Option<&ContractAllocation> {
        self.contracts.iter().find(|c| c.code == code)
    }

    /// Hours allocated to `code` on `date`; `None` if either is unknown or
    /// the date is not a working day.
    pub fn hours_on(&self, code: &str, date: NaiveDate) -> Option<Decimal> {
        let index = self.dates.iter().position(|d| *d == date)?;
        self.contract(code)?.hours.get(index).copied().flatten()
    }

    /// Sum over contracts for each date; zero on non-working days.
    pub fn total_per_day(&self) -> &[Decimal] {
        &self.total_per_day
    }

    /// Sum over dates for each contract, in request order.
    pub fn total_per_contract(&self) -> Vec<(&str, Decimal)> {
        self.contracts
            .iter()
            .map(|c| (c.code.as_str(), c.total_hours))
            .collect()
    }

    /// Total hours of one contract.
    pub fn total_for(&self, code: &str) -> Option<Decimal> {
        self.contract(code).map(|c| c.total_hours)
    }

    /// Hours allocated over the whole month.
    pub fn total_hours(&self) -> Decimal {
        self.total_per_day.iter().copied().sum()
    }

    /// Dates that received an allocation.
    pub fn working_days(&self) -> Vec<NaiveDate> {
        match self.contracts.first() {
            Some(row) => self
                .dates
                .iter()
                .zip(&row.hours)
                .filter(|(_, h)| h.is_some())
                .map(|(d, _)| *d)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Liveness warnings raised while allocating.
    pub fn diagnostics(&self) -> &[LivenessWarning] {
        &self.diagnostics
    }
}
