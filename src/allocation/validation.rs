//! Request validation and input parsing.
//!
//! Every request goes through [`validate_request`] before the engine runs.
//! The parsing helpers turn the raw strings of forms and batch rows into
//! typed values, reporting bad input as [`PlannerError`] values.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{AllocationRequest, ContractShare};

use super::hours_to_units;

/// Date format accepted for holidays.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest accepted daily budget, in hours.
pub const MAX_HOURS_PER_DAY: u32 = 24;

/// Checks that a request can be planned.
///
/// The checks, in order:
/// - the month/year pair names a calendar month;
/// - hours per working day are positive, at most [`MAX_HOURS_PER_DAY`] and
///   a whole number of half hours;
/// - there is at least one contract, each code is non-blank and unique;
/// - each percentage lies in 0..=100;
/// - the percentages add up to exactly 100. The comparison is exact
///   decimal equality with no tolerance.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::validate_request;
/// use hours_planner::models::{AllocationRequest, ContractShare};
/// use rust_decimal::Decimal;
///
/// let request = AllocationRequest::new(10, 2025, Decimal::from(8))
///     .with_contract(ContractShare::new("A", Decimal::from(60)))
///     .with_contract(ContractShare::new("B", Decimal::from(39)));
///
/// assert!(validate_request(&request).is_err());
/// ```
pub fn validate_request(request: &AllocationRequest) -> PlannerResult<()> {
    validate_period(request.month, request.year)?;
    validate_hours_per_day(request.hours_per_working_day)?;
    validate_contracts(&request.contracts)
}

/// Checks that `month`/`year` name a calendar month.
pub fn validate_period(month: u32, year: i32) -> PlannerResult<()> {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(_) => Ok(()),
        None => Err(PlannerError::InvalidPeriod { month, year }),
    }
}

/// Checks the daily hour budget.
pub fn validate_hours_per_day(hours: Decimal) -> PlannerResult<()> {
    if hours <= Decimal::ZERO {
        return Err(PlannerError::InvalidHoursPerDay {
            hours,
            message: "must be positive".to_string(),
        });
    }
    if hours > Decimal::from(MAX_HOURS_PER_DAY) {
        return Err(PlannerError::InvalidHoursPerDay {
            hours,
            message: format!("must not exceed {}", MAX_HOURS_PER_DAY),
        });
    }
    if hours_to_units(hours).is_none() {
        return Err(PlannerError::InvalidHoursPerDay {
            hours,
            message: "must be a multiple of 0.5".to_string(),
        });
    }
    Ok(())
}

/// Checks the contract list and the percentage sum.
pub fn validate_contracts(contracts: &[ContractShare]) -> PlannerResult<()> {
    if contracts.is_empty() {
        return Err(PlannerError::NoContracts);
    }

    let mut seen = HashSet::new();
    for (position, contract) in contracts.iter().enumerate() {
        if contract.code.trim().is_empty() {
            return Err(PlannerError::EmptyContractCode { position });
        }
        if !seen.insert(contract.code.as_str()) {
            return Err(PlannerError::DuplicateContract {
                code: contract.code.clone(),
            });
        }
        if contract.percentage < Decimal::ZERO || contract.percentage > Decimal::ONE_HUNDRED {
            return Err(PlannerError::PercentageOutOfRange {
                code: contract.code.clone(),
                percentage: contract.percentage,
            });
        }
    }

    let total: Decimal = contracts.iter().map(|c| c.percentage).sum();
    if total != Decimal::ONE_HUNDRED {
        return Err(PlannerError::PercentageSum { total });
    }

    Ok(())
}

/// Parses a `YYYY-MM-DD` date, ignoring surrounding whitespace.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::parse_iso_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_iso_date(" 2025-10-15 ").unwrap(),
///     NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
/// );
/// assert!(parse_iso_date("15/10/2025").is_err());
/// ```
pub fn parse_iso_date(input: &str) -> PlannerResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| PlannerError::InvalidDate {
        input: input.trim().to_string(),
        message: e.to_string(),
    })
}

/// Parses a list of holiday strings. Blank entries are skipped; the first
/// malformed entry fails the whole list.
pub fn parse_holidays<I, S>(inputs: I) -> PlannerResult<BTreeSet<NaiveDate>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .filter(|s| !s.as_ref().trim().is_empty())
        .map(|s| parse_iso_date(s.as_ref()))
        .collect()
}

/// Parses one `code:percentage` pair.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::parse_contract_entry;
/// use rust_decimal::Decimal;
///
/// let share = parse_contract_entry("FH71_01:62.5").unwrap();
/// assert_eq!(share.code, "FH71_01");
/// assert_eq!(share.percentage, Decimal::new(625, 1));
/// ```
pub fn parse_contract_entry(entry: &str) -> PlannerResult<ContractShare> {
    let malformed = |message: &str| PlannerError::MalformedContract {
        entry: entry.trim().to_string(),
        message: message.to_string(),
    };

    let (code, percentage) = entry
        .trim()
        .rsplit_once(':')
        .ok_or_else(|| malformed("expected code:percentage"))?;
    let code = code.trim();
    if code.is_empty() {
        return Err(malformed("contract code is empty"));
    }
    let percentage: Decimal = percentage
        .trim()
        .parse()
        .map_err(|_| malformed("percentage is not a number"))?;

    Ok(ContractShare::new(code, percentage))
}

/// Pairs contracts with a parallel donor list.
///
/// Both lists must have the same length; blank donors leave the contract
/// without a donor.
pub fn attach_donors<S: AsRef<str>>(
    contracts: Vec<ContractShare>,
    donors: &[S],
) -> PlannerResult<Vec<ContractShare>> {
    if contracts.len() != donors.len() {
        return Err(PlannerError::DonorCountMismatch {
            contracts: contracts.len(),
            donors: donors.len(),
        });
    }

    Ok(contracts
        .into_iter()
        .zip(donors)
        .map(|(contract, donor)| {
            let donor = donor.as_ref().trim();
            if donor.is_empty() {
                contract
            } else {
                contract.with_donor(donor)
            }
        })
        .collect())
}
