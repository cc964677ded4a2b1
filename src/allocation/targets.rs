//! Monthly targets and half-hour unit conversions.
//!
//! The engine works internally in half-hour units (`i64`) so that the day
//! total can be checked exactly; these helpers convert between units and
//! decimal hours.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{PlannerError, PlannerResult};
use crate::models::ContractShare;

/// Number of allocation units in one hour.
pub const UNITS_PER_HOUR: i64 = 2;

/// Converts hours to half-hour units, or `None` if the value is not a
/// whole number of half hours or does not fit.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::hours_to_units;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_to_units(Decimal::new(75, 1)), Some(15));
/// assert_eq!(hours_to_units(Decimal::new(725, 2)), None);
/// assert_eq!(hours_to_units(Decimal::MAX), None);
/// ```
pub fn hours_to_units(hours: Decimal) -> Option<i64> {
    let units = hours.checked_mul(Decimal::from(UNITS_PER_HOUR))?;
    if units.fract().is_zero() {
        units.to_i64()
    } else {
        None
    }
}

/// Converts half-hour units back to hours.
pub fn units_to_hours(units: i64) -> Decimal {
    Decimal::from(units) / Decimal::from(UNITS_PER_HOUR)
}

/// Largest allocation a contract may still receive today, in units.
///
/// A contract never gets more than its remaining units nor more than the
/// day budget; an exhausted contract gets nothing.
pub fn cap_units(remaining_units: i64, day_units: i64) -> i64 {
    remaining_units.min(day_units).max(0)
}

/// Computes every contract's target for the month.
///
/// `target = round(working_days * hours_per_day * percentage / 100, 2)`,
/// rounding half to even. Targets are returned in contract order.
///
/// # Errors
///
/// Returns [`PlannerError::InvalidHoursPerDay`] if the monthly total does
/// not fit a decimal, and [`PlannerError::PercentageOutOfRange`] if a
/// contract's share of it does not.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::target_hours;
/// use hours_planner::models::ContractShare;
/// use rust_decimal::Decimal;
///
/// let contracts = vec![
///     ContractShare::new("A", Decimal::from(50)),
///     ContractShare::new("B", Decimal::from(50)),
/// ];
/// let targets = target_hours(23, Decimal::from(8), &contracts).unwrap();
/// assert_eq!(targets, vec![Decimal::from(92), Decimal::from(92)]);
/// ```
pub fn target_hours(
    working_days: usize,
    hours_per_day: Decimal,
    contracts: &[ContractShare],
) -> PlannerResult<Vec<Decimal>> {
    let total = Decimal::from(working_days as u64)
        .checked_mul(hours_per_day)
        .ok_or_else(|| PlannerError::InvalidHoursPerDay {
            hours: hours_per_day,
            message: "monthly total is out of range".to_string(),
        })?;

    contracts
        .iter()
        .map(|c| {
            total
                .checked_mul(c.percentage)
                .and_then(|share| share.checked_div(Decimal::ONE_HUNDRED))
                .map(|share| share.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
                .ok_or_else(|| PlannerError::PercentageOutOfRange {
                    code: c.code.clone(),
                    percentage: c.percentage,
                })
        })
        .collect()
}

/// Turns targets in hours into whole units adding up to `total_units`.
///
/// Each target is rounded down to a whole unit and the units left over are
/// handed out one by one, largest fractional remainder first (input order
/// on ties). Every contract therefore lands within one unit of its target.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::apportion_units;
/// use rust_decimal::Decimal;
///
/// // 22 days * 8h split 33.33/33.33/33.34
/// let targets = [Decimal::new(5866, 2), Decimal::new(5866, 2), Decimal::new(5868, 2)];
/// assert_eq!(apportion_units(&targets, 352), vec![117, 117, 118]);
/// ```
pub fn apportion_units(targets: &[Decimal], total_units: i64) -> Vec<i64> {
    let scaled: Vec<Decimal> = targets
        .iter()
        .map(|t| (*t).max(Decimal::ZERO).saturating_mul(Decimal::from(UNITS_PER_HOUR)))
        .collect();
    let mut units: Vec<i64> = scaled
        .iter()
        .map(|s| s.floor().to_i64().unwrap_or(i64::MAX))
        .collect();

    let mut order: Vec<usize> = (0..scaled.len()).collect();
    order.sort_by(|a, b| scaled[*b].fract().cmp(&scaled[*a].fract()).then(a.cmp(b)));

    let assigned = units.iter().fold(0i64, |acc, u| acc.saturating_add(*u));
    let mut leftover = total_units.saturating_sub(assigned);

    while leftover > 0 && !order.is_empty() {
        for i in &order {
            if leftover == 0 {
                break;
            }
            units[*i] += 1;
            leftover -= 1;
        }
    }

    // Targets rounded to cents can overshoot the month by a hair.
    while leftover < 0 {
        match order.iter().rev().find(|i| units[**i] > 0) {
            Some(i) => {
                units[*i] -= 1;
                leftover += 1;
            }
            None => break,
        }
    }

    units
}
