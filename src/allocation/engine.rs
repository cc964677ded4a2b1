//! The monthly allocation engine.
//!
//! Walks the month day by day, splitting each working day's budget across
//! the contracts while tracking how many half-hour units every contract
//! still needs to reach its monthly target.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{AllocationRequest, AllocationResult, ContractShare, LivenessWarning};

use super::{
    DEFAULT_MAX_ATTEMPTS, WorkingDayCalendar, apportion_units, cap_units, hours_to_units,
    split_day, target_hours, units_to_hours, validate_hours_per_day, validate_request,
};

/// Builds the random source for one planning run.
///
/// A fixed seed gives reproducible plannings; without one the generator is
/// seeded from the operating system.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Allocates working hours across contracts for one month.
///
/// The engine itself is stateless apart from its retry bound, so a single
/// instance can serve any number of independent requests.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::{AllocationEngine, seeded_rng};
/// use hours_planner::models::{AllocationRequest, ContractShare};
/// use rust_decimal::Decimal;
///
/// let request = AllocationRequest::new(10, 2025, Decimal::from(8))
///     .with_contract(ContractShare::new("A", Decimal::from(50)))
///     .with_contract(ContractShare::new("B", Decimal::from(50)));
///
/// let engine = AllocationEngine::default();
/// let result = engine.plan(&request, &mut seeded_rng(Some(42))).unwrap();
///
/// assert_eq!(result.total_hours(), Decimal::from(184));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationEngine {
    max_attempts: u32,
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl AllocationEngine {
    /// Creates an engine allowing `max_attempts` random draws per working day.
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// The retry bound per working day.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Validates the request and plans its month.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the request is malformed; nothing is
    /// allocated in that case.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        request: &AllocationRequest,
        rng: &mut R,
    ) -> PlannerResult<AllocationResult> {
        validate_request(request)?;
        let calendar = WorkingDayCalendar::build(request.month, request.year, &request.holidays)?;
        self.allocate(
            &calendar,
            request.hours_per_working_day,
            &request.contracts,
            rng,
        )
    }

    /// Allocates `hours_per_day` on every working day of `calendar`.
    ///
    /// Contracts are expected to be validated already. The targets are first
    /// turned into whole units adding up to the month, so every contract ends
    /// within half an hour of its target. Days that could not be split within
    /// the retry bound are reported in the result's diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidHoursPerDay`] if the budget is not a
    /// positive number of half hours within the daily limit.
    pub fn allocate<R: Rng + ?Sized>(
        &self,
        calendar: &WorkingDayCalendar,
        hours_per_day: Decimal,
        contracts: &[ContractShare],
        rng: &mut R,
    ) -> PlannerResult<AllocationResult> {
        validate_hours_per_day(hours_per_day)?;
        let day_units =
            hours_to_units(hours_per_day).ok_or_else(|| PlannerError::InvalidHoursPerDay {
                hours: hours_per_day,
                message: "must be a multiple of 0.5".to_string(),
            })?;

        let working_day_count = calendar.working_day_count();
        let targets = target_hours(working_day_count, hours_per_day, contracts)?;
        let mut remaining = apportion_units(&targets, working_day_count as i64 * day_units);
        let mut matrix: Vec<Vec<Option<Decimal>>> =
            vec![Vec::with_capacity(calendar.days().len()); contracts.len()];
        let mut diagnostics = Vec::new();

        debug!(
            month = calendar.month(),
            year = calendar.year(),
            working_days = working_day_count,
            contracts = contracts.len(),
            "Allocating month"
        );

        for day in calendar.days() {
            if !day.is_working_day() {
                for row in matrix.iter_mut() {
                    row.push(None);
                }
                continue;
            }

            let caps: Vec<i64> = remaining
                .iter()
                .map(|r| cap_units(*r, day_units))
                .collect();
            let split = split_day(day_units, &caps, self.max_attempts, rng);

            if split.exhausted {
                let residual_hours = units_to_hours(split.residual_units);
                warn!(
                    date = %day.date,
                    attempts = split.attempts,
                    residual_hours = %residual_hours,
                    "Day split exceeded retry bound, keeping repaired allocation"
                );
                diagnostics.push(LivenessWarning {
                    date: day.date,
                    attempts: split.attempts,
                    residual_hours,
                });
            }

            for ((row, left), units) in matrix
                .iter_mut()
                .zip(remaining.iter_mut())
                .zip(&split.units)
            {
                *left -= *units;
                row.push(Some(units_to_hours(*units)));
            }
        }

        let rows = contracts
            .iter()
            .cloned()
            .zip(targets)
            .zip(matrix)
            .map(|((contract, target), hours)| (contract, target, hours))
            .collect();

        Ok(AllocationResult::assemble(
            calendar.month(),
            calendar.year(),
            hours_per_day,
            calendar.dates(),
            rows,
            diagnostics,
        ))
    }
}
