//! Batch planning.
//!
//! Plans every row of a batch independently. A row that cannot be read or
//! validated is reported and skipped; the remaining rows are still planned.

use std::io::Read;

use serde::Serialize;
use tracing::{info, warn};

use crate::allocation::{AllocationEngine, seeded_rng};
use crate::error::{PlannerError, PlannerResult};
use crate::models::AllocationResult;

use super::BatchRow;

/// Outcome of one batch row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The row was planned.
    Planned {
        /// One-based data row number.
        row: usize,
        /// The planned month.
        result: AllocationResult,
    },
    /// The row was skipped.
    Skipped {
        /// One-based data row number.
        row: usize,
        /// Why the row was skipped.
        error: String,
    },
}

impl BatchOutcome {
    /// The row number this outcome belongs to.
    pub fn row(&self) -> usize {
        match self {
            BatchOutcome::Planned { row, .. } | BatchOutcome::Skipped { row, .. } => *row,
        }
    }

    /// The planned month, if any.
    pub fn result(&self) -> Option<&AllocationResult> {
        match self {
            BatchOutcome::Planned { result, .. } => Some(result),
            BatchOutcome::Skipped { .. } => None,
        }
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// One outcome per data row, in input order.
    pub outcomes: Vec<BatchOutcome>,
    /// Number of planned rows.
    pub planned: usize,
    /// Number of skipped rows.
    pub skipped: usize,
}

impl BatchReport {
    fn from_outcomes(outcomes: Vec<BatchOutcome>) -> Self {
        let planned = outcomes
            .iter()
            .filter(|o| matches!(o, BatchOutcome::Planned { .. }))
            .count();
        let skipped = outcomes.len() - planned;
        Self {
            outcomes,
            planned,
            skipped,
        }
    }
}

/// Plans batches of months.
///
/// Each row gets its own random generator. With a base seed, row `n` is
/// seeded with `seed + n`, so a batch is reproducible and rows do not share
/// draws.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::AllocationEngine;
/// use hours_planner::batch::BatchPlanner;
///
/// let csv = "month,year,hours_per_day,holidays,contracts,donors\n\
///            10,2025,8,,\"A:50,B:50\",\n\
///            11,2025,8,,\"A:50,B:49\",\n";
///
/// let report = BatchPlanner::new(AllocationEngine::default(), Some(1)).run(csv.as_bytes());
/// assert_eq!(report.planned, 1);
/// assert_eq!(report.skipped, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BatchPlanner {
    engine: AllocationEngine,
    seed: Option<u64>,
}

impl BatchPlanner {
    /// Creates a batch planner.
    pub fn new(engine: AllocationEngine, seed: Option<u64>) -> Self {
        Self { engine, seed }
    }

    /// Reads CSV rows from `reader` and plans each of them.
    pub fn run<R: Read>(&self, reader: R) -> BatchReport {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let outcomes: Vec<BatchOutcome> = csv_reader
            .deserialize::<BatchRow>()
            .enumerate()
            .map(|(index, record)| {
                let row = index + 1;
                let planned = record
                    .map_err(|e| PlannerError::MalformedRow {
                        row,
                        message: e.to_string(),
                    })
                    .and_then(|batch_row| self.plan_row(row, batch_row));

                match planned {
                    Ok(result) => BatchOutcome::Planned { row, result },
                    Err(error) => {
                        warn!(row, error = %error, "Skipping batch row");
                        BatchOutcome::Skipped {
                            row,
                            error: error.to_string(),
                        }
                    }
                }
            })
            .collect();

        let report = BatchReport::from_outcomes(outcomes);
        info!(
            planned = report.planned,
            skipped = report.skipped,
            "Batch completed"
        );
        report
    }

    /// Plans a single parsed row.
    pub fn plan_row(&self, row: usize, batch_row: BatchRow) -> PlannerResult<AllocationResult> {
        let request = batch_row.into_request()?;
        let seed = self.seed.map(|s| s.wrapping_add(row as u64));
        self.engine.plan(&request, &mut seeded_rng(seed))
    }
}
