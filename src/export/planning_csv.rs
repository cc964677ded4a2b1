//! CSV rendering of a planned month.
//!
//! The output stacks two tables: the contract shares, then the planning
//! matrix with one column per date, a per-contract total column and a
//! per-day total row. Weekends and holidays are left empty.

use std::io::Write;

use rust_decimal::Decimal;

use crate::error::{PlannerError, PlannerResult};
use crate::models::AllocationResult;

/// Label of the per-day total row.
pub const DAY_TOTAL_LABEL: &str = "total/day";

fn cell(value: Decimal) -> String {
    value.normalize().to_string()
}

fn export_error(e: impl std::fmt::Display) -> PlannerError {
    PlannerError::ExportError {
        message: e.to_string(),
    }
}

/// Writes `result` as CSV to `writer`.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::{AllocationEngine, seeded_rng};
/// use hours_planner::export::write_planning_csv;
/// use hours_planner::models::{AllocationRequest, ContractShare};
/// use rust_decimal::Decimal;
///
/// let request = AllocationRequest::new(2, 2026, Decimal::from(8))
///     .with_contract(ContractShare::new("A", Decimal::from(100)));
/// let result = AllocationEngine::default()
///     .plan(&request, &mut seeded_rng(Some(1)))
///     .unwrap();
///
/// let mut out = Vec::new();
/// write_planning_csv(&result, &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
///
/// assert!(text.starts_with("code,percentage,donor,target_hours\n"));
/// assert!(text.contains("contract,2026-02-01,"));
/// ```
pub fn write_planning_csv<W: Write>(result: &AllocationResult, writer: W) -> PlannerResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    csv_writer
        .write_record(["code", "percentage", "donor", "target_hours"])
        .map_err(export_error)?;
    for row in result.contracts() {
        csv_writer
            .write_record([
                row.code.clone(),
                cell(row.percentage),
                row.donor.clone().unwrap_or_default(),
                cell(row.target_hours),
            ])
            .map_err(export_error)?;
    }

    let mut header = vec!["contract".to_string()];
    header.extend(result.dates().iter().map(|d| d.to_string()));
    header.push("total".to_string());
    csv_writer.write_record(&header).map_err(export_error)?;

    for row in result.contracts() {
        let mut record = vec![row.code.clone()];
        record.extend(row.hours.iter().map(|h| h.map(cell).unwrap_or_default()));
        record.push(cell(row.total_hours));
        csv_writer.write_record(&record).map_err(export_error)?;
    }

    let worked: Vec<bool> = match result.contracts().first() {
        Some(row) => row.hours.iter().map(Option::is_some).collect(),
        None => vec![false; result.dates().len()],
    };
    let mut totals = vec![DAY_TOTAL_LABEL.to_string()];
    totals.extend(
        result
            .total_per_day()
            .iter()
            .zip(&worked)
            .map(|(total, worked)| if *worked { cell(*total) } else { String::new() }),
    );
    totals.push(cell(result.total_hours()));
    csv_writer.write_record(&totals).map_err(export_error)?;

    csv_writer.flush().map_err(export_error)
}

/// Renders `result` as a CSV string.
pub fn planning_csv_string(result: &AllocationResult) -> PlannerResult<String> {
    let mut buffer = Vec::new();
    write_planning_csv(result, &mut buffer)?;
    String::from_utf8(buffer).map_err(export_error)
}
