//! Batch import for the hours planner.
//!
//! Reads many months to plan from CSV and plans each row on its own. The row
//! format carries comma-joined holiday and contract lists, optionally paired
//! with a donor list of the same length.

mod row;
mod runner;

pub use row::{BatchRow, LIST_SEPARATOR};
pub use runner::{BatchOutcome, BatchPlanner, BatchReport};
