//! Plain-text export of planned months.

mod planning_csv;

pub use planning_csv::{DAY_TOTAL_LABEL, planning_csv_string, write_planning_csv};
