//! Error types for the hours planner.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can stop a planning request.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the hours planner.
///
/// Validation variants describe a malformed request and are recovered at the
/// request boundary: in batch mode the offending row is skipped and the rest
/// of the batch keeps going.
///
/// # Example
///
/// ```
/// use hours_planner::error::PlannerError;
/// use rust_decimal::Decimal;
///
/// let error = PlannerError::PercentageSum {
///     total: Decimal::from(99),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Contract percentages sum to 99, expected exactly 100"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Contract percentages do not add up to exactly 100.
    #[error("Contract percentages sum to {total}, expected exactly 100")]
    PercentageSum {
        /// The actual sum of the percentages.
        total: Decimal,
    },

    /// The request does not name any contract.
    #[error("At least one contract is required")]
    NoContracts,

    /// A contract code was empty or blank.
    #[error("Contract code at position {position} is empty")]
    EmptyContractCode {
        /// Zero-based position of the contract in the request.
        position: usize,
    },

    /// The same contract code appears more than once.
    #[error("Duplicate contract code: {code}")]
    DuplicateContract {
        /// The repeated code.
        code: String,
    },

    /// A contract percentage lies outside 0..=100.
    #[error("Percentage {percentage} for contract '{code}' must be between 0 and 100")]
    PercentageOutOfRange {
        /// The contract code.
        code: String,
        /// The offending percentage.
        percentage: Decimal,
    },

    /// The per-day hour budget is unusable.
    #[error("Invalid hours per working day {hours}: {message}")]
    InvalidHoursPerDay {
        /// The requested hours.
        hours: Decimal,
        /// Why the value was rejected.
        message: String,
    },

    /// The month/year pair does not name a calendar month.
    #[error("Invalid period: month {month} of year {year}")]
    InvalidPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("Invalid date '{input}': {message}")]
    InvalidDate {
        /// The raw input.
        input: String,
        /// The parser message.
        message: String,
    },

    /// The donor list and the contract list have different lengths.
    #[error("Donor list has {donors} entries but {contracts} contracts were given")]
    DonorCountMismatch {
        /// Number of contracts.
        contracts: usize,
        /// Number of donors.
        donors: usize,
    },

    /// A `code:percentage` entry could not be parsed.
    #[error("Malformed contract entry '{entry}': {message}")]
    MalformedContract {
        /// The raw entry.
        entry: String,
        /// What was wrong with it.
        message: String,
    },

    /// A batch row could not be read.
    #[error("Malformed batch row {row}: {message}")]
    MalformedRow {
        /// One-based data row number.
        row: usize,
        /// The reader message.
        message: String,
    },

    /// The planning export could not be written.
    #[error("Export failed: {message}")]
    ExportError {
        /// A description of the write failure.
        message: String,
    },
}

impl PlannerError {
    /// Returns true when the error describes a malformed request rather than
    /// a server-side failure.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            PlannerError::ConfigNotFound { .. }
                | PlannerError::ConfigParseError { .. }
                | PlannerError::ExportError { .. }
        )
    }
}

/// A type alias for Results that return PlannerError.
pub type PlannerResult<T> = Result<T, PlannerError>;
