//! Hours allocation for the planner.
//!
//! This module contains the calendar utilities that find the working days of
//! a month, request validation, target computation, the per-day randomized
//! split, and the [`AllocationEngine`] tying them together.

mod calendar;
mod daily_split;
mod dirichlet;
mod engine;
mod targets;
mod validation;

pub use calendar::{
    CalendarDay, DayKind, MonthDays, WorkingDayCalendar, all_days_of, classify_day,
    is_working_day, working_days,
};
pub use daily_split::{DEFAULT_MAX_ATTEMPTS, DaySplit, split_day};
pub use dirichlet::SymmetricDirichlet;
pub use engine::{AllocationEngine, seeded_rng};
pub use targets::{
    UNITS_PER_HOUR, apportion_units, cap_units, hours_to_units, target_hours, units_to_hours,
};
pub use validation::{
    DATE_FORMAT, MAX_HOURS_PER_DAY, attach_donors, parse_contract_entry, parse_holidays,
    parse_iso_date, validate_contracts, validate_hours_per_day, validate_period,
    validate_request,
};
