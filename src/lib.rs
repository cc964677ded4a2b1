//! Monthly timesheet hours planner
//!
//! This crate spreads a fixed daily working-hours budget across funding
//! contracts according to their share of the month, skipping weekends and
//! holidays and keeping every allocation on half-hour boundaries.

#![warn(missing_docs)]

pub mod allocation;
pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
