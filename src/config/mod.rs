//! Configuration loading and management for the hours planner.
//!
//! This module loads the planner settings (retry bound, default seed, server
//! address) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use hours_planner::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Retry bound: {}", config.config().allocation.max_attempts);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{AllocationSettings, PlannerConfig, ServerSettings};
