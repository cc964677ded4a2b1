//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the planner
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::allocation::AllocationEngine;
use crate::error::{PlannerError, PlannerResult};

use super::types::PlannerConfig;

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "planner.yaml";

/// Loads and provides access to the planner configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── planner.yaml   # Allocation and server settings
/// ```
///
/// # Example
///
/// ```no_run
/// use hours_planner::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Listening on {}", loader.config().server.bind_address);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PlannerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `planner.yaml` is missing
    /// - the file contains invalid YAML
    /// - `allocation.max_attempts` is zero
    pub fn load<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let file = path.as_ref().join(CONFIG_FILE_NAME);
        let path_str = file.display().to_string();

        let content = fs::read_to_string(&file).map_err(|_| PlannerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            PlannerError::ConfigParseError { message, .. } => PlannerError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> PlannerResult<Self> {
        let config: PlannerConfig =
            serde_yaml::from_str(content).map_err(|e| PlannerError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        if config.allocation.max_attempts == 0 {
            return Err(PlannerError::ConfigParseError {
                path: "<inline>".to_string(),
                message: "allocation.max_attempts must be at least 1".to_string(),
            });
        }

        Ok(Self { config })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds an allocation engine with the configured retry bound.
    pub fn engine(&self) -> AllocationEngine {
        AllocationEngine::new(self.config.allocation.max_attempts)
    }

    /// Seed applied when a request carries none.
    pub fn default_seed(&self) -> Option<u64> {
        self.config.allocation.seed
    }
}
