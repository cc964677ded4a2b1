//! Configuration types for the planner.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `planner.yaml`.

use serde::Deserialize;

use crate::allocation::DEFAULT_MAX_ATTEMPTS;

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Settings of the allocation engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AllocationSettings {
    /// Random draws allowed per working day before the split is repaired.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Seed used when a request does not carry its own. `None` seeds every
    /// run from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            seed: None,
        }
    }
}

/// Settings of the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// The complete planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlannerConfig {
    /// Allocation engine settings.
    #[serde(default)]
    pub allocation: AllocationSettings,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
}
