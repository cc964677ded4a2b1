//! Application state for the hours planner API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::allocation::AllocationEngine;
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds only the immutable configuration; every request builds its own
/// random generator and remaining-hours accumulator.
#[derive(Clone)]
pub struct AppState {
    /// The loaded planner configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Engine configured with the retry bound from the configuration.
    pub fn engine(&self) -> AllocationEngine {
        self.config.engine()
    }

    /// Seed used when a request carries none.
    pub fn default_seed(&self) -> Option<u64> {
        self.config.default_seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_default_state_uses_default_engine() {
        let state = AppState::new(ConfigLoader::default());
        assert_eq!(state.engine(), AllocationEngine::default());
        assert_eq!(state.default_seed(), None);
    }
}
