//! Runtime configuration.
//!
//! Cadence is a policy of the reconciliation loops, not of the lifecycle
//! engine; it lives here. Supports loading from environment variables
//! with a VESTLOCK_ prefix.

use serde::{Deserialize, Serialize};
use std::env;

/// Simulation runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Data directory for the file-backed ledger store
    pub data_dir: String,
    /// Client reconciliation cadence in milliseconds
    pub client_tick_ms: u64,
    /// Operator reconciliation cadence in milliseconds
    pub operator_tick_ms: u64,
    /// Fixed confirmation delay before a commit or withdrawal resolves
    pub confirm_delay_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: "./vestlock_data".to_string(),
            client_tick_ms: 1000,
            operator_tick_ms: 1000,
            confirm_delay_ms: 1000,
        }
    }
}

impl SimConfig {
    /// Load configuration from environment variables
    ///
    /// - VESTLOCK_DATA_DIR: ledger data directory
    /// - VESTLOCK_CLIENT_TICK_MS: client loop cadence
    /// - VESTLOCK_OPERATOR_TICK_MS: operator loop cadence
    /// - VESTLOCK_CONFIRM_DELAY_MS: simulated confirmation delay
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: env::var("VESTLOCK_DATA_DIR").unwrap_or(defaults.data_dir),
            client_tick_ms: env_ms("VESTLOCK_CLIENT_TICK_MS", defaults.client_tick_ms),
            operator_tick_ms: env_ms("VESTLOCK_OPERATOR_TICK_MS", defaults.operator_tick_ms),
            confirm_delay_ms: env_ms("VESTLOCK_CONFIRM_DELAY_MS", defaults.confirm_delay_ms),
        }
    }

    /// Fast configuration for tests: no confirmation delay, tight ticks
    pub fn test() -> Self {
        Self {
            data_dir: String::new(),
            client_tick_ms: 10,
            operator_tick_ms: 10,
            confirm_delay_ms: 0,
        }
    }
}

fn env_ms(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.client_tick_ms, 1000);
        assert_eq!(config.operator_tick_ms, 1000);
        assert_eq!(config.confirm_delay_ms, 1000);
    }

    #[test]
    fn test_test_config_has_no_delay() {
        assert_eq!(SimConfig::test().confirm_delay_ms, 0);
    }
}
