//! Configuration types.

use std::time::Duration;

use crate::design::DesignConfig;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    /// Design generation knobs (sample size, task size, retry cap).
    pub design: DesignConfig,
    /// Session idle timeout (sessions are evicted after this duration).
    pub session_idle_timeout: Duration,
    /// How often the eviction sweep runs.
    pub eviction_sweep_interval: Duration,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            design: DesignConfig::default(),
            session_idle_timeout: Duration::from_secs(3600), // 1 hour
            eviction_sweep_interval: Duration::from_secs(60),
        }
    }
}
