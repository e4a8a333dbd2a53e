//! Configuration for an animation run

use std::time::Duration;

use crate::types::{DEFAULT_FAST_INTERVAL_MS, DEFAULT_INTERVAL_MS};

/// Frame timing and engine policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Display time of a regular frame
    pub interval: Duration,

    /// Display time of each drop step
    pub fast_interval: Duration,

    /// Reject a spawn whose start position is not free
    pub spawn_check: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            fast_interval: Duration::from_millis(DEFAULT_FAST_INTERVAL_MS),
            spawn_check: true,
        }
    }
}

impl RunConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the regular frame interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the drop step interval
    pub fn with_fast_interval(mut self, fast_interval: Duration) -> Self {
        self.fast_interval = fast_interval;
        self
    }

    /// Enable or disable the spawn position check
    pub fn with_spawn_check(mut self, spawn_check: bool) -> Self {
        self.spawn_check = spawn_check;
        self
    }

    /// Interval for a frame of the given kind
    pub fn interval_for(&self, fast: bool) -> Duration {
        if fast {
            self.fast_interval
        } else {
            self.interval
        }
    }
}
