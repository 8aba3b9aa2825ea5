//! Soft-stop deadline scheduling.
//!
//! The scheduler kills the job outright at its wall-clock limit. The soft
//! stop goes out a grace interval earlier so the evaluation program can
//! checkpoint and wind down on its own terms.

use std::time::Duration;

/// When to deliver the soft-stop warning, relative to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftStop {
    delay: Duration,
}

impl SoftStop {
    /// Arm a soft stop for a job with the given wall-clock limit and grace
    /// interval, both in seconds.
    ///
    /// Returns `None` when no limit is configured. A grace interval at or
    /// above the limit means the warning is already due at launch.
    pub fn arm(limit_secs: Option<u64>, grace_secs: u64) -> Option<Self> {
        limit_secs.map(|limit| Self {
            delay: Duration::from_secs(limit.saturating_sub(grace_secs)),
        })
    }

    /// Delay from launch until the warning is due.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
