//! Periodic timers driven by the host's clock
//!
//! The controller owns no threads. The host calls
//! [`crate::app::HighlightController::tick`] with the current time and each
//! timer reports whether it has come due since it was last started or fired.

use std::time::{Duration, Instant};

/// A restartable periodic timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    interval: Duration,
    /// Start of the current period, `None` while stopped
    started_at: Option<Instant>,
}

impl Timer {
    /// A stopped timer
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            started_at: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the period; a running timer keeps its current start time
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Start the timer, restarting the countdown if it is already running
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Report whether a period has elapsed; if so, the next period starts now
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.started_at {
            Some(started) if now.saturating_duration_since(started) >= self.interval => {
                self.started_at = Some(now);
                true
            }
            _ => false,
        }
    }
}
