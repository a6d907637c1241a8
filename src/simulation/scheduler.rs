//! Tick scheduling and the start/pause lifecycle

use std::time::Duration;

/// Fires ticks at a fixed cadence while running
#[derive(Debug, Clone)]
pub struct Scheduler {
    tick_interval: Duration,
    /// Due time of the next tick; `None` while paused
    next_tick_at: Option<Duration>,
}

impl Scheduler {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            next_tick_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_tick_at.is_some()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn next_tick_at(&self) -> Option<Duration> {
        self.next_tick_at
    }

    /// Start ticking, first tick one interval after `now`
    ///
    /// Returns false if already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.is_running() {
            return false;
        }
        self.next_tick_at = Some(now + self.tick_interval);
        true
    }

    /// Stop ticking; no tick that was due fires afterwards
    ///
    /// Returns false if already paused.
    pub fn pause(&mut self) -> bool {
        self.next_tick_at.take().is_some()
    }

    /// Tick due at or before `now`, rescheduling the following one
    pub fn take_due(&mut self, now: Duration) -> Option<Duration> {
        let due = self.next_tick_at.filter(|at| *at <= now)?;
        self.next_tick_at = Some(due + self.tick_interval);
        Some(due)
    }
}
