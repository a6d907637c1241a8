//! Signal state machine for the four approaches
//!
//! Standalone timing logic: the green phase is counted in ticks, the yellow
//! phase in wall-clock time through a pending handover record.

use std::time::Duration;

use super::types::{Approach, SignalColor};

/// A yellow phase waiting to hand the intersection over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHandover {
    /// Approach currently showing yellow
    pub from: Approach,
    /// Approach that turns green when the yellow interval ends
    pub to: Approach,
    /// Clock time at which the handover completes
    pub ready_at: Duration,
}

/// Current phase of the intersection as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Green {
        approach: Approach,
        elapsed: u32,
        duration: u32,
    },
    Yellow(PendingHandover),
}

/// Lights of all four approaches plus the shared phase timers
#[derive(Debug, Clone)]
pub struct SignalController {
    lights: [SignalColor; 4],
    /// Approach holding (or last holding) the green
    current: Approach,
    /// Ticks elapsed in the current green phase
    green_timer: u32,
    /// Ticks the current green phase lasts
    green_duration: u32,
    pending: Option<PendingHandover>,
}

impl SignalController {
    pub fn new(initial_green: Approach, green_duration: u32) -> Self {
        let mut lights = [SignalColor::Red; 4];
        lights[initial_green.index()] = SignalColor::Green;
        Self {
            lights,
            current: initial_green,
            green_timer: 0,
            green_duration,
            pending: None,
        }
    }

    pub fn color(&self, approach: Approach) -> SignalColor {
        self.lights[approach.index()]
    }

    /// Approach currently showing green, `None` during a yellow phase
    pub fn green_approach(&self) -> Option<Approach> {
        match self.pending {
            Some(_) => None,
            None => Some(self.current),
        }
    }

    pub fn current(&self) -> Approach {
        self.current
    }

    pub fn green_timer(&self) -> u32 {
        self.green_timer
    }

    pub fn green_duration(&self) -> u32 {
        self.green_duration
    }

    pub fn set_green_duration(&mut self, duration: u32) {
        self.green_duration = duration;
    }

    pub fn pending(&self) -> Option<PendingHandover> {
        self.pending
    }

    /// Ticks left before the current green expires (0 while yellow)
    pub fn remaining(&self) -> u32 {
        match self.pending {
            Some(_) => 0,
            None => self.green_duration.saturating_sub(self.green_timer),
        }
    }

    pub fn phase(&self) -> Phase {
        match self.pending {
            Some(handover) => Phase::Yellow(handover),
            None => Phase::Green {
                approach: self.current,
                elapsed: self.green_timer,
                duration: self.green_duration,
            },
        }
    }

    /// Advance the green timer by one tick
    ///
    /// Returns true when the green phase has expired and a yellow phase should
    /// begin. The timer is frozen while a handover is pending.
    pub fn advance(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.green_timer += 1;
        self.green_timer >= self.green_duration
    }

    /// Turn the current green yellow and schedule the handover to `next`
    pub fn begin_yellow(&mut self, next: Approach, ready_at: Duration) -> PendingHandover {
        let handover = PendingHandover {
            from: self.current,
            to: next,
            ready_at,
        };
        self.lights[self.current.index()] = SignalColor::Yellow;
        self.pending = Some(handover);
        handover
    }

    /// Complete a pending handover if one is due at `now`
    ///
    /// The old approach goes red and the new one green with a fresh timer and
    /// the given duration.
    pub fn complete_handover(&mut self, now: Duration, green_duration: u32) -> Option<PendingHandover> {
        let handover = self.pending.filter(|handover| handover.ready_at <= now)?;
        self.lights[handover.from.index()] = SignalColor::Red;
        self.lights[handover.to.index()] = SignalColor::Green;
        self.current = handover.to;
        self.green_timer = 0;
        self.green_duration = green_duration;
        self.pending = None;
        Some(handover)
    }
}
