//! Tunable settings and their validation
//!
//! Out-of-range values are clamped to the nearest valid bound instead of being
//! rejected. Callers get the applied value back together with a flag saying
//! whether it differs from what they asked for.

use std::time::Duration;

use anyhow::Result;
use log::warn;

use super::types::{Approach, DENSITY_WINDOW, MAX_GREEN_DURATION, MIN_GREEN_DURATION};

/// Result of pushing a value into a setting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applied<T> {
    /// The value now in effect
    pub value: T,
    /// True if the requested value was out of range and had to be clamped
    pub clamped: bool,
}

/// Clamp an arrival rate (vehicles per 60 ticks) into [0, 60]
pub fn clamp_density(requested: f64) -> Applied<f64> {
    let value = if requested.is_nan() {
        0.0
    } else {
        requested.clamp(0.0, DENSITY_WINDOW)
    };
    Applied {
        value,
        clamped: value != requested,
    }
}

/// Clamp a density threshold to a non-negative whole number of vehicles
pub fn clamp_threshold(requested: f64) -> Applied<usize> {
    // Float to int casts saturate and map NaN to zero
    let value = requested.max(0.0).floor() as usize;
    Applied {
        value,
        clamped: value as f64 != requested,
    }
}

/// Clamp a green duration to whole ticks within [5, 30]
pub fn clamp_green_duration(requested: f64) -> Applied<u32> {
    let value = if requested.is_nan() {
        MIN_GREEN_DURATION
    } else {
        (requested.floor() as i64).clamp(MIN_GREEN_DURATION as i64, MAX_GREEN_DURATION as i64) as u32
    };
    Applied {
        value,
        clamped: value as f64 != requested,
    }
}

pub(crate) fn log_clamp<T: std::fmt::Debug>(setting: &str, requested: f64, applied: &Applied<T>) {
    if applied.clamped {
        warn!(
            "{} {} is out of range, using {:?} instead",
            setting, requested, applied.value
        );
    }
}

/// Configuration a simulation is built from and reset to
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Expected north/south arrivals per 60 ticks
    pub ns_density: f64,
    /// Expected east/west arrivals per 60 ticks
    pub ew_density: f64,
    /// Queue length another approach needs to preempt the rotation
    pub density_threshold: usize,
    /// Length of the first green phase, in ticks
    pub green_duration: u32,
    pub initial_green: Approach,
    /// Wall-clock time between ticks
    pub tick_interval: Duration,
    /// Wall-clock length of the yellow phase
    pub yellow_interval: Duration,
    /// Vehicles placed in each queue (canonical order) before the first tick
    pub initial_queues: [usize; 4],
    /// Seed for arrivals and car colours; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ns_density: 5.0,
            ew_density: 3.0,
            density_threshold: 4,
            green_duration: 10,
            initial_green: Approach::West,
            tick_interval: Duration::from_secs(1),
            yellow_interval: Duration::from_secs(2),
            initial_queues: [3, 2, 2, 3],
            seed: None,
        }
    }
}

impl SimConfig {
    /// Config with no pre-filled queues
    pub fn empty_start() -> Self {
        Self {
            initial_queues: [0; 4],
            ..Self::default()
        }
    }

    /// Check structural settings and clamp tunable ones
    pub fn validated(mut self) -> Result<Self> {
        if self.tick_interval.is_zero() {
            anyhow::bail!("Tick interval must be greater than zero");
        }

        let ns = clamp_density(self.ns_density);
        log_clamp("North/south density", self.ns_density, &ns);
        self.ns_density = ns.value;

        let ew = clamp_density(self.ew_density);
        log_clamp("East/west density", self.ew_density, &ew);
        self.ew_density = ew.value;

        let duration = clamp_green_duration(self.green_duration as f64);
        log_clamp("Green duration", self.green_duration as f64, &duration);
        self.green_duration = duration.value;

        Ok(self)
    }
}
