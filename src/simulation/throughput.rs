//! Release of vehicles through the green approach

use super::queue::ApproachQueues;
use super::stats::SimStats;
use super::types::{Approach, VehicleId};

/// A vehicle that has just crossed the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Departure {
    pub approach: Approach,
    pub vehicle: VehicleId,
    /// Ticks spent queued
    pub wait: u64,
}

/// Release at most one vehicle from the green approach
///
/// The oldest vehicle leaves, its wait is folded into `stats` and the vehicle
/// itself is dropped. Nothing happens while no approach is green.
pub fn release_one(
    queues: &mut ApproachQueues,
    stats: &mut SimStats,
    green: Option<Approach>,
    now: u64,
) -> Option<Departure> {
    let approach = green?;
    let vehicle = queues.pop(approach)?;
    let wait = vehicle.waited(now);
    stats.record_departure(wait);
    Some(Departure {
        approach,
        vehicle: vehicle.id,
        wait,
    })
}
