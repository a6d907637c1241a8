//! Per-approach FIFO queues of waiting vehicles

use std::collections::VecDeque;

use super::types::{Approach, Vehicle};

/// The four approach queues, oldest vehicle at the front of each
#[derive(Debug, Clone, Default)]
pub struct ApproachQueues {
    queues: [VecDeque<Vehicle>; 4],
}

impl ApproachQueues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vehicle to the back of its approach's queue
    pub fn push(&mut self, vehicle: Vehicle) {
        self.queues[vehicle.approach.index()].push_back(vehicle);
    }

    /// Remove the oldest vehicle waiting on `approach`
    pub fn pop(&mut self, approach: Approach) -> Option<Vehicle> {
        self.queues[approach.index()].pop_front()
    }

    pub fn len(&self, approach: Approach) -> usize {
        self.queues[approach.index()].len()
    }

    pub fn is_empty(&self, approach: Approach) -> bool {
        self.queues[approach.index()].is_empty()
    }

    /// Queue lengths indexed in canonical order
    pub fn lengths(&self) -> [usize; 4] {
        Approach::ALL.map(|approach| self.len(approach))
    }

    /// Number of vehicles waiting on all approaches
    pub fn total(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    /// Waiting vehicles on `approach`, oldest first
    pub fn iter(&self, approach: Approach) -> impl Iterator<Item = &Vehicle> {
        self.queues[approach.index()].iter()
    }

    pub fn clear(&mut self) {
        for queue in &mut self.queues {
            queue.clear();
        }
    }
}
