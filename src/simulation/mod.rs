//! Standalone signal simulation module
//!
//! This module contains the queueing, signal timing and adaptive control logic
//! for a single four-way intersection. Rendering is left to whoever reads the
//! accessors and drains the events.

mod arrivals;
mod clock;
mod controller;
mod events;
mod queue;
mod scheduler;
mod settings;
mod signal;
mod stats;
mod throughput;
mod types;
mod world;

pub use arrivals::{Arrival, ArrivalGenerator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{choose_next_green, green_duration_for, rank_queues, QueueRank};
pub use events::SimEvent;
pub use queue::ApproachQueues;
pub use scheduler::Scheduler;
pub use settings::{clamp_density, clamp_green_duration, clamp_threshold, Applied, SimConfig};
pub use signal::{PendingHandover, Phase, SignalController};
pub use stats::SimStats;
pub use throughput::{release_one, Departure};
pub use types::{
    Approach, CarColor, SignalColor, Vehicle, VehicleId, BASE_GREEN_DURATION, DENSITY_WINDOW,
    MAX_GREEN_DURATION, MIN_GREEN_DURATION,
};
pub use world::{SimSnapshot, SimWorld};
