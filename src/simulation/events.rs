//! Notifications emitted for a presentation layer to react to

use super::types::{Approach, SignalColor, VehicleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    VehicleEnqueued {
        approach: Approach,
        vehicle: VehicleId,
    },
    VehicleDeparted {
        approach: Approach,
        vehicle: VehicleId,
        wait: u64,
    },
    LightChanged {
        approach: Approach,
        color: SignalColor,
    },
    TickAdvanced(u64),
}
