//! Core types for the signal simulation
//!
//! Approaches, light colours and the vehicles that wait in the queues.

use std::fmt;
use std::str::FromStr;

/// One of the four fixed directions feeding the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Approach {
    North,
    South,
    East,
    West,
}

impl Approach {
    /// Canonical order used for tie-breaking and for the round-robin cycle
    pub const ALL: [Approach; 4] = [
        Approach::North,
        Approach::South,
        Approach::East,
        Approach::West,
    ];

    /// Position in [`Approach::ALL`], used to index per-approach arrays
    pub fn index(self) -> usize {
        match self {
            Approach::North => 0,
            Approach::South => 1,
            Approach::East => 2,
            Approach::West => 3,
        }
    }

    /// The approach after this one in the cycle north → south → east → west → north
    pub fn next(self) -> Approach {
        Approach::ALL[(self.index() + 1) % Approach::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Approach::North => "north",
            Approach::South => "south",
            Approach::East => "east",
            Approach::West => "west",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Approach {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Approach::North),
            "south" | "s" => Ok(Approach::South),
            "east" | "e" => Ok(Approach::East),
            "west" | "w" => Ok(Approach::West),
            other => anyhow::bail!("Unknown approach '{}'", other),
        }
    }
}

/// Colour shown by an approach's signal head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalColor {
    Red,
    Yellow,
    Green,
}

impl fmt::Display for SignalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignalColor::Red => "red",
            SignalColor::Yellow => "yellow",
            SignalColor::Green => "green",
        })
    }
}

/// Unique identifier of a vehicle within one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u64);

/// Cosmetic body colour, only ever read by a presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarColor {
    Blue,
    Red,
    Green,
    Yellow,
}

impl CarColor {
    pub const ALL: [CarColor; 4] = [CarColor::Blue, CarColor::Red, CarColor::Green, CarColor::Yellow];
}

/// A vehicle waiting at the intersection
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub approach: Approach,
    /// Tick at which the vehicle joined its queue
    pub arrival_tick: u64,
    pub color: CarColor,
}

impl Vehicle {
    pub fn new(id: VehicleId, approach: Approach, arrival_tick: u64, color: CarColor) -> Self {
        Self {
            id,
            approach,
            arrival_tick,
            color,
        }
    }

    /// Ticks spent in the queue as of `now`
    pub fn waited(&self, now: u64) -> u64 {
        now.saturating_sub(self.arrival_tick)
    }
}

/// Lower bound of any computed or configured green duration, in ticks
pub const MIN_GREEN_DURATION: u32 = 5;

/// Upper bound of any computed or configured green duration, in ticks
pub const MAX_GREEN_DURATION: u32 = 30;

/// Green duration before any queue bonus is added
pub const BASE_GREEN_DURATION: u32 = 10;

/// Arrival rates are "expected vehicles per this many ticks"
pub const DENSITY_WINDOW: f64 = 60.0;
