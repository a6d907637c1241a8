//! Adaptive Signal Simulation Library
//!
//! A single-intersection traffic signal simulation that can run headless from
//! the command line or be driven by any front end through its accessors.

pub mod simulation;
