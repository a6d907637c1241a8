//! Main simulation world that ties everything together
//!
//! Owns the queues, lights, statistics and random source of one intersection
//! and runs the per-tick pipeline: signals, departures, arrivals.

use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::arrivals::{Arrival, ArrivalGenerator};
use super::clock::{Clock, SystemClock};
use super::controller::{self, QueueRank};
use super::events::SimEvent;
use super::queue::ApproachQueues;
use super::scheduler::Scheduler;
use super::settings::{self, Applied, SimConfig};
use super::signal::{PendingHandover, Phase, SignalController};
use super::stats::SimStats;
use super::throughput;
use super::types::{Approach, SignalColor, Vehicle, VehicleId};

/// Point-in-time view of everything a presentation layer displays
#[derive(Debug, Clone, PartialEq)]
pub struct SimSnapshot {
    pub time: u64,
    pub running: bool,
    pub lights: [SignalColor; 4],
    pub queue_lengths: [usize; 4],
    pub stats: SimStats,
    pub green_duration: u32,
    pub green_timer: u32,
    pub pending: Option<PendingHandover>,
    pub ns_density: f64,
    pub ew_density: f64,
    pub density_threshold: usize,
}

/// The simulation of one signalised intersection
pub struct SimWorld {
    /// Settings restored by [`SimWorld::reset`]
    config: SimConfig,

    ns_density: f64,
    ew_density: f64,
    density_threshold: usize,

    signals: SignalController,
    queues: ApproachQueues,
    stats: SimStats,
    arrivals: ArrivalGenerator,
    scheduler: Scheduler,
    clock: Box<dyn Clock>,

    /// Ticks elapsed since the last reset
    time: u64,

    /// Events not yet drained by the caller
    events: Vec<SimEvent>,
}

impl SimWorld {
    /// Create a world driven by the real clock
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::with_clock(config, Box::new(SystemClock::new()))
    }

    /// Create a world driven by the given clock
    pub fn with_clock(config: SimConfig, clock: Box<dyn Clock>) -> Result<Self> {
        let config = config
            .validated()
            .context("Invalid simulation configuration")?;

        let mut world = Self {
            ns_density: config.ns_density,
            ew_density: config.ew_density,
            density_threshold: config.density_threshold,
            signals: SignalController::new(config.initial_green, config.green_duration),
            queues: ApproachQueues::new(),
            stats: SimStats::new(),
            arrivals: ArrivalGenerator::new(seeded_rng(config.seed)),
            scheduler: Scheduler::new(config.tick_interval),
            clock,
            time: 0,
            events: Vec::new(),
            config,
        };
        world.seed_queues();
        Ok(world)
    }

    fn seed_queues(&mut self) {
        for approach in Approach::ALL {
            for _ in 0..self.config.initial_queues[approach.index()] {
                self.enqueue(approach);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Start ticking; a no-op if already running
    pub fn start(&mut self) {
        let now = self.clock.now();
        if self.scheduler.start(now) {
            info!("Simulation started at tick {}", self.time);
        }
    }

    /// Stop ticking; a no-op if already paused
    ///
    /// A pending yellow handover still completes on the next [`SimWorld::pump`].
    pub fn pause(&mut self) {
        if self.scheduler.pause() {
            info!("Simulation paused at tick {}", self.time);
        }
    }

    /// Pause and restore the construction-time state, dropping any pending handover
    pub fn reset(&mut self) {
        self.scheduler.pause();
        self.ns_density = self.config.ns_density;
        self.ew_density = self.config.ew_density;
        self.density_threshold = self.config.density_threshold;
        self.signals = SignalController::new(self.config.initial_green, self.config.green_duration);
        self.queues.clear();
        self.stats = SimStats::new();
        self.arrivals = ArrivalGenerator::new(seeded_rng(self.config.seed));
        self.time = 0;
        self.events.clear();
        self.seed_queues();
        info!("Simulation reset");
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    // ---------------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------------

    pub fn set_ns_density(&mut self, rate: f64) -> Applied<f64> {
        let applied = settings::clamp_density(rate);
        settings::log_clamp("North/south density", rate, &applied);
        self.ns_density = applied.value;
        applied
    }

    pub fn set_ew_density(&mut self, rate: f64) -> Applied<f64> {
        let applied = settings::clamp_density(rate);
        settings::log_clamp("East/west density", rate, &applied);
        self.ew_density = applied.value;
        applied
    }

    pub fn set_density_threshold(&mut self, value: f64) -> Applied<usize> {
        let applied = settings::clamp_threshold(value);
        settings::log_clamp("Density threshold", value, &applied);
        self.density_threshold = applied.value;
        applied
    }

    /// Override the duration of the current green phase
    ///
    /// The controller recomputes it again at the next handover.
    pub fn set_green_duration(&mut self, value: f64) -> Applied<u32> {
        let applied = settings::clamp_green_duration(value);
        settings::log_clamp("Green duration", value, &applied);
        self.signals.set_green_duration(applied.value);
        applied
    }

    // ---------------------------------------------------------------------
    // Stepping
    // ---------------------------------------------------------------------

    /// Run every tick and handover that is due by the clock's current time
    ///
    /// Events run in time order; a handover due at the same instant as a tick
    /// runs first. Returns the number of ticks run.
    pub fn pump(&mut self) -> u64 {
        let now = self.clock.now();
        let mut ticks = 0;
        loop {
            let handover_at = self
                .signals
                .pending()
                .map(|handover| handover.ready_at)
                .filter(|at| *at <= now);
            let tick_at = self.scheduler.next_tick_at().filter(|at| *at <= now);

            match (handover_at, tick_at) {
                (Some(handover), Some(tick)) if handover <= tick => self.finish_handover(handover),
                (_, Some(_)) => {
                    let Some(at) = self.scheduler.take_due(now) else {
                        break;
                    };
                    self.run_tick(at);
                    ticks += 1;
                }
                (Some(handover), None) => self.finish_handover(handover),
                (None, None) => break,
            }
        }
        ticks
    }

    /// Run a single tick immediately, whether or not the scheduler is running
    pub fn step(&mut self) {
        let now = self.clock.now();
        if let Some(at) = self
            .signals
            .pending()
            .map(|handover| handover.ready_at)
            .filter(|at| *at <= now)
        {
            self.finish_handover(at);
        }
        self.run_tick(now);
    }

    /// Clock time of the next tick or handover, whichever comes first
    pub fn next_event_at(&self) -> Option<Duration> {
        let handover = self.signals.pending().map(|handover| handover.ready_at);
        match (handover, self.scheduler.next_tick_at()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn run_tick(&mut self, at: Duration) {
        self.time += 1;
        self.events.push(SimEvent::TickAdvanced(self.time));

        if self.signals.advance() {
            self.begin_yellow(at);
        }

        if let Some(departure) = throughput::release_one(
            &mut self.queues,
            &mut self.stats,
            self.signals.green_approach(),
            self.time,
        ) {
            debug!(
                "Vehicle {} left {} after {} ticks",
                departure.vehicle.0, departure.approach, departure.wait
            );
            self.events.push(SimEvent::VehicleDeparted {
                approach: departure.approach,
                vehicle: departure.vehicle,
                wait: departure.wait,
            });
        }

        for arrival in self.arrivals.draw(self.ns_density, self.ew_density) {
            self.push_arrival(arrival);
        }
    }

    fn begin_yellow(&mut self, at: Duration) {
        let current = self.signals.current();
        let next = controller::choose_next_green(
            self.queues.lengths(),
            current,
            self.density_threshold,
        );
        let handover = self
            .signals
            .begin_yellow(next, at + self.config.yellow_interval);
        debug!(
            "Tick {}: {} turns yellow, {} is next (queues {:?})",
            self.time,
            handover.from,
            handover.to,
            self.queues.lengths()
        );
        self.events.push(SimEvent::LightChanged {
            approach: current,
            color: SignalColor::Yellow,
        });
    }

    fn finish_handover(&mut self, at: Duration) {
        let Some(pending) = self.signals.pending() else {
            return;
        };
        let duration = controller::green_duration_for(self.queues.len(pending.to));
        if let Some(handover) = self.signals.complete_handover(at, duration) {
            debug!(
                "{} is green for {} ticks ({} waiting)",
                handover.to,
                duration,
                self.queues.len(handover.to)
            );
            self.events.push(SimEvent::LightChanged {
                approach: handover.from,
                color: SignalColor::Red,
            });
            self.events.push(SimEvent::LightChanged {
                approach: handover.to,
                color: SignalColor::Green,
            });
        }
    }

    /// Add a vehicle to the back of `approach`'s queue at the current tick
    pub fn enqueue(&mut self, approach: Approach) -> VehicleId {
        let arrival = self.arrivals.arrival(approach);
        self.push_arrival(arrival)
    }

    fn push_arrival(&mut self, arrival: Arrival) -> VehicleId {
        let id = VehicleId(self.stats.total_cars);
        self.stats.record_arrival();
        self.queues
            .push(Vehicle::new(id, arrival.approach, self.time, arrival.color));
        self.events.push(SimEvent::VehicleEnqueued {
            approach: arrival.approach,
            vehicle: id,
        });
        id
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    // ---------------------------------------------------------------------
    // Read accessors
    // ---------------------------------------------------------------------

    /// Ticks elapsed since the last reset
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Current reading of the world's clock
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Waiting vehicles on `approach`, oldest first
    pub fn queue(&self, approach: Approach) -> impl Iterator<Item = &Vehicle> {
        self.queues.iter(approach)
    }

    pub fn queue_len(&self, approach: Approach) -> usize {
        self.queues.len(approach)
    }

    pub fn queue_lengths(&self) -> [usize; 4] {
        self.queues.lengths()
    }

    pub fn light(&self, approach: Approach) -> SignalColor {
        self.signals.color(approach)
    }

    pub fn lights(&self) -> [SignalColor; 4] {
        Approach::ALL.map(|approach| self.signals.color(approach))
    }

    pub fn green_approach(&self) -> Option<Approach> {
        self.signals.green_approach()
    }

    pub fn phase(&self) -> Phase {
        self.signals.phase()
    }

    pub fn pending_handover(&self) -> Option<PendingHandover> {
        self.signals.pending()
    }

    pub fn green_duration(&self) -> u32 {
        self.signals.green_duration()
    }

    pub fn green_timer(&self) -> u32 {
        self.signals.green_timer()
    }

    /// Ticks until the current green expires
    pub fn remaining_in_phase(&self) -> u32 {
        self.signals.remaining()
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn ns_density(&self) -> f64 {
        self.ns_density
    }

    pub fn ew_density(&self) -> f64 {
        self.ew_density
    }

    pub fn density_threshold(&self) -> usize {
        self.density_threshold
    }

    /// Approaches ranked by waiting vehicles, as shown in the decision panel
    pub fn decision_panel(&self) -> Vec<QueueRank> {
        controller::rank_queues(self.queues.lengths(), self.signals.green_approach())
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            time: self.time,
            running: self.is_running(),
            lights: self.lights(),
            queue_lengths: self.queue_lengths(),
            stats: self.stats.clone(),
            green_duration: self.green_duration(),
            green_timer: self.green_timer(),
            pending: self.pending_handover(),
            ns_density: self.ns_density,
            ew_density: self.ew_density,
            density_threshold: self.density_threshold,
        }
    }

    /// Print a summary of the intersection state
    pub fn print_summary(&self) {
        println!("=== Intersection Summary ===");
        println!("Tick: {}", self.time);
        match self.phase() {
            Phase::Green {
                approach,
                elapsed,
                duration,
            } => println!(
                "Phase: {} green ({}/{} ticks, next change in {}s)",
                approach,
                elapsed,
                duration,
                self.remaining_in_phase()
            ),
            Phase::Yellow(handover) => {
                println!("Phase: {} yellow, {} next", handover.from, handover.to)
            }
        }
        println!("--- Decision Panel ---");
        for rank in self.decision_panel() {
            println!(
                "  {:<5} {:>3} cars  [{}]{}",
                rank.approach.name(),
                rank.waiting,
                self.light(rank.approach),
                if rank.is_green { " <" } else { "" }
            );
        }
        println!("--- Statistics ---");
        println!("  {}", self.stats.summary());
        println!(
            "  Wait bar: {}% | Throughput bar: {}%",
            self.stats.wait_bar_percent(),
            self.stats.throughput_bar_percent()
        );
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
