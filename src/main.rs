use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use signal_sim::simulation::{Approach, ManualClock, SimConfig, SimEvent, SimWorld};

#[derive(Parser)]
#[command(name = "signal_sim")]
#[command(about = "Adaptive traffic signal simulation for a single intersection")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 120)]
    ticks: u64,

    /// Wall-clock milliseconds per tick
    #[arg(long, default_value_t = 1000)]
    tick_ms: u64,

    /// Wall-clock milliseconds a light stays yellow
    #[arg(long, default_value_t = 2000)]
    yellow_ms: u64,

    /// Expected north/south arrivals per 60 ticks
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    ns_density: f64,

    /// Expected east/west arrivals per 60 ticks
    #[arg(long, default_value_t = 3.0, allow_negative_numbers = true)]
    ew_density: f64,

    /// Queue length needed to preempt the normal rotation
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    threshold: f64,

    /// Length of the first green phase in ticks
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    green_duration: f64,

    /// Approach that starts with the green light
    #[arg(long, default_value = "west", value_parser = parse_approach)]
    initial_green: Approach,

    /// Seed for reproducible arrivals
    #[arg(long)]
    seed: Option<u64>,

    /// Start with empty queues
    #[arg(long)]
    empty_start: bool,

    /// Follow the wall clock instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Print a summary every this many ticks
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    report_every: u64,
}

fn parse_approach(s: &str) -> Result<Approach, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

impl Cli {
    fn config(&self) -> SimConfig {
        let base = if self.empty_start {
            SimConfig::empty_start()
        } else {
            SimConfig::default()
        };
        SimConfig {
            ns_density: self.ns_density,
            ew_density: self.ew_density,
            initial_green: self.initial_green,
            tick_interval: Duration::from_millis(self.tick_ms),
            yellow_interval: Duration::from_millis(self.yellow_ms),
            seed: self.seed,
            ..base
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,signal_sim=info"))
        .init();

    let cli = Cli::parse();
    run_headless(&cli)
}

/// Run the simulation without any front end, printing periodic summaries
fn run_headless(cli: &Cli) -> Result<()> {
    println!("Running signal simulation in headless mode...");
    println!(
        "Ticks: {}, Tick: {}ms, Yellow: {}ms, Realtime: {}",
        cli.ticks, cli.tick_ms, cli.yellow_ms, cli.realtime
    );
    println!();

    let clock = ManualClock::new();
    let mut world = if cli.realtime {
        SimWorld::new(cli.config())?
    } else {
        SimWorld::with_clock(cli.config(), Box::new(clock.clone()))?
    };

    // Settings go through the clamping setters so out-of-range values are reported
    world.set_density_threshold(cli.threshold);
    world.set_green_duration(cli.green_duration);

    println!("Initial state:");
    world.print_summary();
    println!();

    world.start();
    while world.time() < cli.ticks {
        let next = world
            .next_event_at()
            .context("Scheduler stopped before reaching the tick limit")?;
        if cli.realtime {
            let now = world.now();
            if next > now {
                std::thread::sleep(next - now);
            }
        } else {
            clock.set(next);
        }

        let before = world.time();
        world.pump();
        log_events(&world.drain_events());

        if world.time() / cli.report_every > before / cli.report_every {
            println!("--- After tick {} ---", world.time());
            world.print_summary();
            println!();
        }
    }
    world.pause();

    println!("=== Final State ===");
    world.print_summary();

    let stats = world.stats();
    info!("=== SIMULATION COMPLETE ===");
    info!("Elapsed ticks: {}", world.time());
    info!("Total cars: {}", stats.total_cars);
    info!("Cars processed: {}", stats.cars_processed);
    info!("Cars waiting: {}", world.queue_lengths().iter().sum::<usize>());
    info!("Average wait: {}s", stats.avg_wait());
    info!("Max wait: {}s", stats.max_wait_time);
    info!("Efficiency: {}%", stats.efficiency());
    Ok(())
}

fn log_events(events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::LightChanged { approach, color } => {
                info!("{} light is now {}", approach, color)
            }
            SimEvent::VehicleDeparted {
                approach,
                vehicle,
                wait,
            } => debug!("Car {} crossed from {} after {}s", vehicle.0, approach, wait),
            SimEvent::VehicleEnqueued { approach, vehicle } => {
                debug!("Car {} queued on {}", vehicle.0, approach)
            }
            SimEvent::TickAdvanced(_) => {}
        }
    }
}
