//! Running statistics for the intersection
//!
//! Only raw counters are stored; everything else is derived on demand.

/// Raw counters updated by arrivals and departures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Vehicles ever enqueued, including the initial seeding
    pub total_cars: u64,
    /// Vehicles released through the intersection
    pub cars_processed: u64,
    /// Sum of the waits of all released vehicles, in ticks
    pub total_wait_time: u64,
    /// Longest single wait observed, in ticks
    pub max_wait_time: u64,
}

impl SimStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_arrival(&mut self) {
        self.total_cars += 1;
    }

    /// Fold one departure's wait into the counters
    pub fn record_departure(&mut self, wait: u64) {
        self.cars_processed += 1;
        self.total_wait_time += wait;
        self.max_wait_time = self.max_wait_time.max(wait);
    }

    /// Average wait of released vehicles, floored; 0 before any departure
    pub fn avg_wait(&self) -> u64 {
        if self.cars_processed > 0 {
            self.total_wait_time / self.cars_processed
        } else {
            0
        }
    }

    /// Efficiency score in [0, 100]
    ///
    /// Rewards throughput and penalises waiting: `100 - 2*avg + 0.5*processed`.
    pub fn efficiency(&self) -> u32 {
        let score = 100.0 - 2.0 * self.avg_wait() as f64 + 0.5 * self.cars_processed as f64;
        score.clamp(0.0, 100.0).floor() as u32
    }

    /// Fill level of the wait-time bar, in percent
    pub fn wait_bar_percent(&self) -> u32 {
        self.avg_wait().saturating_mul(5).min(100) as u32
    }

    /// Fill level of the throughput bar, in percent
    pub fn throughput_bar_percent(&self) -> u32 {
        self.cars_processed.saturating_mul(2).min(100) as u32
    }

    /// Get a summary string for display
    pub fn summary(&self) -> String {
        format!(
            "Total: {} | Processed: {} | Avg wait: {}s | Max wait: {}s | Efficiency: {}%",
            self.total_cars,
            self.cars_processed,
            self.avg_wait(),
            self.max_wait_time,
            self.efficiency()
        )
    }
}
