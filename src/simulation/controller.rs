//! Adaptive controller deciding which approach gets the next green
//!
//! Queue pressure can preempt the normal rotation, but only once some other
//! approach has built up at least `density_threshold` vehicles. Below that the
//! controller falls back to a fixed cycle so every approach is eventually served.

use super::types::{Approach, BASE_GREEN_DURATION, MAX_GREEN_DURATION, MIN_GREEN_DURATION};

/// Pick the approach that becomes green after `current`
///
/// `lengths` is indexed in canonical order (see [`Approach::ALL`]).
pub fn choose_next_green(lengths: [usize; 4], current: Approach, density_threshold: usize) -> Approach {
    let mut busiest: Option<(Approach, usize)> = None;
    for approach in Approach::ALL {
        if approach == current {
            continue;
        }
        let len = lengths[approach.index()];
        // Strictly greater keeps the first approach on ties
        let better = match busiest {
            Some((_, best)) => len > best,
            None => true,
        };
        if better {
            busiest = Some((approach, len));
        }
    }

    match busiest {
        Some((approach, len)) if len >= density_threshold => approach,
        _ => current.next(),
    }
}

/// Green duration for an approach with `queue_len` waiting vehicles
pub fn green_duration_for(queue_len: usize) -> u32 {
    let bonus = u32::try_from(queue_len / 2).unwrap_or(u32::MAX);
    BASE_GREEN_DURATION
        .saturating_add(bonus)
        .clamp(MIN_GREEN_DURATION, MAX_GREEN_DURATION)
}

/// One row of the decision panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueRank {
    pub approach: Approach,
    pub waiting: usize,
    pub is_green: bool,
}

/// Approaches ordered by queue length, longest first
///
/// Equal lengths keep canonical order.
pub fn rank_queues(lengths: [usize; 4], green: Option<Approach>) -> Vec<QueueRank> {
    let mut ranks: Vec<QueueRank> = Approach::ALL
        .iter()
        .map(|&approach| QueueRank {
            approach,
            waiting: lengths[approach.index()],
            is_green: green == Some(approach),
        })
        .collect();
    ranks.sort_by(|a, b| b.waiting.cmp(&a.waiting));
    ranks
}
