//! Per-pair clearance statistics against a safety threshold.

use crate::report::DistanceTable;

/// Clearance summary for one collision pair.
#[derive(Debug, Clone)]
pub struct PairClearance {
    /// Display name of the pair
    pub pair: String,
    /// Minimum distance over the table, meters
    pub min_distance: f64,
    /// Time of the minimum, seconds from the table start
    pub time_of_min_s: f64,
    /// Number of frames strictly below the threshold
    pub frames_below: usize,
    /// Contiguous below-threshold intervals as (start, end) seconds
    pub intervals: Vec<(f64, f64)>,
}

impl PairClearance {
    /// True when the pair never dips below the threshold.
    pub fn clear(&self) -> bool {
        self.frames_below == 0
    }
}

/// Clearance statistics for every pair of a distance table.
#[derive(Debug, Clone)]
pub struct ClearanceReport {
    /// Threshold the table was checked against, meters
    pub threshold: f64,
    /// Per-pair summaries, table column order
    pub pairs: Vec<PairClearance>,
}

impl ClearanceReport {
    /// Compute clearance statistics for every column of `table`.
    pub fn compute(table: &DistanceTable, threshold: f64) -> Self {
        let times = table.relative_seconds();
        let mut pairs = Vec::with_capacity(table.pair_count());

        for (col, name) in table.pair_names().iter().enumerate() {
            let distances = table.column(col);
            let mut min_distance = f64::INFINITY;
            let mut time_of_min_s = 0.0;
            let mut frames_below = 0;
            let mut intervals = Vec::new();
            let mut open: Option<f64> = None;

            for (i, (&d, &t)) in distances.iter().zip(times.iter()).enumerate() {
                if d < min_distance {
                    min_distance = d;
                    time_of_min_s = t;
                }
                if d < threshold {
                    frames_below += 1;
                    if open.is_none() {
                        open = Some(t);
                    }
                } else if let Some(start) = open.take() {
                    intervals.push((start, times[i - 1]));
                }
            }
            if let Some(start) = open {
                intervals.push((start, *times.last().unwrap_or(&start)));
            }

            pairs.push(PairClearance {
                pair: name.clone(),
                min_distance,
                time_of_min_s,
                frames_below,
                intervals,
            });
        }

        Self { threshold, pairs }
    }

    /// True when no pair ever dips below the threshold.
    pub fn all_clear(&self) -> bool {
        self.pairs.iter().all(PairClearance::clear)
    }

    /// Log a one-line summary per pair.
    pub fn log_summary(&self) {
        for pair in &self.pairs {
            if pair.clear() {
                log::info!(
                    "{}: min {:.4} m at {:.2}s (clear of {:.3} m bound)",
                    pair.pair,
                    pair.min_distance,
                    pair.time_of_min_s,
                    self.threshold
                );
            } else {
                log::warn!(
                    "{}: min {:.4} m at {:.2}s, below {:.3} m bound for {} frames",
                    pair.pair,
                    pair.min_distance,
                    pair.time_of_min_s,
                    self.threshold,
                    pair.frames_below
                );
            }
        }
    }
}
