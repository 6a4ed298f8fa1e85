//! Statistics over the recorded controller-latency stream.

use crate::core::types::Timestamped;

/// Summary statistics for latency samples in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct LatencyStats {
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// 95th percentile (nearest-rank)
    pub p95: f64,
}

impl LatencyStats {
    /// Compute statistics from a latency stream.
    ///
    /// Returns `None` for an empty stream.
    pub fn compute(samples: &[Timestamped<f64>]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut values: Vec<f64> = samples.iter().map(|s| s.data).collect();
        values.sort_by(|a, b| a.total_cmp(b));

        let min = values[0];
        let max = values[values.len() - 1];
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let rank = ((values.len() as f64) * 0.95).ceil() as usize;
        let p95 = values[rank.saturating_sub(1)];

        Some(Self { min, max, mean, p95 })
    }

    /// Log a one-line summary.
    pub fn log_summary(&self) {
        log::info!(
            "latency: min={:.3} ms, max={:.3} ms, mean={:.3} ms, p95={:.3} ms",
            self.min,
            self.max,
            self.mean,
            self.p95
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stream(values: &[f64]) -> Vec<Timestamped<f64>> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Timestamped::new(v, i as u64 * 1000))
            .collect()
    }

    #[test]
    fn test_empty_stream() {
        assert!(LatencyStats::compute(&[]).is_none());
    }

    #[test]
    fn test_basic_stats() {
        let stats = LatencyStats::compute(&stream(&[0.4, 0.6, 0.5, 0.3])).unwrap();
        assert_relative_eq!(stats.min, 0.3);
        assert_relative_eq!(stats.max, 0.6);
        assert_relative_eq!(stats.mean, 0.45);
    }

    #[test]
    fn test_p95_nearest_rank() {
        // 20 samples 1..=20: rank ceil(20*0.95)=19, value 19.
        let values: Vec<f64> = (1..=20).map(|v| v as f64).collect();
        let stats = LatencyStats::compute(&stream(&values)).unwrap();
        assert_relative_eq!(stats.p95, 19.0);
    }

    #[test]
    fn test_single_sample() {
        let stats = LatencyStats::compute(&stream(&[0.7])).unwrap();
        assert_relative_eq!(stats.min, 0.7);
        assert_relative_eq!(stats.max, 0.7);
        assert_relative_eq!(stats.p95, 0.7);
    }
}
