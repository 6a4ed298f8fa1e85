//! Clearance and latency statistics over evaluated recordings.

mod clearance;
mod latency;

pub use clearance::{ClearanceReport, PairClearance};
pub use latency::LatencyStats;
