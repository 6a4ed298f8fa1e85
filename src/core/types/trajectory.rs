//! Validated recorded trajectory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{JointConfiguration, Timestamped};

/// Validation error for recorded trajectories.
///
/// Raised at load time, before any frame reaches the evaluator.
#[derive(Debug, Error)]
pub enum MalformedTrajectory {
    /// The recording contains no frames
    #[error("trajectory contains no frames")]
    Empty,

    /// A frame's configuration length differs from the first frame's
    #[error("frame {frame}: configuration has {actual} coordinates, expected {expected}")]
    RaggedConfiguration {
        /// Index of the offending frame
        frame: usize,
        /// Coordinate count established by the first frame
        expected: usize,
        /// Coordinate count found
        actual: usize,
    },

    /// Timestamps must be non-decreasing
    #[error("frame {frame}: timestamp {next_us} us precedes {prev_us} us")]
    NonMonotonicTimestamp {
        /// Index of the offending frame
        frame: usize,
        /// Timestamp of the previous frame
        prev_us: u64,
        /// Timestamp of the offending frame
        next_us: u64,
    },
}

/// An ordered sequence of timestamped joint configurations.
///
/// Construction validates the invariants the evaluator relies on:
/// at least one frame, a uniform coordinate count, and non-decreasing
/// timestamps. A `Trajectory` is immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    frames: Vec<Timestamped<JointConfiguration>>,
}

impl Trajectory {
    /// Build a trajectory from recorded frames, validating as it goes.
    pub fn new(frames: Vec<Timestamped<JointConfiguration>>) -> Result<Self, MalformedTrajectory> {
        let first = frames.first().ok_or(MalformedTrajectory::Empty)?;
        let expected = first.data.dof();
        let mut prev_us = first.timestamp_us;

        for (i, frame) in frames.iter().enumerate().skip(1) {
            if frame.data.dof() != expected {
                return Err(MalformedTrajectory::RaggedConfiguration {
                    frame: i,
                    expected,
                    actual: frame.data.dof(),
                });
            }
            if frame.timestamp_us < prev_us {
                return Err(MalformedTrajectory::NonMonotonicTimestamp {
                    frame: i,
                    prev_us,
                    next_us: frame.timestamp_us,
                });
            }
            prev_us = frame.timestamp_us;
        }

        Ok(Self { frames })
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the trajectory has no frames (never, by construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Coordinate count shared by every frame.
    #[inline]
    pub fn dof(&self) -> usize {
        self.frames[0].data.dof()
    }

    /// Timestamp of the first frame in microseconds.
    #[inline]
    pub fn start_time_us(&self) -> u64 {
        self.frames[0].timestamp_us
    }

    /// Timestamp of the last frame in microseconds.
    #[inline]
    pub fn end_time_us(&self) -> u64 {
        self.frames[self.frames.len() - 1].timestamp_us
    }

    /// Recording duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        (self.end_time_us() - self.start_time_us()) as f64 / 1_000_000.0
    }

    /// Iterate over frames in recording order.
    pub fn iter(&self) -> impl Iterator<Item = &Timestamped<JointConfiguration>> {
        self.frames.iter()
    }

    /// Frames as a slice.
    #[inline]
    pub fn frames(&self) -> &[Timestamped<JointConfiguration>] {
        &self.frames
    }
}
