//! Core data types for the trajectory log format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::types::{JointConfiguration, Timestamped};

/// Magic bytes at start of a log file.
pub const LOG_MAGIC: [u8; 4] = *b"ATLG";

/// Current log file format version.
pub const LOG_VERSION: u16 = 1;

/// Size of the log file header in bytes.
pub const HEADER_SIZE: usize = 64;

/// Log file header (64 bytes fixed size).
///
/// Stored at the beginning of every log file. Contains metadata about the
/// recording and per-stream record counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogHeader {
    /// Magic bytes: "ATLG"
    pub magic: [u8; 4],
    /// File format version
    pub version: u16,
    /// Feature flags (reserved)
    pub flags: u16,
    /// Timestamp of first record (microseconds since epoch)
    pub start_time_us: u64,
    /// Timestamp of last record (microseconds since epoch)
    pub end_time_us: u64,
    /// Number of joint-state records in the file
    pub joint_count: u64,
    /// Number of latency records in the file
    pub latency_count: u64,
    /// Reserved for future use
    pub reserved: [u8; 24],
}

impl LogHeader {
    /// Create a new header with default values.
    pub fn new() -> Self {
        Self {
            magic: LOG_MAGIC,
            version: LOG_VERSION,
            flags: 0,
            start_time_us: 0,
            end_time_us: 0,
            joint_count: 0,
            latency_count: 0,
            reserved: [0; 24],
        }
    }

    /// Check if magic bytes are valid.
    pub fn is_valid(&self) -> bool {
        self.magic == LOG_MAGIC
    }

    /// Total record count across both streams.
    pub fn record_count(&self) -> u64 {
        self.joint_count + self.latency_count
    }

    /// Get recording duration in microseconds.
    pub fn duration_us(&self) -> u64 {
        self.end_time_us.saturating_sub(self.start_time_us)
    }

    /// Get recording duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_us() as f64 / 1_000_000.0
    }
}

impl Default for LogHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Record types stored in log files.
///
/// Each variant corresponds to a different recorded stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogRecord {
    /// Joint-state frame: one configuration sample of the trajectory
    JointState(Timestamped<JointConfiguration>),
    /// Controller latency sample in milliseconds, as logged during the run
    ControlLatency(Timestamped<f64>),
}

impl LogRecord {
    /// Get the timestamp of this record in microseconds.
    pub fn timestamp_us(&self) -> u64 {
        match self {
            LogRecord::JointState(r) => r.timestamp_us,
            LogRecord::ControlLatency(r) => r.timestamp_us,
        }
    }

    /// Check if this is a joint-state record.
    pub fn is_joint_state(&self) -> bool {
        matches!(self, LogRecord::JointState(_))
    }

    /// Check if this is a latency record.
    pub fn is_latency(&self) -> bool {
        matches!(self, LogRecord::ControlLatency(_))
    }

    /// Get as joint state if this is that type.
    pub fn as_joint_state(&self) -> Option<&Timestamped<JointConfiguration>> {
        match self {
            LogRecord::JointState(r) => Some(r),
            _ => None,
        }
    }

    /// Get as latency sample if this is that type.
    pub fn as_latency(&self) -> Option<&Timestamped<f64>> {
        match self {
            LogRecord::ControlLatency(r) => Some(r),
            _ => None,
        }
    }
}

/// Information about a log file.
///
/// Returned after writing or when inspecting a log file.
#[derive(Debug, Clone)]
pub struct LogInfo {
    /// Path to the log file
    pub path: PathBuf,
    /// Recording duration in microseconds
    pub duration_us: u64,
    /// Total number of records
    pub record_count: u64,
    /// Number of joint-state records
    pub joint_count: u64,
    /// Number of latency records
    pub latency_count: u64,
    /// File size in bytes
    pub file_size_bytes: u64,
}

impl LogInfo {
    /// Get recording duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_us as f64 / 1_000_000.0
    }

    /// Get average joint-state sample rate in Hz.
    pub fn joint_rate_hz(&self) -> f64 {
        if self.duration_us == 0 {
            0.0
        } else {
            self.joint_count as f64 / self.duration_secs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_header_new() {
        let header = LogHeader::new();
        assert!(header.is_valid());
        assert_eq!(header.version, LOG_VERSION);
        assert_eq!(header.flags, 0);
        assert_eq!(header.record_count(), 0);
    }

    #[test]
    fn test_log_header_duration() {
        let mut header = LogHeader::new();
        header.start_time_us = 1_000_000;
        header.end_time_us = 6_000_000;

        assert_eq!(header.duration_us(), 5_000_000);
        assert!((header.duration_secs() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_log_record_accessors() {
        let joint = LogRecord::JointState(Timestamped::new(
            JointConfiguration::new(vec![0.0; 7]),
            1000,
        ));
        assert_eq!(joint.timestamp_us(), 1000);
        assert!(joint.is_joint_state());
        assert!(!joint.is_latency());
        assert!(joint.as_joint_state().is_some());

        let latency = LogRecord::ControlLatency(Timestamped::new(0.45, 2000));
        assert_eq!(latency.timestamp_us(), 2000);
        assert!(latency.is_latency());
        assert_eq!(latency.as_latency().unwrap().data, 0.45);
    }

    #[test]
    fn test_log_info_rates() {
        let info = LogInfo {
            path: PathBuf::from("run.tlog"),
            duration_us: 5_000_000,
            record_count: 5500,
            joint_count: 5000,
            latency_count: 500,
            file_size_bytes: 1_048_576,
        };

        assert!((info.duration_secs() - 5.0).abs() < 0.001);
        assert!((info.joint_rate_hz() - 1000.0).abs() < 0.1);
    }
}
