//! Trajectory log (`.tlog`) reading and writing.
//!
//! Experiment recordings are stored in a simple binary format with
//! Postcard serialization:
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ Header (64 bytes)                                │
//! │ - Magic: "ATLG" (4 bytes)                        │
//! │ - Version: u16                                   │
//! │ - Flags: u16                                     │
//! │ - Start time: u64 (microseconds)                 │
//! │ - End time: u64 (microseconds)                   │
//! │ - Joint-state record count: u64                  │
//! │ - Latency record count: u64                      │
//! │ - Reserved: 24 bytes                             │
//! ├──────────────────────────────────────────────────┤
//! │ Record Stream                                    │
//! │ [len:u32][postcard payload]...                   │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Two record streams are interleaved by timestamp: joint-state frames
//! (the trajectory) and controller-latency samples logged during the
//! experiment.
//!
//! # Example: Writing
//!
//! ```ignore
//! use antara::{LogWriter, JointConfiguration, Timestamped};
//!
//! let mut writer = LogWriter::create("run.tlog")?;
//! writer.record_joint_state(&Timestamped::new(
//!     JointConfiguration::new(vec![0.0; 7]),
//!     1_000_000,
//! ))?;
//! let info = writer.finish()?;
//! println!("Wrote {} records", info.record_count);
//! ```
//!
//! # Example: Reading
//!
//! ```ignore
//! use antara::LogReader;
//!
//! let mut reader = LogReader::open("run.tlog")?;
//! let streams = reader.load_streams()?;
//! println!("{} frames over {:.1}s",
//!     streams.trajectory.len(),
//!     streams.trajectory.duration_secs());
//! ```

mod reader;
mod types;
mod writer;

pub mod import;

pub use reader::{LogReader, LogStreams};
pub use types::{LogHeader, LogInfo, LogRecord, HEADER_SIZE, LOG_MAGIC, LOG_VERSION};
pub use writer::LogWriter;

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
pub use test_fixtures::LogTestFixture;

use std::path::Path;

use thiserror::Error;

use crate::core::types::MalformedTrajectory;

/// Error type for log file operations.
#[derive(Debug, Error)]
pub enum LogError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Deserialization error
    #[error("deserialization error: {0}")]
    Deserialize(String),

    /// Invalid log file format
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// The joint-state stream does not form a valid trajectory
    #[error("malformed trajectory: {0}")]
    Malformed(#[from] MalformedTrajectory),
}

/// Load every `.tlog` recording in a directory, sorted by file name.
///
/// Returns `(file stem, streams)` per recording. Mirrors the capture
/// convention of one recording per file.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<(String, LogStreams)>, LogError> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|ext| ext == "tlog").unwrap_or(false))
        .collect();
    paths.sort();

    let mut recordings = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut reader = LogReader::open(&path)?;
        recordings.push((name, reader.load_streams()?));
    }
    Ok(recordings)
}
