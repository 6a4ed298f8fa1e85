//! Trajectory log writer.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::types::{LogHeader, LogInfo, LogRecord, HEADER_SIZE};
use super::LogError;
use crate::core::types::{JointConfiguration, Timestamped};

/// Trajectory log writer.
///
/// Writes records to a binary log file using Postcard serialization.
/// Records are length-prefixed for streaming reads. Header space is
/// reserved on create and rewritten by [`finish`](Self::finish).
pub struct LogWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    joint_count: u64,
    latency_count: u64,
    start_time_us: Option<u64>,
    end_time_us: u64,
}

impl LogWriter {
    /// Create a new log writer at the specified path.
    ///
    /// The file is created immediately with header space reserved.
    /// Call `finish()` to write the final header and close the file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);

        // Reserve space for header (64 bytes of zeros)
        writer.write_all(&[0u8; HEADER_SIZE])?;

        Ok(Self {
            writer,
            path,
            joint_count: 0,
            latency_count: 0,
            start_time_us: None,
            end_time_us: 0,
        })
    }

    /// Record a joint-state frame.
    pub fn record_joint_state(
        &mut self,
        frame: &Timestamped<JointConfiguration>,
    ) -> Result<(), LogError> {
        self.record(&LogRecord::JointState(frame.clone()))
    }

    /// Record a controller-latency sample (milliseconds).
    pub fn record_latency(&mut self, sample: &Timestamped<f64>) -> Result<(), LogError> {
        self.record(&LogRecord::ControlLatency(sample.clone()))
    }

    /// Record any log record.
    pub fn record(&mut self, record: &LogRecord) -> Result<(), LogError> {
        let payload =
            postcard::to_stdvec(record).map_err(|e| LogError::Serialize(e.to_string()))?;
        let len = payload.len() as u32;
        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&payload)?;

        match record {
            LogRecord::JointState(_) => self.joint_count += 1,
            LogRecord::ControlLatency(_) => self.latency_count += 1,
        }
        let t = record.timestamp_us();
        if self.start_time_us.is_none() {
            self.start_time_us = Some(t);
        }
        self.end_time_us = self.end_time_us.max(t);
        Ok(())
    }

    /// Finalize the log: write the header and flush.
    ///
    /// Returns a summary of what was written.
    pub fn finish(mut self) -> Result<LogInfo, LogError> {
        let header = LogHeader {
            start_time_us: self.start_time_us.unwrap_or(0),
            end_time_us: self.end_time_us,
            joint_count: self.joint_count,
            latency_count: self.latency_count,
            ..LogHeader::new()
        };

        let mut buffer = [0u8; HEADER_SIZE];
        postcard::to_slice(&header, &mut buffer)
            .map_err(|e| LogError::Serialize(e.to_string()))?;

        self.writer.seek(SeekFrom::Start(0))?;
        self.writer.write_all(&buffer)?;
        self.writer.flush()?;

        let file_size_bytes = std::fs::metadata(&self.path)?.len();
        Ok(LogInfo {
            path: self.path,
            duration_us: header.duration_us(),
            record_count: header.record_count(),
            joint_count: self.joint_count,
            latency_count: self.latency_count,
            file_size_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writer_counts_and_duration() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.tlog");

        let mut writer = LogWriter::create(&path).unwrap();
        for i in 0..10u64 {
            writer
                .record_joint_state(&Timestamped::new(
                    JointConfiguration::new(vec![0.0; 7]),
                    1_000_000 + i * 100_000,
                ))
                .unwrap();
        }
        writer
            .record_latency(&Timestamped::new(0.5, 1_500_000))
            .unwrap();

        let info = writer.finish().unwrap();
        assert_eq!(info.joint_count, 10);
        assert_eq!(info.latency_count, 1);
        assert_eq!(info.record_count, 11);
        assert_eq!(info.duration_us, 900_000);
        assert!(info.file_size_bytes > HEADER_SIZE as u64);
    }
}
