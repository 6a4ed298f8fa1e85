//! Trajectory log reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::types::{LogHeader, LogInfo, LogRecord, HEADER_SIZE, LOG_VERSION};
use super::LogError;
use crate::core::types::{Timestamped, Trajectory};

/// The two record streams of a recording, separated and validated.
#[derive(Debug, Clone)]
pub struct LogStreams {
    /// Joint-state frames as a validated trajectory
    pub trajectory: Trajectory,
    /// Controller-latency samples in milliseconds, recording order
    pub latency: Vec<Timestamped<f64>>,
}

/// Trajectory log reader.
///
/// Validates the header on open, then streams records in file order.
pub struct LogReader {
    reader: BufReader<File>,
    header: LogHeader,
    path: std::path::PathBuf,
    records_read: u64,
}

impl LogReader {
    /// Open a log file and validate its header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mut reader = BufReader::new(file);

        let mut header_buffer = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header_buffer)?;

        let header: LogHeader = postcard::from_bytes(&header_buffer)
            .map_err(|e| LogError::InvalidFormat(format!("failed to parse header: {}", e)))?;

        if !header.is_valid() {
            return Err(LogError::InvalidFormat(
                "invalid log file magic bytes".to_string(),
            ));
        }
        if header.version > LOG_VERSION {
            return Err(LogError::InvalidFormat(format!(
                "unsupported log version {} (reader supports up to {})",
                header.version, LOG_VERSION
            )));
        }

        Ok(Self {
            reader,
            header,
            path,
            records_read: 0,
        })
    }

    /// Get the log file header.
    pub fn header(&self) -> &LogHeader {
        &self.header
    }

    /// Get number of records read so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Read the next record, or `None` at end of file.
    pub fn next_record(&mut self) -> Result<Option<LogRecord>, LogError> {
        let mut len_buffer = [0u8; 4];
        match self.reader.read_exact(&mut len_buffer) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let len = u32::from_le_bytes(len_buffer) as usize;
        let mut payload = vec![0u8; len];
        self.reader.read_exact(&mut payload)?;

        let record: LogRecord = postcard::from_bytes(&payload)
            .map_err(|e| LogError::Deserialize(e.to_string()))?;
        self.records_read += 1;
        Ok(Some(record))
    }

    /// Read all remaining records in file order.
    pub fn read_all(&mut self) -> Result<Vec<LogRecord>, LogError> {
        let mut records = Vec::with_capacity(self.header.record_count() as usize);
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Read the whole file and split it into validated streams.
    ///
    /// The joint-state stream is validated into a [`Trajectory`]; a
    /// recording with no joint frames, ragged configurations or decreasing
    /// timestamps is rejected here, before any evaluation starts.
    pub fn load_streams(&mut self) -> Result<LogStreams, LogError> {
        let mut frames = Vec::with_capacity(self.header.joint_count as usize);
        let mut latency = Vec::with_capacity(self.header.latency_count as usize);

        while let Some(record) = self.next_record()? {
            match record {
                LogRecord::JointState(frame) => frames.push(frame),
                LogRecord::ControlLatency(sample) => latency.push(sample),
            }
        }

        let trajectory = Trajectory::new(frames)?;
        Ok(LogStreams { trajectory, latency })
    }

    /// Summarize the file by walking every record.
    ///
    /// Counts are recomputed from the stream, not taken from the header,
    /// so a truncated file is reported as such.
    pub fn scan_info(&mut self) -> Result<LogInfo, LogError> {
        let mut joint_count = 0u64;
        let mut latency_count = 0u64;
        while let Some(record) = self.next_record()? {
            match record {
                LogRecord::JointState(_) => joint_count += 1,
                LogRecord::ControlLatency(_) => latency_count += 1,
            }
        }
        let file_size_bytes = std::fs::metadata(&self.path)?.len();
        Ok(LogInfo {
            path: self.path.clone(),
            duration_us: self.header.duration_us(),
            record_count: joint_count + latency_count,
            joint_count,
            latency_count,
            file_size_bytes,
        })
    }
}
