//! Test fixtures for generating synthetic log files.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::writer::LogWriter;
use crate::core::types::{JointConfiguration, Timestamped};

/// Test fixture for log file testing.
///
/// Creates temporary log files with synthetic data. The temporary
/// directory is cleaned up when the fixture is dropped.
pub struct LogTestFixture {
    #[allow(dead_code)]
    temp_dir: TempDir,
    log_path: PathBuf,
}

impl LogTestFixture {
    /// Create a synthetic 2-second recording of a slow joint sweep.
    ///
    /// Contains:
    /// - 200 joint-state frames at 100 Hz (7 DOF, joint 1 sweeping)
    /// - 20 latency samples at 10 Hz (~0.4 ms each)
    pub fn sweep_2s() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let log_path = temp_dir.path().join("sweep_2s.tlog");

        let mut writer = LogWriter::create(&log_path).expect("failed to create writer");

        let start_time_us = 1_000_000_000u64;
        let duration_us = 2_000_000u64;
        let joint_period_us = 10_000u64; // 100 Hz
        let latency_period_us = 100_000u64; // 10 Hz

        let mut time = start_time_us;
        while time < start_time_us + duration_us {
            let phase = (time - start_time_us) as f64 / duration_us as f64;
            let mut coords = vec![0.0, -0.4, 0.0, -1.8, 0.0, 1.5, 0.8];
            coords[0] = phase * 0.5;
            writer
                .record_joint_state(&Timestamped::new(JointConfiguration::new(coords), time))
                .expect("failed to record joint state");

            if (time - start_time_us) % latency_period_us == 0 {
                writer
                    .record_latency(&Timestamped::new(0.4 + 0.05 * phase, time))
                    .expect("failed to record latency");
            }
            time += joint_period_us;
        }

        writer.finish().expect("failed to finish log");
        Self { temp_dir, log_path }
    }

    /// Path to the synthetic log file.
    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
