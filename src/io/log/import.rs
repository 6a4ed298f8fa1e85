//! CSV import for trajectory recordings.
//!
//! The interchange format is one sample per line. Joint files carry
//! `time,q1,...,qN` (time in seconds, coordinates in radians); latency
//! files carry `time,latency_ms`. A leading header line is skipped when
//! its first field is not numeric.
//!
//! Every cell is parsed and validated at load time; a malformed row fails
//! the import with its line number instead of deferring the failure into
//! the numeric loop.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::core::math::secs_to_us;
use crate::core::types::{JointConfiguration, MalformedTrajectory, Timestamped, Trajectory};

/// Error type for CSV import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row failed typed validation
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending row
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// The parsed rows do not form a valid trajectory
    #[error("malformed trajectory: {0}")]
    Malformed(#[from] MalformedTrajectory),
}

/// Import a joint-state CSV into a validated trajectory.
pub fn import_joint_csv(path: impl AsRef<Path>) -> Result<Trajectory, ImportError> {
    let contents = fs::read_to_string(path)?;
    let mut frames = Vec::new();

    for (i, line) in data_lines(&contents) {
        let fields = split_row(line, i, 2)?;
        let timestamp_us = parse_time(fields[0], i)?;
        let mut coords = Vec::with_capacity(fields.len() - 1);
        for (col, field) in fields[1..].iter().enumerate() {
            coords.push(parse_value(field, i, col + 1)?);
        }
        frames.push(Timestamped::new(JointConfiguration::new(coords), timestamp_us));
    }

    Ok(Trajectory::new(frames)?)
}

/// Import a latency CSV (`time,latency_ms`) into timestamped samples.
pub fn import_latency_csv(path: impl AsRef<Path>) -> Result<Vec<Timestamped<f64>>, ImportError> {
    let contents = fs::read_to_string(path)?;
    let mut samples = Vec::new();

    for (i, line) in data_lines(&contents) {
        let fields = split_row(line, i, 2)?;
        if fields.len() != 2 {
            return Err(ImportError::Parse {
                line: i,
                message: format!("expected 2 columns, found {}", fields.len()),
            });
        }
        let timestamp_us = parse_time(fields[0], i)?;
        let latency_ms = parse_value(fields[1], i, 1)?;
        samples.push(Timestamped::new(latency_ms, timestamp_us));
    }

    Ok(samples)
}

/// Iterate over non-empty data lines with 1-based numbers, skipping a
/// header row when its first field is not numeric.
fn data_lines(contents: &str) -> impl Iterator<Item = (usize, &str)> {
    contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .filter(|(i, line)| {
            if *i > 1 {
                return true;
            }
            line.split(',')
                .next()
                .map(|f| f.trim().parse::<f64>().is_ok())
                .unwrap_or(false)
        })
}

fn split_row(line: &str, line_no: usize, min_fields: usize) -> Result<Vec<&str>, ImportError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < min_fields {
        return Err(ImportError::Parse {
            line: line_no,
            message: format!(
                "expected at least {} columns, found {}",
                min_fields,
                fields.len()
            ),
        });
    }
    Ok(fields)
}

fn parse_time(field: &str, line_no: usize) -> Result<u64, ImportError> {
    let secs: f64 = field.parse().map_err(|_| ImportError::Parse {
        line: line_no,
        message: format!("invalid timestamp: {:?}", field),
    })?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(ImportError::Parse {
            line: line_no,
            message: format!("timestamp out of range: {}", secs),
        });
    }
    Ok(secs_to_us(secs))
}

fn parse_value(field: &str, line_no: usize, column: usize) -> Result<f64, ImportError> {
    let value: f64 = field.parse().map_err(|_| ImportError::Parse {
        line: line_no,
        message: format!("column {}: invalid number: {:?}", column, field),
    })?;
    if !value.is_finite() {
        return Err(ImportError::Parse {
            line: line_no,
            message: format!("column {}: non-finite value", column),
        });
    }
    Ok(value)
}
