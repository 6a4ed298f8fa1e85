//! Run configuration for the report binaries.
//!
//! All settings are read from a TOML file; every field has a sensible
//! default so a missing file or section still produces a usable run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Input selection: a single recording or a directory of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to one `.tlog` recording
    pub log: Option<PathBuf>,
    /// Directory of `.tlog` recordings (first by name is used unless
    /// `log` is set)
    pub log_dir: Option<PathBuf>,
}

/// Time window to analyze, in seconds relative to the recording start.
///
/// The window cuts away the settle-in and wind-down phases of a run;
/// unset bounds keep everything on that side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Drop frames before this time
    pub t_min: Option<f64>,
    /// Drop frames after this time
    pub t_max: Option<f64>,
}

/// Clearance analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceConfig {
    /// Safety threshold in meters.
    /// Default: 0.1 m
    pub threshold: f64,
}

impl Default for ClearanceConfig {
    fn default() -> Self {
        Self { threshold: 0.1 }
    }
}

/// Chart output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Output SVG path.
    /// Default: clearance.svg
    pub output: PathBuf,
    /// Chart width in pixels
    pub width: f64,
    /// Chart height in pixels
    pub height: f64,
    /// Render the latency panel when the recording has latency samples
    pub show_latency: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("clearance.svg"),
            width: 1200.0,
            height: 700.0,
            show_latency: true,
        }
    }
}

/// Complete run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Input selection
    pub input: InputConfig,
    /// Analysis time window
    pub window: WindowConfig,
    /// Clearance settings
    pub clearance: ClearanceConfig,
    /// Chart settings
    pub chart: ChartConfig,
}

impl RunConfig {
    /// Load a configuration file, falling back to defaults.
    ///
    /// A missing or unparsable file logs a warning and returns the
    /// default configuration rather than failing the run.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => match basic_toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
