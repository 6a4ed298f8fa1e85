//! Antara - Collision-clearance post-processing for manipulator experiments
//!
//! Antara recomputes minimum separation distances between a fixed set of
//! collision pairs across recorded arm trajectories, and renders the result
//! as a clearance-versus-threshold chart.
//!
//! # Architecture
//!
//! The crate is organized into 5 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      bin/                           │  ← Executables
//! │      (clearance_report, log_info, log_import)       │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                 metrics/  report/                   │  ← Analysis & output
//! │       (clearance stats, latency stats, chart)       │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      eval/                          │  ← Distance evaluation
//! │        (per-frame narrow-phase distance loop)       │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                 model/    io/                       │  ← Model & recordings
//! │   (kinematic chain, geometry, pairs, .tlog files)   │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                (types, math)                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Pipeline
//!
//! A recorded experiment is processed in four steps:
//!
//! 1. Load a `.tlog` recording (timestamped joint configurations plus the
//!    controller-latency stream logged during the experiment).
//! 2. Build the fixed collision model: the 7-DOF arm chain, its named
//!    collision geometries, and the ordered pair registry.
//! 3. Evaluate the trajectory: one signed minimum-distance sample per
//!    registered pair per frame, collected into a [`DistanceTable`].
//! 4. Summarize clearance/latency statistics and render the two-panel SVG
//!    chart.

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Collision model (depends on core)
// ============================================================================
pub mod model;

// ============================================================================
// Layer 3: Distance evaluation (depends on core, model)
// ============================================================================
pub mod eval;

// ============================================================================
// Layer 4: Recording I/O (depends on core)
// ============================================================================
pub mod io;

// ============================================================================
// Layer 5: Analysis & reporting (depends on core, eval)
// ============================================================================
pub mod metrics;
pub mod report;

// Run configuration for the binaries.
pub mod config;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

// Core types
pub use crate::core::math;
pub use crate::core::types::{JointConfiguration, MalformedTrajectory, Timestamped, Trajectory};

// Collision model
pub use crate::model::{
    panda_with_obstacle, CollisionGeometry, CollisionModel, GeometrySet, Joint, JointKind,
    KinematicChain, ModelError, PairRegistry, WORLD_FRAME,
};

// Evaluation
pub use crate::eval::{signed_distance, DistanceEvaluator, EvalError};

// Recording I/O
pub use crate::io::log::import::{import_joint_csv, import_latency_csv, ImportError};
pub use crate::io::log::{
    load_dir, LogError, LogHeader, LogInfo, LogReader, LogRecord, LogStreams, LogWriter,
    HEADER_SIZE, LOG_MAGIC, LOG_VERSION,
};

// Metrics
pub use crate::metrics::{ClearanceReport, LatencyStats, PairClearance};

// Reporting
pub use crate::report::{ChartError, ChartStyle, ClearanceChart, DistanceTable};

// Configuration
pub use crate::config::RunConfig;
