//! Per-frame narrow-phase distance evaluation.
//!
//! The evaluator is a pure batch map: configuration in, one signed distance
//! per registered pair out, repeated per frame. It holds only transient
//! scratch buffers (frame and placement transforms) that are overwritten on
//! every call, so results never depend on prior frames.

mod distance;
mod evaluator;

pub use distance::signed_distance;
pub use evaluator::{DistanceEvaluator, EvalError};
