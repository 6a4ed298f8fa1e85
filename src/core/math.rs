//! Mathematical primitives for rigid-transform construction.
//!
//! Helpers for building frame offsets from the translation + roll/pitch/yaw
//! form used by robot description files, and for time unit conversion.

use nalgebra::{Isometry3, Translation3, UnitQuaternion};

/// Build a rigid transform from a translation and roll/pitch/yaw angles.
///
/// Angles follow the fixed-axis XYZ convention used by URDF `origin`
/// elements: roll about X, then pitch about Y, then yaw about Z.
///
/// # Example
/// ```
/// use antara::math::rpy_isometry;
/// use nalgebra::Point3;
/// use std::f64::consts::FRAC_PI_2;
///
/// // A quarter turn about Z maps +X onto +Y.
/// let t = rpy_isometry([0.0, 0.0, 0.0], [0.0, 0.0, FRAC_PI_2]);
/// let p = t * Point3::new(1.0, 0.0, 0.0);
/// assert!((p.y - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn rpy_isometry(xyz: [f64; 3], rpy: [f64; 3]) -> Isometry3<f64> {
    Isometry3::from_parts(
        Translation3::new(xyz[0], xyz[1], xyz[2]),
        UnitQuaternion::from_euler_angles(rpy[0], rpy[1], rpy[2]),
    )
}

/// Build a pure-translation rigid transform.
#[inline]
pub fn translation(x: f64, y: f64, z: f64) -> Isometry3<f64> {
    Isometry3::translation(x, y, z)
}

/// Convert a timestamp in microseconds to seconds.
///
/// # Example
/// ```
/// use antara::math::us_to_secs;
///
/// assert!((us_to_secs(1_500_000) - 1.5).abs() < 1e-12);
/// ```
#[inline]
pub fn us_to_secs(timestamp_us: u64) -> f64 {
    timestamp_us as f64 / 1_000_000.0
}

/// Convert a timestamp in seconds to microseconds, rounding to the nearest.
#[inline]
pub fn secs_to_us(secs: f64) -> u64 {
    (secs * 1_000_000.0).round() as u64
}
