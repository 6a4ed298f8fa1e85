//! Joint configuration vector.

use serde::{Deserialize, Serialize};

/// An ordered vector of joint coordinates, one per actuated joint.
///
/// Coordinates are radians for revolute joints. The expected length is
/// fixed by the kinematic chain the configuration is evaluated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointConfiguration {
    /// Joint coordinates in chain order
    pub coords: Vec<f64>,
}

impl JointConfiguration {
    /// Create a configuration from joint coordinates.
    #[inline]
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords }
    }

    /// Number of joint coordinates.
    #[inline]
    pub fn dof(&self) -> usize {
        self.coords.len()
    }

    /// Coordinates as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }
}

impl From<Vec<f64>> for JointConfiguration {
    fn from(coords: Vec<f64>) -> Self {
        Self::new(coords)
    }
}

impl From<&[f64]> for JointConfiguration {
    fn from(coords: &[f64]) -> Self {
        Self::new(coords.to_vec())
    }
}
