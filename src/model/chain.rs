//! Serial-chain forward kinematics.

use nalgebra::{Isometry3, Unit, UnitQuaternion, Vector3};

use crate::core::types::JointConfiguration;

use super::ModelError;

/// Frame index of the fixed world frame.
///
/// Frame 0 is the chain base (identity placement); joint `i` places
/// frame `i + 1`.
pub const WORLD_FRAME: usize = 0;

/// Joint kind: how the joint moves relative to its fixed origin offset.
#[derive(Debug, Clone)]
pub enum JointKind {
    /// Rotation about an axis expressed in the joint's local frame.
    /// Consumes one configuration coordinate (radians).
    Revolute {
        /// Rotation axis in the joint frame
        axis: Unit<Vector3<f64>>,
    },
    /// Rigid attachment. Consumes no configuration coordinate.
    Fixed,
}

/// One joint of a serial chain.
#[derive(Debug, Clone)]
pub struct Joint {
    /// Joint name (frame lookup key)
    pub name: String,
    /// Fixed offset from the parent frame to this joint's frame
    pub origin: Isometry3<f64>,
    /// How the joint moves
    pub kind: JointKind,
}

impl Joint {
    /// Create a revolute joint rotating about `axis`.
    pub fn revolute(name: &str, origin: Isometry3<f64>, axis: Unit<Vector3<f64>>) -> Self {
        Self {
            name: name.to_string(),
            origin,
            kind: JointKind::Revolute { axis },
        }
    }

    /// Create a fixed joint (pure frame offset).
    pub fn fixed(name: &str, origin: Isometry3<f64>) -> Self {
        Self {
            name: name.to_string(),
            origin,
            kind: JointKind::Fixed,
        }
    }
}

/// A serial kinematic chain rooted at the world frame.
///
/// Joints are chained in order: each joint's parent frame is the frame
/// placed by the previous joint (the world frame for the first joint).
/// Actuated (revolute) joints consume configuration coordinates in chain
/// order; fixed joints only add a frame offset.
#[derive(Debug, Clone)]
pub struct KinematicChain {
    joints: Vec<Joint>,
    dof: usize,
}

impl KinematicChain {
    /// Build a chain from its joints, in base-to-tip order.
    pub fn new(joints: Vec<Joint>) -> Self {
        let dof = joints
            .iter()
            .filter(|j| matches!(j.kind, JointKind::Revolute { .. }))
            .count();
        Self { joints, dof }
    }

    /// Number of actuated joints (expected configuration length).
    #[inline]
    pub fn dof(&self) -> usize {
        self.dof
    }

    /// Number of frames, including the world frame.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.joints.len() + 1
    }

    /// Joints in chain order.
    #[inline]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// Frame index placed by the named joint, if present.
    pub fn frame_id(&self, joint_name: &str) -> Option<usize> {
        self.joints
            .iter()
            .position(|j| j.name == joint_name)
            .map(|i| i + 1)
    }

    /// Compute world placements for every frame of the chain.
    ///
    /// Fills `frames` with one transform per frame, world frame first.
    /// The buffer is cleared and reused, so a caller evaluating many
    /// configurations allocates once.
    pub fn forward_into(
        &self,
        q: &JointConfiguration,
        frames: &mut Vec<Isometry3<f64>>,
    ) -> Result<(), ModelError> {
        if q.dof() != self.dof {
            return Err(ModelError::DimensionMismatch {
                expected: self.dof,
                actual: q.dof(),
            });
        }

        frames.clear();
        frames.push(Isometry3::identity());

        let mut current = Isometry3::identity();
        let mut qi = 0;
        for joint in &self.joints {
            current *= joint.origin;
            if let JointKind::Revolute { axis } = &joint.kind {
                let angle = q.as_slice()[qi];
                qi += 1;
                current *= Isometry3::from_parts(
                    nalgebra::Translation3::identity(),
                    UnitQuaternion::from_axis_angle(axis, angle),
                );
            }
            frames.push(current);
        }
        Ok(())
    }

    /// Compute world placements for every frame, allocating the buffer.
    pub fn forward(&self, q: &JointConfiguration) -> Result<Vec<Isometry3<f64>>, ModelError> {
        let mut frames = Vec::with_capacity(self.frame_count());
        self.forward_into(q, &mut frames)?;
        Ok(frames)
    }
}
