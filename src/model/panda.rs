//! The fixed experiment model: a 7-DOF Panda-class arm plus a static
//! spherical obstacle.
//!
//! Joint frame offsets follow the published Panda URDF; the gripper fingers
//! are locked at open width, so the configuration space is the 7 arm joints.
//! Collision geometry approximates the vendor self-collision shapes with
//! spheres and capsules: one sphere per fingertip and two capsule segments
//! on the link-7 shell.

use nalgebra::{Isometry3, Point3, Vector3};
use parry3d_f64::shape::SharedShape;

use crate::core::math::rpy_isometry;

use super::{
    CollisionGeometry, CollisionModel, GeometrySet, Joint, KinematicChain, ModelError,
    PairRegistry, WORLD_FRAME,
};

/// Obstacle sphere radius in meters (0.35 m diameter).
pub const OBSTACLE_RADIUS: f64 = 0.35 / 2.0;

/// Obstacle center in the world frame.
pub const OBSTACLE_CENTER: [f64; 3] = [0.0, 0.0, 0.825];

/// Fingertip sphere radius in meters.
const FINGERTIP_RADIUS: f64 = 0.025;

/// Finger opening half-width when locked open, in meters.
const FINGER_HALF_WIDTH: f64 = 0.035;

/// Build the experiment's collision model.
///
/// The registry holds four pairs, each against the obstacle, in this
/// fixed order:
///
/// 1. `Right finger`
/// 2. `Left finger`
/// 3. `Link 7 part 1`
/// 4. `Link 7 part 2`
///
/// Every distance table produced from this model uses that column order.
pub fn panda_with_obstacle() -> Result<CollisionModel, ModelError> {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    let z = Vector3::z_axis();
    let chain = KinematicChain::new(vec![
        Joint::revolute("panda_joint1", rpy_isometry([0.0, 0.0, 0.333], [0.0; 3]), z),
        Joint::revolute(
            "panda_joint2",
            rpy_isometry([0.0; 3], [-FRAC_PI_2, 0.0, 0.0]),
            z,
        ),
        Joint::revolute(
            "panda_joint3",
            rpy_isometry([0.0, -0.316, 0.0], [FRAC_PI_2, 0.0, 0.0]),
            z,
        ),
        Joint::revolute(
            "panda_joint4",
            rpy_isometry([0.0825, 0.0, 0.0], [FRAC_PI_2, 0.0, 0.0]),
            z,
        ),
        Joint::revolute(
            "panda_joint5",
            rpy_isometry([-0.0825, 0.384, 0.0], [-FRAC_PI_2, 0.0, 0.0]),
            z,
        ),
        Joint::revolute(
            "panda_joint6",
            rpy_isometry([0.0; 3], [FRAC_PI_2, 0.0, 0.0]),
            z,
        ),
        Joint::revolute(
            "panda_joint7",
            rpy_isometry([0.088, 0.0, 0.0], [FRAC_PI_2, 0.0, 0.0]),
            z,
        ),
        Joint::fixed("panda_flange", rpy_isometry([0.0, 0.0, 0.107], [0.0; 3])),
        Joint::fixed("panda_hand", rpy_isometry([0.0; 3], [0.0, 0.0, -FRAC_PI_4])),
        // Fingers locked at open width.
        Joint::fixed(
            "panda_leftfinger",
            rpy_isometry([0.0, FINGER_HALF_WIDTH, 0.0584], [0.0; 3]),
        ),
        Joint::fixed(
            "panda_rightfinger",
            rpy_isometry([0.0, -FINGER_HALF_WIDTH, 0.0584], [0.0; 3]),
        ),
    ]);

    let left_finger = chain.frame_id("panda_leftfinger").expect("left finger frame");
    let right_finger = chain.frame_id("panda_rightfinger").expect("right finger frame");
    let link7 = chain.frame_id("panda_joint7").expect("link7 frame");

    let mut geometries = GeometrySet::new();
    geometries.attach(CollisionGeometry::new(
        "panda_rightfinger_0",
        right_finger,
        Isometry3::translation(0.0, -0.0065, 0.0445),
        SharedShape::ball(FINGERTIP_RADIUS),
    ))?;
    geometries.attach(CollisionGeometry::new(
        "panda_leftfinger_0",
        left_finger,
        Isometry3::translation(0.0, 0.0065, 0.0445),
        SharedShape::ball(FINGERTIP_RADIUS),
    ))?;
    // Link-7 shell, split in two segments as in the vendor collision model.
    geometries.attach(CollisionGeometry::new(
        "panda_link7_sc_1",
        link7,
        Isometry3::identity(),
        SharedShape::capsule(
            Point3::new(0.0, 0.0, -0.04),
            Point3::new(0.0, 0.0, 0.03),
            0.06,
        ),
    ))?;
    geometries.attach(CollisionGeometry::new(
        "panda_link7_sc_4",
        link7,
        Isometry3::identity(),
        SharedShape::capsule(
            Point3::new(0.04, 0.04, 0.06),
            Point3::new(0.08, 0.08, 0.08),
            0.05,
        ),
    ))?;
    geometries.attach(CollisionGeometry::new(
        "obstacle",
        WORLD_FRAME,
        Isometry3::translation(OBSTACLE_CENTER[0], OBSTACLE_CENTER[1], OBSTACLE_CENTER[2]),
        SharedShape::ball(OBSTACLE_RADIUS),
    ))?;

    let mut pairs = PairRegistry::new();
    pairs.register_named(&geometries, "panda_rightfinger_0", "obstacle", "Right finger")?;
    pairs.register_named(&geometries, "panda_leftfinger_0", "obstacle", "Left finger")?;
    pairs.register_named(&geometries, "panda_link7_sc_1", "obstacle", "Link 7 part 1")?;
    pairs.register_named(&geometries, "panda_link7_sc_4", "obstacle", "Link 7 part 2")?;

    CollisionModel::new(chain, geometries, pairs)
}
