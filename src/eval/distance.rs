//! Signed minimum-distance query between two placed shapes.

use nalgebra::Isometry3;
use parry3d_f64::query;
use parry3d_f64::shape::Shape;

/// Compute the signed minimum distance between two placed shapes.
///
/// Separated shapes report their positive minimum separation. Touching or
/// penetrating shapes report the non-positive penetration depth from the
/// contact query (the minimum translation along the contact normal that
/// separates them, negated). The value is passed through from the
/// narrow-phase library unchanged.
///
/// Returns `None` when the narrow-phase library does not support the shape
/// combination (never the case for the sphere/capsule shapes this crate
/// builds).
pub fn signed_distance(
    pos1: &Isometry3<f64>,
    shape1: &dyn Shape,
    pos2: &Isometry3<f64>,
    shape2: &dyn Shape,
) -> Option<f64> {
    let separation = query::distance(pos1, shape1, pos2, shape2).ok()?;
    if separation > 0.0 {
        return Some(separation);
    }
    // Touching or penetrating: the contact query reports the signed depth.
    match query::contact(pos1, shape1, pos2, shape2, 0.0).ok()? {
        Some(contact) => Some(contact.dist),
        None => Some(0.0),
    }
}
