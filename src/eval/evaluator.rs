//! Trajectory distance evaluator.

use nalgebra::Isometry3;
use thiserror::Error;

use crate::core::types::{JointConfiguration, Trajectory};
use crate::model::{CollisionModel, ModelError};
use crate::report::DistanceTable;

use super::distance::signed_distance;

/// Evaluation errors.
///
/// A frame that fails produces no partial output; the error is surfaced
/// immediately and the caller decides whether to abort or skip.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Configuration vector length does not match the model
    #[error("configuration has {actual} coordinates, model expects {expected}")]
    DimensionMismatch {
        /// Actuated joint count of the model
        expected: usize,
        /// Coordinate count supplied
        actual: usize,
    },

    /// A registered pair references a geometry index absent from the model.
    /// Cannot occur when the registry was built against the same model;
    /// defensive check only.
    #[error("pair {pair} references geometry {geometry}, model has {geometry_count}")]
    UnresolvedGeometry {
        /// Index of the offending pair
        pair: usize,
        /// Geometry index the pair references
        geometry: usize,
        /// Number of geometries in the model
        geometry_count: usize,
    },

    /// The narrow-phase library does not support the shape combination
    #[error("unsupported shape combination for pair {pair}")]
    UnsupportedShapes {
        /// Display name of the offending pair
        pair: String,
    },
}

/// Recomputes per-pair minimum distances across a recorded trajectory.
///
/// The evaluator borrows an immutable [`CollisionModel`] and owns two
/// transient transform buffers that are overwritten on every frame. It is
/// a pure function of the configuration: evaluating the same configuration
/// twice yields bit-identical output. Construct one evaluator per thread
/// to process frame batches in parallel over a shared model.
///
/// # Example
///
/// ```ignore
/// use antara::{panda_with_obstacle, DistanceEvaluator, JointConfiguration};
///
/// let model = panda_with_obstacle()?;
/// let mut evaluator = DistanceEvaluator::new(&model);
///
/// let q = JointConfiguration::new(vec![0.0, -0.4, 0.0, -1.8, 0.0, 1.5, 0.8]);
/// let distances = evaluator.evaluate_frame(&q)?;
/// assert_eq!(distances.len(), model.pairs().len());
/// ```
pub struct DistanceEvaluator<'m> {
    model: &'m CollisionModel,
    frames: Vec<Isometry3<f64>>,
    placements: Vec<Isometry3<f64>>,
}

impl<'m> DistanceEvaluator<'m> {
    /// Create an evaluator over a model.
    pub fn new(model: &'m CollisionModel) -> Self {
        Self {
            model,
            frames: Vec::with_capacity(model.chain().frame_count()),
            placements: Vec::with_capacity(model.geometries().len()),
        }
    }

    /// Number of distances each frame evaluation produces.
    #[inline]
    pub fn output_len(&self) -> usize {
        self.model.pairs().len()
    }

    /// Evaluate one frame: one signed distance per registered pair, in
    /// registration order.
    ///
    /// Recomputes forward kinematics and geometry placements for `q`
    /// (overwriting this evaluator's scratch buffers only), then issues one
    /// narrow-phase query per pair.
    pub fn evaluate_frame(&mut self, q: &JointConfiguration) -> Result<Vec<f64>, EvalError> {
        self.model
            .chain()
            .forward_into(q, &mut self.frames)
            .map_err(|e| match e {
                ModelError::DimensionMismatch { expected, actual } => {
                    EvalError::DimensionMismatch { expected, actual }
                }
                // forward_into only reports dimension mismatches
                _ => unreachable!("forward kinematics raised a non-dimension error"),
            })?;
        self.model
            .geometries()
            .placements_into(&self.frames, &mut self.placements);

        let geometries = self.model.geometries();
        let mut distances = Vec::with_capacity(self.output_len());
        for (i, pair) in self.model.pairs().pairs().iter().enumerate() {
            let (first, second) = (pair.first, pair.second);
            let (ga, gb) = match (geometries.get(first), geometries.get(second)) {
                (Some(a), Some(b)) => (a, b),
                _ => {
                    let geometry = if first >= geometries.len() { first } else { second };
                    return Err(EvalError::UnresolvedGeometry {
                        pair: i,
                        geometry,
                        geometry_count: geometries.len(),
                    });
                }
            };
            let dist = signed_distance(
                &self.placements[first],
                &*ga.shape,
                &self.placements[second],
                &*gb.shape,
            )
            .ok_or_else(|| EvalError::UnsupportedShapes {
                pair: self.model.pairs().names()[i].clone(),
            })?;
            distances.push(dist);
        }
        Ok(distances)
    }

    /// Evaluate a whole trajectory into a distance table.
    ///
    /// One row per input frame, input order preserved, each row carrying the
    /// frame's timestamp. Deterministic: identical input yields identical
    /// output. A failing frame aborts the call; no partial table is
    /// returned, and tables from earlier calls are unaffected.
    pub fn evaluate_trajectory(&mut self, trajectory: &Trajectory) -> Result<DistanceTable, EvalError> {
        let mut table = DistanceTable::new(self.model.pair_names());
        for frame in trajectory.iter() {
            let distances = self.evaluate_frame(&frame.data)?;
            table.push_row(frame.timestamp_us, distances);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Timestamped;
    use crate::model::{
        CollisionGeometry, GeometrySet, Joint, KinematicChain, PairRegistry, WORLD_FRAME,
    };
    use approx::assert_relative_eq;
    use nalgebra::{Isometry3, Vector3};
    use parry3d_f64::shape::SharedShape;

    /// One prismatic-like test rig: a revolute "boom" joint swinging a
    /// sphere around the origin, plus fixed spheres in the world frame.
    fn boom_model(extra_world_spheres: &[(&str, [f64; 3], f64)]) -> CollisionModel {
        let chain = KinematicChain::new(vec![Joint::revolute(
            "boom",
            Isometry3::identity(),
            Vector3::z_axis(),
        )]);
        let boom = chain.frame_id("boom").unwrap();

        let mut geometries = GeometrySet::new();
        geometries
            .attach(CollisionGeometry::new(
                "tip",
                boom,
                Isometry3::translation(1.0, 0.0, 0.0),
                SharedShape::ball(0.1),
            ))
            .unwrap();
        for (name, center, radius) in extra_world_spheres {
            geometries
                .attach(CollisionGeometry::new(
                    name,
                    WORLD_FRAME,
                    Isometry3::translation(center[0], center[1], center[2]),
                    SharedShape::ball(*radius),
                ))
                .unwrap();
        }

        let mut pairs = PairRegistry::new();
        for (name, _, _) in extra_world_spheres {
            pairs.register(&geometries, "tip", name).unwrap();
        }
        CollisionModel::new(chain, geometries, pairs).unwrap()
    }

    #[test]
    fn test_output_length_matches_registry() {
        let model2 = boom_model(&[
            ("a", [2.0, 0.0, 0.0], 0.1),
            ("b", [0.0, 2.0, 0.0], 0.1),
        ]);
        let mut eval2 = DistanceEvaluator::new(&model2);
        let out = eval2
            .evaluate_frame(&JointConfiguration::new(vec![0.0]))
            .unwrap();
        assert_eq!(out.len(), 2);

        let model4 = boom_model(&[
            ("a", [2.0, 0.0, 0.0], 0.1),
            ("b", [0.0, 2.0, 0.0], 0.1),
            ("c", [-2.0, 0.0, 0.0], 0.1),
            ("d", [0.0, -2.0, 0.0], 0.1),
        ]);
        let mut eval4 = DistanceEvaluator::new(&model4);
        let out = eval4
            .evaluate_frame(&JointConfiguration::new(vec![0.0]))
            .unwrap();
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_analytic_sphere_separation() {
        // Boom at angle 0 puts the tip sphere (r=0.1) at (1,0,0); the "a"
        // sphere (r=0.1) sits at (2,0,0): separation 1.0 - 0.2 = 0.8.
        let model = boom_model(&[("a", [2.0, 0.0, 0.0], 0.1)]);
        let mut eval = DistanceEvaluator::new(&model);
        let out = eval
            .evaluate_frame(&JointConfiguration::new(vec![0.0]))
            .unwrap();
        assert_relative_eq!(out[0], 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_coincident_spheres_report_penetration() {
        // Boom at angle 0 puts the tip at (1,0,0), coincident with "a":
        // full overlap, signed depth -(0.1 + 0.1).
        let model = boom_model(&[("a", [1.0, 0.0, 0.0], 0.1)]);
        let mut eval = DistanceEvaluator::new(&model);
        let out = eval
            .evaluate_frame(&JointConfiguration::new(vec![0.0]))
            .unwrap();
        assert!(out[0] <= 0.0);
        assert_relative_eq!(out[0], -0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_determinism() {
        let model = boom_model(&[("a", [2.0, 0.0, 0.0], 0.1), ("b", [0.0, 2.0, 0.0], 0.3)]);
        let mut eval = DistanceEvaluator::new(&model);
        let q = JointConfiguration::new(vec![0.7]);
        let first = eval.evaluate_frame(&q).unwrap();
        let second = eval.evaluate_frame(&q).unwrap();
        // Bit-identical, not merely approximately equal.
        assert_eq!(first, second);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = boom_model(&[("a", [2.0, 0.0, 0.0], 0.1)]);
        let mut eval = DistanceEvaluator::new(&model);
        let result = eval.evaluate_frame(&JointConfiguration::new(vec![0.0, 0.0]));
        assert!(matches!(
            result,
            Err(EvalError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_trajectory_rows_match_input() {
        let model = boom_model(&[("a", [2.0, 0.0, 0.0], 0.1)]);
        let mut eval = DistanceEvaluator::new(&model);

        let trajectory = Trajectory::new(vec![
            Timestamped::new(JointConfiguration::new(vec![0.0]), 1_000_000),
            Timestamped::new(JointConfiguration::new(vec![0.5]), 1_100_000),
            Timestamped::new(JointConfiguration::new(vec![1.0]), 1_200_000),
        ])
        .unwrap();

        let table = eval.evaluate_trajectory(&trajectory).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.timestamps_us(),
            &[1_000_000, 1_100_000, 1_200_000]
        );
        // Swinging the boom away from "a" monotonically increases clearance.
        let col = table.column(0);
        assert!(col[0] < col[1] && col[1] < col[2]);
    }

    #[test]
    fn test_threshold_crossing_at_known_frame() {
        // Tip orbit radius 1.0 around origin; sphere "a" at (2,0,0).
        // At angle 0 the gap is 0.8; at angle π the tip is at (-1,0,0) and
        // the gap is 2.8. Only the first frame dips below 1.0.
        let model = boom_model(&[("a", [2.0, 0.0, 0.0], 0.1)]);
        let mut eval = DistanceEvaluator::new(&model);

        let trajectory = Trajectory::new(vec![
            Timestamped::new(JointConfiguration::new(vec![0.0]), 0),
            Timestamped::new(JointConfiguration::new(vec![std::f64::consts::FRAC_PI_2]), 1),
            Timestamped::new(JointConfiguration::new(vec![std::f64::consts::PI]), 2),
        ])
        .unwrap();

        let table = eval.evaluate_trajectory(&trajectory).unwrap();
        let col = table.column(0);
        assert!(col[0] < 1.0);
        assert!(col[1] >= 1.0);
        assert!(col[2] >= 1.0);
    }
}
