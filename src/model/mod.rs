//! Kinematic chain, collision geometry and pair registry.
//!
//! The model is built once before any frame is processed and is read-only
//! afterwards. Evaluators borrow it immutably, so independent evaluators
//! can process separate frame batches over the same model without aliasing.

mod chain;
mod geometry;
mod pairs;
mod panda;

pub use chain::{Joint, JointKind, KinematicChain, WORLD_FRAME};
pub use geometry::{CollisionGeometry, GeometrySet};
pub use pairs::{CollisionPair, PairRegistry};
pub use panda::panda_with_obstacle;

use thiserror::Error;

/// Model construction and lookup errors.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Configuration vector length does not match the chain
    #[error("configuration has {actual} coordinates, chain expects {expected}")]
    DimensionMismatch {
        /// Actuated joint count of the chain
        expected: usize,
        /// Coordinate count supplied
        actual: usize,
    },

    /// A geometry name was not found in the set
    #[error("unknown collision geometry: {0}")]
    UnknownGeometry(String),

    /// A geometry name was attached twice
    #[error("duplicate collision geometry: {0}")]
    DuplicateGeometry(String),

    /// A geometry references a frame the chain does not have
    #[error("geometry {name} references frame {frame}, chain has {frame_count} frames")]
    InvalidFrame {
        /// Name of the offending geometry
        name: String,
        /// Frame index the geometry is attached to
        frame: usize,
        /// Number of frames the chain provides
        frame_count: usize,
    },

    /// The pair registry is empty
    #[error("collision pair registry is empty")]
    EmptyPairRegistry,
}

/// Complete collision model: chain + geometry set + pair registry.
///
/// Immutable after construction. The pair registration order is the output
/// column order for every evaluation against this model.
#[derive(Debug)]
pub struct CollisionModel {
    chain: KinematicChain,
    geometries: GeometrySet,
    pairs: PairRegistry,
}

impl CollisionModel {
    /// Assemble a model, validating cross-references.
    ///
    /// Every geometry must be attached to a frame the chain provides, and
    /// the pair registry must be non-empty.
    pub fn new(
        chain: KinematicChain,
        geometries: GeometrySet,
        pairs: PairRegistry,
    ) -> Result<Self, ModelError> {
        for geom in geometries.iter() {
            if geom.frame >= chain.frame_count() {
                return Err(ModelError::InvalidFrame {
                    name: geom.name.clone(),
                    frame: geom.frame,
                    frame_count: chain.frame_count(),
                });
            }
        }
        if pairs.is_empty() {
            return Err(ModelError::EmptyPairRegistry);
        }
        Ok(Self {
            chain,
            geometries,
            pairs,
        })
    }

    /// The kinematic chain.
    #[inline]
    pub fn chain(&self) -> &KinematicChain {
        &self.chain
    }

    /// The collision geometry set.
    #[inline]
    pub fn geometries(&self) -> &GeometrySet {
        &self.geometries
    }

    /// The ordered pair registry.
    #[inline]
    pub fn pairs(&self) -> &PairRegistry {
        &self.pairs
    }

    /// Actuated joint count of the chain.
    #[inline]
    pub fn dof(&self) -> usize {
        self.chain.dof()
    }

    /// Display names of the registered pairs, in registration order.
    pub fn pair_names(&self) -> Vec<String> {
        self.pairs.names().to_vec()
    }
}
