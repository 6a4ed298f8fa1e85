//! Named collision geometries attached to chain frames.

use nalgebra::Isometry3;
use parry3d_f64::shape::SharedShape;

use super::ModelError;

/// A named convex collision geometry attached to a chain frame.
pub struct CollisionGeometry {
    /// Unique geometry name (pair registration key)
    pub name: String,
    /// Frame the geometry is attached to
    pub frame: usize,
    /// Placement relative to the attachment frame
    pub local: Isometry3<f64>,
    /// The collision shape
    pub shape: SharedShape,
}

impl std::fmt::Debug for CollisionGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionGeometry")
            .field("name", &self.name)
            .field("frame", &self.frame)
            .field("local", &self.local)
            .finish_non_exhaustive()
    }
}

impl CollisionGeometry {
    /// Create a geometry attached to `frame` with the given local placement.
    pub fn new(name: &str, frame: usize, local: Isometry3<f64>, shape: SharedShape) -> Self {
        Self {
            name: name.to_string(),
            frame,
            local,
            shape,
        }
    }
}

/// An ordered set of named collision geometries.
///
/// Geometry indices are stable: they are assigned at attachment and never
/// change, so a pair registered against this set stays valid for the
/// lifetime of the model.
#[derive(Debug, Default)]
pub struct GeometrySet {
    geometries: Vec<CollisionGeometry>,
}

impl GeometrySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a geometry, returning its index.
    ///
    /// Names must be unique within the set.
    pub fn attach(&mut self, geometry: CollisionGeometry) -> Result<usize, ModelError> {
        if self.index_of(&geometry.name).is_some() {
            return Err(ModelError::DuplicateGeometry(geometry.name));
        }
        self.geometries.push(geometry);
        Ok(self.geometries.len() - 1)
    }

    /// Number of geometries.
    #[inline]
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// True when the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Geometry by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&CollisionGeometry> {
        self.geometries.get(index)
    }

    /// Index of the named geometry.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.geometries.iter().position(|g| g.name == name)
    }

    /// Iterate over geometries in attachment order.
    pub fn iter(&self) -> impl Iterator<Item = &CollisionGeometry> {
        self.geometries.iter()
    }

    /// Compute world placements for every geometry.
    ///
    /// `frames` must hold the chain's frame transforms for the current
    /// configuration (see [`KinematicChain::forward_into`]). The output
    /// buffer is cleared and reused. Placements are transient: they are
    /// only valid for the configuration `frames` was computed from.
    ///
    /// [`KinematicChain::forward_into`]: super::KinematicChain::forward_into
    pub fn placements_into(&self, frames: &[Isometry3<f64>], out: &mut Vec<Isometry3<f64>>) {
        out.clear();
        for geom in &self.geometries {
            out.push(frames[geom.frame] * geom.local);
        }
    }
}
