//! Ordered collision-pair registry.

use super::{GeometrySet, ModelError};

/// A registered pair of geometry indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    /// Index of the first geometry
    pub first: usize,
    /// Index of the second geometry
    pub second: usize,
}

/// Ordered registry of collision pairs.
///
/// Registration order is load-bearing: it defines the column order of every
/// distance table produced against this registry, and it never changes after
/// model construction. The same index in every per-frame output row refers
/// to the same physical pair across the whole run.
#[derive(Debug, Default)]
pub struct PairRegistry {
    pairs: Vec<CollisionPair>,
    names: Vec<String>,
}

impl PairRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pair by geometry names, in registration order.
    ///
    /// The display name defaults to `"<first> / <second>"`; use
    /// [`register_named`](Self::register_named) to override it.
    pub fn register(
        &mut self,
        geometries: &GeometrySet,
        first: &str,
        second: &str,
    ) -> Result<(), ModelError> {
        let label = format!("{} / {}", first, second);
        self.register_named(geometries, first, second, &label)
    }

    /// Register a pair by geometry names with an explicit display name.
    ///
    /// The display name is what reports and chart legends show.
    pub fn register_named(
        &mut self,
        geometries: &GeometrySet,
        first: &str,
        second: &str,
        label: &str,
    ) -> Result<(), ModelError> {
        let first = geometries
            .index_of(first)
            .ok_or_else(|| ModelError::UnknownGeometry(first.to_string()))?;
        let second = geometries
            .index_of(second)
            .ok_or_else(|| ModelError::UnknownGeometry(second.to_string()))?;
        self.pairs.push(CollisionPair { first, second });
        self.names.push(label.to_string());
        Ok(())
    }

    /// Number of registered pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no pairs are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in registration order.
    #[inline]
    pub fn pairs(&self) -> &[CollisionPair] {
        &self.pairs
    }

    /// Display names in registration order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}
