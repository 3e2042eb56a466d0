use tracing::debug;

use crate::error::{QuadTreeError, Result};
use crate::quadtree::constants::{DEFAULT_DEGREES_PER_KM, DEFAULT_LEAF_EXTENT};
use crate::quadtree::{Consistency, QuadTree};

/// A builder to configure a [`QuadTree`].
///
/// Every setting is fixed once [`finish`][Self::finish] has been called.
///
/// ```
/// use geo_quadtree::quadtree::{Consistency, QuadTreeBuilder};
///
/// let tree = QuadTreeBuilder::new()
///     .leaf_extent(0.5)
///     .degrees_per_km(1. / 111.)
///     .consistency(Consistency::Strict)
///     .finish()
///     .unwrap();
/// assert_eq!(tree.leaf_extent(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadTreeBuilder {
    leaf_extent: f64,
    degrees_per_km: f64,
    consistency: Consistency,
}

impl QuadTreeBuilder {
    /// Create a new builder with the default settings.
    pub fn new() -> Self {
        Self {
            leaf_extent: DEFAULT_LEAF_EXTENT,
            degrees_per_km: DEFAULT_DEGREES_PER_KM,
            consistency: Consistency::default(),
        }
    }

    /// Stop subdividing once half of a node's width is below this many degrees.
    pub fn leaf_extent(mut self, degrees: f64) -> Self {
        self.leaf_extent = degrees;
        self
    }

    /// Linear factor converting a query radius from kilometres to degrees.
    pub fn degrees_per_km(mut self, factor: f64) -> Self {
        self.degrees_per_km = factor;
        self
    }

    /// Which operations wait on the whole-tree lock.
    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    /// Validate the settings and create an empty tree.
    pub fn finish(self) -> Result<QuadTree> {
        if !(self.leaf_extent.is_finite() && self.leaf_extent > 0.) {
            return Err(QuadTreeError::InvalidConfig(format!(
                "leaf extent must be a positive number of degrees, got {}",
                self.leaf_extent
            )));
        }

        if !(self.degrees_per_km.is_finite() && self.degrees_per_km > 0.) {
            return Err(QuadTreeError::InvalidConfig(format!(
                "degrees per km must be positive, got {}",
                self.degrees_per_km
            )));
        }

        debug!(
            leaf_extent = self.leaf_extent,
            degrees_per_km = self.degrees_per_km,
            consistency = ?self.consistency,
            "building quadtree"
        );

        Ok(QuadTree::from_parts(
            self.leaf_extent,
            self.degrees_per_km,
            self.consistency,
        ))
    }
}

impl Default for QuadTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let tree = QuadTreeBuilder::new().finish().unwrap();
        assert_eq!(tree.leaf_extent(), DEFAULT_LEAF_EXTENT);
        assert_eq!(tree.degrees_per_km(), DEFAULT_DEGREES_PER_KM);
        assert_eq!(tree.consistency(), Consistency::InsertOnly);
        assert!(tree.is_empty());
    }

    #[test]
    fn rejects_bad_settings() {
        for extent in [0., -1., f64::NAN, f64::INFINITY] {
            let err = QuadTreeBuilder::new().leaf_extent(extent).finish();
            assert!(matches!(err, Err(QuadTreeError::InvalidConfig(_))));
        }

        let err = QuadTreeBuilder::new().degrees_per_km(0.).finish();
        assert!(matches!(err, Err(QuadTreeError::InvalidConfig(_))));
    }
}
