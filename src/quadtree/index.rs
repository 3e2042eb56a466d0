use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use geo_traits::RectTrait;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

use crate::quadtree::constants::{
    DEFAULT_DEGREES_PER_KM, DEFAULT_LEAF_EXTENT, TOTAL_X_DEGREES, TOTAL_Y_DEGREES,
};
use crate::quadtree::neighbour::{normalize_latitude, normalize_longitude};
use crate::quadtree::node::Node;
use crate::quadtree::{Consistency, Neighbour, Rect};

/// A quadtree of points of interest over the whole latitude/longitude domain.
///
/// The tree only grows: nodes are created while inserting and are kept even after every
/// point in them has been removed. All operations take `&self`, so a tree can be shared
/// between threads behind an [`Arc`][std::sync::Arc].
///
/// ```
/// use geo_quadtree::QuadTree;
///
/// let tree = QuadTree::new();
/// tree.add(1, 10., 20.);
/// tree.add(2, -45., 170.);
///
/// let ids = tree.query_ids(10., 20., 150.);
/// assert!(ids.contains(&1));
/// assert!(!ids.contains(&2));
///
/// assert!(tree.remove(1));
/// assert!(tree.query_ids(10., 20., 150.).is_empty());
/// ```
#[derive(Debug)]
pub struct QuadTree {
    root: Node,
    leaf_extent: f64,
    degrees_per_km: f64,
    consistency: Consistency,
    lock: RwLock<()>,
    next_serial: AtomicU64,
}

impl QuadTree {
    /// Create an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(
            DEFAULT_LEAF_EXTENT,
            DEFAULT_DEGREES_PER_KM,
            Consistency::default(),
        )
    }

    pub(crate) fn from_parts(
        leaf_extent: f64,
        degrees_per_km: f64,
        consistency: Consistency,
    ) -> Self {
        Self {
            root: Node::new(Rect::new(0., 0., TOTAL_X_DEGREES, TOTAL_Y_DEGREES), 0),
            leaf_extent,
            degrees_per_km,
            consistency,
            lock: RwLock::new(()),
            next_serial: AtomicU64::new(0),
        }
    }

    /// Half widths below this many degrees stop subdividing.
    pub fn leaf_extent(&self) -> f64 {
        self.leaf_extent
    }

    /// Scale factor turning a radius in kilometres into degrees.
    pub fn degrees_per_km(&self) -> f64 {
        self.degrees_per_km
    }

    pub fn consistency(&self) -> Consistency {
        self.consistency
    }

    pub(crate) fn root_node(&self) -> &Node {
        &self.root
    }

    /// Insert a point. Duplicate ids are allowed and create separate records.
    ///
    /// Coordinates are shifted into the non-negative domain by adding 90 to the latitude and
    /// 180 to the longitude. Values outside `[-90, 90]` and `[-180, 180]` are not rejected.
    pub fn add(&self, id: i64, latitude: f64, longitude: f64) {
        let _guard = self.lock.write();
        let serial = self.next_serial.fetch_add(1, Ordering::Relaxed);
        let neighbour = Neighbour::new(id, latitude, longitude, serial);
        self.root.insert(neighbour, self.leaf_extent);
    }

    /// Remove one record with this id. Returns `false` if none was found.
    ///
    /// When several records share the id only the first one found is removed.
    pub fn remove(&self, id: i64) -> bool {
        let _guard = self.write_guard();
        let removed = self.root.remove(id);
        if !removed {
            debug!(id, "no neighbour to remove");
        }
        removed
    }

    /// Find the points around a location.
    ///
    /// The radius is converted to degrees with the linear [`degrees_per_km`][Self::degrees_per_km]
    /// factor and the search runs over the square built by [`probe_rect`][Self::probe_rect].
    /// The result is approximate: every point of a leaf that fully contains the square is
    /// returned, even if it lies outside the square itself. The square does not wrap around
    /// the antimeridian or the poles.
    pub fn query(&self, latitude: f64, longitude: f64, radius_km: f64) -> HashSet<Neighbour> {
        let probe = self.probe_rect(latitude, longitude, radius_km);
        let result = self.query_probe(&probe);
        trace!(
            latitude,
            longitude,
            radius_km,
            found = result.len(),
            "query"
        );
        result
    }

    /// The ids of [`query`][Self::query]. Records sharing an id collapse into one entry.
    pub fn query_ids(&self, latitude: f64, longitude: f64, radius_km: f64) -> HashSet<i64> {
        self.query(latitude, longitude, radius_km)
            .iter()
            .map(Neighbour::id)
            .collect()
    }

    /// Run the range search with a rectangle already in the normalized domain.
    pub fn query_rect(&self, rect: &impl RectTrait<T = f64>) -> HashSet<Neighbour> {
        self.query_probe(&Rect::from_rect_trait(rect))
    }

    fn query_probe(&self, probe: &Rect) -> HashSet<Neighbour> {
        let _guard = self.read_guard();
        let mut result = HashSet::new();
        self.root.range_query(probe, &mut result);
        result
    }

    /// The normalized-domain square searched by [`query`][Self::query].
    ///
    /// The origin is clamped to zero and each side to the domain size, independently.
    pub fn probe_rect(&self, latitude: f64, longitude: f64, radius_km: f64) -> Rect {
        let range = radius_km * self.degrees_per_km;
        let latitude = normalize_latitude(latitude);
        let longitude = normalize_longitude(longitude);
        Rect::new(
            (longitude - range).max(0.),
            (latitude - range).max(0.),
            (range * 2.).min(TOTAL_X_DEGREES),
            (range * 2.).min(TOTAL_Y_DEGREES),
        )
    }

    /// Shared guard for readers under [`Consistency::Strict`].
    ///
    /// Recursive, so a `visit` callback can query the tree while a writer is queued.
    pub(crate) fn read_guard(&self) -> Option<RwLockReadGuard<'_, ()>> {
        match self.consistency {
            Consistency::InsertOnly => None,
            Consistency::Strict => Some(self.lock.read_recursive()),
        }
    }

    fn write_guard(&self) -> Option<RwLockWriteGuard<'_, ()>> {
        match self.consistency {
            Consistency::InsertOnly => None,
            Consistency::Strict => Some(self.lock.write()),
        }
    }

    #[cfg(test)]
    pub(crate) fn hold_lock(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write()
    }
}

impl Default for QuadTree {
    fn default() -> Self {
        Self::new()
    }
}
