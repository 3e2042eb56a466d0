use std::hash::{Hash, Hasher};

use crate::quadtree::constants::{NORMALIZE_X, NORMALIZE_Y};

/// A point of interest stored in a [`QuadTree`][crate::QuadTree].
///
/// Coordinates are kept in the normalized domain (latitude in `[0, 180]`, longitude in
/// `[0, 360]`). Each call to `add` creates a distinct record: equality and hashing follow
/// the record, not the id, so two records sharing an id remain separate members of a query
/// result set.
#[derive(Debug, Clone, Copy)]
pub struct Neighbour {
    id: i64,
    latitude: f64,
    longitude: f64,
    raw_latitude: f64,
    raw_longitude: f64,
    serial: u64,
}

impl Neighbour {
    pub(crate) fn new(id: i64, raw_latitude: f64, raw_longitude: f64, serial: u64) -> Self {
        Self {
            id,
            latitude: normalize_latitude(raw_latitude),
            longitude: normalize_longitude(raw_longitude),
            raw_latitude,
            raw_longitude,
            serial,
        }
    }

    /// A record placed directly at normalized coordinates.
    #[cfg(test)]
    pub(crate) fn at(id: i64, latitude: f64, longitude: f64, serial: u64) -> Self {
        Self {
            id,
            latitude,
            longitude,
            raw_latitude: latitude - NORMALIZE_Y,
            raw_longitude: longitude - NORMALIZE_X,
            serial,
        }
    }

    /// The caller supplied id. Not required to be unique.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Normalized latitude, the `y` coordinate inside the tree.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Normalized longitude, the `x` coordinate inside the tree.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude exactly as passed to `add`.
    pub fn raw_latitude(&self) -> f64 {
        self.raw_latitude
    }

    /// Longitude exactly as passed to `add`.
    pub fn raw_longitude(&self) -> f64 {
        self.raw_longitude
    }
}

#[inline]
pub(crate) fn normalize_latitude(latitude: f64) -> f64 {
    latitude + NORMALIZE_Y
}

#[inline]
pub(crate) fn normalize_longitude(longitude: f64) -> f64 {
    longitude + NORMALIZE_X
}

impl PartialEq for Neighbour {
    fn eq(&self, other: &Self) -> bool {
        self.serial == other.serial
    }
}

impl Eq for Neighbour {}

impl Hash for Neighbour {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serial.hash(state);
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn same_id_distinct_records() {
        let a = Neighbour::new(5, 0., 0., 0);
        let b = Neighbour::new(5, 0., 0., 1);
        assert_ne!(a, b);

        let set: HashSet<_> = [a, b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn raw_coordinates() {
        let n = Neighbour::new(1, 10., 20., 0);
        assert_eq!(n.latitude(), 100.);
        assert_eq!(n.longitude(), 200.);
        assert_eq!(n.raw_latitude(), 10.);
        assert_eq!(n.raw_longitude(), 20.);
    }

    #[test]
    fn raw_coordinates_keep_full_precision() {
        // 1e-20 + 90 rounds to 90, and 0.1 + 180 - 180 is not 0.1
        let n = Neighbour::new(1, 1e-20, 0.1, 0);
        assert_eq!(n.raw_latitude(), 1e-20);
        assert_eq!(n.raw_longitude(), 0.1);
        assert_eq!(n.latitude(), 90.);
    }
}
