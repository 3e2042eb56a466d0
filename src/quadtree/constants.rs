//! Fixed geometry of the latitude/longitude domain and the builder defaults.

/// Longitude span of the domain, -180 to 180.
pub const TOTAL_X_DEGREES: f64 = 360.0;

/// Latitude span of the domain, -90 to 90.
pub const TOTAL_Y_DEGREES: f64 = 180.0;

/// Added to a raw longitude to move it into `[0, 360]`.
pub const NORMALIZE_X: f64 = 180.0;

/// Added to a raw latitude to move it into `[0, 180]`.
pub const NORMALIZE_Y: f64 = 90.0;

/// Nodes whose half width falls below this many degrees stop subdividing.
pub const DEFAULT_LEAF_EXTENT: f64 = 1.0;

/// Kilometres covered by one degree along the equator.
pub const KM_PER_DEGREE: f64 = 111.32;

/// Linear conversion used to turn a search radius into degrees.
pub const DEFAULT_DEGREES_PER_KM: f64 = 1.0 / KM_PER_DEGREE;
