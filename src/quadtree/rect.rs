//! Axis-aligned rectangles in the normalized degree domain.
//!
//! The `x` axis carries longitude and the `y` axis carries latitude. Following the screen
//! convention of the renderer that draws these trees, `y` grows downward, so the "top"
//! quadrants of a node are the ones with the smaller latitude.

use geo_traits::{
    CoordTrait, Dimensions, GeometryTrait, GeometryType, RectTrait, UnimplementedGeometryCollection,
    UnimplementedLine, UnimplementedLineString, UnimplementedMultiLineString,
    UnimplementedMultiPoint, UnimplementedMultiPolygon, UnimplementedPoint, UnimplementedPolygon,
    UnimplementedTriangle,
};

/// One of the four equal quarters a node is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Smaller longitude, smaller latitude.
    TopLeft,
    /// Larger longitude, smaller latitude.
    TopRight,
    /// Smaller longitude, larger latitude.
    BottomLeft,
    /// Larger longitude, larger latitude.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in storage order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    /// The order in which removal searches the children of a node.
    pub(crate) const REMOVAL_ORDER: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::BottomLeft,
        Quadrant::TopRight,
        Quadrant::BottomRight,
    ];

    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }
}

/// A rectangle given by its origin corner and its extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the maximum `x` value of this rectangle.
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Get the maximum `y` value of this rectangle.
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Returns `true` if this rectangle encloses no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns `true` if `other` lies entirely inside this rectangle.
    ///
    /// Edges may touch. An empty rectangle neither contains nor is contained by anything.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Returns `true` if the interiors of the two rectangles overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        other.max_x() > self.x
            && other.max_y() > self.y
            && other.x < self.max_x()
            && other.y < self.max_y()
    }

    /// Half-open point test: the minimum edges are inside, the maximum edges are not.
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && y >= self.y && x < self.max_x() && y < self.max_y()
    }

    /// The quadrant a point falls in when this rectangle is split at its midpoint.
    ///
    /// Points exactly on a midline go right or bottom.
    pub fn quadrant_of(&self, x: f64, y: f64) -> Quadrant {
        let left = x < self.x + self.width * 0.5;
        let top = y < self.y + self.height * 0.5;
        match (left, top) {
            (true, true) => Quadrant::TopLeft,
            (true, false) => Quadrant::BottomLeft,
            (false, true) => Quadrant::TopRight,
            (false, false) => Quadrant::BottomRight,
        }
    }

    /// The quarter of this rectangle covered by `quadrant`.
    pub fn quadrant_bounds(&self, quadrant: Quadrant) -> Rect {
        let half_width = self.width * 0.5;
        let half_height = self.height * 0.5;
        match quadrant {
            Quadrant::TopLeft => Rect::new(self.x, self.y, half_width, half_height),
            Quadrant::TopRight => {
                Rect::new(self.x + half_width, self.y, half_width, half_height)
            }
            Quadrant::BottomLeft => {
                Rect::new(self.x, self.y + half_height, half_width, half_height)
            }
            Quadrant::BottomRight => Rect::new(
                self.x + half_width,
                self.y + half_height,
                half_width,
                half_height,
            ),
        }
    }

    /// Copy any geo-traits rectangle into a [`Rect`].
    pub fn from_rect_trait(rect: &impl RectTrait<T = f64>) -> Self {
        let min = rect.min();
        let max = rect.max();
        Rect::new(min.x(), min.y(), max.x() - min.x(), max.y() - min.y())
    }
}

/// A corner of a [`Rect`], handed out by its `min` and `max` accessors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    x: f64,
    y: f64,
}

impl CoordTrait for Coord {
    type T = f64;

    fn dim(&self) -> Dimensions {
        Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Coord has only two dimensions, got index {n}"),
        }
    }
}

impl GeometryTrait for Rect {
    type T = f64;
    type PointType<'a>
        = UnimplementedPoint<f64>
    where
        Self: 'a;
    type LineStringType<'a>
        = UnimplementedLineString<f64>
    where
        Self: 'a;
    type PolygonType<'a>
        = UnimplementedPolygon<f64>
    where
        Self: 'a;
    type MultiPointType<'a>
        = UnimplementedMultiPoint<f64>
    where
        Self: 'a;
    type MultiLineStringType<'a>
        = UnimplementedMultiLineString<f64>
    where
        Self: 'a;
    type MultiPolygonType<'a>
        = UnimplementedMultiPolygon<f64>
    where
        Self: 'a;
    type GeometryCollectionType<'a>
        = UnimplementedGeometryCollection<f64>
    where
        Self: 'a;
    type RectType<'a>
        = Rect
    where
        Self: 'a;
    type TriangleType<'a>
        = UnimplementedTriangle<f64>
    where
        Self: 'a;
    type LineType<'a>
        = UnimplementedLine<f64>
    where
        Self: 'a;

    fn dim(&self) -> Dimensions {
        Dimensions::Xy
    }

    fn as_type(
        &self,
    ) -> GeometryType<
        '_,
        UnimplementedPoint<f64>,
        UnimplementedLineString<f64>,
        UnimplementedPolygon<f64>,
        UnimplementedMultiPoint<f64>,
        UnimplementedMultiLineString<f64>,
        UnimplementedMultiPolygon<f64>,
        UnimplementedGeometryCollection<f64>,
        Rect,
        UnimplementedTriangle<f64>,
        UnimplementedLine<f64>,
    > {
        GeometryType::Rect(self)
    }
}

impl RectTrait for Rect {
    type CoordType<'a>
        = Coord
    where
        Self: 'a;

    fn min(&self) -> Self::CoordType<'_> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }

    fn max(&self) -> Self::CoordType<'_> {
        Coord {
            x: self.max_x(),
            y: self.max_y(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn containment_allows_touching_edges() {
        let outer = Rect::new(0., 0., 10., 10.);
        assert!(outer.contains_rect(&Rect::new(0., 0., 10., 10.)));
        assert!(outer.contains_rect(&Rect::new(2., 3., 4., 5.)));
        assert!(!outer.contains_rect(&Rect::new(8., 8., 4., 1.)));
        assert!(!outer.contains_rect(&Rect::new(2., 2., 0., 1.)));
    }

    #[test]
    fn intersection_excludes_shared_edges() {
        let a = Rect::new(0., 0., 10., 10.);
        assert!(a.intersects(&Rect::new(9., 9., 5., 5.)));
        assert!(!a.intersects(&Rect::new(10., 0., 5., 5.)));
        assert!(!a.intersects(&Rect::new(20., 20., 5., 5.)));
        assert!(!a.intersects(&Rect::new(5., 5., 0., 5.)));
    }

    #[test]
    fn point_test_is_half_open() {
        let r = Rect::new(1., 1., 2., 2.);
        assert!(r.contains_point(1., 1.));
        assert!(r.contains_point(2.5, 2.9));
        assert!(!r.contains_point(3., 2.));
        assert!(!r.contains_point(2., 3.));
    }

    #[test]
    fn midpoint_goes_right_and_bottom() {
        let r = Rect::new(0., 0., 360., 180.);
        assert_eq!(r.quadrant_of(180., 90.), Quadrant::BottomRight);
        assert_eq!(r.quadrant_of(179.9, 89.9), Quadrant::TopLeft);
        assert_eq!(r.quadrant_of(179.9, 90.), Quadrant::BottomLeft);
        assert_eq!(r.quadrant_of(180., 10.), Quadrant::TopRight);
    }

    #[test]
    fn quadrants_partition_parent() {
        let parent = Rect::new(10., 20., 8., 4.);
        let quarters = Quadrant::ALL.map(|q| parent.quadrant_bounds(q));
        let area: f64 = quarters.iter().map(|r| r.width * r.height).sum();
        assert_eq!(area, parent.width * parent.height);
        for q in quarters {
            assert!(parent.contains_rect(&q));
        }
        assert_eq!(quarters[3], Rect::new(14., 22., 4., 2.));
    }

    #[test]
    fn rect_trait_round_trip() {
        let r = Rect::new(1.5, 2.5, 3., 4.);
        assert_eq!(r.min().x(), 1.5);
        assert_eq!(r.max().y(), 6.5);
        assert_eq!(Rect::from_rect_trait(&r), r);
    }

    #[test]
    fn rect_is_a_geometry() {
        let r = Rect::new(10., 20., 5., 5.);
        assert_eq!(GeometryTrait::dim(&r), Dimensions::Xy);
        match r.as_type() {
            GeometryType::Rect(rect) => assert_eq!(rect.max().x(), 15.),
            _ => panic!("expected a rect"),
        }
    }
}
