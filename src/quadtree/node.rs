use std::collections::HashSet;
use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::trace;

use crate::quadtree::neighbour::Neighbour;
use crate::quadtree::rect::{Quadrant, Rect};

/// A square-ish cell of the tree.
///
/// Children are created lazily, at most once per quadrant, and are never dropped before the
/// tree itself. Only leaves hold residents: a node that ever received a child keeps routing
/// new points downward.
#[derive(Debug)]
pub(crate) struct Node {
    bounds: Rect,
    depth: u32,
    /// Indexed by [`Quadrant::slot`].
    children: [OnceLock<Box<Node>>; 4],
    residents: Mutex<Vec<Neighbour>>,
}

impl Node {
    pub(crate) fn new(bounds: Rect, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            children: Default::default(),
            residents: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn bounds(&self) -> Rect {
        self.bounds
    }

    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }

    pub(crate) fn child(&self, quadrant: Quadrant) -> Option<&Node> {
        self.children[quadrant.slot()].get().map(|child| &**child)
    }

    /// Existing children in storage order.
    pub(crate) fn children(&self) -> impl Iterator<Item = &Node> {
        self.children
            .iter()
            .filter_map(|child| child.get().map(|child| &**child))
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.iter().all(|child| child.get().is_none())
    }

    /// Copy of the resident list, in insertion order.
    pub(crate) fn residents(&self) -> Vec<Neighbour> {
        self.residents.lock().clone()
    }

    pub(crate) fn num_residents(&self) -> usize {
        self.residents.lock().len()
    }

    /// Descend to the node whose half width drops below `leaf_extent` and append `neighbour`
    /// there, creating the quadrants on the way.
    pub(crate) fn insert(&self, neighbour: Neighbour, leaf_extent: f64) {
        let mut node = self;
        while node.bounds.width * 0.5 >= leaf_extent {
            let quadrant = node
                .bounds
                .quadrant_of(neighbour.longitude(), neighbour.latitude());
            node = node.child_or_create(quadrant);
        }
        node.residents.lock().push(neighbour);
    }

    fn child_or_create(&self, quadrant: Quadrant) -> &Node {
        self.children[quadrant.slot()].get_or_init(|| {
            let bounds = self.bounds.quadrant_bounds(quadrant);
            trace!(
                depth = self.depth + 1,
                ?quadrant,
                x = bounds.x,
                y = bounds.y,
                width = bounds.width,
                "creating child node"
            );
            Box::new(Node::new(bounds, self.depth + 1))
        })
    }

    /// Remove the first resident with this id, searching own residents first and then the
    /// children depth first in top-left, bottom-left, top-right, bottom-right order.
    pub(crate) fn remove(&self, id: i64) -> bool {
        {
            let mut residents = self.residents.lock();
            if let Some(pos) = residents.iter().position(|n| n.id() == id) {
                residents.remove(pos);
                return true;
            }
        }

        Quadrant::REMOVAL_ORDER
            .iter()
            .filter_map(|quadrant| self.child(*quadrant))
            .any(|child| child.remove(id))
    }

    /// Collect residents for the probe rectangle into `result`.
    ///
    /// A leaf that fully contains the probe contributes every resident without looking at
    /// coordinates. Only leaves that partially overlap the probe filter point by point.
    pub(crate) fn range_query(&self, probe: &Rect, result: &mut HashSet<Neighbour>) {
        let exact = if self.bounds.contains_rect(probe) {
            false
        } else if self.bounds.intersects(probe) {
            true
        } else {
            return;
        };

        let mut leaf = true;
        for child in self.children() {
            child.range_query(probe, result);
            leaf = false;
        }

        if !leaf {
            return;
        }

        let residents = self.residents.lock();
        if exact {
            result.extend(
                residents
                    .iter()
                    .filter(|n| probe.contains_point(n.longitude(), n.latitude()))
                    .copied(),
            );
        } else {
            result.extend(residents.iter().copied());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf_with(points: &[(i64, f64, f64)]) -> Node {
        let node = Node::new(Rect::new(0., 0., 10., 10.), 0);
        for (serial, (id, lat, lon)) in points.iter().enumerate() {
            node.insert(Neighbour::at(*id, *lat, *lon, serial as u64), 100.);
        }
        node
    }

    #[test]
    fn insert_stops_below_leaf_extent() {
        let root = Node::new(Rect::new(0., 0., 360., 180.), 0);
        root.insert(Neighbour::at(1, 100., 200., 0), 1.);

        let mut node = &root;
        while let Some(child) = node.children().next() {
            assert_eq!(node.num_residents(), 0);
            node = child;
        }
        assert!(node.bounds().width * 0.5 < 1.);
        assert!(node.bounds().width * 2. * 0.5 >= 1.);
        assert_eq!(node.residents()[0].id(), 1);
        assert!(node.bounds().contains_point(200., 100.));
    }

    #[test]
    fn children_created_once() {
        let root = Node::new(Rect::new(0., 0., 360., 180.), 0);
        root.insert(Neighbour::at(1, 10., 10., 0), 100.);
        root.insert(Neighbour::at(2, 20., 20., 1), 100.);
        assert_eq!(root.children().count(), 1);

        let child = root.child(Quadrant::TopLeft).unwrap();
        assert!(child.is_leaf());
        assert_eq!(child.depth(), 1);
        assert_eq!(child.num_residents(), 2);
    }

    #[test]
    fn remove_takes_first_match_only() {
        let node = leaf_with(&[(7, 1., 1.), (7, 2., 2.), (8, 3., 3.)]);
        assert!(node.remove(7));
        let left: Vec<_> = node.residents().iter().map(|n| n.latitude()).collect();
        assert_eq!(left, vec![2., 3.]);
        assert!(node.remove(7));
        assert!(!node.remove(7));
        assert_eq!(node.num_residents(), 1);
    }

    #[test]
    fn remove_searches_children_in_order() {
        let root = Node::new(Rect::new(0., 0., 4., 4.), 0);
        // bottom-left, then top-right
        root.insert(Neighbour::at(3, 3., 1., 0), 1.5);
        root.insert(Neighbour::at(3, 1., 3., 1), 1.5);

        assert!(root.remove(3));
        assert_eq!(root.child(Quadrant::BottomLeft).unwrap().num_residents(), 0);
        assert_eq!(root.child(Quadrant::TopRight).unwrap().num_residents(), 1);

        // emptied nodes stay in place
        assert_eq!(root.children().count(), 2);
    }

    #[test]
    fn contained_leaf_accepts_all() {
        let node = leaf_with(&[(1, 1., 1.), (2, 9., 9.)]);
        let mut result = HashSet::new();
        node.range_query(&Rect::new(0.5, 0.5, 1., 1.), &mut result);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn intersected_leaf_filters() {
        let node = leaf_with(&[(1, 1., 1.), (2, 9., 9.)]);
        let mut result = HashSet::new();
        node.range_query(&Rect::new(-1., -1., 3., 3.), &mut result);
        let ids: Vec<_> = result.iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn disjoint_node_contributes_nothing() {
        let node = leaf_with(&[(1, 1., 1.)]);
        let mut result = HashSet::new();
        node.range_query(&Rect::new(20., 20., 3., 3.), &mut result);
        assert!(result.is_empty());
    }
}
