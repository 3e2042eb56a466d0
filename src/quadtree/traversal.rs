//! Read-only access to the node structure, for drawing or inspecting a tree.

use crate::quadtree::node::Node;
use crate::quadtree::{Neighbour, QuadTree, Quadrant, Rect};

/// A borrowed view of one node of a [`QuadTree`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    fn new(node: &'a Node) -> Self {
        Self { node }
    }

    /// The region covered by this node, in normalized degrees.
    pub fn bounds(&self) -> Rect {
        self.node.bounds()
    }

    /// Number of subdivisions between the root and this node. The root has depth 0.
    pub fn depth(&self) -> u32 {
        self.node.depth()
    }

    /// Returns `true` if no child of this node has been created yet.
    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Returns `true` if at least one child exists.
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// The child covering `quadrant`, if a point was ever inserted there.
    pub fn child(&self, quadrant: Quadrant) -> Option<NodeRef<'a>> {
        self.node.child(quadrant).map(NodeRef::new)
    }

    /// Returns an iterator over the existing children, in top-left, top-right, bottom-left,
    /// bottom-right order.
    pub fn children(&self) -> impl Iterator<Item = (Quadrant, NodeRef<'a>)> + 'a {
        let node = self.node;
        Quadrant::ALL
            .into_iter()
            .filter_map(move |quadrant| node.child(quadrant).map(|c| (quadrant, NodeRef::new(c))))
    }

    /// A copy of the points stored directly in this node. Empty for every non-leaf node.
    pub fn neighbours(&self) -> Vec<Neighbour> {
        self.node.residents()
    }

    /// The number of points stored directly in this node.
    pub fn len(&self) -> usize {
        self.node.num_residents()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn walk(&self, f: &mut impl FnMut(NodeRef<'a>)) {
        f(*self);
        for (_, child) in self.children() {
            child.walk(f);
        }
    }
}

impl QuadTree {
    /// The root node, covering the whole domain.
    ///
    /// The view does not hold the tree lock. Nodes created by concurrent adds may or may not
    /// show up while walking it.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self.root_node())
    }

    /// Call `f` on every node, parents before their children.
    ///
    /// With [`Consistency::Strict`][crate::quadtree::Consistency::Strict] mutations wait until
    /// the walk has finished.
    pub fn visit(&self, mut f: impl FnMut(NodeRef<'_>)) {
        let _guard = self.read_guard();
        self.root().walk(&mut f);
    }

    /// The total number of nodes, including the root.
    pub fn num_nodes(&self) -> usize {
        let mut count = 0;
        self.visit(|_| count += 1);
        count
    }

    /// The number of nodes without children.
    pub fn num_leaves(&self) -> usize {
        let mut count = 0;
        self.visit(|node| {
            if node.is_leaf() {
                count += 1;
            }
        });
        count
    }

    /// The depth of the deepest node.
    pub fn max_depth(&self) -> u32 {
        let mut depth = 0;
        self.visit(|node| depth = depth.max(node.depth()));
        depth
    }

    /// The total number of stored points.
    pub fn len(&self) -> usize {
        let mut count = 0;
        self.visit(|node| count += node.len());
        count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use crate::QuadTreeBuilder;

    #[test]
    fn test_node() {
        let tree = QuadTreeBuilder::new().leaf_extent(50.).finish().unwrap();
        tree.add(1, -80., -170.);
        tree.add(2, 80., 170.);

        let root = tree.root();
        assert!(root.is_parent());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.bounds().width, 360.);
        assert!(root.neighbours().is_empty());

        let level_1 = root.children().collect::<Vec<_>>();
        assert_eq!(level_1.len(), 2);

        // 360 -> 180 -> 90 wide, half of 90 is below 50
        assert_eq!(tree.max_depth(), 2);
        assert_eq!(tree.num_nodes(), 5);
        assert_eq!(tree.num_leaves(), 2);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn visit_is_pre_order() {
        let tree = QuadTreeBuilder::new().leaf_extent(100.).finish().unwrap();
        tree.add(1, 0., 0.);

        let mut depths = vec![];
        tree.visit(|node| depths.push(node.depth()));
        assert_eq!(depths, vec![0, 1]);
    }
}
